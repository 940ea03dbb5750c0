use geo::EuclideanLength as GeoEuclideanLength;

use crate::algorithm::geo::utils::Components;
use crate::engine::NativeGeometry;

/// Planar length of a geometry: the length of its lines plus the perimeter of its polygons.
pub trait EuclideanLength {
    fn euclidean_length(&self) -> f64;
}

impl EuclideanLength for NativeGeometry {
    fn euclidean_length(&self) -> f64 {
        let components = Components::of(self);
        let lines: f64 = components.lines.iter().map(|l| l.euclidean_length()).sum();
        let rings: f64 = components
            .areas
            .0
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
            .map(|r| r.euclidean_length())
            .sum();
        lines + rings
    }
}
