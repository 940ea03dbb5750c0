use geo::BoundingRect;

use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::io::geo::{geometry_from_geo, geometry_to_geo};

/// The bounding rectangle of a geometry as a polygon.
///
/// A geometry whose extent is a single position gives that point; an empty geometry gives
/// an empty polygon.
pub trait Envelope {
    fn envelope(&self) -> NativeGeometry;
}

impl Envelope for NativeGeometry {
    fn envelope(&self) -> NativeGeometry {
        match geometry_to_geo(self).bounding_rect() {
            Some(rect) if rect.min() == rect.max() => NativeGeometry::point(rect.min().into()),
            Some(rect) => geometry_from_geo(&geo::Geometry::Rect(rect)),
            None => NativeGeometry::empty(GeometryType::Polygon, Dimension::XY),
        }
    }
}
