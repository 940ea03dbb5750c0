use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::coord::CoordBuffer;
use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};
use crate::io::geo::{line_string_to_geo, polygon_to_geo};

/// A geometry split by topological dimension.
#[derive(Debug, Clone)]
pub(crate) struct Components {
    pub points: Vec<geo::Coord>,
    pub lines: Vec<geo::LineString>,
    pub areas: geo::MultiPolygon,
}

impl Default for Components {
    fn default() -> Self {
        Self {
            points: vec![],
            lines: vec![],
            areas: geo::MultiPolygon::new(vec![]),
        }
    }
}

impl Components {
    pub fn of(geom: &NativeGeometry) -> Self {
        let mut out = Self::default();
        out.extend(geom);
        out
    }

    fn extend(&mut self, geom: &NativeGeometry) {
        match geom {
            NativeGeometry::Point(c) => self.points.extend(c.to_geo()),
            NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                if c.len() > 1 {
                    self.lines.push(line_string_to_geo(c))
                }
            }
            NativeGeometry::Polygon(rings) => {
                if rings.first().map_or(false, |shell| !shell.is_empty()) {
                    self.areas.0.push(polygon_to_geo(rings))
                }
            }
            NativeGeometry::MultiPoint(parts)
            | NativeGeometry::MultiLineString(parts)
            | NativeGeometry::MultiPolygon(parts)
            | NativeGeometry::GeometryCollection(parts) => {
                parts.iter().for_each(|p| self.extend(p))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.areas.0.is_empty()
    }

    /// The highest topological dimension present, or `None` when empty.
    pub fn dimension(&self) -> Option<u8> {
        if !self.areas.0.is_empty() {
            Some(2)
        } else if !self.lines.is_empty() {
            Some(1)
        } else if !self.points.is_empty() {
            Some(0)
        } else {
            None
        }
    }

    pub fn lines_geo(&self) -> geo::MultiLineString {
        geo::MultiLineString::new(self.lines.clone())
    }

    /// Assemble into the simplest geometry holding every component.
    ///
    /// A single kind of component gives a single geometry or the matching multi type, mixed
    /// kinds give a collection. No components gives an empty geometry of `empty_type`.
    pub fn into_native(self, empty_type: GeometryType) -> NativeGeometry {
        let mut points: Vec<_> = self
            .points
            .iter()
            .map(|c| NativeGeometry::point((*c).into()))
            .collect();
        let mut lines: Vec<_> = self
            .lines
            .iter()
            .map(|l| NativeGeometry::LineString(CoordBuffer::from(l.0.as_slice())))
            .collect();
        let mut areas: Vec<_> = self
            .areas
            .0
            .iter()
            .filter(|p| !p.exterior().0.is_empty())
            .map(|p| {
                let rings = std::iter::once(p.exterior())
                    .chain(p.interiors())
                    .map(|r| CoordBuffer::from(r.0.as_slice()))
                    .collect();
                NativeGeometry::Polygon(rings)
            })
            .collect();

        match (points.len(), lines.len(), areas.len()) {
            (0, 0, 0) => NativeGeometry::empty(empty_type, Dimension::XY),
            (1, 0, 0) => points.remove(0),
            (_, 0, 0) => NativeGeometry::MultiPoint(points),
            (0, 1, 0) => lines.remove(0),
            (0, _, 0) => NativeGeometry::MultiLineString(lines),
            (0, 0, 1) => areas.remove(0),
            (0, 0, _) => NativeGeometry::MultiPolygon(areas),
            _ => {
                points.append(&mut lines);
                points.append(&mut areas);
                NativeGeometry::GeometryCollection(points)
            }
        }
    }
}

/// The empty geometry type standing for a topological dimension.
pub(crate) fn empty_type_for_dimension(dim: Option<u8>) -> GeometryType {
    match dim {
        Some(0) => GeometryType::Point,
        Some(1) => GeometryType::LineString,
        _ => GeometryType::Polygon,
    }
}

/// Run a `geo` algorithm, turning a panic inside it into an engine error.
pub(crate) fn guarded<T>(operation: &str, f: impl FnOnce() -> T) -> Result<T> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|_| {
        GeoHandleError::Engine(format!("{operation} failed on degenerate input"))
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;

    fn components(wkt: &str) -> Components {
        Components::of(&read_wkt(wkt).unwrap().0)
    }

    #[test]
    fn split_by_dimension() {
        let c = components(
            "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1),POLYGON((0 0,0 1,1 1,0 0)))",
        );
        assert_eq!(c.points.len(), 1);
        assert_eq!(c.lines.len(), 1);
        assert_eq!(c.areas.0.len(), 1);
        assert_eq!(c.dimension(), Some(2));
        assert_eq!(components("MULTIPOINT(0 0,1 1)").dimension(), Some(0));
        assert_eq!(components("POLYGON EMPTY").dimension(), None);
    }

    #[test]
    fn assemble() {
        let geom = components("MULTIPOLYGON(((0 0,0 1,1 1,0 0)))").into_native(GeometryType::Polygon);
        assert_eq!(geom.geometry_type(), GeometryType::Polygon);
        let geom = components("MULTIPOINT(0 0,1 1)").into_native(GeometryType::Point);
        assert_eq!(geom.geometry_type(), GeometryType::MultiPoint);
        let geom = Components::default().into_native(GeometryType::Polygon);
        assert!(geom.is_empty());
        assert_eq!(geom.geometry_type(), GeometryType::Polygon);
    }

    #[test]
    fn guarded_panics() {
        assert_eq!(guarded("add", || 1 + 1).unwrap(), 2);
        let err = guarded("boom", || -> i32 { panic!("boom") }).unwrap_err();
        assert!(matches!(err, GeoHandleError::Engine(_)));
    }
}
