use geo::algorithm::convex_hull::ConvexHull as GeoConvexHull;
use geo::Area;

use crate::coord::CoordBuffer;
use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::io::geo::geometry_from_geo;

/// The smallest convex geometry containing every coordinate.
///
/// Fewer than three distinct or collinear coordinates give a point or a line string
/// instead of a polygon.
pub trait ConvexHull {
    fn convex_hull(&self) -> NativeGeometry;
}

impl ConvexHull for NativeGeometry {
    fn convex_hull(&self) -> NativeGeometry {
        let mut coords: Vec<geo::Coord> = vec![];
        for c in self.coords() {
            let c = geo::Coord::from(c);
            if !coords.contains(&c) {
                coords.push(c);
            }
        }
        match coords.len() {
            0 => return NativeGeometry::empty(GeometryType::Polygon, Dimension::XY),
            1 => return NativeGeometry::point(coords[0].into()),
            _ => {}
        }

        let hull = geo::MultiPoint::from(coords.clone()).convex_hull();
        if hull.unsigned_area() > 0.0 {
            return geometry_from_geo(&geo::Geometry::Polygon(hull));
        }

        // Collinear input: the two extreme coordinates along the line.
        let first = coords[0];
        let key = |c: &geo::Coord| {
            let d = *c - first;
            (d.x, d.y)
        };
        let direction = coords
            .iter()
            .map(key)
            .max_by(|a, b| (a.0.abs() + a.1.abs()).total_cmp(&(b.0.abs() + b.1.abs())))
            .unwrap_or((1.0, 0.0));
        let along = |c: &geo::Coord| {
            let (dx, dy) = key(c);
            dx * direction.0 + dy * direction.1
        };
        let start = coords
            .iter()
            .min_by(|a, b| along(a).total_cmp(&along(b)))
            .copied()
            .unwrap_or(first);
        let end = coords
            .iter()
            .max_by(|a, b| along(a).total_cmp(&along(b)))
            .copied()
            .unwrap_or(first);
        NativeGeometry::LineString(CoordBuffer::from([start, end].as_slice()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::geo::{Predicate, Relate};
    use crate::io::wkt::read_wkt;

    fn geom(wkt: &str) -> NativeGeometry {
        read_wkt(wkt).unwrap().0
    }

    #[test]
    fn l_shape() {
        let hull = geom("POLYGON((0 0,4 0,4 1,1 1,1 4,0 4,0 0))").convex_hull();
        assert!(hull.predicate(&geom("POLYGON((0 0,4 0,4 1,1 4,0 4,0 0))"), Predicate::Equals));
    }

    #[test]
    fn degenerate() {
        assert_eq!(geom("MULTIPOINT(1 1,1 1)").convex_hull(), geom("POINT(1 1)"));
        let hull = geom("MULTIPOINT(0 0,2 2,1 1)").convex_hull();
        assert_eq!(hull.geometry_type(), GeometryType::LineString);
        assert!(hull.predicate(&geom("LINESTRING(0 0,2 2)"), Predicate::Equals));
        assert!(geom("POINT EMPTY").convex_hull().is_empty());
    }
}
