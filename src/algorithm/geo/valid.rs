use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::Line;
use itertools::Itertools;

use crate::algorithm::geo::relate::{Predicate, Relate};
use crate::coord::CoordBuffer;
use crate::engine::NativeGeometry;
use crate::io::geo::line_string_to_geo;

/// Structural validity of geometries.
pub trait Validity {
    /// Whether the geometry is well formed.
    ///
    /// Curves need at least two coordinates, rings must be closed and simple with at least
    /// four coordinates, holes must lie inside their shell and the members of a
    /// multipolygon may not share interior. Empty geometries are valid.
    fn is_valid(&self) -> bool;

    /// Whether the geometry is a closed, simple curve.
    fn is_ring(&self) -> bool;
}

impl Validity for NativeGeometry {
    fn is_valid(&self) -> bool {
        match self {
            NativeGeometry::Point(_) => true,
            NativeGeometry::LineString(c) => c.is_empty() || c.len() >= 2,
            NativeGeometry::LinearRing(c) => c.is_empty() || ring_is_valid(c),
            NativeGeometry::Polygon(rings) => polygon_is_valid(rings),
            NativeGeometry::MultiPolygon(parts) => {
                parts.iter().all(|p| p.is_valid())
                    && parts
                        .iter()
                        .filter(|p| !p.is_empty())
                        .tuple_combinations()
                        .all(|(a, b)| a.relate(b).as_str().as_bytes()[0] == b'F')
            }
            NativeGeometry::MultiPoint(parts)
            | NativeGeometry::MultiLineString(parts)
            | NativeGeometry::GeometryCollection(parts) => parts.iter().all(|p| p.is_valid()),
        }
    }

    fn is_ring(&self) -> bool {
        match self {
            NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                !c.is_empty() && c.is_closed() && is_simple(c)
            }
            _ => false,
        }
    }
}

fn ring_is_valid(ring: &CoordBuffer) -> bool {
    ring.len() >= 4 && ring.is_closed() && is_simple(ring)
}

fn polygon_is_valid(rings: &[CoordBuffer]) -> bool {
    let Some((shell, holes)) = rings.split_first() else {
        return true;
    };
    if shell.is_empty() {
        return holes.is_empty();
    }
    if !rings.iter().all(ring_is_valid) {
        return false;
    }
    let shell_area = NativeGeometry::Polygon(vec![shell.clone()]);
    holes.iter().all(|hole| {
        NativeGeometry::Polygon(vec![hole.clone()]).predicate(&shell_area, Predicate::CoveredBy)
    })
}

/// Whether a curve has no self intersection other than a closing vertex.
fn is_simple(coords: &CoordBuffer) -> bool {
    let mut points = line_string_to_geo(coords).0;
    points.dedup();
    let segments: Vec<Line> = points.windows(2).map(|w| Line::new(w[0], w[1])).collect();
    let n = segments.len();
    let closed = n > 1 && points.first() == points.last();

    (0..n).tuple_combinations().all(|(i, j)| {
        let adjacent = j == i + 1;
        let wraps = closed && i == 0 && j == n - 1;
        match line_intersection(segments[i], segments[j]) {
            None => true,
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                (adjacent && intersection == segments[i].end)
                    || (wraps && intersection == segments[i].start)
            }
            Some(LineIntersection::Collinear { .. }) => false,
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;
    use crate::test::{multipolygon, polygon};

    fn geom(wkt: &str) -> NativeGeometry {
        read_wkt(wkt).unwrap().0
    }

    #[test]
    fn valid_geometries() {
        for wkt in [
            "POINT(1 2)",
            "LINESTRING(0 0,1 1,2 0)",
            polygon::WITH_HOLE,
            multipolygon::TWO_SQUARES,
            "POLYGON EMPTY",
            "GEOMETRYCOLLECTION(POINT(1 1),LINESTRING(0 0,1 1))",
        ] {
            assert!(geom(wkt).is_valid(), "{wkt}");
        }
    }

    #[test]
    fn invalid_geometries() {
        for wkt in [
            // Bowtie.
            "POLYGON((0 0,10 10,10 0,0 10,0 0))",
            // Hole outside the shell.
            "POLYGON((0 0,0 1,1 1,1 0,0 0),(5 5,5 6,6 6,6 5,5 5))",
            multipolygon::OVERLAPPING,
        ] {
            assert!(!geom(wkt).is_valid(), "{wkt}");
        }
    }

    #[test]
    fn rings() {
        assert!(geom("LINESTRING(0 0,0 1,1 1,0 0)").is_ring());
        assert!(!geom("LINESTRING(0 0,0 1,1 1)").is_ring());
        assert!(!geom("LINESTRING(0 0,1 1,1 0,0 1,0 0)").is_ring());
        assert!(geom("LINEARRING(0 0,0 10,10 10,10 0,0 0)").is_ring());
        assert!(!geom("POINT(0 0)").is_ring());
    }
}
