use crate::coord::{Coord, CoordBuffer};
use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};

/// The combinatorial boundary of a geometry.
///
/// Points have an empty boundary, lines their unclosed endpoints (mod-2 rule for
/// multilinestrings), polygons their rings.
pub trait Boundary {
    fn boundary(&self) -> Result<NativeGeometry>;
}

impl Boundary for NativeGeometry {
    fn boundary(&self) -> Result<NativeGeometry> {
        match self {
            NativeGeometry::Point(_) | NativeGeometry::MultiPoint(_) => Ok(NativeGeometry::empty(
                GeometryType::GeometryCollection,
                Dimension::XY,
            )),
            NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                Ok(endpoints(std::slice::from_ref(c)))
            }
            NativeGeometry::MultiLineString(lines) => {
                let buffers: Vec<CoordBuffer> = lines
                    .iter()
                    .filter_map(|l| match l {
                        NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                            Some(c.clone())
                        }
                        _ => None,
                    })
                    .collect();
                Ok(endpoints(&buffers))
            }
            NativeGeometry::Polygon(rings) => Ok(rings_boundary(rings.iter())),
            NativeGeometry::MultiPolygon(polygons) => Ok(rings_boundary(
                polygons.iter().flat_map(|p| match p {
                    NativeGeometry::Polygon(rings) => rings.iter(),
                    _ => [].iter(),
                }),
            )),
            NativeGeometry::GeometryCollection(_) => Err(GeoHandleError::Engine(
                "boundary is not defined for a GeometryCollection".to_string(),
            )),
        }
    }
}

/// Endpoints that occur an odd number of times.
fn endpoints(lines: &[CoordBuffer]) -> NativeGeometry {
    let mut counts: Vec<(Coord, usize)> = vec![];
    for line in lines.iter().filter(|l| !l.is_closed()) {
        for end in [line.first(), line.last()].into_iter().flatten() {
            match counts.iter_mut().find(|(c, _)| *c == end) {
                Some((_, n)) => *n += 1,
                None => counts.push((end, 1)),
            }
        }
    }
    NativeGeometry::MultiPoint(
        counts
            .into_iter()
            .filter(|(_, n)| n % 2 == 1)
            .map(|(c, _)| NativeGeometry::point(c))
            .collect(),
    )
}

fn rings_boundary<'a>(rings: impl Iterator<Item = &'a CoordBuffer>) -> NativeGeometry {
    let mut rings: Vec<NativeGeometry> = rings
        .filter(|r| !r.is_empty())
        .map(|r| NativeGeometry::LineString(r.clone()))
        .collect();
    match rings.len() {
        0 => NativeGeometry::empty(GeometryType::MultiLineString, Dimension::XY),
        1 => rings.remove(0),
        _ => NativeGeometry::MultiLineString(rings),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;
    use crate::test::polygon;

    fn geom(wkt: &str) -> NativeGeometry {
        read_wkt(wkt).unwrap().0
    }

    #[test]
    fn line_endpoints() {
        assert_eq!(
            geom("LINESTRING(0 0,1 1,2 0)").boundary().unwrap(),
            geom("MULTIPOINT(0 0,2 0)")
        );
        assert!(geom("LINESTRING(0 0,1 1,2 0,0 0)").boundary().unwrap().is_empty());
        assert_eq!(
            geom("MULTILINESTRING((0 0,1 1),(1 1,2 2))").boundary().unwrap(),
            geom("MULTIPOINT(0 0,2 2)")
        );
    }

    #[test]
    fn polygon_rings() {
        let boundary = geom(polygon::WITH_HOLE).boundary().unwrap();
        assert_eq!(boundary.geometry_type(), GeometryType::MultiLineString);
        assert_eq!(boundary.num_coords(), 10);
        let boundary = geom("POLYGON((0 0,0 1,1 1,0 0))").boundary().unwrap();
        assert_eq!(boundary.geometry_type(), GeometryType::LineString);
    }

    #[test]
    fn points_and_collections() {
        assert!(geom("POINT(1 1)").boundary().unwrap().is_empty());
        assert!(geom("GEOMETRYCOLLECTION(POINT(1 1))").boundary().is_err());
    }
}
