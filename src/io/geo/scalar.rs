use crate::coord::CoordBuffer;
use crate::engine::NativeGeometry;

/// Convert a coordinate run to a [`geo::LineString`].
///
/// Only the first two dimensions will be kept.
pub fn line_string_to_geo(coords: &CoordBuffer) -> geo::LineString {
    geo::LineString::new(coords.to_geo())
}

/// Convert polygon rings to a [`geo::Polygon`]. No rings gives an empty polygon.
///
/// Only the first two dimensions will be kept.
pub fn polygon_to_geo(rings: &[CoordBuffer]) -> geo::Polygon {
    match rings.split_first() {
        Some((shell, holes)) => geo::Polygon::new(
            line_string_to_geo(shell),
            holes.iter().map(line_string_to_geo).collect(),
        ),
        None => geo::Polygon::new(geo::LineString::new(vec![]), vec![]),
    }
}

fn parts_to_geo(parts: &[NativeGeometry]) -> Vec<geo::Geometry> {
    parts.iter().map(geometry_to_geo).collect()
}

/// Convert a native geometry to a [`geo::Geometry`].
///
/// Only the first two dimensions will be kept. `geo` has no empty point, so an empty point
/// converts to an empty [`geo::MultiPoint`]. Rings convert to line strings.
pub fn geometry_to_geo(geom: &NativeGeometry) -> geo::Geometry {
    match geom {
        NativeGeometry::Point(coords) => match coords.first() {
            Some(coord) => geo::Geometry::Point(geo::Point(coord.into())),
            None => geo::Geometry::MultiPoint(geo::MultiPoint::new(vec![])),
        },
        NativeGeometry::LineString(coords) | NativeGeometry::LinearRing(coords) => {
            geo::Geometry::LineString(line_string_to_geo(coords))
        }
        NativeGeometry::Polygon(rings) => geo::Geometry::Polygon(polygon_to_geo(rings)),
        NativeGeometry::MultiPoint(parts) => geo::Geometry::MultiPoint(geo::MultiPoint::new(
            parts
                .iter()
                .flat_map(|p| p.coords())
                .map(|c| geo::Point(c.into()))
                .collect(),
        )),
        NativeGeometry::MultiLineString(parts) => {
            geo::Geometry::MultiLineString(geo::MultiLineString::new(
                parts
                    .iter()
                    .filter_map(|p| match p {
                        NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                            Some(line_string_to_geo(c))
                        }
                        _ => None,
                    })
                    .collect(),
            ))
        }
        NativeGeometry::MultiPolygon(parts) => {
            geo::Geometry::MultiPolygon(multi_polygon_to_geo(parts))
        }
        NativeGeometry::GeometryCollection(parts) => {
            geo::Geometry::GeometryCollection(geo::GeometryCollection::new_from(parts_to_geo(
                parts,
            )))
        }
    }
}

fn multi_polygon_to_geo(parts: &[NativeGeometry]) -> geo::MultiPolygon {
    geo::MultiPolygon::new(
        parts
            .iter()
            .filter_map(|p| match p {
                NativeGeometry::Polygon(rings) => Some(polygon_to_geo(rings)),
                _ => None,
            })
            .collect(),
    )
}

fn polygon_from_geo(polygon: &geo::Polygon) -> NativeGeometry {
    if polygon.exterior().0.is_empty() {
        return NativeGeometry::Polygon(vec![]);
    }
    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| CoordBuffer::from(ring.0.as_slice()))
        .collect();
    NativeGeometry::Polygon(rings)
}

/// Convert a [`geo::MultiPolygon`] into a native multipolygon.
pub fn multi_polygon_from_geo(multi_polygon: &geo::MultiPolygon) -> NativeGeometry {
    NativeGeometry::MultiPolygon(multi_polygon.0.iter().map(polygon_from_geo).collect())
}

/// Convert a [`geo::Geometry`] into a 2D native geometry.
///
/// Lines become two-point line strings; rects and triangles become polygons.
pub fn geometry_from_geo(geom: &geo::Geometry) -> NativeGeometry {
    match geom {
        geo::Geometry::Point(p) => NativeGeometry::point(p.0.into()),
        geo::Geometry::Line(line) => {
            NativeGeometry::LineString(CoordBuffer::from([line.start, line.end].as_slice()))
        }
        geo::Geometry::LineString(ls) => {
            NativeGeometry::LineString(CoordBuffer::from(ls.0.as_slice()))
        }
        geo::Geometry::Polygon(polygon) => polygon_from_geo(polygon),
        geo::Geometry::MultiPoint(mp) => NativeGeometry::MultiPoint(
            mp.0.iter().map(|p| NativeGeometry::point(p.0.into())).collect(),
        ),
        geo::Geometry::MultiLineString(mls) => NativeGeometry::MultiLineString(
            mls.0
                .iter()
                .map(|ls| NativeGeometry::LineString(CoordBuffer::from(ls.0.as_slice())))
                .collect(),
        ),
        geo::Geometry::MultiPolygon(mp) => multi_polygon_from_geo(mp),
        geo::Geometry::GeometryCollection(gc) => {
            NativeGeometry::GeometryCollection(gc.0.iter().map(geometry_from_geo).collect())
        }
        geo::Geometry::Rect(rect) => polygon_from_geo(&rect.to_polygon()),
        geo::Geometry::Triangle(triangle) => polygon_from_geo(&triangle.to_polygon()),
    }
}
