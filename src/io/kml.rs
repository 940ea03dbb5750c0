//! Write geometries as KML fragments.

use itertools::Itertools;

use crate::coord::CoordBuffer;
use crate::engine::NativeGeometry;

/// `<coordinates>` element. KML coordinates are always `x,y,z`, with `z = 0` for 2D input.
pub fn coordinates_kml(coords: &CoordBuffer) -> String {
    let body = coords
        .iter()
        .map(|c| format!("{},{},{}", c.x, c.y, c.z.unwrap_or(0.0)))
        .join(" ");
    format!("<coordinates>{body}</coordinates>")
}

fn ring_kml(ring: &CoordBuffer) -> String {
    format!("<LinearRing>{}</LinearRing>", coordinates_kml(ring))
}

pub fn write_kml(geom: &NativeGeometry) -> String {
    match geom {
        NativeGeometry::Point(c) => format!("<Point>{}</Point>", coordinates_kml(c)),
        NativeGeometry::LineString(c) => {
            format!("<LineString>{}</LineString>", coordinates_kml(c))
        }
        NativeGeometry::LinearRing(c) => ring_kml(c),
        NativeGeometry::Polygon(rings) => {
            let mut out = String::from("<Polygon>");
            if let Some((shell, holes)) = rings.split_first() {
                out.push_str(&format!("<outerBoundaryIs>{}</outerBoundaryIs>", ring_kml(shell)));
                for hole in holes {
                    out.push_str(&format!(
                        "<innerBoundaryIs>{}</innerBoundaryIs>",
                        ring_kml(hole)
                    ));
                }
            }
            out.push_str("</Polygon>");
            out
        }
        NativeGeometry::MultiPoint(parts)
        | NativeGeometry::MultiLineString(parts)
        | NativeGeometry::MultiPolygon(parts)
        | NativeGeometry::GeometryCollection(parts) => format!(
            "<MultiGeometry>{}</MultiGeometry>",
            parts.iter().map(write_kml).join("")
        ),
    }
}
