use geozero::{GeomProcessor, GeozeroGeometry};

use crate::coord::CoordBuffer;
use crate::engine::NativeGeometry;

fn process_coords<P: GeomProcessor>(
    coords: &CoordBuffer,
    processor: &mut P,
) -> geozero::error::Result<()> {
    for (coord_idx, coord) in coords.iter().enumerate() {
        match coord.z {
            Some(z) => {
                processor.coordinate(coord.x, coord.y, Some(z), None, None, None, coord_idx)?
            }
            None => processor.xy(coord.x, coord.y, coord_idx)?,
        }
    }
    Ok(())
}

fn process_point<P: GeomProcessor>(
    coords: &CoordBuffer,
    geom_idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    if coords.is_empty() {
        return processor.empty_point(geom_idx);
    }
    processor.point_begin(geom_idx)?;
    process_coords(coords, processor)?;
    processor.point_end(geom_idx)
}

fn process_line_string<P: GeomProcessor>(
    coords: &CoordBuffer,
    tagged: bool,
    geom_idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    processor.linestring_begin(tagged, coords.len(), geom_idx)?;
    process_coords(coords, processor)?;
    processor.linestring_end(tagged, geom_idx)
}

fn process_polygon<P: GeomProcessor>(
    rings: &[CoordBuffer],
    tagged: bool,
    geom_idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    processor.polygon_begin(tagged, rings.len(), geom_idx)?;
    for (ring_idx, ring) in rings.iter().enumerate() {
        process_line_string(ring, false, ring_idx, processor)?;
    }
    processor.polygon_end(tagged, geom_idx)
}

pub(crate) fn process_geometry<P: GeomProcessor>(
    geom: &NativeGeometry,
    geom_idx: usize,
    processor: &mut P,
) -> geozero::error::Result<()> {
    match geom {
        NativeGeometry::Point(coords) => process_point(coords, geom_idx, processor),
        NativeGeometry::LineString(coords) | NativeGeometry::LinearRing(coords) => {
            process_line_string(coords, true, geom_idx, processor)
        }
        NativeGeometry::Polygon(rings) => process_polygon(rings, true, geom_idx, processor),
        NativeGeometry::MultiPoint(points) => {
            // Members are written as bare coordinates, without point_begin.
            let coords: Vec<_> = points.iter().flat_map(|p| p.coords()).collect();
            processor.multipoint_begin(coords.len(), geom_idx)?;
            for (coord_idx, coord) in coords.iter().enumerate() {
                match coord.z {
                    Some(z) => processor.coordinate(
                        coord.x,
                        coord.y,
                        Some(z),
                        None,
                        None,
                        None,
                        coord_idx,
                    )?,
                    None => processor.xy(coord.x, coord.y, coord_idx)?,
                }
            }
            processor.multipoint_end(geom_idx)
        }
        NativeGeometry::MultiLineString(lines) => {
            processor.multilinestring_begin(lines.len(), geom_idx)?;
            for (line_idx, line) in lines.iter().enumerate() {
                match line {
                    NativeGeometry::LineString(coords) | NativeGeometry::LinearRing(coords) => {
                        process_line_string(coords, false, line_idx, processor)?
                    }
                    _ => return Err(unexpected_member(line)),
                }
            }
            processor.multilinestring_end(geom_idx)
        }
        NativeGeometry::MultiPolygon(polygons) => {
            processor.multipolygon_begin(polygons.len(), geom_idx)?;
            for (polygon_idx, polygon) in polygons.iter().enumerate() {
                match polygon {
                    NativeGeometry::Polygon(rings) => {
                        process_polygon(rings, false, polygon_idx, processor)?
                    }
                    _ => return Err(unexpected_member(polygon)),
                }
            }
            processor.multipolygon_end(geom_idx)
        }
        NativeGeometry::GeometryCollection(parts) => {
            processor.geometrycollection_begin(parts.len(), geom_idx)?;
            for (part_idx, part) in parts.iter().enumerate() {
                process_geometry(part, part_idx, processor)?;
            }
            processor.geometrycollection_end(geom_idx)
        }
    }
}

fn unexpected_member(geom: &NativeGeometry) -> geozero::error::GeozeroError {
    geozero::error::GeozeroError::Geometry(format!(
        "unexpected collection member {}",
        geom.geometry_type()
    ))
}

impl GeozeroGeometry for NativeGeometry {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> geozero::error::Result<()>
    where
        Self: Sized,
    {
        process_geometry(self, 0, processor)
    }
}

#[cfg(test)]
mod test {
    use geozero::{ToJson, ToWkt};

    use crate::io::geozero::ToNativeGeometry;
    use crate::test::polygon;

    #[test]
    fn geozero_process_geom() -> geozero::error::Result<()> {
        let geom = geozero::wkt::WktStr(polygon::WITH_HOLE).to_native_geometry()?;
        assert_eq!(geom.to_wkt()?, polygon::WITH_HOLE);
        Ok(())
    }

    #[test]
    fn geojson_output() -> geozero::error::Result<()> {
        let geom = geozero::wkt::WktStr("POINT(5 23)").to_native_geometry()?;
        let json: serde_json::Value = serde_json::from_str(&geom.to_json()?)
            .map_err(|e| geozero::error::GeozeroError::Geometry(e.to_string()))?;
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"], serde_json::json!([5.0, 23.0]));
        Ok(())
    }
}
