use geozero::ToJson;

use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};

/// Render `geom` as a GeoJSON geometry object.
pub fn write_geojson(geom: &NativeGeometry) -> Result<String> {
    geom.to_json()
        .map_err(|err| GeoHandleError::Engine(err.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::geojson::read_geojson;
    use crate::io::wkt::read_wkt;
    use crate::test::polygon;

    #[test]
    fn write_then_read() {
        let (geom, _) = read_wkt(polygon::WITH_HOLE).unwrap();
        let json = write_geojson(&geom).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "Polygon");
        assert_eq!(read_geojson(&json).unwrap(), geom);
    }
}
