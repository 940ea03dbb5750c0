use geozero::geojson::GeoJson;

use crate::engine::NativeGeometry;
use crate::error::Result;
use crate::io::geozero::ToNativeGeometry;

/// Parse a GeoJSON geometry object.
pub fn read_geojson(text: &str) -> Result<NativeGeometry> {
    Ok(GeoJson(text).to_native_geometry()?)
}
