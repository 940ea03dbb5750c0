use geozero::wkt::WktStr;
use log::trace;

use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};
use crate::io::geozero::ToNativeGeometry;

const LINEARRING: &str = "LINEARRING";

/// Split an EWKT `SRID=<n>;` prefix off `text`.
pub fn split_srid(text: &str) -> Result<(Option<i32>, &str)> {
    let text = text.trim();
    let has_prefix = text
        .get(..5)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("SRID="));
    if !has_prefix {
        return Ok((None, text));
    }
    let (srid, body) = text[5..]
        .split_once(';')
        .ok_or_else(|| GeoHandleError::Parse(format!("missing ';' after SRID in {text:?}")))?;
    let srid = srid
        .trim()
        .parse::<i32>()
        .map_err(|err| GeoHandleError::Parse(format!("invalid SRID {srid:?}: {err}")))?;
    Ok((Some(srid), body.trim()))
}

/// Parse WKT or EWKT, returning the geometry and the SRID from the EWKT prefix, if any.
pub fn read_wkt(text: &str) -> Result<(NativeGeometry, Option<i32>)> {
    let (srid, body) = split_srid(text)?;
    trace!("parsing wkt {body:?}");

    let is_ring = body
        .get(..LINEARRING.len())
        .map_or(false, |tag| tag.eq_ignore_ascii_case(LINEARRING));
    let geom = if is_ring {
        let line = format!("LINESTRING{}", &body[LINEARRING.len()..]);
        let geom = WktStr(&line).to_native_geometry()?;
        into_linear_ring(geom)?
    } else {
        WktStr(body).to_native_geometry()?
    };
    Ok((geom, srid))
}

fn into_linear_ring(geom: NativeGeometry) -> Result<NativeGeometry> {
    match geom {
        NativeGeometry::LineString(coords) => {
            if !coords.is_empty() && (coords.len() < 4 || !coords.is_closed()) {
                return Err(GeoHandleError::Value(
                    "a LinearRing must be closed and have at least 4 points".to_string(),
                ));
            }
            Ok(NativeGeometry::LinearRing(coords))
        }
        other => Err(GeoHandleError::Parse(format!(
            "expected a ring, found {}",
            other.geometry_type()
        ))),
    }
}
