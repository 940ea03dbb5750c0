use geozero::{CoordDimensions, ToWkt};

use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};

/// Render `geom` as WKT, with Z ordinates when the geometry is 3D.
pub fn write_wkt(geom: &NativeGeometry) -> Result<String> {
    let dims = if geom.dim().has_z() {
        CoordDimensions::xyz()
    } else {
        CoordDimensions::xy()
    };
    let wkt = geom
        .to_wkt_ndim(dims)
        .map_err(|err| GeoHandleError::Engine(err.to_string()))?;
    match geom {
        NativeGeometry::LinearRing(_) => Ok(match wkt.strip_prefix("LINESTRING") {
            Some(rest) => format!("LINEARRING{rest}"),
            None => wkt,
        }),
        _ => Ok(wkt),
    }
}

/// Render `geom` as EWKT. Without an SRID this is plain WKT.
pub fn write_ewkt(geom: &NativeGeometry, srid: Option<i32>) -> Result<String> {
    let wkt = write_wkt(geom)?;
    Ok(match srid {
        Some(srid) => format!("SRID={srid};{wkt}"),
        None => wkt,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;
    use crate::test::{linestring, multipolygon, polygon};

    #[test]
    fn round_trip_canonical_text() {
        for wkt in [
            "POINT(5 23)",
            linestring::LINE,
            linestring::RING,
            polygon::WITH_HOLE,
            multipolygon::TWO_SQUARES,
            "MULTIPOINT(0 0,1 1)",
            "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1))",
        ] {
            let (geom, _) = read_wkt(wkt).unwrap();
            assert_eq!(write_wkt(&geom).unwrap(), wkt);
        }
    }

    #[test]
    fn ewkt() {
        let (geom, srid) = read_wkt("SRID=4326;POINT(5 23)").unwrap();
        assert_eq!(write_ewkt(&geom, srid).unwrap(), "SRID=4326;POINT(5 23)");
        assert_eq!(write_ewkt(&geom, None).unwrap(), "POINT(5 23)");
    }
}
