use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::coord::CoordBuffer;
use crate::datatypes::Dimension;
use crate::engine::NativeGeometry;
use crate::error::Result;
use crate::io::wkb::common::{Endianness, WKBType};

/// Which type codes to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WkbFlavor {
    /// ISO codes, no SRID.
    Iso,
    /// EWKB flag bits, with the SRID on the outermost geometry when there is one.
    Extended,
}

/// The byte length of `geom` encoded as WKB.
pub fn wkb_size(geom: &NativeGeometry, with_srid: bool) -> usize {
    let header = 1 + 4 + if with_srid { 4 } else { 0 };
    let coord_size = geom.dim().size() * 8;
    let body = match geom {
        NativeGeometry::Point(_) => coord_size,
        NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => 4 + c.len() * coord_size,
        NativeGeometry::Polygon(rings) => {
            4 + rings.iter().map(|r| 4 + r.len() * coord_size).sum::<usize>()
        }
        NativeGeometry::MultiPoint(parts)
        | NativeGeometry::MultiLineString(parts)
        | NativeGeometry::MultiPolygon(parts)
        | NativeGeometry::GeometryCollection(parts) => {
            4 + parts.iter().map(|p| wkb_size(p, false)).sum::<usize>()
        }
    };
    header + body
}

/// Write a geometry to a Writer encoded as WKB.
pub fn write_wkb<W: Write>(
    writer: &mut W,
    geom: &NativeGeometry,
    byte_order: Endianness,
    flavor: WkbFlavor,
    srid: Option<i32>,
) -> Result<()> {
    let srid = match flavor {
        WkbFlavor::Iso => None,
        WkbFlavor::Extended => srid,
    };
    match byte_order {
        Endianness::BigEndian => {
            write_geometry::<BigEndian, W>(writer, geom, byte_order, flavor, srid)
        }
        Endianness::LittleEndian => {
            write_geometry::<LittleEndian, W>(writer, geom, byte_order, flavor, srid)
        }
    }
}

fn write_geometry<B: ByteOrder, W: Write>(
    writer: &mut W,
    geom: &NativeGeometry,
    byte_order: Endianness,
    flavor: WkbFlavor,
    srid: Option<i32>,
) -> Result<()> {
    let dim = geom.dim();
    writer.write_u8(byte_order.into())?;

    let wkb_type = WKBType::new(geom.geometry_type(), dim);
    let code = match flavor {
        WkbFlavor::Iso => wkb_type.into(),
        WkbFlavor::Extended => wkb_type.to_ewkb_code(srid.is_some()),
    };
    writer.write_u32::<B>(code)?;
    if let Some(srid) = srid {
        writer.write_i32::<B>(srid)?;
    }

    match geom {
        NativeGeometry::Point(coords) => {
            if coords.is_empty() {
                for _ in 0..dim.size() {
                    writer.write_f64::<B>(f64::NAN)?;
                }
            } else {
                write_coords::<B, W>(writer, coords, dim)?;
            }
        }
        NativeGeometry::LineString(coords) | NativeGeometry::LinearRing(coords) => {
            writer.write_u32::<B>(coords.len() as u32)?;
            write_coords::<B, W>(writer, coords, dim)?;
        }
        NativeGeometry::Polygon(rings) => {
            writer.write_u32::<B>(rings.len() as u32)?;
            for ring in rings {
                writer.write_u32::<B>(ring.len() as u32)?;
                write_coords::<B, W>(writer, ring, dim)?;
            }
        }
        NativeGeometry::MultiPoint(parts)
        | NativeGeometry::MultiLineString(parts)
        | NativeGeometry::MultiPolygon(parts)
        | NativeGeometry::GeometryCollection(parts) => {
            writer.write_u32::<B>(parts.len() as u32)?;
            for part in parts {
                write_geometry::<B, W>(writer, part, byte_order, flavor, None)?;
            }
        }
    }
    Ok(())
}

fn write_coords<B: ByteOrder, W: Write>(
    writer: &mut W,
    coords: &CoordBuffer,
    dim: Dimension,
) -> Result<()> {
    for coord in coords.iter() {
        writer.write_f64::<B>(coord.x)?;
        writer.write_f64::<B>(coord.y)?;
        if dim.has_z() {
            writer.write_f64::<B>(coord.z.unwrap_or(0.0))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;
    use crate::test::{multipolygon, polygon};
    use geozero::{CoordDimensions, ToWkb};

    fn native(wkt: &str) -> NativeGeometry {
        read_wkt(wkt).unwrap().0
    }

    #[test]
    fn matches_geozero_iso_output() {
        for wkt in [
            "POINT(5 23)",
            polygon::WITH_HOLE,
            multipolygon::TWO_SQUARES,
            "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1))",
        ] {
            let geom = native(wkt);
            let mut buf = vec![];
            write_wkb(&mut buf, &geom, Endianness::LittleEndian, WkbFlavor::Iso, None).unwrap();
            assert_eq!(buf.len(), wkb_size(&geom, false));
            let expected = geozero::wkt::WktStr(wkt)
                .to_wkb(CoordDimensions::xy())
                .unwrap();
            assert_eq!(buf, expected, "{wkt}");
        }
    }

    #[test]
    fn ewkb_point_with_srid() {
        let geom = native("POINT(5 23)");
        let mut buf = vec![];
        write_wkb(
            &mut buf,
            &geom,
            Endianness::LittleEndian,
            WkbFlavor::Extended,
            Some(4326),
        )
        .unwrap();
        assert_eq!(buf.len(), wkb_size(&geom, true));
        assert_eq!(&buf[..9], &[1, 1, 0, 0, 0x20, 0xE6, 0x10, 0, 0]);
    }

    #[test]
    fn big_endian_header() {
        let geom = native("POINT(1 2)");
        let mut buf = vec![];
        write_wkb(&mut buf, &geom, Endianness::BigEndian, WkbFlavor::Iso, None).unwrap();
        assert_eq!(&buf[..5], &[0, 0, 0, 0, 1]);
        assert_eq!(&buf[5..13], &1.0f64.to_be_bytes());
    }
}
