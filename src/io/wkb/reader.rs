use std::io::{Cursor, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::coord::{Coord, CoordBuffer};
use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};
use crate::io::wkb::common::{Endianness, WKBType};

/// Upper bound on capacity reserved from an untrusted count.
const MAX_PREALLOC: usize = 1024;

/// Parse WKB or EWKB, returning the geometry and its embedded SRID, if any.
pub fn read_wkb(buf: &[u8]) -> Result<(NativeGeometry, Option<i32>)> {
    let mut reader = Cursor::new(buf);
    let (geom, srid) = read_geometry(&mut reader).map_err(|err| match err {
        GeoHandleError::IOError(err) => GeoHandleError::Parse(format!("truncated WKB: {err}")),
        err => err,
    })?;
    if reader.position() as usize != buf.len() {
        return Err(GeoHandleError::Parse(format!(
            "{} trailing bytes after WKB geometry",
            buf.len() - reader.position() as usize
        )));
    }
    Ok((geom, srid))
}

fn read_geometry<R: Read>(reader: &mut R) -> Result<(NativeGeometry, Option<i32>)> {
    match Endianness::try_from(reader.read_u8()?)? {
        Endianness::BigEndian => read_body::<BigEndian, R>(reader),
        Endianness::LittleEndian => read_body::<LittleEndian, R>(reader),
    }
}

fn read_body<B: ByteOrder, R: Read>(reader: &mut R) -> Result<(NativeGeometry, Option<i32>)> {
    let (wkb_type, has_srid) = WKBType::from_code(reader.read_u32::<B>()?)?;
    let srid = if has_srid {
        Some(reader.read_i32::<B>()?)
    } else {
        None
    };
    let dim = wkb_type.dim();

    let geom = match wkb_type.geometry_type() {
        GeometryType::Point => {
            let coords = read_coords::<B, R>(reader, 1, dim)?;
            match coords.first() {
                Some(c) if c.x.is_nan() && c.y.is_nan() => {
                    NativeGeometry::empty(GeometryType::Point, dim)
                }
                _ => NativeGeometry::Point(coords),
            }
        }
        GeometryType::LineString | GeometryType::LinearRing => {
            let n = reader.read_u32::<B>()? as usize;
            NativeGeometry::LineString(read_coords::<B, R>(reader, n, dim)?)
        }
        GeometryType::Polygon => {
            let num_rings = reader.read_u32::<B>()? as usize;
            let mut rings = Vec::with_capacity(num_rings.min(MAX_PREALLOC));
            for _ in 0..num_rings {
                let n = reader.read_u32::<B>()? as usize;
                rings.push(read_coords::<B, R>(reader, n, dim)?);
            }
            NativeGeometry::Polygon(rings)
        }
        collection => {
            let num_parts = reader.read_u32::<B>()? as usize;
            let mut parts = Vec::with_capacity(num_parts.min(MAX_PREALLOC));
            for _ in 0..num_parts {
                let (part, _) = read_geometry(reader)?;
                if !collection.accepts_member(part.geometry_type()) {
                    return Err(GeoHandleError::Parse(format!(
                        "{} cannot contain {}",
                        collection,
                        part.geometry_type()
                    )));
                }
                parts.push(part);
            }
            match collection {
                GeometryType::MultiPoint => NativeGeometry::MultiPoint(parts),
                GeometryType::MultiLineString => NativeGeometry::MultiLineString(parts),
                GeometryType::MultiPolygon => NativeGeometry::MultiPolygon(parts),
                _ => NativeGeometry::GeometryCollection(parts),
            }
        }
    };
    Ok((geom, srid))
}

fn read_coords<B: ByteOrder, R: Read>(
    reader: &mut R,
    n: usize,
    dim: Dimension,
) -> Result<CoordBuffer> {
    let mut coords = CoordBuffer::with_capacity(dim, n.min(MAX_PREALLOC));
    for _ in 0..n {
        let x = reader.read_f64::<B>()?;
        let y = reader.read_f64::<B>()?;
        let coord = match dim {
            Dimension::XY => Coord::xy(x, y),
            Dimension::XYZ => Coord::xyz(x, y, reader.read_f64::<B>()?),
        };
        coords.push_coord(coord)?;
    }
    Ok(coords)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkb::writer::{write_wkb, WkbFlavor};
    use crate::io::wkt::read_wkt;
    use crate::test::{multipolygon, polygon};

    fn encode(geom: &NativeGeometry, byte_order: Endianness, srid: Option<i32>) -> Vec<u8> {
        let mut buf = vec![];
        write_wkb(&mut buf, geom, byte_order, WkbFlavor::Extended, srid).unwrap();
        buf
    }

    #[test]
    fn both_byte_orders() {
        let (geom, _) = read_wkt(multipolygon::TWO_SQUARES).unwrap();
        for byte_order in [Endianness::BigEndian, Endianness::LittleEndian] {
            let (decoded, srid) = read_wkb(&encode(&geom, byte_order, Some(32140))).unwrap();
            assert_eq!(decoded, geom);
            assert_eq!(srid, Some(32140));
        }
    }

    #[test]
    fn three_dimensional() {
        let geom = NativeGeometry::LineString(
            CoordBuffer::try_from_coords([Coord::xyz(0., 1., 2.), Coord::xyz(3., 4., 5.)])
                .unwrap(),
        );
        let buf = encode(&geom, Endianness::LittleEndian, None);
        assert_eq!(&buf[1..5], &0x8000_0002u32.to_le_bytes());
        let (decoded, srid) = read_wkb(&buf).unwrap();
        assert_eq!(decoded, geom);
        assert_eq!(srid, None);
    }

    #[test]
    fn empty_point() {
        let geom = NativeGeometry::empty(GeometryType::Point, Dimension::XY);
        let (decoded, _) = read_wkb(&encode(&geom, Endianness::LittleEndian, None)).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn truncated_and_garbage() {
        let (geom, _) = read_wkt(polygon::WITH_HOLE).unwrap();
        let buf = encode(&geom, Endianness::LittleEndian, None);
        for bad in [&buf[..buf.len() - 3], &buf[..3], &[7u8, 1, 0, 0, 0][..], &[][..]] {
            assert!(matches!(read_wkb(bad), Err(GeoHandleError::Parse(_))));
        }
        let mut long = buf.clone();
        long.push(0);
        assert!(read_wkb(&long).is_err());
    }
}
