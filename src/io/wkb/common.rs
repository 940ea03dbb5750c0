use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoHandleError, Result};

/// EWKB flag marking a geometry with Z ordinates.
pub(crate) const EWKB_Z: u32 = 0x8000_0000;
/// EWKB flag marking a geometry with M ordinates.
pub(crate) const EWKB_M: u32 = 0x4000_0000;
/// EWKB flag marking an SRID following the type code.
pub(crate) const EWKB_SRID: u32 = 0x2000_0000;
const EWKB_FLAGS: u32 = EWKB_Z | EWKB_M | EWKB_SRID;

#[derive(Clone, Copy, Debug, PartialEq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum WKBType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    PointZ = 1001,
    LineStringZ = 1002,
    PolygonZ = 1003,
    MultiPointZ = 1004,
    MultiLineStringZ = 1005,
    MultiPolygonZ = 1006,
    GeometryCollectionZ = 1007,
}

impl WKBType {
    /// The ISO type code for a geometry. Rings are encoded as line strings.
    pub fn new(geom_type: GeometryType, dim: Dimension) -> Self {
        use WKBType::*;
        let xy = match geom_type {
            GeometryType::Point => Point,
            GeometryType::LineString | GeometryType::LinearRing => LineString,
            GeometryType::Polygon => Polygon,
            GeometryType::MultiPoint => MultiPoint,
            GeometryType::MultiLineString => MultiLineString,
            GeometryType::MultiPolygon => MultiPolygon,
            GeometryType::GeometryCollection => GeometryCollection,
        };
        match dim {
            Dimension::XY => xy,
            Dimension::XYZ => xy.with_z(),
        }
    }

    fn with_z(self) -> Self {
        use WKBType::*;
        match self {
            Point => PointZ,
            LineString => LineStringZ,
            Polygon => PolygonZ,
            MultiPoint => MultiPointZ,
            MultiLineString => MultiLineStringZ,
            MultiPolygon => MultiPolygonZ,
            GeometryCollection => GeometryCollectionZ,
            z => z,
        }
    }

    pub fn dim(&self) -> Dimension {
        Dimension::from_has_z(u32::from(*self) > 1000)
    }

    pub fn geometry_type(&self) -> GeometryType {
        use WKBType::*;
        match self {
            Point | PointZ => GeometryType::Point,
            LineString | LineStringZ => GeometryType::LineString,
            Polygon | PolygonZ => GeometryType::Polygon,
            MultiPoint | MultiPointZ => GeometryType::MultiPoint,
            MultiLineString | MultiLineStringZ => GeometryType::MultiLineString,
            MultiPolygon | MultiPolygonZ => GeometryType::MultiPolygon,
            GeometryCollection | GeometryCollectionZ => GeometryType::GeometryCollection,
        }
    }

    /// Encode as an EWKB type code: the 2D code plus flag bits.
    pub fn to_ewkb_code(&self, has_srid: bool) -> u32 {
        let base = u32::from(*self) % 1000;
        let mut code = base;
        if self.dim().has_z() {
            code |= EWKB_Z;
        }
        if has_srid {
            code |= EWKB_SRID;
        }
        code
    }

    /// Decode an ISO or EWKB type code, returning the type and whether an SRID follows.
    pub fn from_code(code: u32) -> Result<(Self, bool)> {
        if code & EWKB_M != 0 {
            return Err(GeoHandleError::Parse(
                "geometries with M ordinates are not supported".to_string(),
            ));
        }
        let iso = code & !EWKB_FLAGS;
        let wkb_type = WKBType::try_from(iso)
            .map_err(|_| GeoHandleError::Parse(format!("unsupported WKB type code {code:#x}")))?;
        let wkb_type = if code & EWKB_Z != 0 {
            wkb_type.with_z()
        } else {
            wkb_type
        };
        Ok((wkb_type, code & EWKB_SRID != 0))
    }
}

/// Endianness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Endianness {
    BigEndian,
    #[default]
    LittleEndian,
}

impl TryFrom<u8> for Endianness {
    type Error = GeoHandleError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Endianness::BigEndian),
            1 => Ok(Endianness::LittleEndian),
            _ => Err(GeoHandleError::Parse(format!(
                "unexpected byte order marker {value}"
            ))),
        }
    }
}

impl From<Endianness> for u8 {
    fn from(value: Endianness) -> Self {
        use Endianness::*;
        match value {
            BigEndian => 0,
            LittleEndian => 1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ewkb_codes() {
        let (wkb_type, srid) = WKBType::from_code(0x2000_0001).unwrap();
        assert_eq!(wkb_type, WKBType::Point);
        assert!(srid);
        let (wkb_type, srid) = WKBType::from_code(0x8000_0003).unwrap();
        assert_eq!(wkb_type, WKBType::PolygonZ);
        assert!(!srid);
        assert_eq!(WKBType::PolygonZ.to_ewkb_code(true), 0xA000_0003);
    }

    #[test]
    fn iso_codes() {
        let (wkb_type, _) = WKBType::from_code(1004).unwrap();
        assert_eq!(wkb_type, WKBType::MultiPointZ);
        assert_eq!(wkb_type.geometry_type(), GeometryType::MultiPoint);
        assert_eq!(wkb_type.dim(), Dimension::XYZ);
        assert!(WKBType::from_code(2001).is_err());
        assert!(WKBType::from_code(0x4000_0001).is_err());
        assert_eq!(
            WKBType::new(GeometryType::LinearRing, Dimension::XY),
            WKBType::LineString
        );
    }

    #[test]
    fn byte_order_marker() {
        assert_eq!(Endianness::try_from(0).unwrap(), Endianness::BigEndian);
        assert_eq!(u8::from(Endianness::LittleEndian), 1);
        assert!(Endianness::try_from(2).is_err());
    }
}
