use std::fmt::Display;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The type of a geometry, with the numeric ids used by `geom_typeid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GeometryType {
    Point = 0,
    LineString = 1,
    LinearRing = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    /// The name of this type, as returned by `geom_type`.
    pub fn name(&self) -> &'static str {
        use GeometryType::*;
        match self {
            Point => "Point",
            LineString => "LineString",
            LinearRing => "LinearRing",
            Polygon => "Polygon",
            MultiPoint => "MultiPoint",
            MultiLineString => "MultiLineString",
            MultiPolygon => "MultiPolygon",
            GeometryCollection => "GeometryCollection",
        }
    }

    /// Topological dimension of a non-empty geometry of this type.
    ///
    /// Collections report the dimension of their members, except [GeometryCollection] which
    /// has none of its own and reports `None`.
    pub fn topological_dimension(&self) -> Option<u8> {
        use GeometryType::*;
        match self {
            Point | MultiPoint => Some(0),
            LineString | LinearRing | MultiLineString => Some(1),
            Polygon | MultiPolygon => Some(2),
            GeometryCollection => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        use GeometryType::*;
        matches!(
            self,
            MultiPoint | MultiLineString | MultiPolygon | GeometryCollection
        )
    }

    /// Whether a geometry of type `child` may be stored as a member of this type.
    pub fn accepts_member(&self, child: GeometryType) -> bool {
        use GeometryType::*;
        match self {
            Polygon => child == LinearRing,
            MultiPoint => child == Point,
            MultiLineString => matches!(child, LineString | LinearRing),
            MultiPolygon => child == Polygon,
            GeometryCollection => true,
            Point | LineString | LinearRing => false,
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The coordinate dimension of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    /// Two-dimensional.
    #[default]
    XY,

    /// Three-dimensional.
    XYZ,
}

impl Dimension {
    /// Returns the number of dimensions.
    pub fn size(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
        }
    }

    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::XYZ)
    }

    pub(crate) fn from_has_z(has_z: bool) -> Self {
        if has_z {
            Dimension::XYZ
        } else {
            Dimension::XY
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = crate::error::GeoHandleError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimension::XY),
            3 => Ok(Dimension::XYZ),
            _ => Err(crate::error::GeoHandleError::Type(format!(
                "coordinates must have 2 or 3 components, got {value}"
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_ids() {
        assert_eq!(u8::from(GeometryType::Point), 0);
        assert_eq!(u8::from(GeometryType::LinearRing), 2);
        assert_eq!(u8::from(GeometryType::GeometryCollection), 7);
        assert_eq!(GeometryType::try_from(6u8).unwrap(), GeometryType::MultiPolygon);
        assert!(GeometryType::try_from(8u8).is_err());
    }

    #[test]
    fn members() {
        assert!(GeometryType::Polygon.accepts_member(GeometryType::LinearRing));
        assert!(!GeometryType::Polygon.accepts_member(GeometryType::LineString));
        assert!(GeometryType::MultiLineString.accepts_member(GeometryType::LinearRing));
        assert!(!GeometryType::MultiPoint.accepts_member(GeometryType::Polygon));
        assert!(GeometryType::GeometryCollection.accepts_member(GeometryType::MultiPolygon));
    }

    #[test]
    fn dimension_from_arity() {
        assert_eq!(Dimension::try_from(2).unwrap(), Dimension::XY);
        assert_eq!(Dimension::try_from(3).unwrap(), Dimension::XYZ);
        assert!(Dimension::try_from(4).is_err());
    }
}
