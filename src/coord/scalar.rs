use crate::datatypes::Dimension;
use crate::error::{GeoHandleError, Result};

/// A single 2D or 3D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coord {
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub fn dim(&self) -> Dimension {
        Dimension::from_has_z(self.z.is_some())
    }

    /// The ordinates of this coordinate, two or three of them.
    pub fn to_vec(&self) -> Vec<f64> {
        match self.z {
            Some(z) => vec![self.x, self.y, z],
            None => vec![self.x, self.y],
        }
    }

    pub(crate) fn approx_eq(&self, other: &Coord, tolerance: f64) -> bool {
        let dz = match (self.z, other.z) {
            (Some(a), Some(b)) => (a - b).abs(),
            (None, None) => 0.0,
            _ => return false,
        };
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance && dz <= tolerance
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord::xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Coord {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Coord::xyz(x, y, z)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Coord::xy(x, y)
    }
}

impl From<[f64; 3]> for Coord {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Coord::xyz(x, y, z)
    }
}

impl From<geo::Coord> for Coord {
    fn from(value: geo::Coord) -> Self {
        Coord::xy(value.x, value.y)
    }
}

impl From<Coord> for geo::Coord {
    fn from(value: Coord) -> Self {
        geo::Coord {
            x: value.x,
            y: value.y,
        }
    }
}

impl TryFrom<&[f64]> for Coord {
    type Error = GeoHandleError;

    fn try_from(value: &[f64]) -> Result<Self> {
        match *value {
            [x, y] => Ok(Coord::xy(x, y)),
            [x, y, z] => Ok(Coord::xyz(x, y, z)),
            _ => Err(GeoHandleError::Type(format!(
                "coordinates must have 2 or 3 components, got {}",
                value.len()
            ))),
        }
    }
}

impl TryFrom<Vec<f64>> for Coord {
    type Error = GeoHandleError;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Coord::try_from(value.as_slice())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_slices() {
        let c = Coord::try_from([1.0, 2.0].as_slice()).unwrap();
        assert_eq!(c, Coord::xy(1.0, 2.0));
        let c = Coord::try_from(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(c.dim(), Dimension::XYZ);
        assert!(matches!(
            Coord::try_from([1.0].as_slice()),
            Err(GeoHandleError::Type(_))
        ));
        assert!(Coord::try_from(vec![1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn tuples_and_arrays_agree() {
        assert_eq!(Coord::from((1.0, 2.0)), Coord::from([1.0, 2.0]));
        assert_eq!(Coord::from((1.0, 2.0, 3.0)).to_vec(), vec![1.0, 2.0, 3.0]);
    }
}
