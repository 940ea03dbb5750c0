use crate::coord::{Coord, CoordBuffer};
use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};
use crate::scalar::macros::impl_geom;
use crate::scalar::{CoordSeq, GeomHandle, Point};

/// A curve through two or more coordinates, or the empty curve.
///
/// ```
/// use geohandle::line_string;
/// use geohandle::scalar::LineString;
///
/// let a = line_string![(0., 0.), (1., 1.)].unwrap();
/// let b = LineString::from_rows(&[[0., 0.], [1., 1.]]).unwrap();
/// assert_eq!(a, b);
/// ```
pub struct LineString(GeomHandle);

/// A closed curve of at least four coordinates, the boundary of a polygon.
pub struct LinearRing(GeomHandle);

impl_geom!(LineString, GeometryType::LineString);
impl_geom!(LinearRing, GeometryType::LinearRing);

fn coord_buffer(coords: impl IntoIterator<Item = impl Into<Coord>>) -> Result<CoordBuffer> {
    CoordBuffer::try_from_coords(coords.into_iter().map(Into::into))
}

fn rows_to_coords<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Coord>> {
    rows.iter().map(|row| Coord::try_from(row.as_ref())).collect()
}

fn points_to_coords<'a>(points: impl IntoIterator<Item = &'a Point>) -> Result<Vec<Coord>> {
    points.into_iter().map(|p| p.coord()).collect()
}

impl LineString {
    /// A line string through `coords`.
    ///
    /// No coordinates give the empty line string, a single one fails with
    /// [Value](GeoHandleError::Value). Mixing 2D and 3D coordinates fails with
    /// [Type](GeoHandleError::Type).
    pub fn new(coords: impl IntoIterator<Item = impl Into<Coord>>) -> Result<Self> {
        let coords = coord_buffer(coords)?;
        if coords.len() == 1 {
            return Err(GeoHandleError::Value(
                "a LineString needs at least 2 points".to_string(),
            ));
        }
        let geom = NativeGeometry::LineString(coords);
        Ok(Self(GeomHandle::create(&geom, None)?))
    }

    pub fn empty() -> Result<Self> {
        let geom = NativeGeometry::empty(GeometryType::LineString, Dimension::XY);
        Ok(Self(GeomHandle::create(&geom, None)?))
    }

    /// A line string from rows of two or three numbers.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::new(rows_to_coords(rows)?)
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Result<Self> {
        Self::new(points_to_coords(points)?)
    }
}

impl LinearRing {
    /// A ring through `coords`, which must be closed and have at least 4 coordinates.
    ///
    /// Closure is checked, never added. No coordinates give the empty ring.
    pub fn new(coords: impl IntoIterator<Item = impl Into<Coord>>) -> Result<Self> {
        let coords = coord_buffer(coords)?;
        if !coords.is_empty() && (coords.len() < 4 || !coords.is_closed()) {
            return Err(GeoHandleError::Value(
                "a LinearRing must be closed and have at least 4 points".to_string(),
            ));
        }
        let geom = NativeGeometry::LinearRing(coords);
        Ok(Self(GeomHandle::create(&geom, None)?))
    }

    pub fn empty() -> Result<Self> {
        let geom = NativeGeometry::empty(GeometryType::LinearRing, Dimension::XY);
        Ok(Self(GeomHandle::create(&geom, None)?))
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::new(rows_to_coords(rows)?)
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Result<Self> {
        Self::new(points_to_coords(points)?)
    }
}

macro_rules! impl_curve {
    ($type:ident) => {
        impl $type {
            pub fn coord_seq(&self) -> CoordSeq {
                CoordSeq::new(&self.0)
            }

            pub fn get(&self, i: usize) -> Result<Coord> {
                self.0.read(|engine, h| engine.coord(h, i))
            }

            /// Overwrite coordinate `i`, which must match the dimension of the curve.
            pub fn set(&mut self, i: usize, coord: impl Into<Coord>) -> Result<()> {
                let coord = coord.into();
                self.0.write(|engine, h| engine.set_coord(h, i, coord))
            }

            pub fn coords(&self) -> Result<Vec<Coord>> {
                self.coord_seq().coords()
            }

            /// The coordinates as rows of two or three numbers.
            pub fn tuple(&self) -> Result<Vec<Vec<f64>>> {
                self.coord_seq().tuple()
            }

            pub fn num_points(&self) -> Result<usize> {
                self.coord_seq().len()
            }

            pub fn is_closed(&self) -> Result<bool> {
                self.0.read(|engine, h| Ok(engine.coords(h)?.is_closed()))
            }
        }
    };
}

impl_curve!(LineString);
impl_curve!(LinearRing);

/// Create a [LineString] from coordinate tuples.
///
/// ```
/// use geohandle::line_string;
///
/// let line = line_string![(0., 0.), (1., 1.), (2., 0.)].unwrap();
/// ```
#[macro_export]
macro_rules! line_string {
    () => {
        $crate::scalar::LineString::empty()
    };
    ($($coord:expr),+ $(,)?) => {
        $crate::scalar::LineString::new([$($coord),+])
    };
}

/// Create a [LinearRing] from coordinate tuples. The first and last must be equal.
#[macro_export]
macro_rules! linear_ring {
    () => {
        $crate::scalar::LinearRing::empty()
    };
    ($($coord:expr),+ $(,)?) => {
        $crate::scalar::LinearRing::new([$($coord),+])
    };
}
