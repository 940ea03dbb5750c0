use crate::coord::Coord;
use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::error::Result;
use crate::scalar::macros::impl_geom;
use crate::scalar::{CoordSeq, GeomHandle};

/// A point with two or three ordinates, or the empty point.
///
/// ```
/// use geohandle::scalar::Point;
/// use geohandle::Geom;
///
/// let mut point = Point::new((5., 23.)).unwrap().with_srid(4326).unwrap();
/// assert_eq!(point.srid().unwrap(), Some(4326));
/// point.set_x(6.).unwrap();
/// assert_eq!(point.wkt().unwrap(), "POINT(6 23)");
/// ```
///
/// An SRID is a number:
///
/// ```compile_fail
/// use geohandle::scalar::Point;
///
/// let point = Point::new((5., 23.)).unwrap().with_srid("4326");
/// ```
pub struct Point(GeomHandle);

impl_geom!(Point, GeometryType::Point);

impl Point {
    pub fn new(coord: impl Into<Coord>) -> Result<Self> {
        let geom = NativeGeometry::point(coord.into());
        Ok(Self(GeomHandle::create(&geom, None)?))
    }

    /// A point from a row of two or three numbers.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        Self::new(Coord::try_from(values)?)
    }

    pub fn empty() -> Result<Self> {
        let geom = NativeGeometry::empty(GeometryType::Point, Dimension::XY);
        Ok(Self(GeomHandle::create(&geom, None)?))
    }

    /// The coordinate of this point. Fails with an index error on the empty point.
    pub fn coord(&self) -> Result<Coord> {
        self.0.read(|engine, h| engine.coord(h, 0))
    }

    pub fn x(&self) -> Result<f64> {
        Ok(self.coord()?.x)
    }

    pub fn y(&self) -> Result<f64> {
        Ok(self.coord()?.y)
    }

    /// `None` for a 2D point.
    pub fn z(&self) -> Result<Option<f64>> {
        Ok(self.coord()?.z)
    }

    pub fn set_x(&mut self, x: f64) -> Result<()> {
        self.0.write(|engine, h| engine.set_ordinate(h, 0, 0, x))
    }

    pub fn set_y(&mut self, y: f64) -> Result<()> {
        self.0.write(|engine, h| engine.set_ordinate(h, 0, 1, y))
    }

    /// Fails with [Type](crate::error::GeoHandleError::Type) on a 2D point.
    pub fn set_z(&mut self, z: f64) -> Result<()> {
        self.0.write(|engine, h| engine.set_ordinate(h, 0, 2, z))
    }

    /// Replace the coordinate, which must have the dimension of the point.
    pub fn set_coord(&mut self, coord: impl Into<Coord>) -> Result<()> {
        let coord = coord.into();
        self.0.write(|engine, h| engine.set_coord(h, 0, coord))
    }

    /// The ordinates as a row of two or three numbers.
    pub fn tuple(&self) -> Result<Vec<f64>> {
        Ok(self.coord()?.to_vec())
    }

    pub fn coord_seq(&self) -> CoordSeq {
        CoordSeq::new(&self.0)
    }
}
