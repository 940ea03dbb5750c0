use std::fmt::Debug;

use crate::coord::Coord;
use crate::datatypes::Dimension;
use crate::error::Result;
use crate::scalar::GeomHandle;

/// The coordinates of a [Point](crate::scalar::Point),
/// [LineString](crate::scalar::LineString) or [LinearRing](crate::scalar::LinearRing).
///
/// A sequence addresses the allocation of the geometry it was taken from: writes are
/// visible through that geometry and all of its aliases, and every access fails with
/// [Lifetime](crate::error::GeoHandleError::Lifetime) once the geometry is gone.
pub struct CoordSeq(GeomHandle);

impl CoordSeq {
    pub(crate) fn new(owner: &GeomHandle) -> Self {
        Self(owner.share())
    }

    pub fn len(&self) -> Result<usize> {
        self.0.read(|engine, h| Ok(engine.coords(h)?.len()))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn dim(&self) -> Result<Dimension> {
        self.0.read(|engine, h| Ok(engine.coords(h)?.dim()))
    }

    pub fn has_z(&self) -> Result<bool> {
        Ok(self.dim()?.has_z())
    }

    pub fn get(&self, i: usize) -> Result<Coord> {
        self.0.read(|engine, h| engine.coord(h, i))
    }

    /// Overwrite coordinate `i`.
    ///
    /// The coordinate must have as many components as the sequence has dimensions, or this
    /// fails with [Type](crate::error::GeoHandleError::Type) and leaves the sequence
    /// unchanged.
    pub fn set(&mut self, i: usize, coord: impl Into<Coord>) -> Result<()> {
        let coord = coord.into();
        self.0.write(|engine, h| engine.set_coord(h, i, coord))
    }

    pub fn get_x(&self, i: usize) -> Result<f64> {
        Ok(self.get(i)?.x)
    }

    pub fn get_y(&self, i: usize) -> Result<f64> {
        Ok(self.get(i)?.y)
    }

    pub fn get_z(&self, i: usize) -> Result<Option<f64>> {
        Ok(self.get(i)?.z)
    }

    pub fn set_x(&mut self, i: usize, value: f64) -> Result<()> {
        self.set_ordinate(i, 0, value)
    }

    pub fn set_y(&mut self, i: usize, value: f64) -> Result<()> {
        self.set_ordinate(i, 1, value)
    }

    /// Fails with [Type](crate::error::GeoHandleError::Type) on a 2D sequence.
    pub fn set_z(&mut self, i: usize, value: f64) -> Result<()> {
        self.set_ordinate(i, 2, value)
    }

    pub fn set_ordinate(&mut self, i: usize, ordinate: usize, value: f64) -> Result<()> {
        self.0
            .write(|engine, h| engine.set_ordinate(h, i, ordinate, value))
    }

    /// All coordinates, in order.
    pub fn coords(&self) -> Result<Vec<Coord>> {
        self.0.read(|engine, h| Ok(engine.coords(h)?.iter().collect()))
    }

    /// All coordinates as rows of two or three numbers.
    pub fn tuple(&self) -> Result<Vec<Vec<f64>>> {
        Ok(self.coords()?.iter().map(Coord::to_vec).collect())
    }
}

impl Debug for CoordSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordSeq")
            .field("handle", &self.0)
            .field("coords", &self.coords())
            .finish()
    }
}
