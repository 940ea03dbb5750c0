use crate::coord::Coord;
use crate::datatypes::Dimension;
use crate::error::{GeoHandleError, Result};

/// The ordinates of a run of coordinates stored interleaved in a single buffer.
///
/// Every coordinate in a buffer has the same [Dimension].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoordBuffer {
    dim: Dimension,
    coords: Vec<f64>,
}

impl CoordBuffer {
    pub fn new(dim: Dimension) -> Self {
        Self::with_capacity(dim, 0)
    }

    pub fn with_capacity(dim: Dimension, capacity: usize) -> Self {
        Self {
            dim,
            coords: Vec::with_capacity(capacity * dim.size()),
        }
    }

    /// Build a buffer from coordinates.
    ///
    /// The dimension is taken from the first coordinate; an empty input gives an empty 2D
    /// buffer. Mixing 2D and 3D coordinates is a [GeoHandleError::Type].
    pub fn try_from_coords(coords: impl IntoIterator<Item = Coord>) -> Result<Self> {
        let mut coords = coords.into_iter().peekable();
        let dim = coords.peek().map(|c| c.dim()).unwrap_or_default();
        let mut buffer = Self::with_capacity(dim, coords.size_hint().0);
        for coord in coords {
            buffer.push_coord(coord)?;
        }
        Ok(buffer)
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.coords.len() / self.dim.size()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn push_coord(&mut self, coord: Coord) -> Result<()> {
        self.check_dim(&coord)?;
        self.coords.push(coord.x);
        self.coords.push(coord.y);
        if let Some(z) = coord.z {
            self.coords.push(z);
        }
        Ok(())
    }

    /// Push an xy position, padding with `z = 0` when this buffer is 3D.
    pub(crate) fn push_xy(&mut self, x: f64, y: f64) {
        self.coords.push(x);
        self.coords.push(y);
        if self.dim.has_z() {
            self.coords.push(0.0);
        }
    }

    pub fn get(&self, i: usize) -> Option<Coord> {
        if i >= self.len() {
            return None;
        }
        let size = self.dim.size();
        let c = &self.coords[i * size..(i + 1) * size];
        Some(Coord {
            x: c[0],
            y: c[1],
            z: c.get(2).copied(),
        })
    }

    /// Overwrite the `i`th coordinate. The buffer is left unchanged on error.
    pub fn set(&mut self, i: usize, coord: Coord) -> Result<()> {
        if i >= self.len() {
            return Err(GeoHandleError::index(i, self.len()));
        }
        self.check_dim(&coord)?;
        let size = self.dim.size();
        let slot = &mut self.coords[i * size..(i + 1) * size];
        slot[0] = coord.x;
        slot[1] = coord.y;
        if let Some(z) = coord.z {
            slot[2] = z;
        }
        Ok(())
    }

    /// Overwrite a single ordinate (0 = x, 1 = y, 2 = z) of the `i`th coordinate.
    pub fn set_ordinate(&mut self, i: usize, ordinate: usize, value: f64) -> Result<()> {
        if i >= self.len() {
            return Err(GeoHandleError::index(i, self.len()));
        }
        if ordinate >= self.dim.size() {
            return Err(GeoHandleError::Type(format!(
                "cannot set ordinate {ordinate} of a {}D coordinate",
                self.dim.size()
            )));
        }
        self.coords[i * self.dim.size() + ordinate] = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    pub fn first(&self) -> Option<Coord> {
        self.get(0)
    }

    pub fn last(&self) -> Option<Coord> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Whether the first and last coordinates are equal. Empty buffers are not closed.
    pub fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    pub fn to_geo(&self) -> Vec<geo::Coord> {
        self.iter().map(geo::Coord::from).collect()
    }

    fn check_dim(&self, coord: &Coord) -> Result<()> {
        if coord.dim() != self.dim {
            return Err(GeoHandleError::Type(format!(
                "expected a {}D coordinate, got {}D",
                self.dim.size(),
                coord.dim().size()
            )));
        }
        Ok(())
    }
}

impl From<&[geo::Coord]> for CoordBuffer {
    fn from(value: &[geo::Coord]) -> Self {
        let mut buffer = Self::with_capacity(Dimension::XY, value.len());
        value.iter().for_each(|c| buffer.push_xy(c.x, c.y));
        buffer
    }
}
