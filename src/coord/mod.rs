//! Coordinates and coordinate storage.
//!
//! A [Coord] is a single 2D or 3D position. A [CoordBuffer] stores the ordinates of a run of
//! coordinates _interleaved_ in one `Vec<f64>` (`x0, y0[, z0], x1, y1[, z1], ...`).

pub mod interleaved;
pub mod scalar;

pub use interleaved::CoordBuffer;
pub use scalar::Coord;
