//! Implements the geometry traits of [`geozero`](https://docs.rs/geozero) for the native
//! geometry tree, in both directions.

mod builder;
mod geometry;

pub use builder::{NativeGeometryBuilder, ToNativeGeometry};
