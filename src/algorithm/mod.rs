//! Algorithms the engine runs on detached geometries.

pub mod geo;
