//! Read and write WKT and EWKT.
//!
//! Parsing and rendering go through [`geozero`]. Two things are handled around it: the EWKT
//! `SRID=<n>;` prefix, and the `LINEARRING` tag, which is read and written as a line string
//! and retagged here.

mod reader;
mod writer;

pub use reader::{read_wkt, split_srid};
pub use writer::{write_ewkt, write_wkt};
