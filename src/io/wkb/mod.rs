//! Reading and writing WKB and EWKB-encoded geometries, plus their hex encodings.
//!
//! Plain WKB uses ISO type codes (`1001` for a 3D point). EWKB marks Z and an embedded SRID
//! with high bits of the type code instead. Both flavors and both byte orders are accepted
//! on input.

pub(crate) mod common;
mod hex;
mod reader;
mod writer;

pub use common::{Endianness, WKBType};
pub use hex::{from_hex, is_hex, to_hex};
pub use reader::read_wkb;
pub use writer::{wkb_size, write_wkb, WkbFlavor};
