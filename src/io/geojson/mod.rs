//! Read and write single [GeoJSON](https://geojson.org/) geometries.

pub use reader::read_geojson;
pub use writer::write_geojson;

mod reader;
mod writer;
