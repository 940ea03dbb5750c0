//! Readers and writers for the text and binary geometry formats, including interoperability
//! with the `geozero` crate.

pub mod geo;
pub mod geojson;
pub mod geozero;
pub mod kml;
pub mod wkb;
pub mod wkt;
