//! Convert between the native geometry tree and [`geo`] geometries.

mod scalar;

pub use scalar::{
    geometry_from_geo, geometry_to_geo, line_string_to_geo, multi_polygon_from_geo,
    polygon_to_geo,
};
