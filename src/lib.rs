//! Safe, mutable geometry objects over a handle-based geometry engine.
//!
//! Every geometry lives in the engine of the current thread and is referred to by a
//! [Handle](engine::Handle). The wrappers in [scalar] own their handle, releasing it when
//! dropped, or are aliases of a member of some other geometry. An alias fails with
//! [Lifetime](error::GeoHandleError::Lifetime) once that member is gone: when its owner is
//! dropped, or its slot overwritten.
//!
//! ```
//! use geohandle::scalar::Polygon;
//! use geohandle::Geom;
//!
//! let polygon = Polygon::from_wkt("POLYGON((0 0,0 10,10 10,10 0,0 0))").unwrap();
//! let shell = polygon.get(0).unwrap();
//! assert_eq!(shell.num_points().unwrap(), 5);
//! drop(polygon);
//! assert!(shell.wkt().unwrap_err().is_lifetime());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use trait_::Geom;

pub mod algorithm;
pub mod coord;
pub mod datatypes;
pub mod engine;
pub mod error;
pub mod io;
pub mod scalar;
#[cfg(test)]
pub(crate) mod test;
pub mod trait_;
