//! Typed wrappers over engine handles: one per geometry type, plus the dynamic [Geometry].
//!
//! Wrappers taken out of a polygon or collection with `get` or `iter` are aliases; all
//! others own their geometry.

pub use collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
pub use coord_seq::CoordSeq;
pub use geometry::Geometry;
pub use handle::GeomHandle;
pub use iterator::{MemberIterator, Members};
pub use linestring::{LineString, LinearRing};
pub use point::Point;
pub use polygon::Polygon;

mod collection;
mod coord_seq;
mod geometry;
mod handle;
mod iterator;
mod linestring;
pub(crate) mod macros;
mod point;
mod polygon;
