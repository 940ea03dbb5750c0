//! Geometric algorithms over [`NativeGeometry`][crate::engine::NativeGeometry], implemented
//! with the [`geo`] crate.

mod area;
pub use area::Area;

mod boundary;
pub use boundary::Boundary;

mod buffer;
pub use buffer::{Buffer, MAX_QUADRANT_SEGMENTS};

mod centroid;
pub use centroid::Centroid;

mod convex_hull;
pub use convex_hull::ConvexHull;

mod envelope;
pub use envelope::Envelope;

mod length;
pub use length::EuclideanLength;

mod overlay;
pub use overlay::{Overlay, OverlayOp};

mod relate;
pub use relate::{Predicate, Relate, RelateMatrix};

pub(crate) mod utils;

mod valid;
pub use valid::Validity;
