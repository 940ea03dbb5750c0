use geo::prelude::Area as GeoArea;

use crate::engine::NativeGeometry;
use crate::io::geo::geometry_to_geo;

/// Unsigned planar area of a geometry. Points and lines have zero area.
///
/// # Examples
///
/// ```
/// use geohandle::algorithm::geo::Area;
/// use geohandle::io::wkt::read_wkt;
///
/// let (polygon, _) = read_wkt("POLYGON((0 0,5 0,5 6,0 6,0 0))").unwrap();
/// assert_eq!(polygon.unsigned_area(), 30.);
/// ```
pub trait Area {
    fn unsigned_area(&self) -> f64;
}

impl Area for NativeGeometry {
    fn unsigned_area(&self) -> f64 {
        geometry_to_geo(self).unsigned_area()
    }
}
