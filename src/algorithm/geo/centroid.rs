use geo::algorithm::centroid::Centroid as GeoCentroid;

use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::io::geo::geometry_to_geo;

/// Calculation of the centroid. The centroid of an empty geometry is an empty point.
pub trait Centroid {
    fn centroid(&self) -> NativeGeometry;
}

impl Centroid for NativeGeometry {
    fn centroid(&self) -> NativeGeometry {
        match geometry_to_geo(self).centroid() {
            Some(point) => NativeGeometry::point(point.0.into()),
            None => NativeGeometry::empty(GeometryType::Point, Dimension::XY),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;
    use approx::assert_relative_eq;

    fn centroid(wkt: &str) -> NativeGeometry {
        read_wkt(wkt).unwrap().0.centroid()
    }

    #[test]
    fn centroids() {
        let c = centroid("POLYGON((0 0,0 10,10 10,10 0,0 0))").coords()[0];
        assert_relative_eq!(c.x, 5.0);
        assert_relative_eq!(c.y, 5.0);
        let c = centroid("LINESTRING(0 0,4 0)").coords()[0];
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 0.0);
    }

    #[test]
    fn empty() {
        let c = centroid("POLYGON EMPTY");
        assert!(c.is_empty());
        assert_eq!(c.geometry_type(), GeometryType::Point);
    }
}
