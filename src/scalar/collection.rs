use crate::datatypes::{Dimension, GeometryType};
use crate::engine::NativeGeometry;
use crate::error::{Result, SetError};
use crate::scalar::iterator::{MemberIterator, Members};
use crate::scalar::macros::impl_geom;
use crate::scalar::{GeomHandle, Geometry, LineString, Point, Polygon};
use crate::Geom;

/// Points.
pub struct MultiPoint(GeomHandle);

/// Line strings. Rings added to a multi line string become line strings.
pub struct MultiLineString(GeomHandle);

/// Polygons.
pub struct MultiPolygon(GeomHandle);

/// Geometries of any type, including other collections.
///
/// ```
/// use geohandle::scalar::{Geometry, GeometryCollection, LineString, Point};
/// use geohandle::Geom;
///
/// let point = Point::new((0., 0.)).unwrap();
/// let line = LineString::new([(1., 1.), (2., 2.)]).unwrap();
/// let collection = GeometryCollection::new([Geometry::from(point), line.into()]).unwrap();
/// assert_eq!(collection.wkt().unwrap(), "GEOMETRYCOLLECTION(POINT(0 0),LINESTRING(1 1,2 2))");
/// ```
pub struct GeometryCollection(GeomHandle);

impl_geom!(MultiPoint, GeometryType::MultiPoint);
impl_geom!(MultiLineString, GeometryType::MultiLineString);
impl_geom!(MultiPolygon, GeometryType::MultiPolygon);
impl_geom!(GeometryCollection, GeometryType::GeometryCollection);

macro_rules! impl_collection {
    ($type:ident, $member:ident) => {
        impl $type {
            /// A collection adopting `members`.
            ///
            /// Members are moved into the collection; members that are aliases of another
            /// geometry are copied first. The collection takes the SRID of its first member.
            /// A member of the wrong type fails with
            /// [Type](crate::error::GeoHandleError::Type), and every member is released.
            pub fn new(members: impl IntoIterator<Item = impl Into<Geometry>>) -> Result<Self> {
                let members: Vec<Geometry> = members.into_iter().map(Into::into).collect();
                let srid = match members.first() {
                    Some(first) => first.srid()?,
                    None => None,
                };
                let handles = members.into_iter().map(Geometry::into_handle).collect();
                Ok(Self(GeomHandle::compose(GeometryType::$type, handles, srid)?))
            }

            pub fn empty() -> Result<Self> {
                let geom = NativeGeometry::empty(GeometryType::$type, Dimension::XY);
                Ok(Self(GeomHandle::create(&geom, None)?))
            }

            /// An alias of member `i`, valid while this collection holds it.
            pub fn get(&self, i: usize) -> Result<$member> {
                $member::from_handle(self.0.member(i)?)
            }

            /// Replace member `i`, releasing the previous one.
            ///
            /// The index is checked before the type of `member`. Aliases of the replaced
            /// member fail with a lifetime error afterwards. A rejected member is handed
            /// back in the [SetError].
            pub fn set(&mut self, i: usize, member: impl Into<Geometry>) -> Result<(), SetError> {
                self.0.replace_member(i, member.into())
            }

            pub fn num_geom(&self) -> Result<usize> {
                self.num_members()
            }

            pub fn iter(&self) -> Result<MemberIterator<'_, Self>> {
                MemberIterator::new(self)
            }
        }

        impl Members for $type {
            type Member = $member;

            fn num_members(&self) -> Result<usize> {
                self.0.read(|engine, h| engine.len(h))
            }

            fn member(&self, i: usize) -> Result<$member> {
                self.get(i)
            }
        }
    };
}

impl_collection!(MultiPoint, Point);
impl_collection!(MultiLineString, LineString);
impl_collection!(MultiPolygon, Polygon);
impl_collection!(GeometryCollection, Geometry);

#[cfg(test)]
mod test {
    use rand::Rng;

    use super::*;
    use crate::error::GeoHandleError;
    use crate::scalar::LinearRing;
    use crate::test::{linestring, multipolygon, polygon};
    use crate::line_string;

    fn points(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new((i as f64, i as f64)).unwrap())
            .collect()
    }

    #[test]
    fn multi_point_members() {
        let multi = MultiPoint::new(points(3)).unwrap();
        assert_eq!(multi.num_geom().unwrap(), 3);
        assert_eq!(multi.wkt().unwrap(), "MULTIPOINT(0 0,1 1,2 2)");
        let second = multi.get(1).unwrap();
        assert!(!second.is_owned());
        assert_eq!(second.tuple().unwrap(), vec![1., 1.]);
        assert!(matches!(
            multi.get(3),
            Err(GeoHandleError::Index { index: 3, len: 3 })
        ));
    }

    #[test]
    fn member_type_is_checked() {
        let line = line_string![(0., 0.), (1., 1.)].unwrap();
        let err = MultiPoint::new([Geometry::from(Point::new((0., 0.)).unwrap()), line.into()])
            .unwrap_err();
        assert!(matches!(err, GeoHandleError::Type(_)));

        let mut multi = MultiPoint::new(points(2)).unwrap();
        let line = line_string![(0., 0.), (1., 1.)].unwrap();
        let err = multi.set(5, line).unwrap_err();
        assert!(matches!(err.error, GeoHandleError::Index { index: 5, len: 2 }));
        let err = multi.set(0, err.into_value()).unwrap_err();
        assert!(matches!(err.error, GeoHandleError::Type(_)));
        assert_eq!(err.value.wkt().unwrap(), "LINESTRING(0 0,1 1)");
        assert_eq!(multi.wkt().unwrap(), "MULTIPOINT(0 0,1 1)");
    }

    #[test]
    fn rings_become_line_strings() {
        let ring = LinearRing::from_wkt(linestring::RING).unwrap();
        let line = LineString::from_wkt(linestring::LINE).unwrap();
        let multi = MultiLineString::new([Geometry::from(ring), line.into()]).unwrap();
        let first = multi.get(0).unwrap();
        assert_eq!(first.geom_type().unwrap(), GeometryType::LineString);
        assert_eq!(first.num_points().unwrap(), 5);
    }

    #[test]
    fn multi_polygon_members() {
        let multi = MultiPolygon::from_wkt(multipolygon::TWO_SQUARES).unwrap();
        assert_eq!(multi.num_geom().unwrap(), 2);
        let first = multi.get(0).unwrap();
        let shell = first.exterior_ring().unwrap();
        drop(multi);
        assert!(first.area().unwrap_err().is_lifetime());
        assert!(shell.coords().unwrap_err().is_lifetime());
    }

    #[test]
    fn collection_of_collections() {
        let inner = MultiPoint::new(points(2)).unwrap();
        let poly = Polygon::from_wkt(polygon::WITH_HOLE).unwrap();
        let gc = GeometryCollection::new([Geometry::from(inner), poly.into()]).unwrap();
        let kinds: Vec<GeometryType> = gc
            .iter()
            .unwrap()
            .map(|g| g.unwrap().geom_type().unwrap())
            .collect();
        assert_eq!(kinds, vec![GeometryType::MultiPoint, GeometryType::Polygon]);
        assert!(matches!(gc.get(0).unwrap(), Geometry::MultiPoint(_)));
    }

    #[test]
    fn srid_comes_from_first_member() {
        let a = Point::new((0., 0.)).unwrap().with_srid(4326).unwrap();
        let b = Point::new((1., 1.)).unwrap();
        let multi = MultiPoint::new([a, b]).unwrap();
        assert_eq!(multi.srid().unwrap(), Some(4326));
        assert_eq!(multi.get(1).unwrap().srid().unwrap(), Some(4326));
        assert_eq!(MultiPoint::empty().unwrap().srid().unwrap(), None);
    }

    #[test]
    fn empty_collections() {
        assert!(MultiPoint::empty().unwrap().is_empty().unwrap());
        assert!(MultiLineString::empty().unwrap().is_empty().unwrap());
        assert!(MultiPolygon::empty().unwrap().is_empty().unwrap());
        let gc = GeometryCollection::empty().unwrap();
        assert_eq!(gc.num_geom().unwrap(), 0);
        assert_eq!(gc.iter().unwrap().count(), 0);
    }

    #[test]
    fn random_slot_replacement() {
        let mut rng = rand::thread_rng();
        let n = 8;
        let mut multi = MultiPoint::new(points(n)).unwrap();
        let mut expected: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, i as f64)).collect();

        for _ in 0..50 {
            let i = rng.gen_range(0..n);
            let coord = (rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            let old = multi.get(i).unwrap();
            multi.set(i, Point::new(coord).unwrap()).unwrap();
            assert!(old.x().unwrap_err().is_lifetime());
            expected[i] = coord;
        }

        let actual: Vec<(f64, f64)> = multi
            .iter()
            .unwrap()
            .map(|p| p.unwrap())
            .map(|p| (p.x().unwrap(), p.y().unwrap()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn set_from_another_collection_copies() {
        let a = MultiPoint::new(points(2)).unwrap();
        let mut b = MultiPoint::new(points(2)).unwrap();
        b.set(0, a.get(1).unwrap()).unwrap();
        drop(a);
        assert_eq!(b.wkt().unwrap(), "MULTIPOINT(1 1,1 1)");
    }
}
