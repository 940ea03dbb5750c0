use crate::error::Result;

/// Geometries whose members can be extracted by index.
pub trait Members {
    type Member;

    /// Number of members.
    fn num_members(&self) -> Result<usize>;

    /// An alias of the `i`-th member.
    fn member(&self, i: usize) -> Result<Self::Member>;
}

/// Iterator over aliases of the members of a polygon or collection.
///
/// Every item is a `Result`. Once the iterated geometry is invalidated, the next item is
/// its [Lifetime](crate::error::GeoHandleError::Lifetime) error and iteration ends.
#[derive(Clone, Debug)]
pub struct MemberIterator<'a, G: Members> {
    geom: &'a G,
    index: usize,
    end: usize,
}

impl<'a, G: Members> MemberIterator<'a, G> {
    #[inline]
    pub fn new(geom: &'a G) -> Result<Self> {
        Ok(Self {
            geom,
            index: 0,
            end: geom.num_members()?,
        })
    }
}

impl<'a, G: Members> MemberIterator<'a, G> {
    fn fuse_on_error(&mut self, member: Result<G::Member>) -> Result<G::Member> {
        if member.is_err() {
            self.index = self.end;
        }
        member
    }
}

impl<'a, G: Members> Iterator for MemberIterator<'a, G> {
    type Item = Result<G::Member>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            return None;
        }
        let old = self.index;
        self.index += 1;
        let member = self.geom.member(old);
        Some(self.fuse_on_error(member))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.end - self.index, Some(self.end - self.index))
    }
}

impl<'a, G: Members> ExactSizeIterator for MemberIterator<'a, G> {}

impl<'a, G: Members> DoubleEndedIterator for MemberIterator<'a, G> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        } else {
            self.end -= 1;
            let member = self.geom.member(self.end);
            Some(self.fuse_on_error(member))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scalar::{Geometry, GeometryCollection, MultiPolygon, Polygon};
    use crate::test::{multipolygon, polygon};

    #[test]
    fn yields_every_member() {
        let multi = MultiPolygon::from_wkt(multipolygon::TWO_SQUARES).unwrap();
        let mut iter = multi.iter().unwrap();
        assert_eq!(iter.len(), 2);
        let last = iter.next_back().unwrap().unwrap();
        assert_eq!(last, multi.get(1).unwrap());
        assert_eq!(iter.len(), 1);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().is_none());
    }

    #[test]
    fn reports_dropped_owner() {
        let multi = MultiPolygon::from_wkt(multipolygon::TWO_SQUARES).unwrap();
        let first = multi.get(0).unwrap();
        let iter = first.iter().unwrap();
        assert_eq!(iter.len(), 1);
        drop(multi);

        let items: Vec<_> = iter.collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].as_ref().unwrap_err().is_lifetime());
    }

    #[test]
    fn stops_after_first_error() {
        let poly = Polygon::from_wkt(polygon::WITH_HOLE).unwrap();
        let gc = GeometryCollection::new([Geometry::from(poly)]).unwrap();
        let member: Polygon = gc.get(0).unwrap().try_into().unwrap();
        let mut rings = member.iter().unwrap();
        assert_eq!(rings.len(), 2);
        drop(gc);

        assert!(rings.next().unwrap().unwrap_err().is_lifetime());
        assert_eq!(rings.len(), 0);
        assert!(rings.next().is_none());
        assert!(rings.next_back().is_none());
    }
}
