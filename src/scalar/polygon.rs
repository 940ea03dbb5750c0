use crate::datatypes::GeometryType;
use crate::engine::NativeGeometry;
use crate::error::{Result, SetError};
use crate::scalar::iterator::{MemberIterator, Members};
use crate::scalar::macros::impl_geom;
use crate::scalar::{GeomHandle, Geometry, LinearRing};

/// A shell ring and zero or more holes.
///
/// Ring 0 is the shell, rings 1 and up are the holes. Rings taken out of a polygon are
/// aliases: they stay usable until the polygon is dropped or the ring's slot is
/// overwritten.
///
/// ```
/// use geohandle::linear_ring;
/// use geohandle::scalar::Polygon;
/// use geohandle::Geom;
///
/// let shell = linear_ring![(0., 0.), (0., 10.), (10., 10.), (10., 0.), (0., 0.)].unwrap();
/// let hole = linear_ring![(1., 1.), (1., 2.), (2., 2.), (2., 1.), (1., 1.)].unwrap();
/// let polygon = Polygon::new(shell, [hole]).unwrap();
/// assert_eq!(polygon.len().unwrap(), 2);
/// assert_eq!(polygon.area().unwrap(), 99.);
/// ```
///
/// Indices are unsigned:
///
/// ```compile_fail
/// use geohandle::scalar::Polygon;
///
/// let polygon = Polygon::empty().unwrap();
/// polygon.get(-1);
/// ```
pub struct Polygon(GeomHandle);

impl_geom!(Polygon, GeometryType::Polygon);

impl Polygon {
    /// A polygon adopting `shell` and `holes`.
    ///
    /// The rings are moved into the polygon; rings that are aliases of another polygon are
    /// copied first. The polygon takes the SRID of the shell.
    pub fn new(shell: LinearRing, holes: impl IntoIterator<Item = LinearRing>) -> Result<Self> {
        let srid = crate::Geom::srid(&shell)?;
        let rings = std::iter::once(shell)
            .chain(holes)
            .map(LinearRing::into_handle)
            .collect();
        Ok(Self(GeomHandle::compose(GeometryType::Polygon, rings, srid)?))
    }

    pub fn empty() -> Result<Self> {
        let geom = NativeGeometry::Polygon(vec![]);
        Ok(Self(GeomHandle::create(&geom, None)?))
    }

    /// Ring `i`: the shell for 0, hole `i - 1` after that.
    pub fn get(&self, i: usize) -> Result<LinearRing> {
        LinearRing::from_handle(self.0.member(i)?)
    }

    /// Replace ring `i`.
    ///
    /// The index is checked first, then that `ring` is a [LinearRing]. The ring previously
    /// in the slot is released, so aliases of it fail with a lifetime error. A rejected
    /// ring is handed back in the [SetError].
    pub fn set(&mut self, i: usize, ring: impl Into<Geometry>) -> Result<(), SetError> {
        self.0.replace_member(i, ring.into())
    }

    pub fn exterior_ring(&self) -> Result<LinearRing> {
        self.get(0)
    }

    /// Same as [exterior_ring](Polygon::exterior_ring).
    pub fn shell(&self) -> Result<LinearRing> {
        self.get(0)
    }

    pub fn set_exterior_ring(&mut self, ring: impl Into<Geometry>) -> Result<(), SetError> {
        self.set(0, ring)
    }

    pub fn num_interior_rings(&self) -> Result<usize> {
        Ok(self.num_members()?.saturating_sub(1))
    }

    /// Hole `i`.
    pub fn interior_ring(&self, i: usize) -> Result<LinearRing> {
        self.get(i + 1)
    }

    /// Iterate over aliases of the shell and then the holes.
    pub fn iter(&self) -> Result<MemberIterator<'_, Self>> {
        MemberIterator::new(self)
    }
}

impl Members for Polygon {
    type Member = LinearRing;

    fn num_members(&self) -> Result<usize> {
        self.0.read(|engine, h| engine.len(h))
    }

    fn member(&self, i: usize) -> Result<LinearRing> {
        self.get(i)
    }
}
