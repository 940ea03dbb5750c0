//! The operations shared by every geometry wrapper.

use crate::algorithm::geo::{OverlayOp, Predicate, RelateMatrix};
use crate::datatypes::{Dimension, GeometryType};
use crate::engine::{options, Handle};
use crate::error::Result;
use crate::scalar::{Geometry, Point};

pub(crate) mod private {
    use crate::scalar::GeomHandle;

    pub trait Sealed {
        fn geom_handle(&self) -> &GeomHandle;
    }
}

/// A geometry backed by an engine handle.
///
/// Every method asks the engine, so every method can fail: with
/// [Lifetime](crate::error::GeoHandleError::Lifetime) when the wrapper is an alias whose
/// owner has been dropped or whose slot has been overwritten.
///
/// Results of set operations, [buffer](Geom::buffer) and the other derived geometries are
/// new owned geometries carrying the SRID of `self`.
pub trait Geom: private::Sealed {
    /// The engine handle this wrapper refers to.
    fn handle(&self) -> Handle {
        self.geom_handle().handle()
    }

    /// Whether this wrapper releases its geometry when dropped.
    fn is_owned(&self) -> bool {
        self.geom_handle().is_owned()
    }

    fn geom_type(&self) -> Result<GeometryType> {
        self.geom_handle()
            .read(|engine, h| engine.geometry_type(h))
    }

    fn geom_typeid(&self) -> Result<u8> {
        Ok(self.geom_type()?.into())
    }

    fn srid(&self) -> Result<Option<i32>> {
        self.geom_handle().read(|engine, h| engine.srid(h))
    }

    /// Set the SRID of this geometry and all of its members.
    fn set_srid(&mut self, srid: impl Into<Option<i32>>) -> Result<()> {
        let srid = srid.into();
        self.geom_handle()
            .write(|engine, h| engine.set_srid(h, srid))
    }

    fn dim(&self) -> Result<Dimension> {
        self.geom_handle().read(|engine, h| engine.dim(h))
    }

    fn has_z(&self) -> Result<bool> {
        Ok(self.dim()?.has_z())
    }

    /// Coordinates of a point or curve, rings of a polygon, members of a collection.
    fn len(&self) -> Result<usize> {
        self.geom_handle().read(|engine, h| engine.len(h))
    }

    fn is_empty(&self) -> Result<bool> {
        self.geom_handle().read(|engine, h| engine.is_empty(h))
    }

    fn is_valid(&self) -> Result<bool> {
        self.geom_handle().read(|engine, h| engine.is_valid(h))
    }

    fn is_ring(&self) -> Result<bool> {
        self.geom_handle().read(|engine, h| engine.is_ring(h))
    }

    fn num_coords(&self) -> Result<usize> {
        self.geom_handle()
            .read(|engine, h| Ok(engine.export(h)?.num_coords()))
    }

    fn wkt(&self) -> Result<String> {
        self.geom_handle().read(|engine, h| engine.wkt(h))
    }

    fn ewkt(&self) -> Result<String> {
        self.geom_handle().read(|engine, h| engine.ewkt(h))
    }

    fn wkb(&self) -> Result<Vec<u8>> {
        self.geom_handle().read(|engine, h| engine.wkb(h))
    }

    fn ewkb(&self) -> Result<Vec<u8>> {
        self.geom_handle().read(|engine, h| engine.ewkb(h))
    }

    fn hex(&self) -> Result<String> {
        self.geom_handle().read(|engine, h| engine.hex(h))
    }

    fn hexewkb(&self) -> Result<String> {
        self.geom_handle().read(|engine, h| engine.hexewkb(h))
    }

    fn kml(&self) -> Result<String> {
        self.geom_handle().read(|engine, h| engine.kml(h))
    }

    /// GeoJSON geometry object.
    fn json(&self) -> Result<String> {
        self.geom_handle().read(|engine, h| engine.json(h))
    }

    fn area(&self) -> Result<f64> {
        self.geom_handle().read(|engine, h| engine.area(h))
    }

    fn length(&self) -> Result<f64> {
        self.geom_handle().read(|engine, h| engine.length(h))
    }

    fn relate<G: Geom>(&self, other: &G) -> Result<RelateMatrix> {
        let other = other.handle();
        self.geom_handle()
            .read(|engine, h| engine.relate(h, other))
    }

    /// Match the DE-9IM matrix against a 9-character pattern of `T`, `F`, `*`, `0`, `1`
    /// and `2`. A malformed pattern fails with
    /// [Engine](crate::error::GeoHandleError::Engine).
    fn relate_pattern<G: Geom>(&self, other: &G, pattern: &str) -> Result<bool> {
        let other = other.handle();
        self.geom_handle()
            .read(|engine, h| engine.relate_pattern(h, other, pattern))
    }

    #[doc(hidden)]
    fn predicate<G: Geom>(&self, other: &G, predicate: Predicate) -> Result<bool> {
        let other = other.handle();
        self.geom_handle()
            .read(|engine, h| engine.predicate(h, other, predicate))
    }

    fn intersects<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Intersects)
    }

    fn disjoint<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Disjoint)
    }

    fn touches<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Touches)
    }

    fn crosses<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Crosses)
    }

    fn within<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Within)
    }

    fn contains<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Contains)
    }

    fn overlaps<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Overlaps)
    }

    fn covers<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::Covers)
    }

    fn covered_by<G: Geom>(&self, other: &G) -> Result<bool> {
        self.predicate(other, Predicate::CoveredBy)
    }

    /// Topological equality. Geometries of different coordinate dimension are never equal,
    /// two empty geometries of the same dimension always are.
    fn equals<G: Geom>(&self, other: &G) -> Result<bool> {
        let other = other.handle();
        self.geom_handle()
            .read(|engine, h| engine.equals(h, other))
    }

    /// Structural equality with every ordinate within `tolerance`.
    fn equals_exact<G: Geom>(&self, other: &G, tolerance: f64) -> Result<bool> {
        let other = other.handle();
        self.geom_handle()
            .read(|engine, h| engine.equals_exact(h, other, tolerance))
    }

    #[doc(hidden)]
    fn overlay<G: Geom>(&self, other: &G, op: OverlayOp) -> Result<Geometry> {
        let other = other.handle();
        let handle = self
            .geom_handle()
            .derive(|engine, h| engine.overlay(h, other, op))?;
        Geometry::from_handle(handle)
    }

    fn intersection<G: Geom>(&self, other: &G) -> Result<Geometry> {
        self.overlay(other, OverlayOp::Intersection)
    }

    fn union<G: Geom>(&self, other: &G) -> Result<Geometry> {
        self.overlay(other, OverlayOp::Union)
    }

    fn difference<G: Geom>(&self, other: &G) -> Result<Geometry> {
        self.overlay(other, OverlayOp::Difference)
    }

    fn sym_difference<G: Geom>(&self, other: &G) -> Result<Geometry> {
        self.overlay(other, OverlayOp::SymDifference)
    }

    /// The area within `width` of this geometry, curves approximated with `quadsegs`
    /// segments per quarter circle.
    ///
    /// The segment count is an integer:
    ///
    /// ```compile_fail
    /// use geohandle::scalar::Point;
    /// use geohandle::Geom;
    ///
    /// let point = Point::new((0., 0.)).unwrap();
    /// point.buffer(1.0, 8.0);
    /// ```
    fn buffer(&self, width: f64, quadsegs: i32) -> Result<Geometry> {
        let handle = self
            .geom_handle()
            .derive(|engine, h| engine.buffer(h, width, quadsegs))?;
        Geometry::from_handle(handle)
    }

    /// [buffer](Geom::buffer) with the engine's default quadrant segments.
    fn buffer_default(&self, width: f64) -> Result<Geometry> {
        self.buffer(width, options()?.default_quadrant_segments)
    }

    fn centroid(&self) -> Result<Point> {
        let handle = self
            .geom_handle()
            .derive(|engine, h| engine.centroid(h))?;
        Point::from_handle(handle)
    }

    fn envelope(&self) -> Result<Geometry> {
        let handle = self
            .geom_handle()
            .derive(|engine, h| engine.envelope(h))?;
        Geometry::from_handle(handle)
    }

    fn convex_hull(&self) -> Result<Geometry> {
        let handle = self
            .geom_handle()
            .derive(|engine, h| engine.convex_hull(h))?;
        Geometry::from_handle(handle)
    }

    fn boundary(&self) -> Result<Geometry> {
        let handle = self
            .geom_handle()
            .derive(|engine, h| engine.boundary(h))?;
        Geometry::from_handle(handle)
    }

    /// A copy of this geometry as a plain [Geometry].
    fn to_geometry(&self) -> Result<Geometry> {
        Geometry::from_handle(self.geom_handle().try_clone()?)
    }
}

impl<T: private::Sealed> Geom for T {}
