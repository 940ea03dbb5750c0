use std::fmt::{Debug, Display};
use std::str::FromStr;

use crate::datatypes::GeometryType;
use crate::error::{GeoHandleError, Result, SetError};
use crate::io::geojson::read_geojson;
use crate::io::wkb::{from_hex, is_hex, read_wkb};
use crate::io::wkt::read_wkt;
use crate::scalar::macros::impl_overlay_ops;
use crate::scalar::*;
use crate::trait_::private::Sealed;
use crate::Geom;

/// A geometry of any type.
///
/// This is what parsing and the set operations return when the type of the result is not
/// known up front. Match on it, or convert with `try_into`, to get at the typed wrapper.
///
/// ```
/// use geohandle::scalar::{Geometry, Polygon};
/// use geohandle::Geom;
///
/// let a: Geometry = "POLYGON((0 0,0 10,10 10,10 0,0 0))".parse().unwrap();
/// let b: Geometry = "POLYGON((5 5,5 15,15 15,15 5,5 5))".parse().unwrap();
/// let overlap = (&a & &b).unwrap();
/// assert_eq!(overlap.area().unwrap(), 25.);
/// let overlap: Polygon = overlap.try_into().unwrap();
/// ```
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

macro_rules! dispatch {
    ($geom:expr, $g:ident => $body:expr) => {
        match $geom {
            Geometry::Point($g) => $body,
            Geometry::LineString($g) => $body,
            Geometry::LinearRing($g) => $body,
            Geometry::Polygon($g) => $body,
            Geometry::MultiPoint($g) => $body,
            Geometry::MultiLineString($g) => $body,
            Geometry::MultiPolygon($g) => $body,
            Geometry::GeometryCollection($g) => $body,
        }
    };
}

impl Geometry {
    /// Wrap `handle` in the variant matching the engine node's type.
    pub(crate) fn from_handle(handle: GeomHandle) -> Result<Self> {
        let geom_type = handle.read(|engine, h| engine.geometry_type(h))?;
        Ok(match geom_type {
            GeometryType::Point => Geometry::Point(Point::from_handle(handle)?),
            GeometryType::LineString => Geometry::LineString(LineString::from_handle(handle)?),
            GeometryType::LinearRing => Geometry::LinearRing(LinearRing::from_handle(handle)?),
            GeometryType::Polygon => Geometry::Polygon(Polygon::from_handle(handle)?),
            GeometryType::MultiPoint => Geometry::MultiPoint(MultiPoint::from_handle(handle)?),
            GeometryType::MultiLineString => {
                Geometry::MultiLineString(MultiLineString::from_handle(handle)?)
            }
            GeometryType::MultiPolygon => {
                Geometry::MultiPolygon(MultiPolygon::from_handle(handle)?)
            }
            GeometryType::GeometryCollection => {
                Geometry::GeometryCollection(GeometryCollection::from_handle(handle)?)
            }
        })
    }

    pub(crate) fn into_handle(self) -> GeomHandle {
        dispatch!(self, g => g.into_handle())
    }

    /// The variant of this value. Unlike [geom_type](Geom::geom_type) this never asks the
    /// engine.
    pub fn kind(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Parse WKT, EWKT or hex encoded WKB, telling them apart by their first characters.
    pub fn parse(text: &str) -> Result<Self> {
        if is_hex(text.trim()) {
            Self::from_hex(text)
        } else {
            Self::from_wkt(text)
        }
    }

    /// Parse WKT or EWKT. The SRID of an EWKT prefix is kept.
    pub fn from_wkt(text: &str) -> Result<Self> {
        let (geom, srid) = read_wkt(text)?;
        Self::from_handle(GeomHandle::create(&geom, srid)?)
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        Self::from_wkb(&from_hex(text.trim())?)
    }

    /// Parse WKB or EWKB in either byte order.
    pub fn from_wkb(buf: &[u8]) -> Result<Self> {
        let (geom, srid) = read_wkb(buf)?;
        Self::from_handle(GeomHandle::create(&geom, srid)?)
    }

    /// Parse a GeoJSON geometry object.
    pub fn from_json(text: &str) -> Result<Self> {
        let geom = read_geojson(text)?;
        Self::from_handle(GeomHandle::create(&geom, None)?)
    }

    /// A new owned copy, reporting an invalidated wrapper as an error.
    pub fn try_clone(&self) -> Result<Self> {
        Self::from_handle(self.geom_handle().try_clone()?)
    }

    pub fn with_srid(self, srid: i32) -> Result<Self> {
        self.geom_handle()
            .write(|engine, h| engine.set_srid(h, Some(srid)))?;
        Ok(self)
    }

    /// An alias of ring or member `i` of a polygon or collection.
    ///
    /// Points and curves have no members and fail with [Type](GeoHandleError::Type).
    pub fn get(&self, i: usize) -> Result<Geometry> {
        Self::from_handle(self.geom_handle().member(i)?)
    }

    /// Replace ring or member `i`, releasing the previous one.
    ///
    /// Points and curves fail with [Type](GeoHandleError::Type) whatever the index. A
    /// rejected member is handed back in the [SetError].
    pub fn set(&mut self, i: usize, member: impl Into<Geometry>) -> Result<(), SetError> {
        self.geom_handle().replace_member(i, member.into())
    }

    /// Replace `self` with its intersection with `other`.
    ///
    /// The previous geometry is released, so aliases taken from it fail with a lifetime
    /// error afterwards. On error `self` is left as it was.
    pub fn intersection_in_place<G: Geom>(&mut self, other: &G) -> Result<()> {
        *self = self.intersection(other)?;
        Ok(())
    }

    /// Replace `self` with its union with `other`.
    pub fn union_in_place<G: Geom>(&mut self, other: &G) -> Result<()> {
        *self = self.union(other)?;
        Ok(())
    }

    /// Replace `self` with the part of it not in `other`.
    pub fn difference_in_place<G: Geom>(&mut self, other: &G) -> Result<()> {
        *self = self.difference(other)?;
        Ok(())
    }

    pub fn sym_difference_in_place<G: Geom>(&mut self, other: &G) -> Result<()> {
        *self = self.sym_difference(other)?;
        Ok(())
    }
}

impl Sealed for Geometry {
    fn geom_handle(&self) -> &GeomHandle {
        dispatch!(self, g => g.geom_handle())
    }
}

/// # Panics
///
/// Panics when the wrapper has been invalidated. Use
/// [try_clone](Geometry::try_clone) to get an error instead.
impl Clone for Geometry {
    fn clone(&self) -> Self {
        dispatch!(self, g => Geometry::from(g.clone()))
    }
}

/// # Panics
///
/// Panics when either wrapper has been invalidated.
impl<G: Geom> PartialEq<G> for Geometry {
    fn eq(&self, other: &G) -> bool {
        match self.equals(other) {
            Ok(equal) => equal,
            Err(err) => panic!("cannot compare Geometry: {err}"),
        }
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, g => Display::fmt(g, f))
    }
}

impl Debug for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, g => Debug::fmt(g, f))
    }
}

impl FromStr for Geometry {
    type Err = GeoHandleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl_overlay_ops!(Geometry);

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::engine::{configure, live_handles, options, EngineOptions};
    use crate::test::{linestring, multipolygon, point, polygon, topology};

    fn geom(text: &str) -> Geometry {
        text.parse().unwrap()
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn round_trip_every_variant() {
        let texts = [
            point::WKT[0],
            linestring::LINE,
            linestring::RING,
            polygon::WITH_HOLE,
            "MULTIPOINT(0 0,1 1)",
            "MULTILINESTRING((0 0,1 1),(2 2,3 3))",
            multipolygon::TWO_SQUARES,
            "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1))",
        ];
        for (i, text) in texts.iter().enumerate() {
            let g = geom(text);
            assert_eq!(g.wkt().unwrap(), *text);
            assert_eq!(g.geom_typeid().unwrap(), i as u8);
            assert_eq!(g.kind(), g.geom_type().unwrap());
            assert_eq!(g, geom(text));
        }
    }

    #[test]
    fn parse_detects_hex() {
        let g = geom("0101000000000000000000F03F0000000000000040");
        assert_eq!(g.wkt().unwrap(), "POINT(1 2)");
        let ewkt = geom("SRID=4326;POINT(1 2)");
        let from_hex = geom(&ewkt.hexewkb().unwrap());
        assert_eq!(from_hex.srid().unwrap(), Some(4326));
        assert_eq!(from_hex, ewkt);

        let from_wkb = Geometry::from_wkb(&ewkt.wkb().unwrap()).unwrap();
        assert_eq!(from_wkb.srid().unwrap(), None);
        assert!(matches!(
            Geometry::parse("POINT(1"),
            Err(GeoHandleError::Parse(_))
        ));
        assert!(matches!(
            Geometry::parse("LINEARRING(0 0,1 1,1 0,2 2)"),
            Err(GeoHandleError::Value(_))
        ));
    }

    #[test]
    fn from_json() {
        let g = Geometry::from_json(r#"{"type": "LineString", "coordinates": [[0, 0], [1, 1]]}"#)
            .unwrap();
        assert_eq!(g.kind(), GeometryType::LineString);
        let back = Geometry::from_json(&g.json().unwrap()).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn relate() {
        for (a, b, matrix) in topology::RELATE {
            let (a, b) = (geom(a), geom(b));
            assert_eq!(a.relate(&b).unwrap().as_str(), *matrix);
            assert!(a.relate_pattern(&b, matrix).unwrap());
        }
        let a = geom("POINT(0 0)");
        for bad in ["T*F**FFF", "T*F**FFF*X", "T*F**FFX*"] {
            assert!(matches!(
                a.relate_pattern(&a, bad),
                Err(GeoHandleError::Engine(_))
            ));
        }
    }

    #[test]
    fn overlay_commutes() {
        for (a, b) in topology::OVERLAY_PAIRS {
            let (a, b) = (geom(a), geom(b));
            assert_eq!(a.intersection(&b).unwrap(), b.intersection(&a).unwrap());
            assert_eq!(a.union(&b).unwrap(), b.union(&a).unwrap());
            assert_eq!((&a | &b).unwrap(), a.union(&b).unwrap());
            assert_eq!((&a ^ &b).unwrap(), (&b ^ &a).unwrap());

            let difference = (&a - &b).unwrap();
            let sym_difference = a.sym_difference(&b).unwrap();
            let b_covered = b.difference(&a).unwrap().is_empty().unwrap();
            assert_eq!(difference == sym_difference, b_covered);
        }
    }

    #[test]
    fn overlay_areas() {
        let (a, b) = (geom(topology::OVERLAY_PAIRS[0].0), geom(topology::OVERLAY_PAIRS[0].1));
        assert_relative_eq!((&a & &b).unwrap().area().unwrap(), 25.0);
        assert_relative_eq!((&a | &b).unwrap().area().unwrap(), 175.0);
        assert_relative_eq!((&a - &b).unwrap().area().unwrap(), 75.0);
        assert_relative_eq!((&a ^ &b).unwrap().area().unwrap(), 150.0);
    }

    #[test]
    fn results_carry_srid_of_self() {
        let a = geom("SRID=4326;POLYGON((0 0,0 10,10 10,10 0,0 0))");
        let b = geom("SRID=3857;POLYGON((5 5,5 15,15 15,15 5,5 5))");
        assert_eq!(a.intersection(&b).unwrap().srid().unwrap(), Some(4326));
        assert_eq!(b.union(&a).unwrap().srid().unwrap(), Some(3857));
        assert_eq!(a.buffer(1., 8).unwrap().srid().unwrap(), Some(4326));
        assert_eq!(a.centroid().unwrap().srid().unwrap(), Some(4326));
    }

    #[test]
    fn in_place_invalidates_aliases() {
        init_logger();
        let mut a = geom(polygon::WITH_HOLE);
        let hole = a.get(1).unwrap();
        let b = geom("POLYGON((5 5,5 15,15 15,15 5,5 5))");
        a.union_in_place(&b).unwrap();
        assert!(hole.wkt().unwrap_err().is_lifetime());
        assert_relative_eq!(a.area().unwrap(), 174.0);

        a.difference_in_place(&b).unwrap();
        assert_relative_eq!(a.area().unwrap(), 74.0);
        a.intersection_in_place(&b).unwrap();
        assert!(a.is_empty().unwrap());
        a.sym_difference_in_place(&b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn buffer() {
        let p = geom(point::WKT[1]);
        let circle = p.buffer(1., 8).unwrap();
        assert_eq!(circle.kind(), GeometryType::Polygon);
        assert_eq!(circle.num_coords().unwrap(), 33);
        assert!(circle.contains(&p).unwrap());

        let default = p.buffer_default(1.).unwrap();
        assert_eq!(default.num_coords().unwrap(), 33);
        let before = options().unwrap();
        configure(EngineOptions {
            default_quadrant_segments: 2,
            ..before.clone()
        })
        .unwrap();
        let coarse = p.buffer_default(1.).unwrap();
        configure(before).unwrap();
        assert_eq!(coarse.num_coords().unwrap(), 9);
    }

    #[test]
    fn members_through_geometry() {
        let mut g = geom(polygon::TWO_HOLES);
        assert_eq!(g.len().unwrap(), 3);
        let old = g.get(2).unwrap();
        let ring = geom("LINEARRING(30 30,30 40,40 40,40 30,30 30)");
        g.set(2, ring).unwrap();
        assert!(old.len().unwrap_err().is_lifetime());
        assert_relative_eq!(g.area().unwrap(), 10000.0 - 200.0);

        let p = geom(point::WKT[0]);
        assert!(matches!(p.get(0), Err(GeoHandleError::Type(_))));
        assert!(matches!(
            g.get(3),
            Err(GeoHandleError::Index { index: 3, len: 3 })
        ));
    }

    #[test]
    fn curves_have_no_slots() {
        for text in [linestring::LINE, linestring::RING, point::WKT[0]] {
            let mut g = geom(text);
            let wkt = g.wkt().unwrap();
            let ring = geom("LINEARRING(30 30,30 40,40 40,40 30,30 30)");
            let err = g.set(0, ring).unwrap_err();
            assert!(matches!(err.error, GeoHandleError::Type(_)));
            let err = g.set(10, err.into_value()).unwrap_err();
            assert!(matches!(err.error, GeoHandleError::Type(_)));
            assert!(err.value.is_owned());
            assert_eq!(g.wkt().unwrap(), wkt);
        }
    }

    #[test]
    fn binary_operations_on_dropped_alias() {
        let owner = geom(multipolygon::TWO_SQUARES);
        let dead = owner.get(0).unwrap();
        let live = geom(polygon::WITH_HOLE);
        drop(owner);

        assert!(dead.get(0).unwrap_err().is_lifetime());
        for (a, b) in [(&dead, &live), (&live, &dead)] {
            assert!(a.equals(b).unwrap_err().is_lifetime());
            assert!(a.intersects(b).unwrap_err().is_lifetime());
            assert!(a.relate(b).unwrap_err().is_lifetime());
            assert!(a.relate_pattern(b, "T********").unwrap_err().is_lifetime());
            assert!(a.intersection(b).unwrap_err().is_lifetime());
            assert!(a.union(b).unwrap_err().is_lifetime());
            assert!(a.difference(b).unwrap_err().is_lifetime());
            assert!(a.sym_difference(b).unwrap_err().is_lifetime());
            assert!((a | b).unwrap_err().is_lifetime());
        }

        let mut target = live.clone();
        assert!(target.union_in_place(&dead).unwrap_err().is_lifetime());
        assert_eq!(target, live);
    }

    #[test]
    fn derived_geometries() {
        let g = geom("LINESTRING(0 0,3 4,1 7)");
        assert_relative_eq!(g.length().unwrap(), 5.0 + 13f64.sqrt());
        assert_eq!(
            g.envelope().unwrap(),
            geom("POLYGON((0 0,3 0,3 7,0 7,0 0))")
        );
        assert_eq!(g.boundary().unwrap(), geom("MULTIPOINT(0 0,1 7)"));
        assert_eq!(g.convex_hull().unwrap().kind(), GeometryType::Polygon);
        assert!(geom(multipolygon::TWO_SQUARES).is_valid().unwrap());
        assert!(!geom(multipolygon::OVERLAPPING).is_valid().unwrap());
    }

    #[test]
    fn nothing_leaks() {
        init_logger();
        let before = live_handles().unwrap();
        {
            let a = geom(polygon::TWO_HOLES);
            let b = geom(multipolygon::TWO_SQUARES);
            let _ = a.get(0).unwrap();
            let _ = (&a | &b).unwrap();
            let _ = a.buffer(2., 4).unwrap();
            let _ = Geometry::parse("POINT(1");
            let _ = MultiPoint::new([a.clone(), b.clone()]);
            let mut c = a.clone();
            c.sym_difference_in_place(&b).unwrap();
        }
        assert_eq!(live_handles().unwrap(), before);
    }

    #[test]
    #[should_panic(expected = "cannot compare")]
    fn comparing_invalidated_alias_panics() {
        let poly = geom(polygon::WITH_HOLE);
        let shell = poly.get(0).unwrap();
        drop(poly);
        let _ = shell == geom(linestring::RING);
    }
}
