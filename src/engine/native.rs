use crate::coord::{Coord, CoordBuffer};
use crate::datatypes::{Dimension, GeometryType};

/// A detached geometry tree.
///
/// This is the value form of what the arena stores as linked nodes: parsers produce it,
/// renderers and algorithms consume it.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeGeometry {
    /// Zero or one coordinate.
    Point(CoordBuffer),
    LineString(CoordBuffer),
    LinearRing(CoordBuffer),
    /// Shell followed by holes. No rings means an empty polygon.
    Polygon(Vec<CoordBuffer>),
    MultiPoint(Vec<NativeGeometry>),
    MultiLineString(Vec<NativeGeometry>),
    MultiPolygon(Vec<NativeGeometry>),
    GeometryCollection(Vec<NativeGeometry>),
}

impl NativeGeometry {
    pub fn empty(geom_type: GeometryType, dim: Dimension) -> Self {
        use GeometryType::*;
        match geom_type {
            Point => NativeGeometry::Point(CoordBuffer::new(dim)),
            LineString => NativeGeometry::LineString(CoordBuffer::new(dim)),
            LinearRing => NativeGeometry::LinearRing(CoordBuffer::new(dim)),
            Polygon => NativeGeometry::Polygon(vec![]),
            MultiPoint => NativeGeometry::MultiPoint(vec![]),
            MultiLineString => NativeGeometry::MultiLineString(vec![]),
            MultiPolygon => NativeGeometry::MultiPolygon(vec![]),
            GeometryCollection => NativeGeometry::GeometryCollection(vec![]),
        }
    }

    pub fn point(coord: Coord) -> Self {
        // A single coordinate always fits a buffer of its own dimension.
        let mut buffer = CoordBuffer::with_capacity(coord.dim(), 1);
        let _ = buffer.push_coord(coord);
        NativeGeometry::Point(buffer)
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            NativeGeometry::Point(_) => GeometryType::Point,
            NativeGeometry::LineString(_) => GeometryType::LineString,
            NativeGeometry::LinearRing(_) => GeometryType::LinearRing,
            NativeGeometry::Polygon(_) => GeometryType::Polygon,
            NativeGeometry::MultiPoint(_) => GeometryType::MultiPoint,
            NativeGeometry::MultiLineString(_) => GeometryType::MultiLineString,
            NativeGeometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            NativeGeometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// The coordinate dimension, taken from the first coordinate buffer found.
    pub fn dim(&self) -> Dimension {
        match self {
            NativeGeometry::Point(c) | NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                c.dim()
            }
            NativeGeometry::Polygon(rings) => rings.first().map(|r| r.dim()).unwrap_or_default(),
            NativeGeometry::MultiPoint(parts)
            | NativeGeometry::MultiLineString(parts)
            | NativeGeometry::MultiPolygon(parts)
            | NativeGeometry::GeometryCollection(parts) => parts
                .iter()
                .find(|p| !p.is_empty())
                .map(|p| p.dim())
                .unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            NativeGeometry::Point(c) | NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                c.is_empty()
            }
            NativeGeometry::Polygon(rings) => rings.first().map_or(true, |r| r.is_empty()),
            NativeGeometry::MultiPoint(parts)
            | NativeGeometry::MultiLineString(parts)
            | NativeGeometry::MultiPolygon(parts)
            | NativeGeometry::GeometryCollection(parts) => parts.iter().all(|p| p.is_empty()),
        }
    }

    pub fn num_coords(&self) -> usize {
        match self {
            NativeGeometry::Point(c) | NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                c.len()
            }
            NativeGeometry::Polygon(rings) => rings.iter().map(|r| r.len()).sum(),
            NativeGeometry::MultiPoint(parts)
            | NativeGeometry::MultiLineString(parts)
            | NativeGeometry::MultiPolygon(parts)
            | NativeGeometry::GeometryCollection(parts) => {
                parts.iter().map(|p| p.num_coords()).sum()
            }
        }
    }

    /// Every coordinate of the tree, in storage order.
    pub fn coords(&self) -> Vec<Coord> {
        let mut out = Vec::with_capacity(self.num_coords());
        self.collect_coords(&mut out);
        out
    }

    fn collect_coords(&self, out: &mut Vec<Coord>) {
        match self {
            NativeGeometry::Point(c) | NativeGeometry::LineString(c) | NativeGeometry::LinearRing(c) => {
                out.extend(c.iter())
            }
            NativeGeometry::Polygon(rings) => rings.iter().for_each(|r| out.extend(r.iter())),
            NativeGeometry::MultiPoint(parts)
            | NativeGeometry::MultiLineString(parts)
            | NativeGeometry::MultiPolygon(parts)
            | NativeGeometry::GeometryCollection(parts) => {
                parts.iter().for_each(|p| p.collect_coords(out))
            }
        }
    }

    /// Structural equality of coordinates within `tolerance`, ordinate by ordinate.
    pub fn equals_exact(&self, other: &NativeGeometry, tolerance: f64) -> bool {
        fn buffers(a: &CoordBuffer, b: &CoordBuffer, tolerance: f64) -> bool {
            a.len() == b.len()
                && a
                    .iter()
                    .zip(b.iter())
                    .all(|(ca, cb)| ca.approx_eq(&cb, tolerance))
        }

        use NativeGeometry::*;
        match (self, other) {
            (Point(a), Point(b)) | (LineString(a), LineString(b)) | (LinearRing(a), LinearRing(b)) => {
                buffers(a, b, tolerance)
            }
            (Polygon(a), Polygon(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(ra, rb)| buffers(ra, rb, tolerance))
            }
            (MultiPoint(a), MultiPoint(b))
            | (MultiLineString(a), MultiLineString(b))
            | (MultiPolygon(a), MultiPolygon(b))
            | (GeometryCollection(a), GeometryCollection(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(pa, pb)| pa.equals_exact(pb, tolerance))
            }
            _ => false,
        }
    }
}
