use geozero::error::GeozeroError;
use geozero::{CoordDimensions, GeomProcessor, GeozeroGeometry};

use crate::coord::{Coord, CoordBuffer};
use crate::datatypes::GeometryType;
use crate::engine::NativeGeometry;

/// Geometry under construction.
#[derive(Debug)]
enum Frame {
    Coords(GeometryType, Vec<Coord>),
    Rings(Vec<CoordBuffer>),
    Parts(GeometryType, Vec<NativeGeometry>),
}

/// A [GeomProcessor] that assembles one [NativeGeometry] from a geozero event stream.
#[derive(Debug, Default)]
pub struct NativeGeometryBuilder {
    stack: Vec<Frame>,
    finished: Option<NativeGeometry>,
}

impl NativeGeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The geometry read from the stream, or an error if the stream was incomplete.
    pub fn finish(self) -> geozero::error::Result<NativeGeometry> {
        if !self.stack.is_empty() {
            return Err(GeozeroError::Geometry(
                "unterminated geometry in input".to_string(),
            ));
        }
        self.finished
            .ok_or_else(|| GeozeroError::Geometry("no geometry in input".to_string()))
    }

    fn push_coord(&mut self, coord: Coord) -> geozero::error::Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Coords(_, coords)) => coords.push(coord),
            Some(Frame::Parts(GeometryType::MultiPoint, parts)) => {
                parts.push(NativeGeometry::point(coord))
            }
            other => {
                return Err(GeozeroError::Geometry(format!(
                    "unexpected coordinate inside {other:?}"
                )))
            }
        }
        Ok(())
    }

    fn pop_coords(&mut self) -> geozero::error::Result<CoordBuffer> {
        match self.stack.pop() {
            Some(Frame::Coords(_, coords)) => CoordBuffer::try_from_coords(coords)
                .map_err(|err| GeozeroError::Geometry(err.to_string())),
            other => Err(GeozeroError::Geometry(format!(
                "expected coordinates, found {other:?}"
            ))),
        }
    }

    fn pop_parts(&mut self, geom_type: GeometryType) -> geozero::error::Result<Vec<NativeGeometry>> {
        match self.stack.pop() {
            Some(Frame::Parts(t, parts)) if t == geom_type => Ok(parts),
            other => Err(GeozeroError::Geometry(format!(
                "expected {geom_type}, found {other:?}"
            ))),
        }
    }

    fn attach(&mut self, geom: NativeGeometry) -> geozero::error::Result<()> {
        match self.stack.last_mut() {
            None if self.finished.is_none() => {
                self.finished = Some(geom);
                Ok(())
            }
            Some(Frame::Parts(_, parts)) => {
                parts.push(geom);
                Ok(())
            }
            _ => Err(GeozeroError::Geometry(format!(
                "unexpected {} in input",
                geom.geometry_type()
            ))),
        }
    }
}

#[allow(unused_variables)]
impl GeomProcessor for NativeGeometryBuilder {
    fn dimensions(&self) -> CoordDimensions {
        CoordDimensions::xyz()
    }

    fn xy(&mut self, x: f64, y: f64, idx: usize) -> geozero::error::Result<()> {
        self.push_coord(Coord::xy(x, y))
    }

    fn coordinate(
        &mut self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
        t: Option<f64>,
        tm: Option<u64>,
        idx: usize,
    ) -> geozero::error::Result<()> {
        let coord = match z {
            Some(z) => Coord::xyz(x, y, z),
            None => Coord::xy(x, y),
        };
        self.push_coord(coord)
    }

    fn empty_point(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.attach(NativeGeometry::empty(GeometryType::Point, Default::default()))
    }

    fn point_begin(&mut self, idx: usize) -> geozero::error::Result<()> {
        self.stack.push(Frame::Coords(GeometryType::Point, vec![]));
        Ok(())
    }

    fn point_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        let coords = self.pop_coords()?;
        self.attach(NativeGeometry::Point(coords))
    }

    fn multipoint_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.stack
            .push(Frame::Parts(GeometryType::MultiPoint, Vec::with_capacity(size)));
        Ok(())
    }

    fn multipoint_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        let parts = self.pop_parts(GeometryType::MultiPoint)?;
        self.attach(NativeGeometry::MultiPoint(parts))
    }

    fn linestring_begin(
        &mut self,
        tagged: bool,
        size: usize,
        idx: usize,
    ) -> geozero::error::Result<()> {
        self.stack.push(Frame::Coords(
            GeometryType::LineString,
            Vec::with_capacity(size),
        ));
        Ok(())
    }

    fn linestring_end(&mut self, tagged: bool, idx: usize) -> geozero::error::Result<()> {
        let coords = self.pop_coords()?;
        match self.stack.last_mut() {
            Some(Frame::Rings(rings)) => {
                rings.push(coords);
                Ok(())
            }
            _ => self.attach(NativeGeometry::LineString(coords)),
        }
    }

    fn multilinestring_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.stack.push(Frame::Parts(
            GeometryType::MultiLineString,
            Vec::with_capacity(size),
        ));
        Ok(())
    }

    fn multilinestring_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        let parts = self.pop_parts(GeometryType::MultiLineString)?;
        self.attach(NativeGeometry::MultiLineString(parts))
    }

    fn polygon_begin(
        &mut self,
        tagged: bool,
        size: usize,
        idx: usize,
    ) -> geozero::error::Result<()> {
        self.stack.push(Frame::Rings(Vec::with_capacity(size)));
        Ok(())
    }

    fn polygon_end(&mut self, tagged: bool, idx: usize) -> geozero::error::Result<()> {
        match self.stack.pop() {
            Some(Frame::Rings(rings)) => self.attach(NativeGeometry::Polygon(rings)),
            other => Err(GeozeroError::Geometry(format!(
                "expected polygon rings, found {other:?}"
            ))),
        }
    }

    fn multipolygon_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.stack.push(Frame::Parts(
            GeometryType::MultiPolygon,
            Vec::with_capacity(size),
        ));
        Ok(())
    }

    fn multipolygon_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        let parts = self.pop_parts(GeometryType::MultiPolygon)?;
        self.attach(NativeGeometry::MultiPolygon(parts))
    }

    fn geometrycollection_begin(&mut self, size: usize, idx: usize) -> geozero::error::Result<()> {
        self.stack.push(Frame::Parts(
            GeometryType::GeometryCollection,
            Vec::with_capacity(size),
        ));
        Ok(())
    }

    fn geometrycollection_end(&mut self, idx: usize) -> geozero::error::Result<()> {
        let parts = self.pop_parts(GeometryType::GeometryCollection)?;
        self.attach(NativeGeometry::GeometryCollection(parts))
    }
}

/// Convert any geozero source into a [NativeGeometry].
pub trait ToNativeGeometry {
    fn to_native_geometry(&self) -> geozero::error::Result<NativeGeometry>;
}

impl<T: GeozeroGeometry> ToNativeGeometry for T {
    fn to_native_geometry(&self) -> geozero::error::Result<NativeGeometry> {
        let mut builder = NativeGeometryBuilder::new();
        self.process_geom(&mut builder)?;
        builder.finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nested_collection() {
        let wkt = geozero::wkt::WktStr(
            "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1),POLYGON((0 0,0 1,1 1,0 0)))",
        );
        let geom = wkt.to_native_geometry().unwrap();
        let NativeGeometry::GeometryCollection(parts) = geom else {
            panic!("expected a collection")
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].geometry_type(), GeometryType::Point);
        assert_eq!(parts[1].num_coords(), 2);
        assert_eq!(parts[2].geometry_type(), GeometryType::Polygon);
    }

    #[test]
    fn multipoint_members_are_points() {
        let geom = geozero::wkt::WktStr("MULTIPOINT(0 0,1 1,2 2)")
            .to_native_geometry()
            .unwrap();
        let NativeGeometry::MultiPoint(parts) = geom else {
            panic!("expected a multipoint")
        };
        assert_eq!(parts.len(), 3);
        assert!(parts
            .iter()
            .all(|p| p.geometry_type() == GeometryType::Point && p.num_coords() == 1));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(geozero::wkt::WktStr("POLYGON((0 0, 1").to_native_geometry().is_err());
    }
}
