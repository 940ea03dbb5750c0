use std::f64::consts::PI;

use geo::{BooleanOps, ConvexHull};

use crate::algorithm::geo::utils::{guarded, Components};
use crate::datatypes::GeometryType;
use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};

/// Upper bound on segments per quarter circle.
pub const MAX_QUADRANT_SEGMENTS: i32 = 4096;

/// The area within `width` of a geometry.
///
/// Curves are approximated with `quadsegs` segments per quarter circle (at least one), so
/// the buffer of a point is a ring of `4 * quadsegs + 1` coordinates. More than
/// [MAX_QUADRANT_SEGMENTS] fails with [Engine](GeoHandleError::Engine). A negative width
/// shrinks areal input and gives an empty polygon for points and lines.
pub trait Buffer {
    type Output;

    fn buffer(&self, width: f64, quadsegs: i32) -> Result<Self::Output>;
}

impl Buffer for NativeGeometry {
    type Output = NativeGeometry;

    fn buffer(&self, width: f64, quadsegs: i32) -> Result<Self::Output> {
        if quadsegs > MAX_QUADRANT_SEGMENTS {
            return Err(GeoHandleError::Engine(format!(
                "{quadsegs} quadrant segments exceeds the limit of {MAX_QUADRANT_SEGMENTS}"
            )));
        }
        let quadsegs = quadsegs.max(1) as usize;
        let components = Components::of(self);

        let result = if width > 0.0 {
            let mut pieces: Vec<geo::Polygon> = components
                .points
                .iter()
                .map(|c| circle(*c, width, quadsegs))
                .collect();
            for line in &components.lines {
                pieces.extend(segment_capsules(line, width, quadsegs));
            }
            for polygon in components.areas.0.iter() {
                pieces.push(polygon.clone());
                for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                    pieces.extend(segment_capsules(ring, width, quadsegs));
                }
            }
            union_all(pieces)?
        } else if width < 0.0 {
            let mut eroded = components.areas.clone();
            for polygon in components.areas.0.iter() {
                let edges: Vec<_> = std::iter::once(polygon.exterior())
                    .chain(polygon.interiors())
                    .flat_map(|ring| segment_capsules(ring, -width, quadsegs))
                    .collect();
                let edges = union_all(edges)?;
                eroded = guarded("buffer", || eroded.difference(&edges))?;
            }
            eroded
        } else {
            components.areas.clone()
        };

        Ok(Components {
            areas: result,
            ..Default::default()
        }
        .into_native(GeometryType::Polygon))
    }
}

/// A closed, counter-clockwise ring approximating a circle.
fn circle(center: geo::Coord, radius: f64, quadsegs: usize) -> geo::Polygon {
    let n = 4 * quadsegs;
    let mut coords: Vec<geo::Coord> = (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            geo::Coord {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect();
    coords.push(coords[0]);
    geo::Polygon::new(geo::LineString::new(coords), vec![])
}

/// One rounded capsule around each segment of `line`.
fn segment_capsules(line: &geo::LineString, width: f64, quadsegs: usize) -> Vec<geo::Polygon> {
    line.lines()
        .map(|segment| {
            let mut vertices = circle(segment.start, width, quadsegs).exterior().0.clone();
            vertices.extend(circle(segment.end, width, quadsegs).exterior().0.iter());
            geo::MultiPoint::from(vertices).convex_hull()
        })
        .collect()
}

fn union_all(polygons: Vec<geo::Polygon>) -> Result<geo::MultiPolygon> {
    if polygons.len() < 2 {
        return Ok(geo::MultiPolygon::new(polygons));
    }
    let mut acc = geo::MultiPolygon::new(vec![]);
    for polygon in polygons {
        acc = guarded("buffer", || acc.union(&geo::MultiPolygon::new(vec![polygon])))?;
    }
    Ok(acc)
}
