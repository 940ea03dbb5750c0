use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{BooleanOps, Line};

use crate::algorithm::geo::relate::{Predicate, Relate};
use crate::algorithm::geo::utils::{empty_type_for_dimension, guarded, Components};
use crate::engine::NativeGeometry;
use crate::error::Result;

/// The point-set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

/// Point-set overlay of two geometries, producing a new geometry.
///
/// Areal components are combined with [`geo::BooleanOps`]; linear components are clipped
/// against the areas and split segment by segment against each other; points are kept or
/// dropped by whether they intersect the other operand.
///
/// ```
/// use geohandle::algorithm::geo::{Overlay, OverlayOp};
/// use geohandle::io::wkt::{read_wkt, write_wkt};
///
/// let (a, _) = read_wkt("POLYGON((0 0,0 2,2 2,2 0,0 0))").unwrap();
/// let (b, _) = read_wkt("POLYGON((1 1,1 3,3 3,3 1,1 1))").unwrap();
/// let overlap = a.overlay(&b, OverlayOp::Intersection).unwrap();
/// assert_eq!(overlap.geometry_type().name(), "Polygon");
/// ```
pub trait Overlay {
    fn overlay(&self, other: &Self, op: OverlayOp) -> Result<NativeGeometry>;
}

impl Overlay for NativeGeometry {
    fn overlay(&self, other: &Self, op: OverlayOp) -> Result<NativeGeometry> {
        let a = Components::of(self);
        let b = Components::of(other);
        let empty_dim = match op {
            OverlayOp::Intersection => a.dimension().min(b.dimension()),
            OverlayOp::Difference => a.dimension(),
            OverlayOp::Union | OverlayOp::SymDifference => a.dimension().max(b.dimension()),
        };
        let result = match op {
            OverlayOp::Intersection => intersection(self, other, &a, &b)?,
            OverlayOp::Union => union(a, b)?,
            OverlayOp::Difference => difference(other, &a, &b)?,
            OverlayOp::SymDifference => {
                let a_minus_b = difference(other, &a, &b)?;
                let b_minus_a = difference(self, &b, &a)?;
                union(a_minus_b, b_minus_a)?
            }
        };
        Ok(result.into_native(empty_type_for_dimension(empty_dim)))
    }
}

fn intersection(
    geom_a: &NativeGeometry,
    geom_b: &NativeGeometry,
    a: &Components,
    b: &Components,
) -> Result<Components> {
    let areas = guarded("intersection", || a.areas.intersection(&b.areas))?;

    let mut lines = vec![];
    let mut points = vec![];
    let (shared, crossings) = line_overlap(&a.lines, &b.lines);
    lines.extend(shared);
    if !b.areas.0.is_empty() && !a.lines.is_empty() {
        lines.extend(guarded("clip", || b.areas.clip(&a.lines_geo(), false))?.0);
    }
    if !a.areas.0.is_empty() && !b.lines.is_empty() {
        lines.extend(guarded("clip", || a.areas.clip(&b.lines_geo(), false))?.0);
    }
    points.extend(crossings);
    points.extend(points_intersecting(&a.points, geom_b, true));
    points.extend(points_intersecting(&b.points, geom_a, true));

    let mut out = Components {
        points,
        lines: drop_degenerate(lines),
        areas,
    };
    dedup_points(&mut out);
    Ok(out)
}

fn union(a: Components, b: Components) -> Result<Components> {
    let areas = guarded("union", || a.areas.union(&b.areas))?;

    let mut lines = a.lines.clone();
    lines.extend(line_difference(&b.lines, &a.lines));
    if !areas.0.is_empty() && !lines.is_empty() {
        let mls = geo::MultiLineString::new(lines);
        lines = guarded("clip", || areas.clip(&mls, true))?.0;
    }

    let mut points = a.points;
    points.extend(b.points);
    let mut out = Components {
        points,
        lines: drop_degenerate(lines),
        areas,
    };
    dedup_points(&mut out);
    Ok(out)
}

fn difference(geom_b: &NativeGeometry, a: &Components, b: &Components) -> Result<Components> {
    let areas = guarded("difference", || a.areas.difference(&b.areas))?;

    let mut lines = line_difference(&a.lines, &b.lines);
    if !b.areas.0.is_empty() && !lines.is_empty() {
        let mls = geo::MultiLineString::new(lines);
        lines = guarded("clip", || b.areas.clip(&mls, true))?.0;
    }

    Ok(Components {
        points: points_intersecting(&a.points, geom_b, false),
        lines: drop_degenerate(lines),
        areas,
    })
}

fn points_intersecting(
    points: &[geo::Coord],
    other: &NativeGeometry,
    intersecting: bool,
) -> Vec<geo::Coord> {
    points
        .iter()
        .filter(|c| {
            let point = NativeGeometry::point((**c).into());
            point.predicate(other, Predicate::Intersects) == intersecting
        })
        .copied()
        .collect()
}

/// Remove repeated points, and points already covered by a line or area of the result.
fn dedup_points(components: &mut Components) {
    let mut kept: Vec<geo::Coord> = vec![];
    for c in components.points.drain(..) {
        if !kept.contains(&c) {
            kept.push(c);
        }
    }
    if !components.lines.is_empty() || !components.areas.0.is_empty() {
        let covering = Components {
            points: vec![],
            lines: components.lines.clone(),
            areas: components.areas.clone(),
        }
        .into_native(crate::datatypes::GeometryType::GeometryCollection);
        kept.retain(|c| {
            !NativeGeometry::point((*c).into()).predicate(&covering, Predicate::Intersects)
        });
    }
    components.points = kept;
}

fn drop_degenerate(lines: Vec<geo::LineString>) -> Vec<geo::LineString> {
    lines.into_iter().filter(|l| l.0.len() > 1).collect()
}

/// Parameter of `p` along `segment`, 0 at the start and 1 at the end.
fn parameter(segment: &Line, p: geo::Coord) -> f64 {
    let d = segment.delta();
    let len2 = d.x * d.x + d.y * d.y;
    if len2 == 0.0 {
        return 0.0;
    }
    ((p.x - segment.start.x) * d.x + (p.y - segment.start.y) * d.y) / len2
}

fn at(segment: &Line, t: f64) -> geo::Coord {
    segment.start + segment.delta() * t
}

/// Collinear overlaps of two line sets, and the points where they meet otherwise.
fn line_overlap(
    a: &[geo::LineString],
    b: &[geo::LineString],
) -> (Vec<geo::LineString>, Vec<geo::Coord>) {
    let mut shared = vec![];
    let mut points = vec![];
    for la in a {
        for sa in la.lines() {
            for lb in b {
                for sb in lb.lines() {
                    match line_intersection(sa, sb) {
                        Some(LineIntersection::Collinear { intersection }) => {
                            if intersection.start == intersection.end {
                                points.push(intersection.start);
                            } else {
                                shared.push(geo::LineString::new(vec![
                                    intersection.start,
                                    intersection.end,
                                ]));
                            }
                        }
                        Some(LineIntersection::SinglePoint { intersection, .. }) => {
                            points.push(intersection)
                        }
                        None => {}
                    }
                }
            }
        }
    }
    (shared, points)
}

/// The parts of `a` not covered by collinear overlap with `b`, as two-point line strings.
fn line_difference(a: &[geo::LineString], b: &[geo::LineString]) -> Vec<geo::LineString> {
    let mut out = vec![];
    for la in a {
        for sa in la.lines() {
            let mut covered: Vec<(f64, f64)> = vec![];
            for lb in b {
                for sb in lb.lines() {
                    if let Some(LineIntersection::Collinear { intersection }) =
                        line_intersection(sa, sb)
                    {
                        let t0 = parameter(&sa, intersection.start);
                        let t1 = parameter(&sa, intersection.end);
                        covered.push((t0.min(t1), t0.max(t1)));
                    }
                }
            }
            if covered.is_empty() {
                out.push(geo::LineString::new(vec![sa.start, sa.end]));
                continue;
            }
            covered.sort_by(|x, y| x.0.total_cmp(&y.0));
            let mut t = 0.0;
            for (start, end) in covered {
                if start > t {
                    out.push(geo::LineString::new(vec![at(&sa, t), at(&sa, start)]));
                }
                t = t.max(end);
            }
            if t < 1.0 {
                out.push(geo::LineString::new(vec![at(&sa, t), sa.end]));
            }
        }
    }
    out
}
