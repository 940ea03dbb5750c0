use std::fmt::Display;

use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;
use geo::Relate as GeoRelate;

use crate::algorithm::geo::utils::Components;
use crate::engine::NativeGeometry;
use crate::error::{GeoHandleError, Result};
use crate::io::geo::geometry_to_geo;

const POSITIONS: [CoordPos; 3] = [CoordPos::Inside, CoordPos::OnBoundary, CoordPos::Outside];

/// A DE-9IM intersection matrix in its nine-character form, rows and columns ordered
/// interior, boundary, exterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelateMatrix([u8; 9]);

impl RelateMatrix {
    fn from_fn(mut f: impl FnMut(CoordPos, CoordPos) -> Dimensions) -> Self {
        let mut cells = [b'F'; 9];
        for (i, lhs) in POSITIONS.iter().enumerate() {
            for (j, rhs) in POSITIONS.iter().enumerate() {
                cells[i * 3 + j] = match f(*lhs, *rhs) {
                    Dimensions::Empty => b'F',
                    Dimensions::ZeroDimensional => b'0',
                    Dimensions::OneDimensional => b'1',
                    Dimensions::TwoDimensional => b'2',
                };
            }
        }
        Self(cells)
    }

    /// The matrix of two geometries where at least one is empty: only the exteriors meet.
    fn with_empty(a: Option<u8>, b: Option<u8>) -> Self {
        fn dim(d: Option<u8>) -> u8 {
            d.map_or(b'F', |d| b'0' + d)
        }
        fn boundary(d: Option<u8>) -> u8 {
            match d {
                Some(d) if d > 0 => b'0' + d - 1,
                _ => b'F',
            }
        }
        Self([
            b'F',
            b'F',
            dim(a),
            b'F',
            b'F',
            boundary(a),
            dim(b),
            boundary(b),
            b'2',
        ])
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored.
        std::str::from_utf8(&self.0).unwrap_or("FFFFFFFFF")
    }

    /// Check the matrix against a DE-9IM pattern of `T`, `F`, `*`, `0`, `1` and `2`.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let pattern = validate_pattern(pattern)?;
        Ok(self.matches_unchecked(&pattern))
    }

    fn matches_unchecked(&self, pattern: &[u8; 9]) -> bool {
        self.0.iter().zip(pattern).all(|(cell, p)| match p {
            b'*' => true,
            b'T' => *cell != b'F',
            other => cell == other,
        })
    }

    fn matches_any(&self, patterns: &[&str]) -> bool {
        patterns.iter().any(|p| {
            let mut cells = [0u8; 9];
            cells.copy_from_slice(p.as_bytes());
            self.matches_unchecked(&cells)
        })
    }
}

impl Display for RelateMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn validate_pattern(pattern: &str) -> Result<[u8; 9]> {
    let bytes = pattern.as_bytes();
    if bytes.len() != 9 {
        return Err(GeoHandleError::Engine(format!(
            "relate pattern must have 9 characters, got {pattern:?}"
        )));
    }
    let mut out = [0u8; 9];
    for (slot, b) in out.iter_mut().zip(bytes) {
        *slot = match b.to_ascii_uppercase() {
            c @ (b'T' | b'F' | b'*' | b'0' | b'1' | b'2') => c,
            _ => {
                return Err(GeoHandleError::Engine(format!(
                    "invalid character in relate pattern {pattern:?}"
                )))
            }
        };
    }
    Ok(out)
}

/// Named spatial predicates, each defined by DE-9IM patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Intersects,
    Disjoint,
    Contains,
    Within,
    Covers,
    CoveredBy,
    Touches,
    Crosses,
    Overlaps,
    Equals,
}

/// DE-9IM relationships between geometries.
pub trait Relate {
    fn relate(&self, other: &Self) -> RelateMatrix;

    fn relate_pattern(&self, other: &Self, pattern: &str) -> Result<bool> {
        self.relate(other).matches(pattern)
    }

    fn predicate(&self, other: &Self, predicate: Predicate) -> bool;
}

impl Relate for NativeGeometry {
    fn relate(&self, other: &Self) -> RelateMatrix {
        if self.is_empty() || other.is_empty() {
            return RelateMatrix::with_empty(
                Components::of(self).dimension(),
                Components::of(other).dimension(),
            );
        }
        let matrix = geometry_to_geo(self).relate(&geometry_to_geo(other));
        RelateMatrix::from_fn(|lhs, rhs| matrix.get(lhs, rhs))
    }

    fn predicate(&self, other: &Self, predicate: Predicate) -> bool {
        let matrix = self.relate(other);
        let dim_a = Components::of(self).dimension();
        let dim_b = Components::of(other).dimension();
        use Predicate::*;
        match predicate {
            Intersects => !matrix.matches_any(&["FF*FF****"]),
            Disjoint => matrix.matches_any(&["FF*FF****"]),
            Contains => matrix.matches_any(&["T*****FF*"]),
            Within => matrix.matches_any(&["T*F**F***"]),
            Covers => matrix.matches_any(&["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"]),
            CoveredBy => {
                matrix.matches_any(&["T*F**F***", "*TF**F***", "**FT*F***", "**F*TF***"])
            }
            Touches => matrix.matches_any(&["FT*******", "F**T*****", "F***T****"]),
            Crosses => match (dim_a, dim_b) {
                (Some(1), Some(1)) => matrix.matches_any(&["0********"]),
                (Some(a), Some(b)) if a < b => matrix.matches_any(&["T*T******"]),
                (Some(a), Some(b)) if a > b => matrix.matches_any(&["T*****T**"]),
                _ => false,
            },
            Overlaps => match (dim_a, dim_b) {
                (Some(1), Some(1)) => matrix.matches_any(&["1*T***T**"]),
                (Some(a), Some(b)) if a == b => matrix.matches_any(&["T*T***T**"]),
                _ => false,
            },
            Equals => {
                (self.is_empty() && other.is_empty()) || matrix.matches_any(&["T*F**FFF*"])
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;
    use crate::test::topology;

    fn geom(wkt: &str) -> NativeGeometry {
        read_wkt(wkt).unwrap().0
    }

    #[test]
    fn matrix_strings() {
        for (a, b, expected) in topology::RELATE {
            assert_eq!(geom(a).relate(&geom(b)).as_str(), *expected, "{a} / {b}");
        }
    }

    #[test]
    fn patterns() {
        let a = geom("POINT(0 0)");
        let b = geom("POLYGON((-1 -1,-1 1,1 1,1 -1,-1 -1))");
        assert!(a.relate_pattern(&b, "0FFFFF212").unwrap());
        assert!(a.relate_pattern(&b, "T********").unwrap());
        assert!(a.relate_pattern(&b, "t********").unwrap());
        assert!(!a.relate_pattern(&b, "F********").unwrap());
    }

    #[test]
    fn invalid_patterns() {
        let a = geom("POINT(0 0)");
        for pattern in ["foo", "", "T*T***T*", "T*T***T**T", "T*T***T*X"] {
            assert!(
                matches!(a.relate_pattern(&a, pattern), Err(GeoHandleError::Engine(_))),
                "{pattern:?}"
            );
        }
    }

    #[test]
    fn predicates() {
        let square = geom("POLYGON((0 0,0 10,10 10,10 0,0 0))");
        let inner = geom("POLYGON((1 1,1 2,2 2,2 1,1 1))");
        let neighbour = geom("POLYGON((10 0,10 10,20 10,20 0,10 0))");
        let crossing = geom("LINESTRING(-5 5,15 5)");
        let far = geom("POINT(50 50)");

        assert!(square.predicate(&inner, Predicate::Contains));
        assert!(inner.predicate(&square, Predicate::Within));
        assert!(square.predicate(&inner, Predicate::Covers));
        assert!(square.predicate(&neighbour, Predicate::Touches));
        assert!(!square.predicate(&neighbour, Predicate::Overlaps));
        assert!(crossing.predicate(&square, Predicate::Crosses));
        assert!(square.predicate(&far, Predicate::Disjoint));
        assert!(!square.predicate(&far, Predicate::Intersects));
    }

    #[test]
    fn equality() {
        let a = geom("POLYGON((0 0,0 10,10 10,10 0,0 0))");
        let b = geom("POLYGON((0 10,10 10,10 0,0 0,0 10))");
        assert!(a.predicate(&b, Predicate::Equals));
        assert!(b.predicate(&a, Predicate::Equals));
        let empty = geom("POINT EMPTY");
        assert!(empty.predicate(&geom("POINT EMPTY"), Predicate::Equals));
        assert!(!empty.predicate(&a, Predicate::Equals));
        assert!(!empty.predicate(&a, Predicate::Intersects));
    }
}
