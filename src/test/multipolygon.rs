pub(crate) const TWO_SQUARES: &str =
    "MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)),((5 5,5 6,6 6,6 5,5 5)))";

/// Two squares sharing interior, which makes the multipolygon invalid.
pub(crate) const OVERLAPPING: &str =
    "MULTIPOLYGON(((0 0,0 10,10 10,10 0,0 0)),((5 5,5 15,15 15,15 5,5 5)))";
