pub(crate) const LINE: &str = "LINESTRING(0 0,1 1,2 0)";

/// A closed 10x10 square.
pub(crate) const RING: &str = "LINEARRING(0 0,0 10,10 10,10 0,0 0)";
