pub(crate) mod linestring;
pub(crate) mod multipolygon;
pub(crate) mod point;
pub(crate) mod topology;
