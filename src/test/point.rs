pub(crate) const WKT: &[&str] = &["POINT(5 23)", "POINT(0 0)", "POINT(-1.5 2.25)"];

pub(crate) const XYZ: &str = "POINT(1 2 3)";
