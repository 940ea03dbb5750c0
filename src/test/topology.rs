/// `(a, b, relate(a, b))` triples.
pub(crate) const RELATE: &[(&str, &str, &str)] = &[
    (
        "POINT(0 0)",
        "POLYGON((-1 -1,-1 1,1 1,1 -1,-1 -1))",
        "0FFFFF212",
    ),
    (
        "POLYGON((0 0,0 10,10 10,10 0,0 0))",
        "POLYGON((5 5,5 15,15 15,15 5,5 5))",
        "212101212",
    ),
    ("LINESTRING(0 0,10 10)", "LINESTRING(0 10,10 0)", "0F1FF0102"),
    (
        "POLYGON((0 0,0 10,10 10,10 0,0 0))",
        "POLYGON((10 0,10 10,20 10,20 0,10 0))",
        "FF2F11212",
    ),
    ("POINT(0 0)", "POINT(0 1)", "FF0FFF0F2"),
];

/// `(a, b)` pairs exercised by the set operation tests.
pub(crate) const OVERLAY_PAIRS: &[(&str, &str)] = &[
    (
        "POLYGON((0 0,0 10,10 10,10 0,0 0))",
        "POLYGON((5 5,5 15,15 15,15 5,5 5))",
    ),
    (
        "POLYGON((0 0,0 10,10 10,10 0,0 0))",
        "POLYGON((20 20,20 30,30 30,30 20,20 20))",
    ),
    ("POINT(1 1)", "POLYGON((0 0,0 10,10 10,10 0,0 0))"),
    ("MULTIPOINT(0 0,5 5)", "POINT(5 5)"),
];
