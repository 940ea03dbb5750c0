/// The impls shared by every typed wrapper: sealing, checked wrapping of a handle,
/// conversions to and from [Geometry](crate::scalar::Geometry), `Clone`, `PartialEq`,
/// `Display`, `Debug` and `FromStr`.
macro_rules! impl_geom {
    ($type:ident, $geom_type:expr) => {
        impl $crate::trait_::private::Sealed for $type {
            fn geom_handle(&self) -> &$crate::scalar::GeomHandle {
                &self.0
            }
        }

        impl $type {
            /// Wrap `handle`, checking the type of the geometry it refers to.
            pub(crate) fn from_handle(handle: $crate::scalar::GeomHandle) -> $crate::error::Result<Self> {
                let found = handle.read(|engine, h| engine.geometry_type(h))?;
                if found != $geom_type {
                    return Err($crate::error::GeoHandleError::Type(format!(
                        "expected a {}, found a {found}",
                        $geom_type
                    )));
                }
                Ok(Self(handle))
            }

            pub(crate) fn into_handle(self) -> $crate::scalar::GeomHandle {
                self.0
            }

            /// A new owned copy of this geometry.
            ///
            /// Unlike [Clone], this reports an invalidated wrapper as an error.
            pub fn try_clone(&self) -> $crate::error::Result<Self> {
                Ok(Self(self.0.try_clone()?))
            }

            /// Set the SRID of this geometry and its members, returning it.
            pub fn with_srid(self, srid: i32) -> $crate::error::Result<Self> {
                self.0.write(|engine, h| engine.set_srid(h, Some(srid)))?;
                Ok(self)
            }

            /// Parse WKT or EWKT holding this type of geometry.
            pub fn from_wkt(text: &str) -> $crate::error::Result<Self> {
                $crate::scalar::Geometry::from_wkt(text)?.try_into()
            }

            /// Parse hex encoded WKB or EWKB holding this type of geometry.
            pub fn from_hex(text: &str) -> $crate::error::Result<Self> {
                $crate::scalar::Geometry::from_hex(text)?.try_into()
            }

            pub fn from_wkb(buf: &[u8]) -> $crate::error::Result<Self> {
                $crate::scalar::Geometry::from_wkb(buf)?.try_into()
            }
        }

        /// # Panics
        ///
        /// Panics when the wrapper has been invalidated. Use `try_clone` to get an error
        /// instead.
        impl Clone for $type {
            fn clone(&self) -> Self {
                match self.try_clone() {
                    Ok(geom) => geom,
                    Err(err) => panic!("cannot clone {}: {err}", stringify!($type)),
                }
            }
        }

        /// Topological equality, see [equals](crate::Geom::equals).
        ///
        /// # Panics
        ///
        /// Panics when either wrapper has been invalidated.
        impl<G: $crate::Geom> PartialEq<G> for $type {
            fn eq(&self, other: &G) -> bool {
                match $crate::Geom::equals(self, other) {
                    Ok(equal) => equal,
                    Err(err) => panic!("cannot compare {}: {err}", stringify!($type)),
                }
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let wkt = $crate::Geom::wkt(self).map_err(|_| std::fmt::Error)?;
                write!(f, "{wkt}")
            }
        }

        impl std::fmt::Debug for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($type))
                    .field("handle", &self.0)
                    .field(
                        "wkt",
                        &$crate::Geom::wkt(self).unwrap_or_else(|err| err.to_string()),
                    )
                    .finish()
            }
        }

        impl std::str::FromStr for $type {
            type Err = $crate::error::GeoHandleError;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                $crate::scalar::Geometry::parse(s)?.try_into()
            }
        }

        impl From<$type> for $crate::scalar::Geometry {
            fn from(value: $type) -> Self {
                $crate::scalar::Geometry::$type(value)
            }
        }

        impl TryFrom<$crate::scalar::Geometry> for $type {
            type Error = $crate::error::GeoHandleError;

            fn try_from(value: $crate::scalar::Geometry) -> $crate::error::Result<Self> {
                match value {
                    $crate::scalar::Geometry::$type(geom) => Ok(geom),
                    other => Err($crate::error::GeoHandleError::Type(format!(
                        "expected a {}, found a {}",
                        $geom_type,
                        other.kind()
                    ))),
                }
            }
        }

        $crate::scalar::macros::impl_overlay_ops!($type);
    };
}

/// `&`, `|`, `-` and `^` on references, as sugar for the set operations.
macro_rules! impl_overlay_ops {
    ($type:ty) => {
        impl<G: $crate::Geom> std::ops::BitAnd<&G> for &$type {
            type Output = $crate::error::Result<$crate::scalar::Geometry>;

            fn bitand(self, rhs: &G) -> Self::Output {
                $crate::Geom::intersection(self, rhs)
            }
        }

        impl<G: $crate::Geom> std::ops::BitOr<&G> for &$type {
            type Output = $crate::error::Result<$crate::scalar::Geometry>;

            fn bitor(self, rhs: &G) -> Self::Output {
                $crate::Geom::union(self, rhs)
            }
        }

        impl<G: $crate::Geom> std::ops::Sub<&G> for &$type {
            type Output = $crate::error::Result<$crate::scalar::Geometry>;

            fn sub(self, rhs: &G) -> Self::Output {
                $crate::Geom::difference(self, rhs)
            }
        }

        impl<G: $crate::Geom> std::ops::BitXor<&G> for &$type {
            type Output = $crate::error::Result<$crate::scalar::Geometry>;

            fn bitxor(self, rhs: &G) -> Self::Output {
                $crate::Geom::sym_difference(self, rhs)
            }
        }
    };
}

pub(crate) use impl_geom;
pub(crate) use impl_overlay_ops;
