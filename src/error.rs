//! Defines [`GeoHandleError`], representing all errors returned by this crate.

use std::fmt::Debug;

use thiserror::Error;

use crate::scalar::Geometry;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoHandleError {
    /// Input text or bytes could not be parsed into a geometry.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value was well-typed but violates a geometric constraint, such as an unclosed ring.
    #[error("Invalid value: {0}")]
    Value(String),

    /// Wrong kind of geometry or wrong coordinate dimension for an operation.
    #[error("Incorrect type for operation: {0}")]
    Type(String),

    /// Structural or coordinate index out of range.
    #[error("Index {index} out of range for length {len}")]
    Index { index: usize, len: usize },

    /// Access through a handle whose allocation has been released or replaced.
    #[error("Geometry handle is no longer valid: {0}")]
    Lifetime(String),

    /// The engine rejected the request.
    #[error("Engine error: {0}")]
    Engine(String),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl GeoHandleError {
    pub(crate) fn index(index: usize, len: usize) -> Self {
        GeoHandleError::Index { index, len }
    }

    /// Whether this error reports access through an invalidated handle.
    pub fn is_lifetime(&self) -> bool {
        matches!(self, GeoHandleError::Lifetime(_))
    }
}

/// A rejected structural assignment.
///
/// The geometry that was offered is handed back untouched: it stays owned by the caller,
/// and aliases into it stay valid.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct SetError {
    pub error: GeoHandleError,
    pub value: Geometry,
}

impl SetError {
    /// The geometry that was not adopted.
    pub fn into_value(self) -> Geometry {
        self.value
    }
}

impl From<SetError> for GeoHandleError {
    fn from(err: SetError) -> Self {
        err.error
    }
}

impl From<geozero::error::GeozeroError> for GeoHandleError {
    fn from(err: geozero::error::GeozeroError) -> Self {
        GeoHandleError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for GeoHandleError {
    fn from(err: serde_json::Error) -> Self {
        GeoHandleError::Value(err.to_string())
    }
}

/// Crate-specific result type.
pub type Result<T, E = GeoHandleError> = std::result::Result<T, E>;
