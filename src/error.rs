//! Defines [`GeoCodecError`], representing all errors returned by this crate.

use std::fmt::Debug;

use thiserror::Error;

use crate::position::Dimension;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoCodecError {
    /// No codec accepts the declared type of the input.
    ///
    /// Raised for unknown OpenGIS, WKB or WKT type tags and for format versions or features that
    /// are not supported.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedType(String),

    /// A geometry value could not be constructed because one of its invariants does not hold.
    #[error("Invalid geometry structure: {0}")]
    InvalidStructure(String),

    /// An offset or length inside a binary buffer is inconsistent.
    #[error("Malformed binary at byte {position}: {message}")]
    MalformedBinary {
        /// Byte offset at which the problem was detected.
        position: usize,
        /// Description of the inconsistency.
        message: String,
    },

    /// Coordinate dimension does not match the declared coordinate reference system.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension declared by the CRS or the enclosing geometry.
        expected: Dimension,
        /// Dimension actually found.
        found: Dimension,
    },

    /// Degenerate input to a numerical routine, e.g. collinear points.
    #[error("Degenerate geometry: {0}")]
    Degenerate(String),

    /// Invalid parameter passed by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// WKT parse error.
    #[error("WKT error: {0}")]
    Wkt(String),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl GeoCodecError {
    pub(crate) fn malformed(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedBinary {
            position,
            message: message.into(),
        }
    }
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoCodecError>;
