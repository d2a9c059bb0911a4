//! The format-independent codec contract.
//!
//! Every concrete format implements [`Encoder`] and [`Decoder`], so one harness can check the
//! round-trip law `decode(encode(g)) == g` for all of them.

use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::Geometry;
use crate::position::Dimension;

/// How deeply geometry collections may nest in decoded input. The root is at depth 0.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Serializes geometries into some output form.
pub trait Encoder {
    /// The serialized form, e.g. `Vec<u8>` or `String`.
    type Output;

    /// Whether this encoder can represent `geometry`.
    fn accepts(&self, geometry: &Geometry) -> bool;

    /// Serialize `geometry`.
    ///
    /// ## Errors
    ///
    /// - [`GeoCodecError::UnsupportedType`] if [`Encoder::accepts`] returns false.
    fn encode(&self, geometry: &Geometry) -> Result<Self::Output>;
}

/// Reconstructs geometries from some serialized form.
pub trait Decoder {
    /// The serialized form, e.g. `[u8]` or `str`.
    type Input: ?Sized;

    /// A cheap check of whether `input` looks like something this decoder understands.
    ///
    /// Returning true does not guarantee that decoding succeeds.
    fn accepts(&self, input: &Self::Input) -> bool;

    /// Reconstruct a geometry. There is no partial result: decoding either fully succeeds or
    /// fails.
    fn decode(&self, input: &Self::Input) -> Result<Geometry>;
}

/// The error returned by encoders for geometries they do not accept.
pub(crate) fn not_accepted(format: &str, geometry: &Geometry) -> GeoCodecError {
    GeoCodecError::UnsupportedType(format!(
        "{format} cannot encode {} with dimension {}",
        geometry.geometry_type(),
        geometry.dimension()
    ))
}

/// The CRS of a decoded geometry: the caller's override if given, otherwise the generic CRS for
/// the SRID found in the input.
pub(crate) fn resolve_crs(srid: i32, found: Dimension, crs: Option<&Crs>) -> Result<Crs> {
    match crs {
        Some(crs) if crs.dimension() != found => Err(GeoCodecError::DimensionMismatch {
            expected: crs.dimension(),
            found,
        }),
        Some(crs) => Ok(crs.clone()),
        None => Ok(Crs::from_srid_and_dimension(srid, found)),
    }
}
