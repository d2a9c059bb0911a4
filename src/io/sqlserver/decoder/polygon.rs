use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::{LinearRing, Polygon};
use crate::io::sqlserver::common::{FigureAttribute, NativeGeometry};

use super::linestring::figure_positions;

/// Assemble a polygon from its ring figures.
///
/// The figure attribute decides the role of a ring, not its position: the exterior ring becomes
/// the shell wherever it appears, interior rings become holes in the order they appear.
pub(super) fn decode_polygon(native: &NativeGeometry, index: usize, crs: &Crs) -> Result<Polygon> {
    if native.is_empty_shape(index)? {
        return Ok(Polygon::empty(crs.clone()));
    }
    let figures = native.figure_range(index)?;
    if figures.is_empty() {
        return Err(GeoCodecError::malformed(
            native.shape_byte_position(index),
            "a non-empty polygon needs at least one figure",
        ));
    }

    let mut shell = None;
    let mut holes = Vec::with_capacity(figures.len() - 1);
    for figure in figures {
        let position = native.figure_byte_position(figure);
        let ring = LinearRing::new(figure_positions(native, figure)?, crs.clone())?;
        match native.figures()[figure].attribute {
            FigureAttribute::ExteriorRing if shell.is_none() => shell = Some(ring),
            FigureAttribute::ExteriorRing => {
                return Err(GeoCodecError::malformed(
                    position,
                    "a polygon has more than one exterior ring",
                ))
            }
            FigureAttribute::InteriorRing => holes.push(ring),
            FigureAttribute::Stroke => {
                return Err(GeoCodecError::malformed(
                    position,
                    "a polygon figure must be a ring",
                ))
            }
        }
    }
    let shell = shell.ok_or_else(|| {
        GeoCodecError::malformed(
            native.shape_byte_position(index),
            "a polygon has no exterior ring",
        )
    })?;
    Polygon::new(shell, holes)
}
