use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::LineString;
use crate::io::sqlserver::common::{FigureAttribute, NativeGeometry};
use crate::position::{PositionSequence, PositionSequenceBuilder};

/// Copy the points of figure `figure` into a new sequence.
pub(super) fn figure_positions(native: &NativeGeometry, figure: usize) -> Result<PositionSequence> {
    let range = native.point_range(figure)?;
    if range.is_empty() {
        return Err(GeoCodecError::malformed(
            native.figure_byte_position(figure),
            format!("figure {figure} has no points"),
        ));
    }
    let mut builder = PositionSequenceBuilder::fixed_sized(range.len(), native.dimension());
    for i in range {
        let position = native.points().get(i).ok_or_else(|| {
            GeoCodecError::malformed(native.figure_byte_position(figure), "dangling point offset")
        })?;
        builder.push(&position)?;
    }
    builder.finish()
}

pub(super) fn decode_line_string(
    native: &NativeGeometry,
    index: usize,
    crs: &Crs,
) -> Result<LineString> {
    if native.is_empty_shape(index)? {
        return Ok(LineString::empty(crs.clone()));
    }
    let figures = native.figure_range(index)?;
    if figures.len() != 1 {
        return Err(GeoCodecError::malformed(
            native.shape_byte_position(index),
            format!("a line string needs exactly one figure, got {}", figures.len()),
        ));
    }
    let figure = figures.start;
    if native.figures()[figure].attribute != FigureAttribute::Stroke {
        return Err(GeoCodecError::malformed(
            native.figure_byte_position(figure),
            "a line string figure must be a stroke",
        ));
    }
    LineString::new(figure_positions(native, figure)?, crs.clone())
}
