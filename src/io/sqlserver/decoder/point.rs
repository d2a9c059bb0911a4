use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::Point;
use crate::io::sqlserver::common::{FigureAttribute, NativeGeometry};

pub(super) fn decode_point(native: &NativeGeometry, index: usize, crs: &Crs) -> Result<Point> {
    if native.is_empty_shape(index)? {
        return Ok(Point::empty(crs.clone()));
    }
    let figures = native.figure_range(index)?;
    if figures.len() != 1 {
        return Err(GeoCodecError::malformed(
            native.shape_byte_position(index),
            format!("a point needs exactly one figure, got {}", figures.len()),
        ));
    }
    let figure = figures.start;
    if native.figures()[figure].attribute != FigureAttribute::Stroke {
        return Err(GeoCodecError::malformed(
            native.figure_byte_position(figure),
            "a point figure must be a stroke",
        ));
    }
    let points = native.point_range(figure)?;
    if points.len() != 1 {
        return Err(GeoCodecError::malformed(
            native.figure_byte_position(figure),
            format!("a point figure needs exactly one point, got {}", points.len()),
        ));
    }
    let position = native.points().get(points.start).ok_or_else(|| {
        GeoCodecError::malformed(native.figure_byte_position(figure), "dangling point offset")
    })?;
    Point::new(position, crs.clone())
}
