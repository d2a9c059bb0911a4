use crate::error::Result;
use crate::geometry::{GeometryType, LineString};
use crate::io::sqlserver::common::FigureAttribute;

use super::NativeAccumulator;

pub(super) fn encode_line_string(
    line_string: &LineString,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    if line_string.is_empty() {
        return acc.push_empty_shape(parent, GeometryType::LineString);
    }
    acc.open_shape(parent, GeometryType::LineString)?;
    acc.push_figure(FigureAttribute::Stroke, line_string.positions())
}
