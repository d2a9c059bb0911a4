use crate::error::Result;
use crate::geometry::{GeometryType, Point};
use crate::io::sqlserver::common::FigureAttribute;
use crate::position::PositionSequence;

use super::NativeAccumulator;

pub(super) fn encode_point(
    point: &Point,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    let Some(position) = point.position() else {
        return acc.push_empty_shape(parent, GeometryType::Point);
    };
    acc.open_shape(parent, GeometryType::Point)?;
    let positions = PositionSequence::from_positions(position.dim(), &[position])?;
    acc.push_figure(FigureAttribute::Stroke, &positions)
}
