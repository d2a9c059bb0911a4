use crate::error::Result;
use crate::geometry::{GeometryType, Polygon};
use crate::io::sqlserver::common::FigureAttribute;

use super::NativeAccumulator;

/// The shell is tagged as exterior ring, holes as interior rings in order. Rings keep their
/// closing position.
pub(super) fn encode_polygon(
    polygon: &Polygon,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    let Some(shell) = polygon.exterior() else {
        return acc.push_empty_shape(parent, GeometryType::Polygon);
    };
    acc.open_shape(parent, GeometryType::Polygon)?;
    acc.push_figure(FigureAttribute::ExteriorRing, shell.positions())?;
    for hole in polygon.interiors() {
        acc.push_figure(FigureAttribute::InteriorRing, hole.positions())?;
    }
    Ok(())
}
