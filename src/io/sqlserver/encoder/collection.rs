use crate::error::Result;
use crate::geometry::{
    GeometryCollection, GeometryType, MultiLineString, MultiPoint, MultiPolygon,
};

use super::linestring::encode_line_string;
use super::point::encode_point;
use super::polygon::encode_polygon;
use super::{encode_geometry, NativeAccumulator};

/// Append the shape of a collection, then each member as its child.
fn encode_members<'a, T: 'a>(
    members: impl ExactSizeIterator<Item = &'a T>,
    geometry_type: GeometryType,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
    encode_member: impl Fn(&T, Option<usize>, &mut NativeAccumulator) -> Result<()>,
) -> Result<()> {
    if members.len() == 0 {
        return acc.push_empty_shape(parent, geometry_type);
    }
    let index = acc.open_shape(parent, geometry_type)?;
    for member in members {
        encode_member(member, Some(index), acc)?;
    }
    Ok(())
}

pub(super) fn encode_multi_point(
    multi_point: &MultiPoint,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    encode_members(
        multi_point.iter(),
        GeometryType::MultiPoint,
        parent,
        acc,
        encode_point,
    )
}

pub(super) fn encode_multi_line_string(
    multi_line_string: &MultiLineString,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    encode_members(
        multi_line_string.iter(),
        GeometryType::MultiLineString,
        parent,
        acc,
        encode_line_string,
    )
}

pub(super) fn encode_multi_polygon(
    multi_polygon: &MultiPolygon,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    encode_members(
        multi_polygon.iter(),
        GeometryType::MultiPolygon,
        parent,
        acc,
        encode_polygon,
    )
}

pub(super) fn encode_geometry_collection(
    collection: &GeometryCollection,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    encode_members(
        collection.iter(),
        GeometryType::GeometryCollection,
        parent,
        acc,
        encode_geometry,
    )
}
