use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::{
    GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use crate::io::sqlserver::common::NativeGeometry;

use super::decode_shape;
use super::linestring::decode_line_string;
use super::point::decode_point;
use super::polygon::decode_polygon;

/// Decode every child of shape `index` with `decode_child`, requiring it to be of `member_type`.
fn decode_members<T>(
    native: &NativeGeometry,
    index: usize,
    crs: &Crs,
    member_type: GeometryType,
    decode_child: impl Fn(&NativeGeometry, usize, &Crs) -> Result<T>,
) -> Result<Vec<T>> {
    native
        .children(index)
        .map(|child| {
            let found = native.shape(child)?.geometry_type;
            if found != member_type {
                return Err(GeoCodecError::malformed(
                    native.shape_byte_position(child),
                    format!("expected a {member_type} member, found a {found}"),
                ));
            }
            decode_child(native, child, crs)
        })
        .collect()
}

pub(super) fn decode_multi_point(
    native: &NativeGeometry,
    index: usize,
    crs: &Crs,
) -> Result<MultiPoint> {
    if native.is_empty_shape(index)? {
        return Ok(MultiPoint::empty(crs.clone()));
    }
    let points: Vec<Point> = decode_members(native, index, crs, GeometryType::Point, decode_point)?;
    MultiPoint::new(points, crs.clone())
}

pub(super) fn decode_multi_line_string(
    native: &NativeGeometry,
    index: usize,
    crs: &Crs,
) -> Result<MultiLineString> {
    if native.is_empty_shape(index)? {
        return Ok(MultiLineString::empty(crs.clone()));
    }
    let lines: Vec<LineString> = decode_members(
        native,
        index,
        crs,
        GeometryType::LineString,
        decode_line_string,
    )?;
    MultiLineString::new(lines, crs.clone())
}

pub(super) fn decode_multi_polygon(
    native: &NativeGeometry,
    index: usize,
    crs: &Crs,
) -> Result<MultiPolygon> {
    if native.is_empty_shape(index)? {
        return Ok(MultiPolygon::empty(crs.clone()));
    }
    let polygons: Vec<Polygon> =
        decode_members(native, index, crs, GeometryType::Polygon, decode_polygon)?;
    MultiPolygon::new(polygons, crs.clone())
}

pub(super) fn decode_geometry_collection(
    native: &NativeGeometry,
    index: usize,
    crs: &Crs,
) -> Result<GeometryCollection> {
    if native.is_empty_shape(index)? {
        return Ok(GeometryCollection::empty(crs.clone()));
    }
    let geometries = native
        .children(index)
        .map(|child| decode_shape(native, child, crs))
        .collect::<Result<Vec<_>>>()?;
    GeometryCollection::new(geometries, crs.clone())
}
