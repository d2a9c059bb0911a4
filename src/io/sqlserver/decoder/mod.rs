//! Rebuild a [`Geometry`] tree from the flat arrays of a [`NativeGeometry`].

mod collection;
mod linestring;
mod point;
mod polygon;

use tracing::trace;

use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::{Geometry, GeometryType};
use crate::io::sqlserver::common::NativeGeometry;

/// Decode the subtree rooted at shape `index`, dispatching on that shape's own type.
pub(crate) fn decode_shape(native: &NativeGeometry, index: usize, crs: &Crs) -> Result<Geometry> {
    let geometry_type = native.shape(index)?.geometry_type;
    trace!(shape = index, %geometry_type, "decoding native shape");
    let geometry = match geometry_type {
        GeometryType::Point => point::decode_point(native, index, crs)?.into(),
        GeometryType::LineString => linestring::decode_line_string(native, index, crs)?.into(),
        GeometryType::Polygon => polygon::decode_polygon(native, index, crs)?.into(),
        GeometryType::MultiPoint => collection::decode_multi_point(native, index, crs)?.into(),
        GeometryType::MultiLineString => {
            collection::decode_multi_line_string(native, index, crs)?.into()
        }
        GeometryType::MultiPolygon => collection::decode_multi_polygon(native, index, crs)?.into(),
        GeometryType::GeometryCollection => {
            collection::decode_geometry_collection(native, index, crs)?.into()
        }
    };
    Ok(geometry)
}

/// Decode the whole tree. An empty root shape yields an empty geometry of the root type.
pub(crate) fn decode(native: &NativeGeometry, crs: &Crs) -> Result<Geometry> {
    let root = native.shape(0)?;
    if root.is_empty() {
        return Ok(Geometry::empty(root.geometry_type, crs.clone()));
    }
    decode_shape(native, 0, crs)
}
