pub(crate) mod geometrycollection;
pub(crate) mod linestring;
pub(crate) mod multilinestring;
pub(crate) mod point;

use crate::crs::Crs;
use crate::geometry::{Geometry, MultiLineString, MultiPoint, MultiPolygon};
use crate::position::{Dimension, PositionSequence};

pub(crate) fn seq(dim: Dimension, coords: &[f64]) -> PositionSequence {
    PositionSequence::from_interleaved(dim, coords.to_vec()).unwrap()
}

pub(crate) fn crs_xyzm() -> Crs {
    Crs::from_srid_and_dimension(4326, Dimension::XYZM)
}

/// One geometry of every kind, including empty ones and every coordinate dimension.
pub(crate) fn all_geometries() -> Vec<Geometry> {
    vec![
        point::p0().into(),
        point::p_empty().into(),
        point::p_xyz().into(),
        point::p_xym().into(),
        point::p_xyzm().into(),
        linestring::ls0().into(),
        linestring::ls_segment().into(),
        linestring::ls_xyzm().into(),
        linestring::ls_empty().into(),
        polygon::p0().into(),
        polygon::p1().into(),
        polygon::p_xyz().into(),
        polygon::p_empty().into(),
        multipoint::mp0().into(),
        multipoint::mp_with_empty().into(),
        MultiPoint::empty(Crs::cartesian_2d()).into(),
        multilinestring::ml0().into(),
        MultiLineString::empty(Crs::cartesian_2d()).into(),
        multipolygon::mpoly0().into(),
        MultiPolygon::empty(Crs::cartesian_2d()).into(),
        geometrycollection::gc0().into(),
        geometrycollection::gc_empty().into(),
        geometrycollection::gc_xyzm().into(),
    ]
}
