use crate::crs::Crs;
use crate::geometry::MultiLineString;
use crate::test::linestring::{ls0, ls1, ls_empty};

pub(crate) fn ml0() -> MultiLineString {
    MultiLineString::new(vec![ls0(), ls_empty(), ls1()], Crs::cartesian_2d()).unwrap()
}
