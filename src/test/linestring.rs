use crate::crs::Crs;
use crate::geometry::LineString;
use crate::position::Dimension;
use crate::test::{crs_xyzm, seq};

pub(crate) fn ls0() -> LineString {
    LineString::new(seq(Dimension::XY, &[0., 1., 1., 2., 2., 3.]), Crs::cartesian_2d()).unwrap()
}

pub(crate) fn ls1() -> LineString {
    LineString::new(
        seq(Dimension::XY, &[3., 4., 5., 6., 7., 8.]),
        Crs::cartesian_2d(),
    )
    .unwrap()
}

/// Exactly two positions.
pub(crate) fn ls_segment() -> LineString {
    LineString::new(seq(Dimension::XY, &[-1., -1., 1., 1.]), Crs::cartesian_2d()).unwrap()
}

pub(crate) fn ls_xyzm() -> LineString {
    LineString::new(
        seq(
            Dimension::XYZM,
            &[1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12.],
        ),
        crs_xyzm(),
    )
    .unwrap()
}

pub(crate) fn ls_empty() -> LineString {
    LineString::empty(Crs::cartesian_2d())
}
