use crate::crs::Crs;
use crate::geometry::{GeometryCollection, LineString, Point};
use crate::position::{Dimension, Position};
use crate::test::linestring::ls0;
use crate::test::multipoint::mp1;
use crate::test::point::{p0, p_empty};
use crate::test::polygon::p1;
use crate::test::{crs_xyzm, seq};

/// A point, an empty point, a line string and a nested collection holding a polygon and a
/// multi point.
pub(crate) fn gc0() -> GeometryCollection {
    let nested =
        GeometryCollection::new(vec![p1().into(), mp1().into()], Crs::cartesian_2d()).unwrap();
    GeometryCollection::new(
        vec![p0().into(), p_empty().into(), ls0().into(), nested.into()],
        Crs::cartesian_2d(),
    )
    .unwrap()
}

pub(crate) fn gc_empty() -> GeometryCollection {
    GeometryCollection::empty(Crs::cartesian_2d())
}

pub(crate) fn gc_xyzm() -> GeometryCollection {
    let crs = crs_xyzm();
    let point = Point::new(Position::xyzm(1., 2., 3., 4.), crs.clone()).unwrap();
    let line = LineString::new(
        seq(Dimension::XYZM, &[0., 0., 0., 0., 1., 1., 1., 1.]),
        crs.clone(),
    )
    .unwrap();
    GeometryCollection::new(vec![point.into(), line.into()], crs).unwrap()
}
