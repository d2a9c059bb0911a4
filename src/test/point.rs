use crate::crs::Crs;
use crate::geometry::Point;
use crate::position::Position;
use crate::test::crs_xyzm;

pub(crate) fn p0() -> Point {
    Point::new(Position::xy(0., 1.), Crs::cartesian_2d()).unwrap()
}

pub(crate) fn p1() -> Point {
    Point::new(Position::xy(1., 2.), Crs::cartesian_2d()).unwrap()
}

pub(crate) fn p2() -> Point {
    Point::new(Position::xy(2., 3.), Crs::cartesian_2d()).unwrap()
}

pub(crate) fn p_empty() -> Point {
    Point::empty(Crs::cartesian_2d())
}

pub(crate) fn p_xyz() -> Point {
    let crs = Crs::wgs84().with_dimension(crate::position::Dimension::XYZ);
    Point::new(Position::xyz(4.35, 50.85, 13.5), crs).unwrap()
}

pub(crate) fn p_xym() -> Point {
    let crs = Crs::projected(31370).with_dimension(crate::position::Dimension::XYM);
    Point::new(Position::xym(150000., 170000., 42.), crs).unwrap()
}

pub(crate) fn p_xyzm() -> Point {
    Point::new(Position::xyzm(1., 2., 3., 4.), crs_xyzm()).unwrap()
}
