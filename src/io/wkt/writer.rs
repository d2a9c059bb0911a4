use std::fmt::{self, Display, Write};

use itertools::Itertools;
use wkt::types::{
    Coord, GeometryCollection as WktGeometryCollection, LineString as WktLineString,
    MultiLineString as WktMultiLineString, MultiPoint as WktMultiPoint,
    MultiPolygon as WktMultiPolygon, Point as WktPoint, Polygon as WktPolygon,
};
use wkt::Wkt;

use crate::geometry::{Geometry, GeometryType, LineString, Point, Polygon};
use crate::position::{Dimension, Position, PositionSequence};

fn coord_to_wkt(position: &Position) -> Coord<f64> {
    Coord {
        x: position.x(),
        y: position.y(),
        z: position.z(),
        m: position.m(),
    }
}

fn positions_to_wkt(positions: &PositionSequence) -> WktLineString<f64> {
    WktLineString(positions.iter().map(|p| coord_to_wkt(&p)).collect())
}

fn point_to_wkt(point: &Point) -> WktPoint<f64> {
    WktPoint(point.position().map(|p| coord_to_wkt(&p)))
}

fn line_string_to_wkt(line_string: &LineString) -> WktLineString<f64> {
    positions_to_wkt(line_string.positions())
}

fn polygon_to_wkt(polygon: &Polygon) -> WktPolygon<f64> {
    WktPolygon(
        polygon
            .rings()
            .iter()
            .map(|ring| positions_to_wkt(ring.positions()))
            .collect(),
    )
}

/// Convert a geometry tree into the `wkt` crate's representation.
fn geometry_to_wkt(geometry: &Geometry) -> Wkt<f64> {
    match geometry {
        Geometry::Point(g) => Wkt::Point(point_to_wkt(g)),
        Geometry::LineString(g) => Wkt::LineString(line_string_to_wkt(g)),
        Geometry::Polygon(g) => Wkt::Polygon(polygon_to_wkt(g)),
        Geometry::MultiPoint(g) => {
            Wkt::MultiPoint(WktMultiPoint(g.iter().map(point_to_wkt).collect()))
        }
        Geometry::MultiLineString(g) => Wkt::MultiLineString(WktMultiLineString(
            g.iter().map(line_string_to_wkt).collect(),
        )),
        Geometry::MultiPolygon(g) => {
            Wkt::MultiPolygon(WktMultiPolygon(g.iter().map(polygon_to_wkt).collect()))
        }
        Geometry::GeometryCollection(g) => Wkt::GeometryCollection(WktGeometryCollection(
            g.iter().map(geometry_to_wkt).collect(),
        )),
    }
}

/// The ISO dimension keyword that follows the type name.
fn dimension_keyword(dim: Dimension) -> &'static str {
    match dim {
        Dimension::XY => "",
        Dimension::XYZ => "Z",
        Dimension::XYM => "M",
        Dimension::XYZM => "ZM",
    }
}

fn wkt_type(wkt: &Wkt<f64>) -> GeometryType {
    match wkt {
        Wkt::Point(_) => GeometryType::Point,
        Wkt::LineString(_) => GeometryType::LineString,
        Wkt::Polygon(_) => GeometryType::Polygon,
        Wkt::MultiPoint(_) => GeometryType::MultiPoint,
        Wkt::MultiLineString(_) => GeometryType::MultiLineString,
        Wkt::MultiPolygon(_) => GeometryType::MultiPolygon,
        Wkt::GeometryCollection(_) => GeometryType::GeometryCollection,
    }
}

fn wkt_is_empty(wkt: &Wkt<f64>) -> bool {
    match wkt {
        Wkt::Point(p) => p.0.is_none(),
        Wkt::LineString(l) => l.0.is_empty(),
        Wkt::Polygon(p) => p.0.is_empty(),
        Wkt::MultiPoint(mp) => mp.0.is_empty(),
        Wkt::MultiLineString(ml) => ml.0.is_empty(),
        Wkt::MultiPolygon(mp) => mp.0.is_empty(),
        Wkt::GeometryCollection(gc) => gc.0.is_empty(),
    }
}

fn coords(line: &WktLineString<f64>) -> impl Display + '_ {
    line.0.iter().format(",")
}

fn rings(rings: &[WktLineString<f64>]) -> impl Display + '_ {
    rings
        .iter()
        .format_with(",", |ring, f| f(&format_args!("({})", coords(ring))))
}

/// Write `wkt` with `keyword` after every type name.
///
/// `wkt` 0.11 only prints the third and fourth ordinate of points and line strings and never
/// prints a keyword other than on points, so geometries with Z or M go through here.
fn write_tagged(out: &mut String, wkt: &Wkt<f64>, keyword: &str) -> fmt::Result {
    write!(out, "{} {keyword}", wkt_type(wkt).wkt_name())?;
    if wkt_is_empty(wkt) {
        return out.write_str(" EMPTY");
    }
    match wkt {
        Wkt::Point(p) => match &p.0 {
            Some(coord) => write!(out, "({coord})"),
            None => Ok(()),
        },
        Wkt::LineString(l) => write!(out, "({})", coords(l)),
        Wkt::Polygon(p) => write!(out, "({})", rings(&p.0)),
        Wkt::MultiPoint(mp) => write!(
            out,
            "({})",
            mp.0.iter()
                .filter_map(|p| p.0.as_ref())
                .format_with(",", |coord, f| f(&format_args!("({coord})")))
        ),
        Wkt::MultiLineString(ml) => write!(out, "({})", rings(&ml.0)),
        Wkt::MultiPolygon(mp) => write!(
            out,
            "({})",
            mp.0.iter()
                .format_with(",", |polygon, f| f(&format_args!("({})", rings(&polygon.0))))
        ),
        Wkt::GeometryCollection(gc) => {
            out.push('(');
            for (i, member) in gc.0.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_tagged(out, member, keyword)?;
            }
            out.push(')');
            Ok(())
        }
    }
}

/// Append the ISO WKT of `geometry` to `out`.
///
/// 2D geometries are formatted by the `wkt` crate. Otherwise every type name, including those of
/// empty geometries and collections, carries the dimension keyword, e.g. `POINT Z EMPTY`.
pub(crate) fn write_geometry(out: &mut String, geometry: &Geometry) -> fmt::Result {
    let wkt = geometry_to_wkt(geometry);
    match geometry.dimension() {
        Dimension::XY => write!(out, "{wkt}"),
        dim => write_tagged(out, &wkt, dimension_keyword(dim)),
    }
}

/// Whether every member of every multi geometry in the tree is non-empty.
///
/// Empty members have no WKT spelling inside a multi geometry.
pub(crate) fn is_representable(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_) => true,
        Geometry::MultiPoint(g) => g.iter().all(|p| !p.is_empty()),
        Geometry::MultiLineString(g) => g.iter().all(|l| !l.is_empty()),
        Geometry::MultiPolygon(g) => g.iter().all(|p| !p.is_empty()),
        Geometry::GeometryCollection(g) => g.iter().all(is_representable),
    }
}
