//! Immutable geometry values.
//!
//! Every geometry carries the [`Crs`] of its positions; children of multi-geometries and
//! collections must share the CRS of their parent. Values are validated when constructed and
//! never mutated afterwards.

mod envelope;
mod geometrycollection;
mod linestring;
mod multilinestring;
mod multipoint;
mod multipolygon;
mod point;
mod polygon;

pub use envelope::Envelope;
pub use geometrycollection::GeometryCollection;
pub use linestring::{LineString, LinearRing};
pub use multilinestring::MultiLineString;
pub use multipoint::MultiPoint;
pub use multipolygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;

use std::fmt::Display;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::position::Dimension;

/// The OpenGIS geometry type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GeometryType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    /// Look up a type by its OpenGIS code.
    ///
    /// ## Errors
    ///
    /// - If `code` is not in `1..=7`; code 0 marks an invalid geometry.
    pub fn from_code(code: u8) -> Result<Self> {
        Self::try_from_primitive(code)
            .map_err(|_| GeoCodecError::UnsupportedType(format!("OpenGIS type code {code}")))
    }

    /// The upper-case keyword used by WKT.
    pub fn wkt_name(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wkt_name())
    }
}

pub(crate) fn check_dimension(crs: &Crs, found: Dimension) -> Result<()> {
    let expected = crs.dimension();
    if expected != found {
        return Err(GeoCodecError::DimensionMismatch { expected, found });
    }
    Ok(())
}

pub(crate) fn check_crs(expected: &Crs, found: &Crs) -> Result<()> {
    if expected != found {
        return Err(GeoCodecError::InvalidStructure(format!(
            "member CRS {} does not match collection CRS {}",
            found.id(),
            expected.id()
        )));
    }
    Ok(())
}

/// Any geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// An empty geometry of the given type.
    pub fn empty(geometry_type: GeometryType, crs: Crs) -> Self {
        match geometry_type {
            GeometryType::Point => Point::empty(crs).into(),
            GeometryType::LineString => LineString::empty(crs).into(),
            GeometryType::Polygon => Polygon::empty(crs).into(),
            GeometryType::MultiPoint => MultiPoint::empty(crs).into(),
            GeometryType::MultiLineString => MultiLineString::empty(crs).into(),
            GeometryType::MultiPolygon => MultiPolygon::empty(crs).into(),
            GeometryType::GeometryCollection => GeometryCollection::empty(crs).into(),
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    pub fn crs(&self) -> &Crs {
        match self {
            Geometry::Point(g) => g.crs(),
            Geometry::LineString(g) => g.crs(),
            Geometry::Polygon(g) => g.crs(),
            Geometry::MultiPoint(g) => g.crs(),
            Geometry::MultiLineString(g) => g.crs(),
            Geometry::MultiPolygon(g) => g.crs(),
            Geometry::GeometryCollection(g) => g.crs(),
        }
    }

    pub fn srid(&self) -> i32 {
        self.crs().srid()
    }

    /// The coordinate dimension of the positions of this geometry.
    pub fn dimension(&self) -> Dimension {
        self.crs().dimension()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    pub fn num_positions(&self) -> usize {
        match self {
            Geometry::Point(g) => g.num_positions(),
            Geometry::LineString(g) => g.num_positions(),
            Geometry::Polygon(g) => g.num_positions(),
            Geometry::MultiPoint(g) => g.num_positions(),
            Geometry::MultiLineString(g) => g.num_positions(),
            Geometry::MultiPolygon(g) => g.num_positions(),
            Geometry::GeometryCollection(g) => g.num_positions(),
        }
    }

    /// 0 for points, 1 for curves, 2 for surfaces; a collection takes the maximum of its
    /// members (0 when it has none).
    pub fn topological_dimension(&self) -> u8 {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => 2,
            Geometry::GeometryCollection(gc) => gc
                .iter()
                .map(Geometry::topological_dimension)
                .max()
                .unwrap_or(0),
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Geometry::Point(g) => g.envelope(),
            Geometry::LineString(g) => g.envelope(),
            Geometry::Polygon(g) => g.envelope(),
            Geometry::MultiPoint(g) => g.envelope(),
            Geometry::MultiLineString(g) => g.envelope(),
            Geometry::MultiPolygon(g) => g.envelope(),
            Geometry::GeometryCollection(g) => g.envelope(),
        }
    }
}

macro_rules! impl_from_variant {
    ($variant:ident) => {
        impl From<$variant> for Geometry {
            fn from(value: $variant) -> Self {
                Geometry::$variant(value)
            }
        }
    };
}

impl_from_variant!(Point);
impl_from_variant!(LineString);
impl_from_variant!(Polygon);
impl_from_variant!(MultiPoint);
impl_from_variant!(MultiLineString);
impl_from_variant!(MultiPolygon);
impl_from_variant!(GeometryCollection);

impl From<LinearRing> for Geometry {
    fn from(value: LinearRing) -> Self {
        Geometry::LineString(value.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{linestring, multipoint, point, polygon};

    #[test]
    fn type_codes() {
        assert_eq!(u8::from(GeometryType::Polygon), 3);
        assert_eq!(
            GeometryType::from_code(7).unwrap(),
            GeometryType::GeometryCollection
        );
        assert!(matches!(
            GeometryType::from_code(0),
            Err(GeoCodecError::UnsupportedType(_))
        ));
        assert!(GeometryType::from_code(8).is_err());
    }

    #[test]
    fn empty_of_every_type() {
        for code in 1..=7 {
            let typ = GeometryType::from_code(code).unwrap();
            let geom = Geometry::empty(typ, Crs::wgs84());
            assert!(geom.is_empty());
            assert_eq!(geom.geometry_type(), typ);
            assert_eq!(geom.srid(), 4326);
        }
    }

    #[test]
    fn topological_dimension() {
        assert_eq!(Geometry::from(point::p0()).topological_dimension(), 0);
        assert_eq!(Geometry::from(linestring::ls0()).topological_dimension(), 1);
        assert_eq!(Geometry::from(polygon::p1()).topological_dimension(), 2);
        assert_eq!(Geometry::from(multipoint::mp0()).topological_dimension(), 0);
    }

    #[test]
    fn linear_ring_becomes_line_string() {
        let geom = Geometry::from(polygon::shell());
        assert_eq!(geom.geometry_type(), GeometryType::LineString);
        assert_eq!(geom.num_positions(), 5);
    }
}
