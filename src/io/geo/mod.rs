//! Convert to and from [`geo`] geometries.
//!
//! `geo` geometries are 2D and have no CRS, and there is no empty `geo::Point`. Converting to
//! `geo` therefore fails for empty points and for geometries with z or m ordinates, and
//! converting back needs the CRS supplied by the caller.

use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::position::{Dimension, Position, PositionSequence, PositionSequenceBuilder};

fn positions_to_geo(positions: &PositionSequence) -> geo::LineString {
    positions
        .iter()
        .map(|p| geo::Coord { x: p.x(), y: p.y() })
        .collect()
}

fn point_to_geo(point: &Point) -> Result<geo::Point> {
    let position = point.position().ok_or_else(|| {
        GeoCodecError::UnsupportedType("an empty point has no geo equivalent".to_string())
    })?;
    Ok(geo::Point::new(position.x(), position.y()))
}

fn line_string_to_geo(line_string: &LineString) -> geo::LineString {
    positions_to_geo(line_string.positions())
}

fn polygon_to_geo(polygon: &Polygon) -> geo::Polygon {
    let exterior = polygon
        .exterior()
        .map(|ring| positions_to_geo(ring.positions()))
        .unwrap_or_else(|| geo::LineString::new(vec![]));
    let interiors = polygon
        .interiors()
        .iter()
        .map(|ring| positions_to_geo(ring.positions()))
        .collect();
    geo::Polygon::new(exterior, interiors)
}

fn geometry_to_geo(geometry: &Geometry) -> Result<geo::Geometry> {
    let geo = match geometry {
        Geometry::Point(g) => point_to_geo(g)?.into(),
        Geometry::LineString(g) => line_string_to_geo(g).into(),
        Geometry::Polygon(g) => polygon_to_geo(g).into(),
        Geometry::MultiPoint(g) => geo::MultiPoint::new(
            g.iter().map(point_to_geo).collect::<Result<Vec<_>>>()?,
        )
        .into(),
        Geometry::MultiLineString(g) => {
            geo::MultiLineString::new(g.iter().map(line_string_to_geo).collect()).into()
        }
        Geometry::MultiPolygon(g) => {
            geo::MultiPolygon::new(g.iter().map(polygon_to_geo).collect()).into()
        }
        Geometry::GeometryCollection(g) => {
            geo::Geometry::GeometryCollection(geo::GeometryCollection::new_from(
                g.iter().map(geometry_to_geo).collect::<Result<Vec<_>>>()?,
            ))
        }
    };
    Ok(geo)
}

/// Convert a 2D geometry to a [`geo::Geometry`].
///
/// ## Errors
///
/// - [`GeoCodecError::DimensionMismatch`] if the geometry is not 2D.
/// - [`GeoCodecError::UnsupportedType`] if it is or contains an empty point.
pub fn to_geo(geometry: &Geometry) -> Result<geo::Geometry> {
    if geometry.dimension() != Dimension::XY {
        return Err(GeoCodecError::DimensionMismatch {
            expected: Dimension::XY,
            found: geometry.dimension(),
        });
    }
    geometry_to_geo(geometry)
}

/// Builds geometries of one CRS from `geo` values.
struct GeoConverter {
    crs: Crs,
}

impl GeoConverter {
    fn positions(&self, line: &geo::LineString) -> Result<PositionSequence> {
        let mut builder = PositionSequenceBuilder::fixed_sized(line.0.len(), Dimension::XY);
        for coord in &line.0 {
            builder.push(&Position::xy(coord.x, coord.y))?;
        }
        builder.finish()
    }

    fn point(&self, point: &geo::Point) -> Result<Point> {
        Point::new(Position::xy(point.x(), point.y()), self.crs.clone())
    }

    fn line_string(&self, line: &geo::LineString) -> Result<LineString> {
        LineString::new(self.positions(line)?, self.crs.clone())
    }

    fn ring(&self, line: &geo::LineString) -> Result<LinearRing> {
        LinearRing::new(self.positions(line)?, self.crs.clone())
    }

    fn polygon(&self, polygon: &geo::Polygon) -> Result<Polygon> {
        if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() {
            return Ok(Polygon::empty(self.crs.clone()));
        }
        let rings = std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(|ring| self.ring(ring))
            .collect::<Result<Vec<_>>>()?;
        Polygon::from_rings(rings, self.crs.clone())
    }

    fn geometry(&self, geometry: &geo::Geometry) -> Result<Geometry> {
        let crs = self.crs.clone();
        let converted = match geometry {
            geo::Geometry::Point(g) => self.point(g)?.into(),
            geo::Geometry::Line(g) => {
                let line = geo::LineString::new(vec![g.start, g.end]);
                self.line_string(&line)?.into()
            }
            geo::Geometry::LineString(g) => self.line_string(g)?.into(),
            geo::Geometry::Polygon(g) => self.polygon(g)?.into(),
            geo::Geometry::MultiPoint(g) => {
                let points = g.iter().map(|p| self.point(p)).collect::<Result<_>>()?;
                MultiPoint::new(points, crs)?.into()
            }
            geo::Geometry::MultiLineString(g) => {
                let lines = g.iter().map(|l| self.line_string(l)).collect::<Result<_>>()?;
                MultiLineString::new(lines, crs)?.into()
            }
            geo::Geometry::MultiPolygon(g) => {
                let polygons = g.iter().map(|p| self.polygon(p)).collect::<Result<_>>()?;
                MultiPolygon::new(polygons, crs)?.into()
            }
            geo::Geometry::GeometryCollection(g) => {
                let geometries = g.iter().map(|g| self.geometry(g)).collect::<Result<_>>()?;
                GeometryCollection::new(geometries, crs)?.into()
            }
            geo::Geometry::Rect(g) => self.polygon(&g.to_polygon())?.into(),
            geo::Geometry::Triangle(g) => self.polygon(&g.to_polygon())?.into(),
        };
        Ok(converted)
    }
}

/// Convert a [`geo::Geometry`] into a geometry in `crs`.
///
/// `Line` becomes a two-position line string; `Rect` and `Triangle` become polygons.
///
/// ## Errors
///
/// - [`GeoCodecError::DimensionMismatch`] if `crs` is not 2D.
/// - [`GeoCodecError::InvalidStructure`] if a ring is not a valid linear ring.
pub fn from_geo(geometry: &geo::Geometry, crs: Crs) -> Result<Geometry> {
    GeoConverter { crs }.geometry(geometry)
}
