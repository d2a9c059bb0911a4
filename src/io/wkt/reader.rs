use std::str::FromStr;

use wkt::types::{Coord, LineString as WktLineString, Point as WktPoint, Polygon as WktPolygon};
use wkt::Wkt;

use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::io::codec::resolve_crs;
use crate::position::{Dimension, Position, PositionSequence, PositionSequenceBuilder};

/// Split an optional `SRID=<n>;` prefix from EWKT text.
pub(crate) fn split_srid(text: &str) -> Result<(Option<i32>, &str)> {
    let text = text.trim_start();
    let Some(rest) = text
        .get(..5)
        .filter(|prefix| prefix.eq_ignore_ascii_case("SRID="))
        .map(|_| &text[5..])
    else {
        return Ok((None, text));
    };
    let (srid, body) = rest
        .split_once(';')
        .ok_or_else(|| GeoCodecError::Wkt("SRID prefix is not terminated by ';'".to_string()))?;
    let srid = srid
        .trim()
        .parse::<i32>()
        .map_err(|_| GeoCodecError::Wkt(format!("invalid SRID {srid:?}")))?;
    Ok((Some(srid), body))
}

fn coord_dimension(coord: &Coord<f64>) -> Dimension {
    Dimension::from_flags(coord.z.is_some(), coord.m.is_some())
}

/// The dimension of the first coordinate in document order, if any.
fn first_dimension(wkt: &Wkt<f64>) -> Option<Dimension> {
    let first_in_line = |line: &WktLineString<f64>| line.0.first().map(coord_dimension);
    let first_in_polygon = |polygon: &WktPolygon<f64>| polygon.0.iter().find_map(first_in_line);
    match wkt {
        Wkt::Point(p) => p.0.as_ref().map(coord_dimension),
        Wkt::LineString(l) => first_in_line(l),
        Wkt::Polygon(p) => first_in_polygon(p),
        Wkt::MultiPoint(mp) => mp.0.iter().find_map(|p| p.0.as_ref().map(coord_dimension)),
        Wkt::MultiLineString(ml) => ml.0.iter().find_map(first_in_line),
        Wkt::MultiPolygon(mp) => mp.0.iter().find_map(first_in_polygon),
        Wkt::GeometryCollection(gc) => gc.0.iter().find_map(first_dimension),
    }
}

/// The `Z`, `M` or `ZM` keyword that follows the type name of the root geometry, if any.
///
/// `wkt` consumes this keyword without recording it, so a geometry without coordinates would
/// otherwise lose its dimension.
fn declared_dimension(body: &str) -> Option<Dimension> {
    let body = body.trim_start();
    let rest = body.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    match rest[..end].to_ascii_uppercase().as_str() {
        "Z" => Some(Dimension::XYZ),
        "M" => Some(Dimension::XYM),
        "ZM" => Some(Dimension::XYZM),
        _ => None,
    }
}

/// Converts parsed WKT into geometries of one CRS.
struct WktConverter<'a> {
    crs: &'a Crs,
}

impl<'a> WktConverter<'a> {
    fn position(&self, coord: &Coord<f64>) -> Result<Position> {
        let dim = self.crs.dimension();
        let found = coord_dimension(coord);
        if found != dim {
            return Err(GeoCodecError::DimensionMismatch {
                expected: dim,
                found,
            });
        }
        let ordinates = [Some(coord.x), Some(coord.y), coord.z, coord.m];
        let ordinates = ordinates.into_iter().flatten().collect::<Vec<_>>();
        Position::from_slice(dim, &ordinates)
    }

    fn positions(&self, coords: &[Coord<f64>]) -> Result<PositionSequence> {
        let mut builder = PositionSequenceBuilder::fixed_sized(coords.len(), self.crs.dimension());
        for coord in coords {
            builder.push(&self.position(coord)?)?;
        }
        builder.finish()
    }

    fn point(&self, point: &WktPoint<f64>) -> Result<Point> {
        match &point.0 {
            Some(coord) => Point::new(self.position(coord)?, self.crs.clone()),
            None => Ok(Point::empty(self.crs.clone())),
        }
    }

    fn line_string(&self, line: &WktLineString<f64>) -> Result<LineString> {
        LineString::new(self.positions(&line.0)?, self.crs.clone())
    }

    fn polygon(&self, polygon: &WktPolygon<f64>) -> Result<Polygon> {
        let rings = polygon
            .0
            .iter()
            .map(|ring| LinearRing::new(self.positions(&ring.0)?, self.crs.clone()))
            .collect::<Result<Vec<_>>>()?;
        Polygon::from_rings(rings, self.crs.clone())
    }

    fn geometry(&self, wkt: &Wkt<f64>) -> Result<Geometry> {
        let crs = self.crs.clone();
        let geometry = match wkt {
            Wkt::Point(p) => self.point(p)?.into(),
            Wkt::LineString(l) => self.line_string(l)?.into(),
            Wkt::Polygon(p) => self.polygon(p)?.into(),
            Wkt::MultiPoint(mp) => {
                let points = mp.0.iter().map(|p| self.point(p)).collect::<Result<_>>()?;
                MultiPoint::new(points, crs)?.into()
            }
            Wkt::MultiLineString(ml) => {
                let lines = ml
                    .0
                    .iter()
                    .map(|l| self.line_string(l))
                    .collect::<Result<_>>()?;
                MultiLineString::new(lines, crs)?.into()
            }
            Wkt::MultiPolygon(mp) => {
                let polygons = mp.0.iter().map(|p| self.polygon(p)).collect::<Result<_>>()?;
                MultiPolygon::new(polygons, crs)?.into()
            }
            Wkt::GeometryCollection(gc) => {
                let geometries = gc
                    .0
                    .iter()
                    .map(|g| self.geometry(g))
                    .collect::<Result<_>>()?;
                GeometryCollection::new(geometries, crs)?.into()
            }
        };
        Ok(geometry)
    }
}

/// Parse WKT or EWKT text.
///
/// The coordinate dimension is taken from the dimension keyword of the root geometry, or else
/// from the first coordinate, and every coordinate must agree with it. A geometry with neither is
/// 2D unless `crs` says otherwise.
pub(crate) fn read_wkt(text: &str, crs: Option<&Crs>) -> Result<Geometry> {
    let (srid, body) = split_srid(text)?;
    let wkt = Wkt::<f64>::from_str(body.trim()).map_err(|e| GeoCodecError::Wkt(e.to_string()))?;
    let declared = declared_dimension(body);
    let crs = match declared.or_else(|| first_dimension(&wkt)) {
        Some(found) => resolve_crs(srid.unwrap_or(0), found, crs)?,
        None => match crs {
            Some(crs) => crs.clone(),
            None => Crs::from_srid_and_dimension(srid.unwrap_or(0), Dimension::XY),
        },
    };
    WktConverter { crs: &crs }.geometry(&wkt)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn srid_prefix() {
        assert_eq!(split_srid("POINT(1 2)").unwrap(), (None, "POINT(1 2)"));
        assert_eq!(
            split_srid("SRID=4326;POINT(1 2)").unwrap(),
            (Some(4326), "POINT(1 2)")
        );
        assert_eq!(
            split_srid("srid=31370;POINT EMPTY").unwrap(),
            (Some(31370), "POINT EMPTY")
        );
        assert!(split_srid("SRID=4326 POINT(1 2)").is_err());
        assert!(split_srid("SRID=abc;POINT(1 2)").is_err());
    }

    #[test]
    fn dimension_from_first_coordinate() {
        let geometry = read_wkt("LINESTRING Z(0 0 1,1 1 2)", None).unwrap();
        assert_eq!(geometry.dimension(), Dimension::XYZ);
        assert_eq!(geometry.srid(), 0);

        let geometry = read_wkt("SRID=4326;POINT M(4 50 7)", None).unwrap();
        assert_eq!(geometry.dimension(), Dimension::XYM);
        assert!(geometry.crs().is_geographic());
    }

    #[test]
    fn empty_takes_override() {
        let geometry = read_wkt("POINT EMPTY", None).unwrap();
        assert_eq!(geometry.dimension(), Dimension::XY);

        let crs = Crs::from_srid_and_dimension(4326, Dimension::XYZ);
        let geometry = read_wkt("LINESTRING EMPTY", Some(&crs)).unwrap();
        assert_eq!(geometry.crs(), &crs);
    }

    #[test]
    fn empty_keeps_declared_dimension() {
        assert_eq!(declared_dimension("POINT Z EMPTY"), Some(Dimension::XYZ));
        assert_eq!(declared_dimension("linestring zm(0 0 0 0,1 1 1 1)"), Some(Dimension::XYZM));
        assert_eq!(declared_dimension("POINT(1e5 2)"), None);
        assert_eq!(declared_dimension("POINT EMPTY"), None);

        let geometry = read_wkt("POINT Z EMPTY", None).unwrap();
        assert!(geometry.is_empty());
        assert_eq!(geometry.dimension(), Dimension::XYZ);

        let geometry = read_wkt("SRID=4326;GEOMETRYCOLLECTION M EMPTY", None).unwrap();
        assert_eq!(geometry.crs(), &Crs::from_srid_and_dimension(4326, Dimension::XYM));

        let err = read_wkt("POINT Z EMPTY", Some(&Crs::wgs84())).unwrap_err();
        assert!(matches!(err, GeoCodecError::DimensionMismatch { .. }));
    }

    #[test]
    fn override_must_match() {
        let err = read_wkt("POINT(1 2)", Some(&Crs::wgs84().with_dimension(Dimension::XYZ)))
            .unwrap_err();
        assert!(matches!(err, GeoCodecError::DimensionMismatch { .. }));
    }

    #[test]
    fn parse_error() {
        assert!(matches!(
            read_wkt("POINT(1 2", None),
            Err(GeoCodecError::Wkt(_))
        ));
        assert!(matches!(read_wkt("CIRCLE(1 2)", None), Err(GeoCodecError::Wkt(_))));
    }
}
