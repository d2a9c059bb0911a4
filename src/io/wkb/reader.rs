use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::io::codec::{resolve_crs, MAX_NESTING_DEPTH};
use crate::io::wkb::common::{Endianness, WkbType};
use crate::position::{Dimension, Position, PositionSequence, PositionSequenceBuilder};

/// The byte order and type of one geometry, read from its header.
struct Header {
    order: Endianness,
    typ: WkbType,
    srid: Option<i32>,
    position: usize,
}

struct WkbReader<'a> {
    cursor: Cursor<&'a [u8]>,
    /// Nesting depth of the geometry being read.
    depth: usize,
}

impl<'a> WkbReader<'a> {
    fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    fn truncated(&self) -> GeoCodecError {
        GeoCodecError::malformed(self.position(), "unexpected end of WKB")
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| self.truncated())
    }

    fn read_u32(&mut self, order: Endianness) -> Result<u32> {
        match order {
            Endianness::BigEndian => self.cursor.read_u32::<BigEndian>(),
            Endianness::LittleEndian => self.cursor.read_u32::<LittleEndian>(),
        }
        .map_err(|_| self.truncated())
    }

    fn read_f64(&mut self, order: Endianness) -> Result<f64> {
        match order {
            Endianness::BigEndian => self.cursor.read_f64::<BigEndian>(),
            Endianness::LittleEndian => self.cursor.read_f64::<LittleEndian>(),
        }
        .map_err(|_| self.truncated())
    }

    /// Read an element count and check that `count` records of at least `min_size` bytes fit in
    /// the rest of the buffer.
    fn read_count(&mut self, order: Endianness, min_size: usize) -> Result<usize> {
        let position = self.position();
        let count = self.read_u32(order)? as usize;
        if count.saturating_mul(min_size) > self.remaining() {
            return Err(GeoCodecError::malformed(
                position,
                format!("count {count} exceeds the {} remaining bytes", self.remaining()),
            ));
        }
        Ok(count)
    }

    fn read_header(&mut self) -> Result<Header> {
        let position = self.position();
        let marker = self.read_u8()?;
        let order = Endianness::try_from(marker).map_err(|_| {
            GeoCodecError::malformed(position, format!("invalid byte order marker {marker}"))
        })?;
        let typ = WkbType::from_code(self.read_u32(order)?)?;
        let srid = if typ.has_srid {
            Some(self.read_u32(order)? as i32)
        } else {
            None
        };
        Ok(Header {
            order,
            typ,
            srid,
            position,
        })
    }

    /// Read the header of a nested geometry and check it against its container.
    fn read_member_header(
        &mut self,
        dim: Dimension,
        expected: Option<GeometryType>,
    ) -> Result<Header> {
        let header = self.read_header()?;
        if header.typ.dim != dim {
            return Err(GeoCodecError::DimensionMismatch {
                expected: dim,
                found: header.typ.dim,
            });
        }
        if let Some(expected) = expected {
            if header.typ.geometry_type != expected {
                return Err(GeoCodecError::malformed(
                    header.position,
                    format!(
                        "expected a {expected} member, found a {}",
                        header.typ.geometry_type
                    ),
                ));
            }
        }
        Ok(header)
    }

    fn read_positions(&mut self, order: Endianness, dim: Dimension) -> Result<PositionSequence> {
        let count = self.read_count(order, dim.size() * 8)?;
        let mut builder = PositionSequenceBuilder::fixed_sized(count, dim);
        let mut ordinates = vec![0.0; dim.size()];
        for _ in 0..count {
            for ordinate in ordinates.iter_mut() {
                *ordinate = self.read_f64(order)?;
            }
            builder.push_ordinates(&ordinates)?;
        }
        builder.finish()
    }

    fn read_point(&mut self, header: &Header, crs: &Crs) -> Result<Point> {
        let dim = header.typ.dim;
        let mut ordinates = vec![0.0; dim.size()];
        for ordinate in ordinates.iter_mut() {
            *ordinate = self.read_f64(header.order)?;
        }
        let position = Position::from_slice(dim, &ordinates)?;
        if position.is_all_nan() {
            return Ok(Point::empty(crs.clone()));
        }
        Point::new(position, crs.clone())
    }

    fn read_line_string(&mut self, header: &Header, crs: &Crs) -> Result<LineString> {
        LineString::new(self.read_positions(header.order, header.typ.dim)?, crs.clone())
    }

    fn read_polygon(&mut self, header: &Header, crs: &Crs) -> Result<Polygon> {
        let num_rings = self.read_count(header.order, 4)?;
        let rings = (0..num_rings)
            .map(|_| {
                let positions = self.read_positions(header.order, header.typ.dim)?;
                LinearRing::new(positions, crs.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        Polygon::from_rings(rings, crs.clone())
    }

    /// Read the members of a collection, each a complete WKB geometry.
    fn read_members<T>(
        &mut self,
        header: &Header,
        member_type: Option<GeometryType>,
        mut read_member: impl FnMut(&mut Self, &Header) -> Result<T>,
    ) -> Result<Vec<T>> {
        let count = self.read_count(header.order, 5)?;
        (0..count)
            .map(|_| {
                let member = self.read_member_header(header.typ.dim, member_type)?;
                read_member(self, &member)
            })
            .collect()
    }

    fn read_body(&mut self, header: &Header, crs: &Crs) -> Result<Geometry> {
        if self.depth > MAX_NESTING_DEPTH {
            return Err(GeoCodecError::malformed(
                header.position,
                format!("geometry is nested deeper than {MAX_NESTING_DEPTH} levels"),
            ));
        }
        let geometry = match header.typ.geometry_type {
            GeometryType::Point => self.read_point(header, crs)?.into(),
            GeometryType::LineString => self.read_line_string(header, crs)?.into(),
            GeometryType::Polygon => self.read_polygon(header, crs)?.into(),
            GeometryType::MultiPoint => {
                let points = self.read_members(header, Some(GeometryType::Point), |r, h| {
                    r.read_point(h, crs)
                })?;
                MultiPoint::new(points, crs.clone())?.into()
            }
            GeometryType::MultiLineString => {
                let lines = self.read_members(header, Some(GeometryType::LineString), |r, h| {
                    r.read_line_string(h, crs)
                })?;
                MultiLineString::new(lines, crs.clone())?.into()
            }
            GeometryType::MultiPolygon => {
                let polygons = self.read_members(header, Some(GeometryType::Polygon), |r, h| {
                    r.read_polygon(h, crs)
                })?;
                MultiPolygon::new(polygons, crs.clone())?.into()
            }
            GeometryType::GeometryCollection => {
                self.depth += 1;
                let geometries = self.read_members(header, None, |r, h| r.read_body(h, crs));
                self.depth -= 1;
                GeometryCollection::new(geometries?, crs.clone())?.into()
            }
        };
        Ok(geometry)
    }
}

/// Parse one WKB or EWKB geometry filling the whole of `buf`.
///
/// The CRS is `crs` if given, otherwise derived from the embedded SRID (0 when absent) and the
/// coordinate dimension.
pub(crate) fn read_wkb(buf: &[u8], crs: Option<&Crs>) -> Result<Geometry> {
    read_wkb_with_srid(buf, 0, crs)
}

/// Like [`read_wkb`], with `srid` used when the input does not embed one.
pub(crate) fn read_wkb_with_srid(buf: &[u8], srid: i32, crs: Option<&Crs>) -> Result<Geometry> {
    let mut reader = WkbReader {
        cursor: Cursor::new(buf),
        depth: 0,
    };
    let header = reader.read_header()?;
    let crs = resolve_crs(header.srid.unwrap_or(srid), header.typ.dim, crs)?;
    let geometry = reader.read_body(&header, &crs)?;
    if reader.remaining() > 0 {
        return Err(GeoCodecError::malformed(
            reader.position(),
            format!("{} trailing bytes", reader.remaining()),
        ));
    }
    Ok(geometry)
}
