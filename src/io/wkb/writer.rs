use std::io::Write;

use byteorder::{ByteOrder, WriteBytesExt};

use crate::error::{GeoCodecError, Result};
use crate::geometry::{Geometry, GeometryType, LineString, Point, Polygon};
use crate::io::wkb::common::{Endianness, WkbDialect, WkbType};
use crate::position::{Dimension, PositionSequence};

/// Writes geometries with byte order `B`, which must agree with `endianness`.
pub(crate) struct WkbWriter<'w, W: Write, B: ByteOrder> {
    writer: &'w mut W,
    endianness: Endianness,
    dialect: WkbDialect,
    _order: std::marker::PhantomData<B>,
}

fn to_count(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| GeoCodecError::InvalidArgument(format!("{len} elements do not fit in WKB")))
}

impl<'w, W: Write, B: ByteOrder> WkbWriter<'w, W, B> {
    pub(crate) fn new(writer: &'w mut W, endianness: Endianness, dialect: WkbDialect) -> Self {
        Self {
            writer,
            endianness,
            dialect,
            _order: std::marker::PhantomData,
        }
    }

    /// The byte order marker and type code, followed by `srid` if given.
    fn write_header(
        &mut self,
        geometry_type: GeometryType,
        dim: Dimension,
        srid: Option<i32>,
    ) -> Result<()> {
        let mut typ = WkbType::new(geometry_type, dim);
        typ.has_srid = srid.is_some();
        self.writer.write_u8(self.endianness.into())?;
        self.writer.write_u32::<B>(typ.to_code(self.dialect))?;
        if let Some(srid) = srid {
            self.writer.write_i32::<B>(srid)?;
        }
        Ok(())
    }

    fn write_positions(&mut self, positions: &PositionSequence) -> Result<()> {
        self.writer.write_u32::<B>(to_count(positions.len())?)?;
        for value in positions.as_interleaved() {
            self.writer.write_f64::<B>(*value)?;
        }
        Ok(())
    }

    /// An empty point is written with every ordinate NaN.
    fn write_point(&mut self, point: &Point) -> Result<()> {
        match point.position() {
            Some(position) => {
                for value in position.as_slice() {
                    self.writer.write_f64::<B>(*value)?;
                }
            }
            None => {
                for _ in 0..point.dimension().size() {
                    self.writer.write_f64::<B>(f64::NAN)?;
                }
            }
        }
        Ok(())
    }

    fn write_line_string(&mut self, line_string: &LineString) -> Result<()> {
        self.write_positions(line_string.positions())
    }

    fn write_polygon(&mut self, polygon: &Polygon) -> Result<()> {
        self.writer.write_u32::<B>(to_count(polygon.rings().len())?)?;
        for ring in polygon.rings() {
            self.write_positions(ring.positions())?;
        }
        Ok(())
    }

    /// Write each member as a complete geometry of `member_type`.
    fn write_members<'a, T: 'a>(
        &mut self,
        members: impl ExactSizeIterator<Item = &'a T>,
        member_type: GeometryType,
        dim: Dimension,
        write_member: impl Fn(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        self.writer.write_u32::<B>(to_count(members.len())?)?;
        for member in members {
            self.write_header(member_type, dim, None)?;
            write_member(self, member)?;
        }
        Ok(())
    }

    /// Write a complete geometry. Only a PostGIS root with a non-zero SRID embeds the SRID.
    pub(crate) fn write_geometry(&mut self, geometry: &Geometry, is_root: bool) -> Result<()> {
        let dim = geometry.dimension();
        let srid = (is_root && self.dialect == WkbDialect::PostGis && geometry.srid() != 0)
            .then(|| geometry.srid());
        self.write_header(geometry.geometry_type(), dim, srid)?;
        match geometry {
            Geometry::Point(g) => self.write_point(g),
            Geometry::LineString(g) => self.write_line_string(g),
            Geometry::Polygon(g) => self.write_polygon(g),
            Geometry::MultiPoint(g) => {
                self.write_members(g.iter(), GeometryType::Point, dim, Self::write_point)
            }
            Geometry::MultiLineString(g) => self.write_members(
                g.iter(),
                GeometryType::LineString,
                dim,
                Self::write_line_string,
            ),
            Geometry::MultiPolygon(g) => {
                self.write_members(g.iter(), GeometryType::Polygon, dim, Self::write_polygon)
            }
            Geometry::GeometryCollection(g) => {
                self.writer.write_u32::<B>(to_count(g.len())?)?;
                for member in g.iter() {
                    self.write_geometry(member, false)?;
                }
                Ok(())
            }
        }
    }
}
