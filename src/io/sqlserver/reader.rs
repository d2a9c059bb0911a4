use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{GeoCodecError, Result};
use crate::geometry::GeometryType;
use crate::io::sqlserver::common::{
    Figure, FigureAttribute, NativeGeometry, SerializationProps, Shape, FIGURE_SIZE, SHAPE_SIZE,
    SUPPORTED_VERSION,
};
use crate::position::{Dimension, PositionSequence, PositionSequenceBuilder};

/// A bounds-checked little-endian cursor that reports failures with their byte position.
struct NativeReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> NativeReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(buf),
        }
    }

    fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    fn truncated(&self, what: &str) -> GeoCodecError {
        GeoCodecError::malformed(self.position(), format!("unexpected end of data in {what}"))
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| self.truncated(what))
    }

    fn read_i32(&mut self, what: &str) -> Result<i32> {
        self.cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| self.truncated(what))
    }

    fn read_f64(&mut self, what: &str) -> Result<f64> {
        self.cursor
            .read_f64::<LittleEndian>()
            .map_err(|_| self.truncated(what))
    }

    /// Read a count of records of `record_size` bytes and check that they fit in the buffer.
    fn read_count(&mut self, what: &str, record_size: usize) -> Result<usize> {
        let position = self.position();
        let count = self.read_i32(what)?;
        let count = usize::try_from(count).map_err(|_| {
            GeoCodecError::malformed(position, format!("negative {what} count {count}"))
        })?;
        if count.saturating_mul(record_size) > self.remaining() {
            return Err(GeoCodecError::malformed(
                position,
                format!(
                    "{what} count {count} exceeds the {} remaining bytes",
                    self.remaining()
                ),
            ));
        }
        Ok(count)
    }
}

/// Read the points section: x/y interleaved, then all z values, then all m values.
fn read_points(
    reader: &mut NativeReader,
    num_points: usize,
    dim: Dimension,
) -> Result<PositionSequence> {
    let mut xy = Vec::with_capacity(num_points * 2);
    for _ in 0..num_points * 2 {
        xy.push(reader.read_f64("points")?);
    }
    let mut extra = vec![];
    for ordinate in [dim.has_z(), dim.has_m()] {
        if ordinate {
            let mut values = Vec::with_capacity(num_points);
            for _ in 0..num_points {
                values.push(reader.read_f64("points")?);
            }
            extra.push(values);
        }
    }

    let mut builder = PositionSequenceBuilder::fixed_sized(num_points, dim);
    let mut ordinates = Vec::with_capacity(dim.size());
    for i in 0..num_points {
        ordinates.clear();
        ordinates.extend_from_slice(&xy[2 * i..2 * i + 2]);
        ordinates.extend(extra.iter().map(|values| values[i]));
        builder.push_ordinates(&ordinates)?;
    }
    builder.finish()
}

fn read_figures(reader: &mut NativeReader) -> Result<Vec<Figure>> {
    let count = reader.read_count("figure", FIGURE_SIZE)?;
    let mut figures = Vec::with_capacity(count);
    for _ in 0..count {
        let position = reader.position();
        let tag = reader.read_u8("figure")?;
        let attribute = FigureAttribute::try_from(tag).map_err(|_| {
            GeoCodecError::malformed(position, format!("unknown figure attribute {tag}"))
        })?;
        let point_offset = reader.read_i32("figure")?;
        figures.push(Figure {
            attribute,
            point_offset,
        });
    }
    Ok(figures)
}

fn read_shapes(reader: &mut NativeReader) -> Result<Vec<Shape>> {
    let count = reader.read_count("shape", SHAPE_SIZE)?;
    let mut shapes = Vec::with_capacity(count);
    for _ in 0..count {
        let parent_offset = reader.read_i32("shape")?;
        let figure_offset = reader.read_i32("shape")?;
        let geometry_type = GeometryType::from_code(reader.read_u8("shape")?)?;
        shapes.push(Shape {
            parent_offset,
            figure_offset,
            geometry_type,
        });
    }
    Ok(shapes)
}

/// The figure and shape implied by the single point and single line segment flags.
fn implied_structure(geometry_type: GeometryType) -> (Vec<Figure>, Vec<Shape>) {
    let figures = vec![Figure {
        attribute: FigureAttribute::Stroke,
        point_offset: 0,
    }];
    let shapes = vec![Shape {
        parent_offset: -1,
        figure_offset: 0,
        geometry_type,
    }];
    (figures, shapes)
}

impl NativeGeometry {
    /// Parse a native geometry from its serialized bytes.
    ///
    /// ## Errors
    ///
    /// - [`GeoCodecError::UnsupportedType`] for a version other than 1 or a whole-globe payload.
    /// - [`GeoCodecError::MalformedBinary`] for truncated input, trailing bytes, or offsets that
    ///   are inconsistent with the array lengths.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let mut reader = NativeReader::new(buf);
        let srid = reader.read_i32("header")?;
        let version = reader.read_u8("header")?;
        if version != SUPPORTED_VERSION {
            return Err(GeoCodecError::UnsupportedType(format!(
                "native serialization version {version}"
            )));
        }
        let position = reader.position();
        let props = SerializationProps::from_byte(reader.read_u8("header")?, position)?;
        if props.is_whole_globe {
            return Err(GeoCodecError::UnsupportedType(
                "whole-globe geography".to_string(),
            ));
        }
        let dim = props.dimension();

        let (points, figures, shapes) = if props.is_single_point {
            let points = read_points(&mut reader, 1, dim)?;
            let (figures, shapes) = implied_structure(GeometryType::Point);
            (points, figures, shapes)
        } else if props.is_single_line_segment {
            let points = read_points(&mut reader, 2, dim)?;
            let (figures, shapes) = implied_structure(GeometryType::LineString);
            (points, figures, shapes)
        } else {
            let num_points = reader.read_count("point", dim.size() * 8)?;
            let points = read_points(&mut reader, num_points, dim)?;
            let figures = read_figures(&mut reader)?;
            let shapes = read_shapes(&mut reader)?;
            (points, figures, shapes)
        };

        if reader.remaining() > 0 {
            return Err(GeoCodecError::malformed(
                reader.position(),
                format!("{} trailing bytes", reader.remaining()),
            ));
        }

        NativeGeometry::try_new(srid, props, points, figures, shapes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn truncated_header() {
        let err = NativeGeometry::from_bytes(&[0, 0, 0]).unwrap_err();
        assert!(matches!(err, GeoCodecError::MalformedBinary { .. }));
    }

    #[test]
    fn unsupported_version() {
        let err = NativeGeometry::from_bytes(&[0, 0, 0, 0, 2, 0x0c, 0, 0, 0, 0, 0, 0, 0, 0])
            .unwrap_err();
        assert!(matches!(err, GeoCodecError::UnsupportedType(_)));
    }

    #[test]
    fn single_point() {
        let mut buf = vec![0xe6, 0x10, 0, 0, 1, 0x0c];
        buf.extend_from_slice(&1.5f64.to_le_bytes());
        buf.extend_from_slice(&(-2.0f64).to_le_bytes());
        let native = NativeGeometry::from_bytes(&buf).unwrap();
        assert_eq!(native.srid(), 4326);
        assert_eq!(native.points().len(), 1);
        assert_eq!(native.shapes().len(), 1);
        assert_eq!(native.geometry_type().unwrap(), GeometryType::Point);
        assert_eq!(native.byte_len(), buf.len());
    }

    #[test]
    fn negative_count() {
        let mut buf = vec![0, 0, 0, 0, 1, 0x04];
        buf.extend_from_slice(&(-1i32).to_le_bytes());
        let err = NativeGeometry::from_bytes(&buf).unwrap_err();
        assert!(matches!(
            err,
            GeoCodecError::MalformedBinary { position: 6, .. }
        ));
    }

    #[test]
    fn oversized_count() {
        let mut buf = vec![0, 0, 0, 0, 1, 0x04];
        buf.extend_from_slice(&1000i32.to_le_bytes());
        buf.extend_from_slice(&[0; 16]);
        assert!(NativeGeometry::from_bytes(&buf).is_err());
    }

    #[test]
    fn unknown_shape_type() {
        let mut buf = vec![0, 0, 0, 0, 1, 0x04];
        buf.extend_from_slice(&0i32.to_le_bytes());
        buf.extend_from_slice(&0i32.to_le_bytes());
        buf.extend_from_slice(&1i32.to_le_bytes());
        buf.extend_from_slice(&(-1i32).to_le_bytes());
        buf.extend_from_slice(&(-1i32).to_le_bytes());
        buf.push(9);
        let err = NativeGeometry::from_bytes(&buf).unwrap_err();
        assert!(matches!(err, GeoCodecError::UnsupportedType(_)));
    }
}
