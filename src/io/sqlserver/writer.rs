use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;
use crate::io::sqlserver::common::{to_offset, NativeGeometry, SUPPORTED_VERSION};

/// Write the points section: x/y interleaved, then all z values, then all m values.
fn write_points<W: Write>(writer: &mut W, native: &NativeGeometry) -> Result<()> {
    let points = native.points();
    for position in points.iter() {
        writer.write_f64::<LittleEndian>(position.x())?;
        writer.write_f64::<LittleEndian>(position.y())?;
    }
    let dim = native.dimension();
    for index in [dim.z_index(), dim.m_index()].into_iter().flatten() {
        for i in 0..points.len() {
            writer.write_f64::<LittleEndian>(points.ordinate(i, index))?;
        }
    }
    Ok(())
}

impl NativeGeometry {
    /// Serialize into `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let props = self.props();
        writer.write_i32::<LittleEndian>(self.srid())?;
        writer.write_u8(SUPPORTED_VERSION)?;
        writer.write_u8(props.to_byte())?;

        if props.is_implied_structure() {
            return write_points(writer, self);
        }

        writer.write_i32::<LittleEndian>(to_offset(self.points().len())?)?;
        write_points(writer, self)?;

        writer.write_i32::<LittleEndian>(to_offset(self.figures().len())?)?;
        for figure in self.figures() {
            writer.write_u8(figure.attribute.into())?;
            writer.write_i32::<LittleEndian>(figure.point_offset)?;
        }

        writer.write_i32::<LittleEndian>(to_offset(self.shapes().len())?)?;
        for shape in self.shapes() {
            writer.write_i32::<LittleEndian>(shape.parent_offset)?;
            writer.write_i32::<LittleEndian>(shape.figure_offset)?;
            writer.write_u8(shape.geometry_type.into())?;
        }
        Ok(())
    }

    /// Serialize into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.byte_len());
        self.write(&mut buf)?;
        Ok(buf)
    }
}
