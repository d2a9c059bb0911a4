use std::ops::Range;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{GeoCodecError, Result};
use crate::geometry::GeometryType;
use crate::io::codec::MAX_NESTING_DEPTH;
use crate::position::{Dimension, PositionSequence};

/// The only serialization version understood by this codec.
pub const SUPPORTED_VERSION: u8 = 1;

/// Size of the SRID, version and properties header.
pub(crate) const HEADER_SIZE: usize = 4 + 1 + 1;

/// Size of one figure record: attribute and point offset.
pub(crate) const FIGURE_SIZE: usize = 1 + 4;

/// Size of one shape record: parent offset, figure offset and OpenGIS type.
pub(crate) const SHAPE_SIZE: usize = 4 + 4 + 1;

/// The role of a run of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FigureAttribute {
    InteriorRing = 0,
    Stroke = 1,
    ExteriorRing = 2,
}

/// A contiguous run of points: one ring or one open stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub attribute: FigureAttribute,
    /// Index of the first point of this figure in the points array.
    pub point_offset: i32,
}

/// The record of one geometry node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Index of the parent shape, `-1` for the root.
    pub parent_offset: i32,
    /// Index of the first figure of this shape, `-1` for an empty geometry.
    pub figure_offset: i32,
    pub geometry_type: GeometryType,
}

impl Shape {
    pub fn is_empty(&self) -> bool {
        self.figure_offset == -1
    }
}

/// The bit flags of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializationProps {
    pub has_z: bool,
    pub has_m: bool,
    pub is_valid: bool,
    pub is_single_point: bool,
    pub is_single_line_segment: bool,
    pub is_whole_globe: bool,
}

impl SerializationProps {
    const Z: u8 = 0x01;
    const M: u8 = 0x02;
    const VALID: u8 = 0x04;
    const SINGLE_POINT: u8 = 0x08;
    const SINGLE_LINE_SEGMENT: u8 = 0x10;
    const WHOLE_GLOBE: u8 = 0x20;

    /// Parse the properties byte found at `position`.
    pub(crate) fn from_byte(byte: u8, position: usize) -> Result<Self> {
        let known = Self::Z
            | Self::M
            | Self::VALID
            | Self::SINGLE_POINT
            | Self::SINGLE_LINE_SEGMENT
            | Self::WHOLE_GLOBE;
        if byte & !known != 0 {
            return Err(GeoCodecError::malformed(
                position,
                format!("unknown serialization property bits {:#04x}", byte & !known),
            ));
        }
        let props = Self {
            has_z: byte & Self::Z != 0,
            has_m: byte & Self::M != 0,
            is_valid: byte & Self::VALID != 0,
            is_single_point: byte & Self::SINGLE_POINT != 0,
            is_single_line_segment: byte & Self::SINGLE_LINE_SEGMENT != 0,
            is_whole_globe: byte & Self::WHOLE_GLOBE != 0,
        };
        if props.is_single_point && props.is_single_line_segment {
            return Err(GeoCodecError::malformed(
                position,
                "single point and single line segment are mutually exclusive",
            ));
        }
        Ok(props)
    }

    pub(crate) fn to_byte(self) -> u8 {
        let mut byte = 0;
        for (set, bit) in [
            (self.has_z, Self::Z),
            (self.has_m, Self::M),
            (self.is_valid, Self::VALID),
            (self.is_single_point, Self::SINGLE_POINT),
            (self.is_single_line_segment, Self::SINGLE_LINE_SEGMENT),
            (self.is_whole_globe, Self::WHOLE_GLOBE),
        ] {
            if set {
                byte |= bit;
            }
        }
        byte
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::from_flags(self.has_z, self.has_m)
    }

    /// Whether the counts, figures and shapes are implied rather than stored.
    pub(crate) fn is_implied_structure(&self) -> bool {
        self.is_single_point || self.is_single_line_segment
    }
}

/// Convert an array index into the 4-byte offset stored on the wire.
pub(crate) fn to_offset(index: usize) -> Result<i32> {
    i32::try_from(index).map_err(|_| {
        GeoCodecError::InvalidArgument(format!(
            "{index} exceeds the largest offset of the native format"
        ))
    })
}

/// The intermediate form of the native format: a header plus three flat, parallel arrays.
///
/// Shapes form a tree through their parent offsets, emitted in pre-order with shape 0 as the
/// root. Figures partition the points and shapes partition the figures, both by start offset.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeGeometry {
    pub(crate) srid: i32,
    pub(crate) props: SerializationProps,
    pub(crate) points: PositionSequence,
    pub(crate) figures: Vec<Figure>,
    pub(crate) shapes: Vec<Shape>,
}

impl NativeGeometry {
    /// Assemble a native geometry and check that its arrays are consistent.
    pub fn try_new(
        srid: i32,
        props: SerializationProps,
        points: PositionSequence,
        figures: Vec<Figure>,
        shapes: Vec<Shape>,
    ) -> Result<Self> {
        if points.dim() != props.dimension() {
            return Err(GeoCodecError::DimensionMismatch {
                expected: props.dimension(),
                found: points.dim(),
            });
        }
        let native = Self {
            srid,
            props,
            points,
            figures,
            shapes,
        };
        native.validate()?;
        Ok(native)
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn props(&self) -> SerializationProps {
        self.props
    }

    pub fn dimension(&self) -> Dimension {
        self.props.dimension()
    }

    pub fn points(&self) -> &PositionSequence {
        &self.points
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The type of the root shape.
    pub fn geometry_type(&self) -> Result<GeometryType> {
        Ok(self.shape(0)?.geometry_type)
    }

    pub fn shape(&self, index: usize) -> Result<&Shape> {
        self.shapes.get(index).ok_or_else(|| {
            GeoCodecError::malformed(
                self.shape_byte_position(index),
                format!("shape {index} out of range"),
            )
        })
    }

    pub fn is_empty_shape(&self, index: usize) -> Result<bool> {
        Ok(self.shape(index)?.is_empty())
    }

    /// Whether shape `child` names shape `parent` as its parent.
    pub fn is_parent_shape_of(&self, parent: usize, child: usize) -> bool {
        self.shapes
            .get(child)
            .is_some_and(|shape| usize::try_from(shape.parent_offset).ok() == Some(parent))
    }

    /// Indices of the direct children of shape `parent`, in array order.
    ///
    /// Every later shape is tested; children are not assumed to be contiguous.
    pub fn children(&self, parent: usize) -> impl Iterator<Item = usize> + '_ {
        (parent + 1..self.shapes.len()).filter(move |&child| self.is_parent_shape_of(parent, child))
    }

    /// The figures of shape `index`: from its figure offset up to the figure offset of the next
    /// non-empty shape, or to the end of the figures array.
    pub fn figure_range(&self, index: usize) -> Result<Range<usize>> {
        let shape = self.shape(index)?;
        let Ok(start) = usize::try_from(shape.figure_offset) else {
            return Ok(0..0);
        };
        let end = self.shapes[index + 1..]
            .iter()
            .find_map(|next| usize::try_from(next.figure_offset).ok())
            .unwrap_or(self.figures.len());
        Ok(start..end)
    }

    /// The points of figure `index`: from its point offset up to the point offset of the next
    /// figure, or to the end of the points array.
    pub fn point_range(&self, index: usize) -> Result<Range<usize>> {
        let figure = self.figures.get(index).ok_or_else(|| {
            GeoCodecError::malformed(
                self.figure_byte_position(index),
                format!("figure {index} out of range"),
            )
        })?;
        // Offsets are checked to be non-negative by validate()
        let start = figure.point_offset as usize;
        let end = self
            .figures
            .get(index + 1)
            .map(|next| next.point_offset as usize)
            .unwrap_or(self.points.len());
        Ok(start..end)
    }

    /// Byte offset of the start of the figures section.
    pub(crate) fn figures_byte_position(&self) -> usize {
        let count = if self.props.is_implied_structure() { 0 } else { 4 };
        HEADER_SIZE + count + self.points.len() * self.dimension().size() * 8
    }

    /// Byte offset of the record of figure `index`.
    pub(crate) fn figure_byte_position(&self, index: usize) -> usize {
        if self.props.is_implied_structure() {
            return self.figures_byte_position();
        }
        self.figures_byte_position() + 4 + index * FIGURE_SIZE
    }

    /// Byte offset of the record of shape `index`.
    pub(crate) fn shape_byte_position(&self, index: usize) -> usize {
        if self.props.is_implied_structure() {
            return self.figures_byte_position();
        }
        self.figures_byte_position() + 4 + self.figures.len() * FIGURE_SIZE + 4 + index * SHAPE_SIZE
    }

    /// Total serialized length in bytes.
    pub fn byte_len(&self) -> usize {
        if self.props.is_implied_structure() {
            return self.figures_byte_position();
        }
        self.shape_byte_position(self.shapes.len())
    }

    /// Check that offsets stay inside their arrays and that the shapes form a pre-order tree.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.props.is_whole_globe {
            return Err(GeoCodecError::UnsupportedType(
                "whole-globe geography".to_string(),
            ));
        }
        if self.shapes.is_empty() {
            return Err(GeoCodecError::malformed(
                self.shape_byte_position(0),
                "a native geometry needs at least one shape",
            ));
        }

        let num_points = self.points.len();
        match self.figures.first() {
            Some(first) if first.point_offset != 0 => {
                return Err(GeoCodecError::malformed(
                    self.figure_byte_position(0),
                    "the first figure must start at point 0",
                ));
            }
            None if num_points > 0 => {
                return Err(GeoCodecError::malformed(
                    self.figures_byte_position(),
                    format!("{num_points} points are not covered by any figure"),
                ));
            }
            _ => {}
        }
        let mut previous = 0;
        for (i, figure) in self.figures.iter().enumerate() {
            let offset = usize::try_from(figure.point_offset).ok();
            match offset {
                Some(offset) if offset >= previous && offset <= num_points => previous = offset,
                _ => {
                    return Err(GeoCodecError::malformed(
                        self.figure_byte_position(i),
                        format!(
                            "figure point offset {} outside {previous}..={num_points}",
                            figure.point_offset
                        ),
                    ))
                }
            }
        }

        let num_figures = self.figures.len();
        let mut previous = 0;
        let mut depths = Vec::with_capacity(self.shapes.len());
        for (i, shape) in self.shapes.iter().enumerate() {
            let position = self.shape_byte_position(i);
            if i == 0 {
                if shape.parent_offset != -1 {
                    return Err(GeoCodecError::malformed(
                        position,
                        "the root shape must not have a parent",
                    ));
                }
                depths.push(0);
            } else {
                let parent = usize::try_from(shape.parent_offset)
                    .ok()
                    .filter(|&parent| parent < i)
                    .ok_or_else(|| {
                        GeoCodecError::malformed(
                            position,
                            format!(
                                "parent offset {} of shape {i} does not precede it",
                                shape.parent_offset
                            ),
                        )
                    })?;
                if !is_collection(self.shapes[parent].geometry_type) {
                    return Err(GeoCodecError::malformed(
                        position,
                        format!(
                            "shape {i} has a {} as parent",
                            self.shapes[parent].geometry_type
                        ),
                    ));
                }
                let depth = depths[parent] + 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(GeoCodecError::malformed(
                        position,
                        format!("shape {i} is nested deeper than {MAX_NESTING_DEPTH} levels"),
                    ));
                }
                depths.push(depth);
            }
            if shape.is_empty() {
                continue;
            }
            match usize::try_from(shape.figure_offset).ok() {
                Some(offset) if offset >= previous && offset <= num_figures => previous = offset,
                _ => {
                    return Err(GeoCodecError::malformed(
                        position,
                        format!(
                            "shape figure offset {} outside {previous}..={num_figures}",
                            shape.figure_offset
                        ),
                    ))
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn is_collection(geometry_type: GeometryType) -> bool {
    matches!(
        geometry_type,
        GeometryType::MultiPoint
            | GeometryType::MultiLineString
            | GeometryType::MultiPolygon
            | GeometryType::GeometryCollection
    )
}
