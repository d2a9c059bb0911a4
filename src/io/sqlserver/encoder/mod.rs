//! Flatten a [`Geometry`] tree into the arrays of a [`NativeGeometry`].

mod collection;
mod linestring;
mod point;
mod polygon;

use tracing::trace;

use crate::error::Result;
use crate::geometry::{Geometry, GeometryType};
use crate::io::sqlserver::common::{
    to_offset, Figure, FigureAttribute, NativeGeometry, SerializationProps, Shape,
};
use crate::position::{Dimension, PositionSequence, PositionSequenceBuilder};

/// The growing points, figures and shapes arrays of one encode call.
///
/// Owned by a single call and threaded through the recursion by exclusive reference.
pub(crate) struct NativeAccumulator {
    points: PositionSequenceBuilder,
    figures: Vec<Figure>,
    shapes: Vec<Shape>,
}

impl NativeAccumulator {
    pub(crate) fn new(dim: Dimension) -> Self {
        Self {
            points: PositionSequenceBuilder::variable_sized(dim),
            figures: vec![],
            shapes: vec![],
        }
    }

    /// Append a shape and return its index.
    fn push_shape(
        &mut self,
        parent: Option<usize>,
        figure_offset: i32,
        geometry_type: GeometryType,
    ) -> Result<usize> {
        let parent_offset = match parent {
            Some(parent) => to_offset(parent)?,
            None => -1,
        };
        self.shapes.push(Shape {
            parent_offset,
            figure_offset,
            geometry_type,
        });
        Ok(self.shapes.len() - 1)
    }

    /// Append the marker shape of an empty geometry.
    fn push_empty_shape(&mut self, parent: Option<usize>, geometry_type: GeometryType) -> Result<()> {
        self.push_shape(parent, -1, geometry_type)?;
        Ok(())
    }

    /// Append a shape whose figures start at the next figure.
    fn open_shape(&mut self, parent: Option<usize>, geometry_type: GeometryType) -> Result<usize> {
        let figure_offset = to_offset(self.figures.len())?;
        self.push_shape(parent, figure_offset, geometry_type)
    }

    /// Append all of `positions` as one figure.
    fn push_figure(
        &mut self,
        attribute: FigureAttribute,
        positions: &PositionSequence,
    ) -> Result<()> {
        let point_offset = to_offset(self.points.len())?;
        for position in positions.iter() {
            self.points.push(&position)?;
        }
        self.figures.push(Figure {
            attribute,
            point_offset,
        });
        Ok(())
    }

    fn finish(self, srid: i32, props: SerializationProps) -> Result<NativeGeometry> {
        NativeGeometry::try_new(srid, props, self.points.finish()?, self.figures, self.shapes)
    }
}

/// Encode `geometry` as a child of shape `parent`, dispatching on its type.
pub(crate) fn encode_geometry(
    geometry: &Geometry,
    parent: Option<usize>,
    acc: &mut NativeAccumulator,
) -> Result<()> {
    trace!(
        shape = acc.shapes.len(),
        geometry_type = %geometry.geometry_type(),
        "encoding native shape"
    );
    match geometry {
        Geometry::Point(g) => point::encode_point(g, parent, acc),
        Geometry::LineString(g) => linestring::encode_line_string(g, parent, acc),
        Geometry::Polygon(g) => polygon::encode_polygon(g, parent, acc),
        Geometry::MultiPoint(g) => collection::encode_multi_point(g, parent, acc),
        Geometry::MultiLineString(g) => collection::encode_multi_line_string(g, parent, acc),
        Geometry::MultiPolygon(g) => collection::encode_multi_polygon(g, parent, acc),
        Geometry::GeometryCollection(g) => collection::encode_geometry_collection(g, parent, acc),
    }
}

/// The header flags for `geometry`.
fn props_for(geometry: &Geometry) -> SerializationProps {
    let dim = geometry.dimension();
    SerializationProps {
        has_z: dim.has_z(),
        has_m: dim.has_m(),
        is_valid: true,
        is_single_point: matches!(geometry, Geometry::Point(p) if !p.is_empty()),
        is_single_line_segment: matches!(geometry, Geometry::LineString(l) if l.num_positions() == 2),
        is_whole_globe: false,
    }
}

/// Flatten a whole geometry tree.
pub(crate) fn encode(geometry: &Geometry) -> Result<NativeGeometry> {
    let mut acc = NativeAccumulator::new(geometry.dimension());
    encode_geometry(geometry, None, &mut acc)?;
    acc.finish(geometry.srid(), props_for(geometry))
}
