use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::{check_dimension, Envelope};
use crate::position::{Dimension, Position};

/// A single position, or an empty point that only carries its CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    crs: Crs,
    position: Option<Position>,
}

impl Point {
    /// Create a new point.
    ///
    /// ## Errors
    ///
    /// - If the dimension of `position` differs from the dimension of `crs`.
    pub fn new(position: Position, crs: Crs) -> Result<Self> {
        check_dimension(&crs, position.dim())?;
        Ok(Self {
            crs,
            position: Some(position),
        })
    }

    /// An empty point.
    pub fn empty(crs: Crs) -> Self {
        Self {
            crs,
            position: None,
        }
    }

    /// The position of this point, `None` when empty.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn srid(&self) -> i32 {
        self.crs.srid()
    }

    pub fn dimension(&self) -> Dimension {
        self.crs.dimension()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
    }

    pub fn num_positions(&self) -> usize {
        usize::from(self.position.is_some())
    }

    pub fn envelope(&self) -> Envelope {
        let mut envelope = Envelope::empty();
        if let Some(position) = &self.position {
            envelope.expand_to_include(position);
        }
        envelope
    }
}
