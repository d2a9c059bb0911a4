use crate::error::{GeoCodecError, Result};
use crate::position::{Dimension, Position};

/// An immutable, ordered collection of positions sharing one [`Dimension`].
///
/// All ordinates are stored in interleaved fashion as `xyxyxy` (or `xyzxyz`, ...), which gives
/// constant-time access to any ordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSequence {
    coords: Vec<f64>,
    dim: Dimension,
}

impl PositionSequence {
    /// An empty sequence of the given dimension.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            dim,
        }
    }

    /// Build a sequence from positions.
    ///
    /// ## Errors
    ///
    /// - If any position does not have dimension `dim`.
    pub fn from_positions(dim: Dimension, positions: &[Position]) -> Result<Self> {
        let mut builder = PositionSequenceBuilder::fixed_sized(positions.len(), dim);
        for position in positions {
            builder.push(position)?;
        }
        builder.finish()
    }

    /// Build a sequence from interleaved ordinates.
    pub fn from_interleaved(dim: Dimension, coords: Vec<f64>) -> Result<Self> {
        if coords.len() % dim.size() != 0 {
            return Err(GeoCodecError::InvalidStructure(format!(
                "{} ordinates do not form whole {dim} positions",
                coords.len()
            )));
        }
        Ok(Self { coords, dim })
    }

    /// The coordinate dimension of every position in this sequence.
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// The number of positions
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim.size()
    }

    /// Whether this sequence has no positions
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Access the ordinate `ordinate` of position `i`.
    ///
    /// ## Panics
    ///
    /// - If `i >= self.len()` or `ordinate >= self.dim().size()`.
    pub fn ordinate(&self, i: usize, ordinate: usize) -> f64 {
        assert!(ordinate < self.dim.size());
        self.coords[i * self.dim.size() + ordinate]
    }

    /// Access the position at index `i`.
    pub fn get(&self, i: usize) -> Option<Position> {
        if i >= self.len() {
            return None;
        }
        let size = self.dim.size();
        Some(position_from_chunk(
            self.dim,
            &self.coords[i * size..(i + 1) * size],
        ))
    }

    /// The first position, if any.
    pub fn first(&self) -> Option<Position> {
        self.get(0)
    }

    /// The last position, if any.
    pub fn last(&self) -> Option<Position> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate over the positions in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.coords
            .chunks_exact(self.dim.size())
            .map(|chunk| position_from_chunk(self.dim, chunk))
    }

    /// The raw interleaved ordinates.
    pub fn as_interleaved(&self) -> &[f64] {
        &self.coords
    }
}

fn position_from_chunk(dim: Dimension, chunk: &[f64]) -> Position {
    let mut coords = [0.0; 4];
    coords[..chunk.len()].copy_from_slice(chunk);
    Position { coords, dim }
}

#[derive(Debug, Clone, Copy)]
enum Capacity {
    Fixed(usize),
    Variable,
}

/// A mutable collection of positions that freezes into a [`PositionSequence`].
///
/// A fixed-sized builder must receive exactly the announced number of positions before
/// [`finish`][Self::finish] succeeds.
#[derive(Debug, Clone)]
pub struct PositionSequenceBuilder {
    coords: Vec<f64>,
    dim: Dimension,
    capacity: Capacity,
}

impl PositionSequenceBuilder {
    /// Create a builder that accepts exactly `len` positions.
    pub fn fixed_sized(len: usize, dim: Dimension) -> Self {
        Self {
            coords: Vec::with_capacity(len * dim.size()),
            dim,
            capacity: Capacity::Fixed(len),
        }
    }

    /// Create a builder that grows as positions are pushed.
    pub fn variable_sized(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            dim,
            capacity: Capacity::Variable,
        }
    }

    /// The number of positions in this builder
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim.size()
    }

    /// Whether this builder is empty
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    fn check_room(&self) -> Result<()> {
        match self.capacity {
            Capacity::Fixed(len) if self.len() >= len => Err(GeoCodecError::InvalidStructure(
                format!("fixed-size position sequence of {len} positions is full"),
            )),
            _ => Ok(()),
        }
    }

    /// Push a new position onto the end of this builder
    ///
    /// ## Errors
    ///
    /// - If the position does not have the dimension of the builder.
    /// - If a fixed-sized builder is already full.
    pub fn push(&mut self, position: &Position) -> Result<()> {
        if position.dim() != self.dim {
            return Err(GeoCodecError::DimensionMismatch {
                expected: self.dim,
                found: position.dim(),
            });
        }
        self.push_ordinates(position.as_slice())
    }

    /// Push a new position given as a flat slice of ordinates.
    pub fn push_ordinates(&mut self, ordinates: &[f64]) -> Result<()> {
        if ordinates.len() != self.dim.size() {
            return Err(GeoCodecError::InvalidStructure(format!(
                "position of dimension {} needs {} ordinates, got {}",
                self.dim,
                self.dim.size(),
                ordinates.len()
            )));
        }
        self.check_room()?;
        self.coords.extend_from_slice(ordinates);
        Ok(())
    }

    /// Freeze this builder.
    pub fn finish(self) -> Result<PositionSequence> {
        if let Capacity::Fixed(len) = self.capacity {
            if self.len() != len {
                return Err(GeoCodecError::InvalidStructure(format!(
                    "fixed-size position sequence expected {len} positions, got {}",
                    self.len()
                )));
            }
        }
        Ok(PositionSequence {
            coords: self.coords,
            dim: self.dim,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_sized_must_be_filled() {
        let mut builder = PositionSequenceBuilder::fixed_sized(2, Dimension::XY);
        builder.push(&Position::xy(0., 1.)).unwrap();
        assert!(builder.clone().finish().is_err());

        builder.push(&Position::xy(2., 3.)).unwrap();
        assert!(builder.push(&Position::xy(4., 5.)).is_err());

        let seq = builder.finish().unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.ordinate(1, 0), 2.);
        assert_eq!(seq.last(), Some(Position::xy(2., 3.)));
    }

    #[test]
    fn rejects_other_dimension() {
        let mut builder = PositionSequenceBuilder::variable_sized(Dimension::XYZ);
        let err = builder.push(&Position::xy(0., 1.)).unwrap_err();
        assert!(matches!(err, GeoCodecError::DimensionMismatch { .. }));
    }

    #[test]
    fn iterates_in_order() {
        let seq = PositionSequence::from_interleaved(
            Dimension::XYM,
            vec![0., 1., 10., 2., 3., 11.],
        )
        .unwrap();
        let positions: Vec<_> = seq.iter().collect();
        assert_eq!(
            positions,
            vec![Position::xym(0., 1., 10.), Position::xym(2., 3., 11.)]
        );
        assert!(PositionSequence::from_interleaved(Dimension::XYM, vec![0., 1.]).is_err());
    }
}
