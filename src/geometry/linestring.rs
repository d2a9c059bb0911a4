use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::{check_dimension, Envelope};
use crate::position::{Dimension, Position, PositionSequence};

fn sequence_envelope(positions: &PositionSequence) -> Envelope {
    let mut envelope = Envelope::empty();
    for position in positions.iter() {
        envelope.expand_to_include(&position);
    }
    envelope
}

/// A curve of linearly interpolated positions.
///
/// A line string is either empty or has at least two positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    crs: Crs,
    positions: PositionSequence,
}

impl LineString {
    /// Create a new line string.
    ///
    /// ## Errors
    ///
    /// - If the dimension of `positions` differs from the dimension of `crs`.
    /// - If `positions` holds exactly one position.
    pub fn new(positions: PositionSequence, crs: Crs) -> Result<Self> {
        check_dimension(&crs, positions.dim())?;
        if positions.len() == 1 {
            return Err(GeoCodecError::InvalidStructure(
                "a line string needs 0 or at least 2 positions".to_string(),
            ));
        }
        Ok(Self { crs, positions })
    }

    /// An empty line string.
    pub fn empty(crs: Crs) -> Self {
        let positions = PositionSequence::empty(crs.dimension());
        Self { crs, positions }
    }

    pub fn positions(&self) -> &PositionSequence {
        &self.positions
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
        self.positions.is_empty()
    }

    pub fn num_positions(&self) -> usize {
        self.positions.len()
    }

    pub fn start_position(&self) -> Option<Position> {
        self.positions.first()
    }

    pub fn end_position(&self) -> Option<Position> {
        self.positions.last()
    }

    /// Whether the first and last positions are equal. Empty line strings are not closed.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.start_position() == self.end_position()
    }

    pub fn envelope(&self) -> Envelope {
        sequence_envelope(&self.positions)
    }
}

impl From<LinearRing> for LineString {
    fn from(value: LinearRing) -> Self {
        Self {
            crs: value.crs,
            positions: value.positions,
        }
    }
}

/// A closed line string used as a polygon boundary.
///
/// A linear ring is either empty or has at least four positions with the first equal to the
/// last.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    crs: Crs,
    positions: PositionSequence,
}

impl LinearRing {
    /// Create a new linear ring.
    ///
    /// ## Errors
    ///
    /// - If the dimension of `positions` differs from the dimension of `crs`.
    /// - If the ring has 1 to 3 positions or is not closed.
    pub fn new(positions: PositionSequence, crs: Crs) -> Result<Self> {
        check_dimension(&crs, positions.dim())?;
        if positions.is_empty() {
            return Ok(Self { crs, positions });
        }
        if positions.len() < 4 {
            return Err(GeoCodecError::InvalidStructure(format!(
                "a linear ring needs at least 4 positions, got {}",
                positions.len()
            )));
        }
        if positions.first() != positions.last() {
            return Err(GeoCodecError::InvalidStructure(
                "a linear ring must be closed".to_string(),
            ));
        }
        Ok(Self { crs, positions })
    }

    /// An empty ring.
    pub fn empty(crs: Crs) -> Self {
        let positions = PositionSequence::empty(crs.dimension());
        Self { crs, positions }
    }

    pub fn positions(&self) -> &PositionSequence {
        &self.positions
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn num_positions(&self) -> usize {
        self.positions.len()
    }

    pub fn envelope(&self) -> Envelope {
        sequence_envelope(&self.positions)
    }
}

impl TryFrom<LineString> for LinearRing {
    type Error = GeoCodecError;

    fn try_from(value: LineString) -> Result<Self> {
        Self::new(value.positions, value.crs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::linestring::ls0;
    use crate::test::polygon::shell;

    #[test]
    fn rejects_single_position() {
        let positions = PositionSequence::from_positions(Dimension::XY, &[Position::xy(0., 0.)])
            .unwrap();
        assert!(LineString::new(positions, Crs::cartesian_2d()).is_err());
    }

    #[test]
    fn ring_must_be_closed() {
        let positions = PositionSequence::from_interleaved(
            Dimension::XY,
            vec![0., 0., 1., 0., 1., 1., 0., 1.],
        )
        .unwrap();
        let err = LinearRing::new(positions, Crs::cartesian_2d()).unwrap_err();
        assert!(matches!(err, GeoCodecError::InvalidStructure(_)));
    }

    #[test]
    fn ring_needs_four_positions() {
        let positions =
            PositionSequence::from_interleaved(Dimension::XY, vec![0., 0., 1., 0., 0., 0.])
                .unwrap();
        assert!(LinearRing::new(positions, Crs::cartesian_2d()).is_err());
    }

    #[test]
    fn ring_converts_to_closed_line_string() {
        let ring = shell();
        let line: LineString = ring.clone().into();
        assert!(line.is_closed());
        assert_eq!(LinearRing::try_from(line).unwrap(), ring);
        assert!(LinearRing::try_from(ls0()).is_err());
    }

    #[test]
    fn envelope() {
        let envelope = ls0().envelope();
        assert_eq!(envelope.min(), Some((0., 1.)));
        assert_eq!(envelope.max(), Some((2., 3.)));
    }
}
