//! Coordinate tuples and ordered sequences of them.

mod dimension;
mod sequence;

pub use dimension::Dimension;
pub use sequence::{PositionSequence, PositionSequenceBuilder};

use crate::error::{GeoCodecError, Result};

/// An immutable coordinate tuple of 2 to 4 ordinates.
///
/// Ordinates are stored in `x, y, [z], [m]` order; [`Dimension`] tells which optional ordinates
/// are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    coords: [f64; 4],
    dim: Dimension,
}

impl Position {
    /// A 2D position.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            coords: [x, y, 0.0, 0.0],
            dim: Dimension::XY,
        }
    }

    /// A 3D position.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: [x, y, z, 0.0],
            dim: Dimension::XYZ,
        }
    }

    /// A 2D position with a measure.
    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            coords: [x, y, m, 0.0],
            dim: Dimension::XYM,
        }
    }

    /// A 3D position with a measure.
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            coords: [x, y, z, m],
            dim: Dimension::XYZM,
        }
    }

    /// Build a position from a flat slice of ordinates.
    ///
    /// ## Errors
    ///
    /// - If the slice length differs from `dim.size()`.
    pub fn from_slice(dim: Dimension, ordinates: &[f64]) -> Result<Self> {
        if ordinates.len() != dim.size() {
            return Err(GeoCodecError::InvalidStructure(format!(
                "position of dimension {dim} needs {} ordinates, got {}",
                dim.size(),
                ordinates.len()
            )));
        }
        let mut coords = [0.0; 4];
        coords[..ordinates.len()].copy_from_slice(ordinates);
        Ok(Self { coords, dim })
    }

    /// The coordinate dimension of this position.
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// x component of this position
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    /// y component of this position
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// z component, if this position has one
    pub fn z(&self) -> Option<f64> {
        self.dim.z_index().map(|i| self.coords[i])
    }

    /// m component, if this position has one
    pub fn m(&self) -> Option<f64> {
        self.dim.m_index().map(|i| self.coords[i])
    }

    /// Access the n'th (0-based) ordinate.
    pub fn nth(&self, n: usize) -> Option<f64> {
        (n < self.dim.size()).then(|| self.coords[n])
    }

    /// The ordinates of this position as a slice of length `dim().size()`.
    pub fn as_slice(&self) -> &[f64] {
        &self.coords[..self.dim.size()]
    }

    /// Whether every ordinate is NaN. Used as the marker for empty points in WKB.
    pub(crate) fn is_all_nan(&self) -> bool {
        self.as_slice().iter().all(|v| v.is_nan())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accessors() {
        let p = Position::xyzm(1., 2., 3., 4.);
        assert_eq!(p.as_slice(), &[1., 2., 3., 4.]);
        assert_eq!(p.z(), Some(3.));
        assert_eq!(p.m(), Some(4.));

        let p = Position::xym(1., 2., 7.);
        assert_eq!(p.z(), None);
        assert_eq!(p.m(), Some(7.));
        assert_eq!(p.nth(2), Some(7.));
        assert_eq!(p.nth(3), None);
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(Position::from_slice(Dimension::XYZ, &[1., 2.]).is_err());
        let p = Position::from_slice(Dimension::XYZ, &[1., 2., 3.]).unwrap();
        assert_eq!(p, Position::xyz(1., 2., 3.));
    }
}
