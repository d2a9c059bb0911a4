use crate::position::Position;

/// The 2D bounding box of a geometry.
///
/// Only the horizontal ordinates take part; an envelope of a geometry without positions is
/// empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Envelope {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// The lower-left corner, `None` when empty.
    pub fn min(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then_some((self.min_x, self.min_y))
    }

    /// The upper-right corner, `None` when empty.
    pub fn max(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then_some((self.max_x, self.max_y))
    }

    /// Grow this envelope to cover `position`. NaN ordinates are ignored.
    pub fn expand_to_include(&mut self, position: &Position) {
        let (x, y) = (position.x(), position.y());
        if x.is_nan() || y.is_nan() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// The smallest envelope covering both `self` and `other`.
    pub fn union(&self, other: &Envelope) -> Envelope {
        Envelope {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn union_with_empty() {
        let a = Envelope::new(0., 0., 1., 1.);
        assert_eq!(a.union(&Envelope::empty()), a);
        assert!(Envelope::empty().union(&Envelope::empty()).is_empty());
    }

    #[test]
    fn expand() {
        let mut env = Envelope::empty();
        env.expand_to_include(&Position::xy(3., -1.));
        env.expand_to_include(&Position::xy(-2., 4.));
        env.expand_to_include(&Position::xy(f64::NAN, f64::NAN));
        assert_eq!(env.min(), Some((-2., -1.)));
        assert_eq!(env.max(), Some((3., 4.)));
    }
}
