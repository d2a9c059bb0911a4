//! Circle fitting and circular-arc linearization.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::algorithm::robust::{determinant2x2, is_counter_clockwise};
use crate::error::{GeoCodecError, Result};
use crate::position::{Position, PositionSequence, PositionSequenceBuilder};

/// A circle in the horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center_x: f64,
    center_y: f64,
    radius: f64,
}

impl Circle {
    /// The unique circle through three positions.
    ///
    /// ## Errors
    ///
    /// - [`GeoCodecError::Degenerate`] if the positions are collinear.
    pub fn from_three_points(p0: &Position, p1: &Position, p2: &Position) -> Result<Self> {
        is_counter_clockwise(p0, p1, p2)?;

        // Work relative to p0 to keep the squared terms small.
        let (bx, by) = (p1.x() - p0.x(), p1.y() - p0.y());
        let (cx, cy) = (p2.x() - p0.x(), p2.y() - p0.y());
        let d = 2.0 * determinant2x2(bx, by, cx, cy);
        if d == 0.0 {
            return Err(GeoCodecError::Degenerate(
                "positions are too close to collinear to fit a circle".to_string(),
            ));
        }
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = determinant2x2(b2, by, c2, cy) / d;
        let uy = determinant2x2(bx, b2, cx, c2) / d;

        Ok(Self {
            center_x: p0.x() + ux,
            center_y: p0.y() + uy,
            radius: ux.hypot(uy),
        })
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Angle of `position` around the center, in `(-pi, pi]`.
    pub fn angle_of(&self, position: &Position) -> f64 {
        (position.y() - self.center_y).atan2(position.x() - self.center_x)
    }

    /// The point of the circle at `angle`.
    pub fn point_at(&self, angle: f64) -> (f64, f64) {
        (
            self.center_x + self.radius * angle.cos(),
            self.center_y + self.radius * angle.sin(),
        )
    }

    /// Whether `position` lies on the circle within `tolerance`.
    pub fn contains_on_boundary(&self, position: &Position, tolerance: f64) -> bool {
        let distance = (position.x() - self.center_x).hypot(position.y() - self.center_y);
        (distance - self.radius).abs() <= tolerance
    }
}

/// Angle swept when going from `from` to `to` in the given direction, in `[0, 2pi)`.
fn sweep(from: f64, to: f64, counter_clockwise: bool) -> f64 {
    let delta = if counter_clockwise {
        to - from
    } else {
        from - to
    };
    delta.rem_euclid(TAU)
}

/// Approximates the circular arc through three positions by a line string.
///
/// The arc starts at `p0`, passes through `p1` and ends at `p2`. The direction of travel is
/// fixed by the orientation of the three anchors. Interpolated points are spaced evenly in angle
/// so that no chord deviates from the arc by more than `threshold`. Ordinates beyond x and y are
/// interpolated linearly in angle between consecutive anchors.
#[derive(Debug, Clone)]
pub struct CircularArcLinearizer {
    anchors: [Position; 3],
    threshold: f64,
    circle: Circle,
    counter_clockwise: bool,
}

impl CircularArcLinearizer {
    /// ## Errors
    ///
    /// - [`GeoCodecError::InvalidArgument`] if `threshold` is not a positive finite number.
    /// - [`GeoCodecError::DimensionMismatch`] if the anchors differ in dimension.
    /// - [`GeoCodecError::Degenerate`] if the anchors are collinear.
    pub fn new(p0: Position, p1: Position, p2: Position, threshold: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(GeoCodecError::InvalidArgument(format!(
                "linearization threshold must be positive, got {threshold}"
            )));
        }
        for other in [&p1, &p2] {
            if other.dim() != p0.dim() {
                return Err(GeoCodecError::DimensionMismatch {
                    expected: p0.dim(),
                    found: other.dim(),
                });
            }
        }
        let counter_clockwise = is_counter_clockwise(&p0, &p1, &p2)?;
        let circle = Circle::from_three_points(&p0, &p1, &p2)?;
        Ok(Self {
            anchors: [p0, p1, p2],
            threshold,
            circle,
            counter_clockwise,
        })
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.counter_clockwise
    }

    /// The largest angular step whose chord stays within the threshold, capped at a quarter
    /// turn.
    pub fn angle_increment(&self) -> f64 {
        let r = self.circle.radius();
        let ratio = ((r - self.threshold) / r).clamp(-1.0, 1.0);
        ratio.acos().min(FRAC_PI_2)
    }

    /// Produce the linearized arc, anchors included.
    pub fn linearize(&self) -> Result<PositionSequence> {
        let increment = self.angle_increment();
        if !(increment.is_finite() && increment > 0.0) {
            return Err(GeoCodecError::InvalidArgument(format!(
                "threshold {} is too small for radius {}",
                self.threshold,
                self.circle.radius()
            )));
        }

        let [p0, p1, p2] = &self.anchors;
        let mut builder = PositionSequenceBuilder::variable_sized(p0.dim());
        builder.push(p0)?;
        self.push_interior(&mut builder, p0, p1, increment)?;
        builder.push(p1)?;
        self.push_interior(&mut builder, p1, p2, increment)?;
        builder.push(p2)?;
        builder.finish()
    }

    /// Push the interpolated points strictly between `from` and `to`.
    fn push_interior(
        &self,
        builder: &mut PositionSequenceBuilder,
        from: &Position,
        to: &Position,
        increment: f64,
    ) -> Result<()> {
        let start = self.circle.angle_of(from);
        let total = sweep(start, self.circle.angle_of(to), self.counter_clockwise);
        let steps = (total / increment).ceil() as usize;
        let step = if self.counter_clockwise {
            total / steps as f64
        } else {
            -total / steps as f64
        };

        let mut ordinates = from.as_slice().to_vec();
        for k in 1..steps {
            let (x, y) = self.circle.point_at(start + k as f64 * step);
            let fraction = k as f64 / steps as f64;
            ordinates[0] = x;
            ordinates[1] = y;
            for i in 2..ordinates.len() {
                let (a, b) = (from.as_slice()[i], to.as_slice()[i]);
                ordinates[i] = a + (b - a) * fraction;
            }
            builder.push_ordinates(&ordinates)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::position::Dimension;

    #[test]
    fn circle_through_three_points() {
        let circle = Circle::from_three_points(
            &Position::xy(1., 0.),
            &Position::xy(0., 1.),
            &Position::xy(-1., 0.),
        )
        .unwrap();
        assert_relative_eq!(circle.center().0, 0., epsilon = 1e-12);
        assert_relative_eq!(circle.center().1, 0., epsilon = 1e-12);
        assert_relative_eq!(circle.radius(), 1., epsilon = 1e-12);

        let circle = Circle::from_three_points(
            &Position::xy(110., 0.),
            &Position::xy(100., 10.),
            &Position::xy(90., 0.),
        )
        .unwrap();
        assert_relative_eq!(circle.center().0, 100., epsilon = 1e-9);
        assert_relative_eq!(circle.radius(), 10., epsilon = 1e-9);
    }

    #[test]
    fn collinear_anchors() {
        let err = CircularArcLinearizer::new(
            Position::xy(0., 0.),
            Position::xy(1., 1.),
            Position::xy(2., 2.),
            0.1,
        )
        .unwrap_err();
        assert!(matches!(err, GeoCodecError::Degenerate(_)));
    }

    #[test]
    fn rejects_bad_threshold() {
        for threshold in [0.0, -1.0, f64::NAN] {
            let err = CircularArcLinearizer::new(
                Position::xy(1., 0.),
                Position::xy(0., 1.),
                Position::xy(-1., 0.),
                threshold,
            )
            .unwrap_err();
            assert!(matches!(err, GeoCodecError::InvalidArgument(_)));
        }
    }

    fn check_arc(p0: Position, p1: Position, p2: Position, threshold: f64) -> PositionSequence {
        let linearizer = CircularArcLinearizer::new(p0, p1, p2, threshold).unwrap();
        let seq = linearizer.linearize().unwrap();
        let circle = linearizer.circle();

        assert_eq!(seq.first(), Some(p0));
        assert_eq!(seq.last(), Some(p2));
        assert!(seq.iter().any(|p| p == p1));
        assert!(seq.len() > 3);

        for p in seq.iter() {
            assert!(circle.contains_on_boundary(&p, 1e-9));
        }

        // Chord midpoints stay within the threshold of the arc.
        let (cx, cy) = circle.center();
        let positions: Vec<_> = seq.iter().collect();
        for pair in positions.windows(2) {
            let mx = (pair[0].x() + pair[1].x()) / 2.;
            let my = (pair[0].y() + pair[1].y()) / 2.;
            let sagitta = circle.radius() - (mx - cx).hypot(my - cy);
            assert!(sagitta <= threshold + 1e-9);
        }
        seq
    }

    #[test]
    fn counter_clockwise_half_circle() {
        let seq = check_arc(
            Position::xy(1., 0.),
            Position::xy(0., 1.),
            Position::xy(-1., 0.),
            0.01,
        );
        assert!(seq.iter().all(|p| p.y() >= -1e-12));
    }

    #[test]
    fn clockwise_half_circle() {
        let seq = check_arc(
            Position::xy(-1., 0.),
            Position::xy(0., 1.),
            Position::xy(1., 0.),
            0.01,
        );
        assert!(seq.iter().all(|p| p.y() >= -1e-12));
        let linearizer = CircularArcLinearizer::new(
            Position::xy(-1., 0.),
            Position::xy(0., 1.),
            Position::xy(1., 0.),
            0.01,
        )
        .unwrap();
        assert!(!linearizer.is_counter_clockwise());
    }

    #[test]
    fn arc_crossing_the_negative_x_axis() {
        // Angles wrap from +pi to -pi along this arc.
        let seq = check_arc(
            Position::xy(0., 5.),
            Position::xy(-5., 0.),
            Position::xy(0., -5.),
            0.001,
        );
        assert!(seq.iter().all(|p| p.x() <= 1e-9));
    }

    #[test]
    fn interpolates_extra_ordinates() {
        let seq = check_arc(
            Position::xyz(1., 0., 0.),
            Position::xyz(0., 1., 10.),
            Position::xyz(-1., 0., 20.),
            0.001,
        );
        assert_eq!(seq.dim(), Dimension::XYZ);
        let zs: Vec<f64> = seq.iter().map(|p| p.z().unwrap()).collect();
        assert!(zs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn rejects_mixed_dimensions() {
        let err = CircularArcLinearizer::new(
            Position::xy(1., 0.),
            Position::xyz(0., 1., 0.),
            Position::xy(-1., 0.),
            0.1,
        )
        .unwrap_err();
        assert!(matches!(err, GeoCodecError::DimensionMismatch { .. }));
    }
}
