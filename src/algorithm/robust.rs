//! Determinants and orientation tests with compensated floating-point arithmetic.
//!
//! Products are split into their rounded value and exact rounding error ([`two_product`]) and
//! summed with error tracking ([`two_sum`]), so cancellation between large terms does not wipe
//! out the sign of a small determinant.

use crate::error::{GeoCodecError, Result};
use crate::position::Position;

/// Error-free sum: returns `(s, e)` with `s = fl(a + b)` and `a + b = s + e` exactly.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let e = (a - (s - bb)) + (b - bb);
    (s, e)
}

/// Error-free product: returns `(p, e)` with `p = fl(a * b)` and `a * b = p + e` exactly.
#[inline]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let e = a.mul_add(b, -p);
    (p, e)
}

/// A running sum that tracks the rounding error of every addition.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    error: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        let (s, e) = two_sum(self.sum, value);
        self.sum = s;
        self.error += e;
    }

    /// Add the exact product `a * b`.
    pub fn add_product(&mut self, a: f64, b: f64) {
        let (p, e) = two_product(a, b);
        self.add(p);
        self.error += e;
    }

    pub fn value(&self) -> f64 {
        self.sum + self.error
    }
}

/// `a * d - b * c`
pub fn determinant2x2(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut sum = CompensatedSum::new();
    sum.add_product(a, d);
    sum.add_product(-b, c);
    sum.value()
}

/// Determinant of the row-major 3x3 matrix `m`, expanded with the rule of Sarrus.
pub fn determinant3x3(m: [[f64; 3]; 3]) -> f64 {
    let mut sum = CompensatedSum::new();
    let terms = [
        (m[0][0], m[1][1], m[2][2]),
        (m[0][1], m[1][2], m[2][0]),
        (m[0][2], m[1][0], m[2][1]),
        (-m[0][2], m[1][1], m[2][0]),
        (-m[0][0], m[1][2], m[2][1]),
        (-m[0][1], m[1][0], m[2][2]),
    ];
    for (a, b, c) in terms {
        let (ab, ab_err) = two_product(a, b);
        sum.add_product(ab, c);
        sum.add_product(ab_err, c);
    }
    sum.value()
}

/// Orientation of an ordered triple of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// The orientation determinant of `p0, p1, p2` (twice the signed area of the triangle).
///
/// Only the horizontal ordinates are used.
pub fn orientation_determinant(p0: &Position, p1: &Position, p2: &Position) -> f64 {
    determinant3x3([
        [p0.x(), p0.y(), 1.0],
        [p1.x(), p1.y(), 1.0],
        [p2.x(), p2.y(), 1.0],
    ])
}

/// Classify the turn `p0 -> p1 -> p2`.
pub fn orientation(p0: &Position, p1: &Position, p2: &Position) -> Orientation {
    let det = orientation_determinant(p0, p1, p2);
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether `p0 -> p1 -> p2` turns counterclockwise.
///
/// ## Errors
///
/// - [`GeoCodecError::Degenerate`] if the three positions are collinear.
pub fn is_counter_clockwise(p0: &Position, p1: &Position, p2: &Position) -> Result<bool> {
    match orientation(p0, p1, p2) {
        Orientation::CounterClockwise => Ok(true),
        Orientation::Clockwise => Ok(false),
        Orientation::Collinear => Err(GeoCodecError::Degenerate(format!(
            "positions ({}, {}), ({}, {}), ({}, {}) are collinear",
            p0.x(),
            p0.y(),
            p1.x(),
            p1.y(),
            p2.x(),
            p2.y()
        ))),
    }
}
