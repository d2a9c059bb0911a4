//! Computational-geometry numerics.

pub mod arc;
pub mod robust;

pub use arc::{Circle, CircularArcLinearizer};
pub use robust::{is_counter_clockwise, orientation, Orientation};
