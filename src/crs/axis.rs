use serde::{Deserialize, Serialize};

/// Unit of measure of a coordinate system axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// SI metre
    Metre,
    /// International foot
    Foot,
    /// Angular degree
    Degree,
    /// Angular radian
    Radian,
    /// Dimensionless values, e.g. a measure counting events
    Unitless,
}

impl Unit {
    /// Whether this unit measures angles.
    pub fn is_angular(&self) -> bool {
        matches!(self, Unit::Degree | Unit::Radian)
    }

    /// Whether this unit measures lengths.
    pub fn is_linear(&self) -> bool {
        matches!(self, Unit::Metre | Unit::Foot)
    }

    /// Abbreviation used when printing axes.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Metre => "m",
            Unit::Foot => "ft",
            Unit::Degree => "deg",
            Unit::Radian => "rad",
            Unit::Unitless => "",
        }
    }
}

/// Direction in which an axis' values increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDirection {
    East,
    North,
    West,
    South,
    Up,
    Down,
    /// Directionless axes such as a linear-referencing measure.
    Other,
}

/// The role an axis plays in a coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    /// One of the two horizontal axes (easting/northing or longitude/latitude).
    Horizontal,
    /// Height or depth.
    Vertical,
    /// A measure (M) value.
    Measure,
}

/// A single axis of a coordinate system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axis {
    name: String,
    kind: AxisKind,
    direction: AxisDirection,
    unit: Unit,
}

impl Axis {
    /// Create a new axis.
    pub fn new(
        name: impl Into<String>,
        kind: AxisKind,
        direction: AxisDirection,
        unit: Unit,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            direction,
            unit,
        }
    }

    pub(crate) fn easting() -> Self {
        Self::new("X", AxisKind::Horizontal, AxisDirection::East, Unit::Metre)
    }

    pub(crate) fn northing() -> Self {
        Self::new("Y", AxisKind::Horizontal, AxisDirection::North, Unit::Metre)
    }

    pub(crate) fn longitude() -> Self {
        Self::new(
            "Lon",
            AxisKind::Horizontal,
            AxisDirection::East,
            Unit::Degree,
        )
    }

    pub(crate) fn latitude() -> Self {
        Self::new(
            "Lat",
            AxisKind::Horizontal,
            AxisDirection::North,
            Unit::Degree,
        )
    }

    pub(crate) fn vertical(unit: Unit) -> Self {
        Self::new("Z", AxisKind::Vertical, AxisDirection::Up, unit)
    }

    pub(crate) fn measure(unit: Unit) -> Self {
        Self::new("M", AxisKind::Measure, AxisDirection::Other, unit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn direction(&self) -> AxisDirection {
        self.direction
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}
