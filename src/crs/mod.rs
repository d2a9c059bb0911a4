//! Coordinate reference system descriptors and their algebra.
//!
//! A [`Crs`] is a list of axes plus an identifier. The first two axes are always the
//! horizontal ones; compound systems append a vertical axis, a measure axis, or both, in that
//! order. Registry lookup of authority codes is not performed here: systems built from a bare
//! SRID are generic stand-ins that keep the SRID.

mod axis;

pub use axis::{Axis, AxisDirection, AxisKind, Unit};

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{GeoCodecError, Result};
use crate::position::Dimension;

/// SRID of the WGS 84 geographic system.
pub const WGS84_SRID: i32 = 4326;

/// Authority-qualified identifier of a coordinate reference system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrsId {
    authority: String,
    code: i32,
}

impl CrsId {
    /// Construct an identifier from an authority name and a code.
    pub fn new(authority: impl Into<String>, code: i32) -> Self {
        Self {
            authority: authority.into(),
            code,
        }
    }

    /// An EPSG identifier.
    pub fn epsg(code: i32) -> Self {
        Self::new("EPSG", code)
    }

    /// The identifier used when no CRS is known (SRID 0).
    pub fn undefined() -> Self {
        Self::new("EPSG", 0)
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl Display for CrsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

/// The family of the horizontal component of a CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrsKind {
    /// Longitude/latitude in angular units.
    Geographic,
    /// Easting/northing in linear units.
    Projected,
}

/// A coordinate reference system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs {
    id: CrsId,
    name: String,
    kind: CrsKind,
    axes: Vec<Axis>,
}

impl Crs {
    /// A generic 2D cartesian system without an SRID.
    pub fn cartesian_2d() -> Self {
        Self {
            id: CrsId::undefined(),
            name: "Generic 2D Cartesian".to_string(),
            kind: CrsKind::Projected,
            axes: vec![Axis::easting(), Axis::northing()],
        }
    }

    /// WGS 84 (EPSG:4326) with longitude/latitude axis order.
    pub fn wgs84() -> Self {
        Self::geographic(WGS84_SRID)
    }

    /// A generic projected system identified only by its SRID.
    pub fn projected(srid: i32) -> Self {
        if srid == 0 {
            return Self::cartesian_2d();
        }
        Self {
            id: CrsId::epsg(srid),
            name: format!("Projected EPSG:{srid}"),
            kind: CrsKind::Projected,
            axes: vec![Axis::easting(), Axis::northing()],
        }
    }

    /// A generic geographic system identified only by its SRID.
    pub fn geographic(srid: i32) -> Self {
        let name = if srid == WGS84_SRID {
            "WGS 84".to_string()
        } else {
            format!("Geographic EPSG:{srid}")
        };
        Self {
            id: CrsId::epsg(srid),
            name,
            kind: CrsKind::Geographic,
            axes: vec![Axis::longitude(), Axis::latitude()],
        }
    }

    /// Build the CRS a decoder assumes when only an SRID and a dimension are known.
    pub fn from_srid_and_dimension(srid: i32, dim: Dimension) -> Self {
        let base = if srid == WGS84_SRID {
            Self::wgs84()
        } else {
            Self::projected(srid)
        };
        base.with_dimension(dim)
    }

    /// Replace the vertical and measure axes so this CRS has dimension `dim`.
    ///
    /// Existing vertical or measure axes are kept (with their units) when `dim` still needs them.
    pub fn with_dimension(&self, dim: Dimension) -> Self {
        let mut axes = self.horizontal_axes().to_vec();
        if dim.has_z() {
            axes.push(
                self.axis_of_kind(AxisKind::Vertical)
                    .cloned()
                    .unwrap_or_else(|| Axis::vertical(Unit::Metre)),
            );
        }
        if dim.has_m() {
            axes.push(
                self.axis_of_kind(AxisKind::Measure)
                    .cloned()
                    .unwrap_or_else(|| Axis::measure(Unit::Unitless)),
            );
        }
        self.with_axes(axes)
    }

    /// Compound this CRS with a vertical axis.
    ///
    /// ## Errors
    ///
    /// - If the CRS already has a vertical axis, or the unit is not linear.
    pub fn with_vertical_axis(&self, unit: Unit) -> Result<Self> {
        if self.has_vertical_axis() {
            return Err(GeoCodecError::InvalidArgument(format!(
                "{} already has a vertical axis",
                self.id
            )));
        }
        if !unit.is_linear() {
            return Err(GeoCodecError::InvalidArgument(format!(
                "vertical axis needs a linear unit, got {unit:?}"
            )));
        }
        let mut axes = self.horizontal_axes().to_vec();
        axes.push(Axis::vertical(unit));
        axes.extend(self.axis_of_kind(AxisKind::Measure).cloned());
        Ok(self.with_axes(axes))
    }

    /// Compound this CRS with a measure axis.
    ///
    /// ## Errors
    ///
    /// - If the CRS already has a measure axis.
    pub fn with_measure_axis(&self, unit: Unit) -> Result<Self> {
        if self.has_measure_axis() {
            return Err(GeoCodecError::InvalidArgument(format!(
                "{} already has a measure axis",
                self.id
            )));
        }
        let mut axes = self.axes.clone();
        axes.push(Axis::measure(unit));
        Ok(self.with_axes(axes))
    }

    /// The horizontal component of this CRS.
    pub fn horizontal(&self) -> Self {
        self.with_axes(self.horizontal_axes().to_vec())
    }

    fn with_axes(&self, axes: Vec<Axis>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            axes,
        }
    }

    fn horizontal_axes(&self) -> &[Axis] {
        &self.axes[..self.axes.len().min(2)]
    }

    fn axis_of_kind(&self, kind: AxisKind) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.kind() == kind)
    }

    pub fn id(&self) -> &CrsId {
        &self.id
    }

    /// The SRID of this CRS, i.e. the code of its identifier.
    pub fn srid(&self) -> i32 {
        self.id.code()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CrsKind {
        self.kind
    }

    /// The axes in coordinate order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Whether the horizontal component uses angular coordinates.
    pub fn is_geographic(&self) -> bool {
        self.kind == CrsKind::Geographic
    }

    /// Whether this CRS has axes beyond the horizontal ones.
    pub fn is_compound(&self) -> bool {
        self.axes.len() > 2
    }

    /// The number of ordinates of a position in this CRS.
    pub fn coordinate_dimension(&self) -> usize {
        self.axes.len()
    }

    pub fn has_vertical_axis(&self) -> bool {
        self.axis_of_kind(AxisKind::Vertical).is_some()
    }

    pub fn has_measure_axis(&self) -> bool {
        self.axis_of_kind(AxisKind::Measure).is_some()
    }

    /// The position dimension of this CRS.
    pub fn dimension(&self) -> Dimension {
        Dimension::from_flags(self.has_vertical_axis(), self.has_measure_axis())
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::cartesian_2d()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compound_axis_order() {
        let crs = Crs::wgs84()
            .with_measure_axis(Unit::Unitless)
            .unwrap()
            .with_vertical_axis(Unit::Metre)
            .unwrap();
        let kinds: Vec<_> = crs.axes().iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                AxisKind::Horizontal,
                AxisKind::Horizontal,
                AxisKind::Vertical,
                AxisKind::Measure
            ]
        );
        assert_eq!(crs.dimension(), Dimension::XYZM);
        assert_eq!(crs.coordinate_dimension(), 4);
        assert!(crs.is_compound());
        assert_eq!(crs.horizontal(), Crs::wgs84());
    }

    #[test]
    fn rejects_second_vertical_axis() {
        let crs = Crs::cartesian_2d().with_vertical_axis(Unit::Metre).unwrap();
        assert!(crs.with_vertical_axis(Unit::Foot).is_err());
        assert!(Crs::cartesian_2d().with_vertical_axis(Unit::Degree).is_err());
    }

    #[test]
    fn from_srid_and_dimension() {
        let crs = Crs::from_srid_and_dimension(4326, Dimension::XYM);
        assert!(crs.is_geographic());
        assert!(crs.has_measure_axis());
        assert!(!crs.has_vertical_axis());
        assert_eq!(crs.srid(), 4326);

        let crs = Crs::from_srid_and_dimension(0, Dimension::XY);
        assert_eq!(crs, Crs::cartesian_2d());

        let crs = Crs::from_srid_and_dimension(31370, Dimension::XYZ);
        assert_eq!(crs.kind(), CrsKind::Projected);
        assert_eq!(crs.id().to_string(), "EPSG:31370");
        assert_eq!(
            crs,
            Crs::projected(31370).with_vertical_axis(Unit::Metre).unwrap()
        );
    }

    #[test]
    fn with_dimension_keeps_units() {
        let crs = Crs::projected(2154).with_vertical_axis(Unit::Foot).unwrap();
        let crs = crs.with_dimension(Dimension::XYZM);
        assert_eq!(crs.axes()[2].unit(), Unit::Foot);
        assert_eq!(crs.with_dimension(Dimension::XY), Crs::projected(2154));
    }

    #[test]
    fn serde_round_trip() {
        let crs = Crs::wgs84().with_vertical_axis(Unit::Metre).unwrap();
        let json = serde_json::to_string(&crs).unwrap();
        assert!(json.contains(r#""kind":"geographic""#));
        let back: Crs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, crs);
    }
}
