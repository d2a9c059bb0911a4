use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::{check_crs, Envelope, LinearRing};
use crate::position::Dimension;

/// A planar surface bounded by one exterior ring (the shell) and zero or more interior rings
/// (holes).
///
/// An empty polygon has neither shell nor holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    crs: Crs,
    /// `rings[0]` is the shell, the rest are holes in order.
    rings: Vec<LinearRing>,
}

impl Polygon {
    /// Create a polygon from a shell and holes. The CRS is taken from the shell.
    ///
    /// ## Errors
    ///
    /// - If the shell or any hole is empty.
    /// - If a hole has a CRS different from the shell.
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Result<Self> {
        let crs = shell.crs().clone();
        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(shell);
        rings.extend(holes);
        Self::from_rings(rings, crs)
    }

    /// Create a polygon from rings where the first ring is the shell.
    ///
    /// An empty `rings` vector gives an empty polygon.
    pub fn from_rings(rings: Vec<LinearRing>, crs: Crs) -> Result<Self> {
        for ring in &rings {
            check_crs(&crs, ring.crs())?;
            if ring.is_empty() {
                return Err(GeoCodecError::InvalidStructure(
                    "polygon rings must not be empty".to_string(),
                ));
            }
        }
        Ok(Self { crs, rings })
    }

    /// An empty polygon.
    pub fn empty(crs: Crs) -> Self {
        Self { crs, rings: vec![] }
    }

    /// The exterior ring, `None` when empty.
    pub fn exterior(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    /// The interior rings in order.
    pub fn interiors(&self) -> &[LinearRing] {
        self.rings.get(1..).unwrap_or_default()
    }

    pub fn num_interior_rings(&self) -> usize {
        self.interiors().len()
    }

    /// All rings, shell first.
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
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
        self.rings.is_empty()
    }

    pub fn num_positions(&self) -> usize {
        self.rings.iter().map(LinearRing::num_positions).sum()
    }

    /// The envelope of the shell; holes lie inside it.
    pub fn envelope(&self) -> Envelope {
        self.exterior()
            .map(LinearRing::envelope)
            .unwrap_or_else(Envelope::empty)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::polygon::{hole, p0, p1, shell};

    #[test]
    fn shell_and_holes() {
        let polygon = p1();
        assert_eq!(polygon.exterior(), Some(&shell()));
        assert_eq!(polygon.interiors(), &[hole()]);
        assert_eq!(polygon.num_positions(), 10);
        assert_eq!(p0().num_interior_rings(), 0);
        assert!(Polygon::empty(Crs::cartesian_2d()).interiors().is_empty());
    }

    #[test]
    fn rejects_empty_ring() {
        let err = Polygon::new(shell(), vec![LinearRing::empty(Crs::cartesian_2d())]).unwrap_err();
        assert!(matches!(err, GeoCodecError::InvalidStructure(_)));
    }

    #[test]
    fn rejects_mixed_crs() {
        assert!(Polygon::from_rings(vec![shell()], Crs::wgs84()).is_err());
    }
}
