use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::{check_crs, Envelope, Geometry};
use crate::position::Dimension;

/// An ordered collection of geometries of any kind, including other collections.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    crs: Crs,
    geometries: Vec<Geometry>,
}

impl GeometryCollection {
    /// Create a new geometry collection.
    ///
    /// ## Errors
    ///
    /// - If any member has a CRS different from `crs`.
    pub fn new(geometries: Vec<Geometry>, crs: Crs) -> Result<Self> {
        for geometry in &geometries {
            check_crs(&crs, geometry.crs())?;
        }
        Ok(Self { crs, geometries })
    }

    pub fn empty(crs: Crs) -> Self {
        Self {
            crs,
            geometries: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn get(&self, i: usize) -> Option<&Geometry> {
        self.geometries.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry> {
        self.geometries.iter()
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
        self.geometries.is_empty()
    }

    pub fn num_positions(&self) -> usize {
        self.geometries.iter().map(Geometry::num_positions).sum()
    }

    pub fn envelope(&self) -> Envelope {
        self.geometries
            .iter()
            .fold(Envelope::empty(), |acc, g| acc.union(&g.envelope()))
    }
}
