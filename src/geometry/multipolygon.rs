use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::{check_crs, Envelope, Polygon};
use crate::position::Dimension;

/// An ordered collection of polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    crs: Crs,
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Create a new multi polygon.
    ///
    /// ## Errors
    ///
    /// - If any polygon has a CRS different from `crs`.
    pub fn new(polygons: Vec<Polygon>, crs: Crs) -> Result<Self> {
        for polygon in &polygons {
            check_crs(&crs, polygon.crs())?;
        }
        Ok(Self { crs, polygons })
    }

    pub fn empty(crs: Crs) -> Self {
        Self {
            crs,
            polygons: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn get(&self, i: usize) -> Option<&Polygon> {
        self.polygons.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
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
        self.polygons.is_empty()
    }

    pub fn num_positions(&self) -> usize {
        self.polygons.iter().map(Polygon::num_positions).sum()
    }

    pub fn envelope(&self) -> Envelope {
        self.polygons
            .iter()
            .fold(Envelope::empty(), |acc, p| acc.union(&p.envelope()))
    }
}
