use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::{check_crs, Envelope, Point};
use crate::position::Dimension;

/// An ordered collection of points.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    crs: Crs,
    points: Vec<Point>,
}

impl MultiPoint {
    /// Create a new multi point.
    ///
    /// ## Errors
    ///
    /// - If any point has a CRS different from `crs`.
    pub fn new(points: Vec<Point>, crs: Crs) -> Result<Self> {
        for point in &points {
            check_crs(&crs, point.crs())?;
        }
        Ok(Self { crs, points })
    }

    pub fn empty(crs: Crs) -> Self {
        Self { crs, points: vec![] }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn get(&self, i: usize) -> Option<&Point> {
        self.points.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
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
        self.points.is_empty()
    }

    pub fn num_positions(&self) -> usize {
        self.points.iter().map(Point::num_positions).sum()
    }

    pub fn envelope(&self) -> Envelope {
        self.points
            .iter()
            .fold(Envelope::empty(), |acc, p| acc.union(&p.envelope()))
    }
}
