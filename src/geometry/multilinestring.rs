use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::{check_crs, Envelope, LineString};
use crate::position::Dimension;

/// An ordered collection of line strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    crs: Crs,
    lines: Vec<LineString>,
}

impl MultiLineString {
    /// Create a new multi line string.
    ///
    /// ## Errors
    ///
    /// - If any line string has a CRS different from `crs`.
    pub fn new(lines: Vec<LineString>, crs: Crs) -> Result<Self> {
        for line in &lines {
            check_crs(&crs, line.crs())?;
        }
        Ok(Self { crs, lines })
    }

    pub fn empty(crs: Crs) -> Self {
        Self { crs, lines: vec![] }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, i: usize) -> Option<&LineString> {
        self.lines.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineString> {
        self.lines.iter()
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
        self.lines.is_empty()
    }

    pub fn num_positions(&self) -> usize {
        self.lines.iter().map(LineString::num_positions).sum()
    }

    pub fn envelope(&self) -> Envelope {
        self.lines
            .iter()
            .fold(Envelope::empty(), |acc, l| acc.union(&l.envelope()))
    }
}
