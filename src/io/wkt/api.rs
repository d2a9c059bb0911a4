use tracing::debug;

use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::Geometry;
use crate::io::codec::{not_accepted, Decoder, Encoder};
use crate::io::wkt::reader::{read_wkt, split_srid};
use crate::io::wkt::writer::{is_representable, write_geometry};

/// Parse WKT or EWKT text, deriving the CRS from the `SRID=` prefix when present.
pub fn from_wkt(text: &str) -> Result<Geometry> {
    WktDecoder::default().decode(text)
}

/// Format a geometry as ISO WKT.
pub fn to_wkt(geometry: &Geometry) -> Result<String> {
    WktEncoder::default().encode(geometry)
}

/// Whether the SRID is written as a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WktDialect {
    /// Plain WKT. No SRID.
    #[default]
    Iso,
    /// PostGIS EWKT: `SRID=<n>;` precedes the geometry when the SRID is not 0.
    PostGis,
}

/// Options for writing WKT.
///
/// Multi geometries with empty members have no WKT spelling and are not accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct WktEncoder {
    dialect: WktDialect,
}

impl WktEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(mut self, dialect: WktDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn dialect(&self) -> WktDialect {
        self.dialect
    }
}

impl Encoder for WktEncoder {
    type Output = String;

    fn accepts(&self, geometry: &Geometry) -> bool {
        is_representable(geometry)
    }

    fn encode(&self, geometry: &Geometry) -> Result<String> {
        if !self.accepts(geometry) {
            return Err(not_accepted("WKT", geometry));
        }
        let mut out = String::new();
        if self.dialect == WktDialect::PostGis && geometry.srid() != 0 {
            out.push_str(&format!("SRID={};", geometry.srid()));
        }
        write_geometry(&mut out, geometry)
            .map_err(|e| GeoCodecError::Wkt(e.to_string()))?;
        debug!(
            srid = geometry.srid(),
            geometry_type = %geometry.geometry_type(),
            dialect = ?self.dialect,
            len = out.len(),
            "encoded WKT"
        );
        Ok(out)
    }
}

/// Options for reading WKT and EWKT.
#[derive(Debug, Clone, Default)]
pub struct WktDecoder {
    crs: Option<Crs>,
}

impl WktDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode into `crs` instead of the CRS derived from the SRID prefix.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }
}

impl Decoder for WktDecoder {
    type Input = str;

    /// Checks that the text, after any SRID prefix, starts with a geometry keyword.
    fn accepts(&self, input: &str) -> bool {
        const KEYWORDS: [&str; 7] = [
            "POINT",
            "LINESTRING",
            "POLYGON",
            "MULTIPOINT",
            "MULTILINESTRING",
            "MULTIPOLYGON",
            "GEOMETRYCOLLECTION",
        ];
        let Ok((_, body)) = split_srid(input) else {
            return false;
        };
        let word = body
            .trim_start()
            .split(|c: char| !c.is_ascii_alphabetic())
            .next()
            .unwrap_or_default();
        KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
    }

    fn decode(&self, input: &str) -> Result<Geometry> {
        debug!(len = input.len(), "decoding WKT");
        read_wkt(input, self.crs.as_ref())
    }
}
