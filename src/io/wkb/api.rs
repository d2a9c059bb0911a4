use byteorder::{BigEndian, LittleEndian};
use tracing::debug;

use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::io::codec::{Decoder, Encoder};
use crate::io::wkb::common::{Endianness, WkbDialect};
use crate::io::wkb::reader::read_wkb;
use crate::io::wkb::writer::WkbWriter;

/// Parse a WKB or EWKB geometry, deriving its CRS from the embedded SRID.
pub fn from_wkb(buf: &[u8]) -> Result<Geometry> {
    WkbDecoder::default().decode(buf)
}

/// Serialize a geometry as little-endian ISO WKB.
pub fn to_wkb(geometry: &Geometry) -> Result<Vec<u8>> {
    WkbEncoder::default().encode(geometry)
}

/// Options for writing WKB.
///
/// The ISO dialect carries no SRID; use [`WkbDialect::PostGis`] to keep it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WkbEncoder {
    endianness: Endianness,
    dialect: WkbDialect,
}

impl WkbEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn with_dialect(mut self, dialect: WkbDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn dialect(&self) -> WkbDialect {
        self.dialect
    }
}

impl Encoder for WkbEncoder {
    type Output = Vec<u8>;

    fn accepts(&self, _geometry: &Geometry) -> bool {
        true
    }

    fn encode(&self, geometry: &Geometry) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        match self.endianness {
            Endianness::BigEndian => WkbWriter::<_, BigEndian>::new(
                &mut buf,
                self.endianness,
                self.dialect,
            )
            .write_geometry(geometry, true)?,
            Endianness::LittleEndian => WkbWriter::<_, LittleEndian>::new(
                &mut buf,
                self.endianness,
                self.dialect,
            )
            .write_geometry(geometry, true)?,
        }
        debug!(
            srid = geometry.srid(),
            geometry_type = %geometry.geometry_type(),
            dialect = ?self.dialect,
            bytes = buf.len(),
            "encoded WKB"
        );
        Ok(buf)
    }
}

/// Options for reading WKB. Both dialects and byte orders are detected from the input.
#[derive(Debug, Clone, Default)]
pub struct WkbDecoder {
    crs: Option<Crs>,
}

impl WkbDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode into `crs` instead of the CRS derived from the embedded SRID.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }
}

impl Decoder for WkbDecoder {
    type Input = [u8];

    /// Checks for a byte order marker followed by a complete type code.
    fn accepts(&self, input: &[u8]) -> bool {
        input.len() >= 5 && Endianness::try_from(input[0]).is_ok()
    }

    fn decode(&self, input: &[u8]) -> Result<Geometry> {
        debug!(bytes = input.len(), "decoding WKB");
        read_wkb(input, self.crs.as_ref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoCodecError;
    use crate::position::Dimension;
    use crate::test::{all_geometries, point};

    fn encoders() -> Vec<WkbEncoder> {
        let mut encoders = vec![];
        for endianness in [Endianness::LittleEndian, Endianness::BigEndian] {
            for dialect in [WkbDialect::Iso, WkbDialect::PostGis] {
                encoders.push(WkbEncoder::new().with_endianness(endianness).with_dialect(dialect));
            }
        }
        encoders
    }

    #[test]
    fn point_bytes() {
        let buf = to_wkb(&point::p0().into()).unwrap();
        let mut expected = vec![1, 1, 0, 0, 0];
        expected.extend_from_slice(&0.0f64.to_le_bytes());
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        assert_eq!(buf, expected);
    }

    #[test]
    fn round_trip_all_geometries() {
        for encoder in encoders() {
            for geometry in all_geometries() {
                let buf = encoder.encode(&geometry).unwrap();
                // ISO WKB has no SRID, so the CRS is supplied by the caller.
                let decoder = match encoder.dialect() {
                    WkbDialect::Iso => WkbDecoder::new().with_crs(geometry.crs().clone()),
                    WkbDialect::PostGis => WkbDecoder::new(),
                };
                let decoded = decoder.decode(&buf).unwrap();
                assert_eq!(decoded, geometry);
                assert_eq!(encoder.encode(&decoded).unwrap(), buf);
            }
        }
    }

    #[test]
    fn ewkb_keeps_srid() {
        let encoder = WkbEncoder::new().with_dialect(WkbDialect::PostGis);
        let buf = encoder.encode(&point::p_xym().into()).unwrap();
        let decoded = from_wkb(&buf).unwrap();
        assert_eq!(decoded.srid(), 31370);
        assert_eq!(decoded.dimension(), Dimension::XYM);

        let buf = to_wkb(&point::p_xym().into()).unwrap();
        assert_eq!(from_wkb(&buf).unwrap().srid(), 0);
    }

    #[test]
    fn trailing_bytes() {
        let mut buf = to_wkb(&point::p0().into()).unwrap();
        buf.push(0);
        let err = from_wkb(&buf).unwrap_err();
        assert!(matches!(
            err,
            GeoCodecError::MalformedBinary { position: 21, .. }
        ));
    }

    #[test]
    fn accepts() {
        let decoder = WkbDecoder::new();
        assert!(decoder.accepts(&[0, 0, 0, 0, 1]));
        assert!(!decoder.accepts(&[2, 0, 0, 0, 1]));
        assert!(!decoder.accepts(&[1]));
    }
}
