//! The MySQL internal geometry format: a little-endian SRID followed by ISO WKB.

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::crs::Crs;
use crate::error::{GeoCodecError, Result};
use crate::geometry::Geometry;
use crate::io::codec::{not_accepted, Decoder, Encoder};
use crate::io::wkb::{read_wkb_with_srid, Endianness, WkbEncoder};
use crate::position::Dimension;

const SRID_SIZE: usize = 4;

/// Encoder for the MySQL internal format. Only 2D geometries are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEncoder;

impl Encoder for MySqlEncoder {
    type Output = Vec<u8>;

    fn accepts(&self, geometry: &Geometry) -> bool {
        geometry.dimension() == Dimension::XY
    }

    fn encode(&self, geometry: &Geometry) -> Result<Vec<u8>> {
        if !self.accepts(geometry) {
            return Err(not_accepted("MySQL", geometry));
        }
        let mut buf = geometry.srid().to_le_bytes().to_vec();
        buf.extend(WkbEncoder::new().encode(geometry)?);
        debug!(
            srid = geometry.srid(),
            geometry_type = %geometry.geometry_type(),
            bytes = buf.len(),
            "encoded MySQL geometry"
        );
        Ok(buf)
    }
}

/// Decoder for the MySQL internal format.
#[derive(Debug, Clone, Default)]
pub struct MySqlDecoder {
    crs: Option<Crs>,
}

impl MySqlDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode into `crs` instead of the CRS derived from the SRID prefix.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }
}

impl Decoder for MySqlDecoder {
    type Input = [u8];

    /// Checks for an SRID followed by a WKB byte order marker and type code.
    fn accepts(&self, input: &[u8]) -> bool {
        input.len() >= SRID_SIZE + 5 && Endianness::try_from(input[SRID_SIZE]).is_ok()
    }

    fn decode(&self, input: &[u8]) -> Result<Geometry> {
        if input.len() < SRID_SIZE {
            return Err(GeoCodecError::malformed(0, "missing SRID prefix"));
        }
        let srid = LittleEndian::read_i32(&input[..SRID_SIZE]);
        debug!(srid, bytes = input.len(), "decoding MySQL geometry");
        read_wkb_with_srid(&input[SRID_SIZE..], srid, self.crs.as_ref()).map_err(|err| match err {
            GeoCodecError::MalformedBinary { position, message } => GeoCodecError::MalformedBinary {
                position: position + SRID_SIZE,
                message,
            },
            err => err,
        })
    }
}
