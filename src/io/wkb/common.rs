use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{GeoCodecError, Result};
use crate::geometry::GeometryType;
use crate::position::Dimension;

/// The byte order marker that starts every WKB geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Endianness {
    BigEndian = 0,
    #[default]
    LittleEndian = 1,
}

/// How the coordinate dimension and SRID are folded into the geometry type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WkbDialect {
    /// ISO SQL/MM: `+1000` for Z, `+2000` for M, `+3000` for ZM. No SRID.
    #[default]
    Iso,
    /// PostGIS extended WKB: high flag bits for Z, M and an embedded SRID.
    PostGis,
}

const EWKB_Z: u32 = 0x8000_0000;
const EWKB_M: u32 = 0x4000_0000;
const EWKB_SRID: u32 = 0x2000_0000;
const EWKB_FLAGS: u32 = EWKB_Z | EWKB_M | EWKB_SRID;

/// A decoded geometry type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WkbType {
    pub geometry_type: GeometryType,
    pub dim: Dimension,
    /// Whether an SRID follows the type code (PostGIS only).
    pub has_srid: bool,
}

impl WkbType {
    pub fn new(geometry_type: GeometryType, dim: Dimension) -> Self {
        Self {
            geometry_type,
            dim,
            has_srid: false,
        }
    }

    /// Parse a type code of either dialect.
    pub fn from_code(code: u32) -> Result<Self> {
        let flags = code & EWKB_FLAGS;
        let low = code & !EWKB_FLAGS;
        let (base, iso_dim) = (low % 1000, low / 1000);
        if iso_dim > 3 || (flags != 0 && iso_dim != 0) {
            return Err(GeoCodecError::UnsupportedType(format!(
                "WKB type code {code:#x}"
            )));
        }
        let geometry_type = u8::try_from(base)
            .map_err(|_| GeoCodecError::UnsupportedType(format!("WKB type code {code:#x}")))
            .and_then(GeometryType::from_code)?;
        let has_z = flags & EWKB_Z != 0 || iso_dim == 1 || iso_dim == 3;
        let has_m = flags & EWKB_M != 0 || iso_dim == 2 || iso_dim == 3;
        Ok(Self {
            geometry_type,
            dim: Dimension::from_flags(has_z, has_m),
            has_srid: flags & EWKB_SRID != 0,
        })
    }

    /// The type code in `dialect`. The SRID flag is only written by the PostGIS dialect.
    pub fn to_code(&self, dialect: WkbDialect) -> u32 {
        let base = u32::from(u8::from(self.geometry_type));
        match dialect {
            WkbDialect::Iso => {
                let offset = match self.dim {
                    Dimension::XY => 0,
                    Dimension::XYZ => 1000,
                    Dimension::XYM => 2000,
                    Dimension::XYZM => 3000,
                };
                base + offset
            }
            WkbDialect::PostGis => {
                let mut code = base;
                if self.dim.has_z() {
                    code |= EWKB_Z;
                }
                if self.dim.has_m() {
                    code |= EWKB_M;
                }
                if self.has_srid {
                    code |= EWKB_SRID;
                }
                code
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn iso_codes() {
        let typ = WkbType::from_code(3003).unwrap();
        assert_eq!(typ.geometry_type, GeometryType::Polygon);
        assert_eq!(typ.dim, Dimension::XYZM);
        assert!(!typ.has_srid);
        assert_eq!(typ.to_code(WkbDialect::Iso), 3003);
        assert_eq!(WkbType::from_code(2001).unwrap().dim, Dimension::XYM);
    }

    #[test]
    fn ewkb_codes() {
        let typ = WkbType::from_code(0xA000_0001).unwrap();
        assert_eq!(typ.geometry_type, GeometryType::Point);
        assert_eq!(typ.dim, Dimension::XYZ);
        assert!(typ.has_srid);
        assert_eq!(typ.to_code(WkbDialect::PostGis), 0xA000_0001);
    }

    #[test]
    fn unknown_codes() {
        for code in [0, 8, 17, 4001, 0x8000_1001] {
            assert!(matches!(
                WkbType::from_code(code),
                Err(GeoCodecError::UnsupportedType(_))
            ));
        }
    }
}
