use tracing::debug;

use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::io::codec::{resolve_crs, Decoder, Encoder};
use crate::io::sqlserver::common::{NativeGeometry, SUPPORTED_VERSION};
use crate::io::sqlserver::{decoder, encoder};

impl NativeGeometry {
    /// Flatten a geometry into the native arrays.
    pub fn from_geometry(geometry: &Geometry) -> Result<Self> {
        encoder::encode(geometry)
    }

    /// Rebuild the geometry tree, in `crs` if given or in the CRS derived from the SRID.
    pub fn to_geometry(&self, crs: Option<&Crs>) -> Result<Geometry> {
        let crs = resolve_crs(self.srid(), self.dimension(), crs)?;
        decoder::decode(self, &crs)
    }
}

/// Parse a geometry from the native binary format.
pub fn from_native(buf: &[u8]) -> Result<Geometry> {
    NativeDecoder::default().decode(buf)
}

/// Serialize a geometry into the native binary format.
pub fn to_native(geometry: &Geometry) -> Result<Vec<u8>> {
    NativeEncoder.encode(geometry)
}

/// Encoder for the native binary format. Every geometry is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEncoder;

impl Encoder for NativeEncoder {
    type Output = Vec<u8>;

    fn accepts(&self, _geometry: &Geometry) -> bool {
        true
    }

    fn encode(&self, geometry: &Geometry) -> Result<Vec<u8>> {
        let native = NativeGeometry::from_geometry(geometry)?;
        debug!(
            srid = native.srid(),
            geometry_type = %geometry.geometry_type(),
            points = native.points().len(),
            figures = native.figures().len(),
            shapes = native.shapes().len(),
            "encoded native geometry"
        );
        native.to_bytes()
    }
}

/// Decoder for the native binary format.
#[derive(Debug, Clone, Default)]
pub struct NativeDecoder {
    crs: Option<Crs>,
}

impl NativeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode into `crs` instead of the CRS derived from the stored SRID.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }
}

impl Decoder for NativeDecoder {
    type Input = [u8];

    /// Checks the header: a complete SRID, a supported version and a properties byte.
    fn accepts(&self, input: &[u8]) -> bool {
        input.len() >= 6 && input[4] == SUPPORTED_VERSION
    }

    fn decode(&self, input: &[u8]) -> Result<Geometry> {
        let native = NativeGeometry::from_bytes(input)?;
        debug!(
            srid = native.srid(),
            bytes = input.len(),
            points = native.points().len(),
            figures = native.figures().len(),
            shapes = native.shapes().len(),
            "decoding native geometry"
        );
        native.to_geometry(self.crs.as_ref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoCodecError;
    use crate::geometry::{GeometryType, Polygon};
    use crate::io::sqlserver::common::{Figure, FigureAttribute, Shape};
    use crate::position::Dimension;
    use crate::test::{all_geometries, polygon, seq};

    fn le_i32(buf: &mut Vec<u8>, value: i32) {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    /// The serialized form of a polygon with shell (10 10, 20 15, 20 20, 10 20, 10 10).
    fn example_polygon_bytes() -> Vec<u8> {
        let mut buf = vec![];
        le_i32(&mut buf, 0);
        buf.extend_from_slice(&[1, 0x04]);
        le_i32(&mut buf, 5);
        for value in [10., 10., 20., 15., 20., 20., 10., 20., 10., 10.] {
            buf.extend_from_slice(&f64::to_le_bytes(value));
        }
        le_i32(&mut buf, 1);
        buf.push(2);
        le_i32(&mut buf, 0);
        le_i32(&mut buf, 1);
        le_i32(&mut buf, -1);
        le_i32(&mut buf, 0);
        buf.push(3);
        buf
    }

    #[test]
    fn example_polygon() {
        let bytes = example_polygon_bytes();
        assert_eq!(to_native(&polygon::p0().into()).unwrap(), bytes);
        assert_eq!(from_native(&bytes).unwrap(), polygon::p0().into());
    }

    #[test]
    fn round_trip_all_geometries() {
        for geometry in all_geometries() {
            let bytes = to_native(&geometry).unwrap();
            let decoded = from_native(&bytes).unwrap();
            assert_eq!(decoded, geometry);
            assert_eq!(to_native(&decoded).unwrap(), bytes);
        }
    }

    #[test]
    fn ring_role_comes_from_the_attribute() {
        // The hole is stored before the shell.
        let shell = polygon::shell();
        let hole = polygon::hole();
        let mut coords = hole.positions().as_interleaved().to_vec();
        coords.extend_from_slice(shell.positions().as_interleaved());
        let native = NativeGeometry::try_new(
            0,
            Default::default(),
            seq(Dimension::XY, &coords),
            vec![
                Figure {
                    attribute: FigureAttribute::InteriorRing,
                    point_offset: 0,
                },
                Figure {
                    attribute: FigureAttribute::ExteriorRing,
                    point_offset: hole.num_positions() as i32,
                },
            ],
            vec![Shape {
                parent_offset: -1,
                figure_offset: 0,
                geometry_type: GeometryType::Polygon,
            }],
        )
        .unwrap();
        let decoded = native.to_geometry(None).unwrap();
        assert_eq!(decoded, polygon::p1().into());
    }

    #[test]
    fn two_holes_keep_their_order() {
        let two_holes =
            Polygon::new(polygon::shell(), vec![polygon::hole2(), polygon::hole()]).unwrap();
        let bytes = to_native(&two_holes.into()).unwrap();
        let Geometry::Polygon(decoded) = from_native(&bytes).unwrap() else {
            panic!("expected a polygon");
        };
        assert_eq!(decoded.interiors(), &[polygon::hole2(), polygon::hole()]);
        assert_eq!(decoded.exterior(), Some(&polygon::shell()));
    }

    #[test]
    fn polygon_without_shell() {
        let mut bytes = example_polygon_bytes();
        // Figure attribute of the only ring.
        bytes[6 + 4 + 80 + 4] = 0;
        let err = from_native(&bytes).unwrap_err();
        assert!(matches!(err, GeoCodecError::MalformedBinary { .. }));
    }

    #[test]
    fn trailing_bytes() {
        let mut bytes = example_polygon_bytes();
        bytes.push(0);
        let err = from_native(&bytes).unwrap_err();
        assert!(matches!(
            err,
            GeoCodecError::MalformedBinary { position, .. } if position == bytes.len() - 1
        ));
    }

    #[test]
    fn truncated_shapes() {
        let bytes = example_polygon_bytes();
        let err = from_native(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, GeoCodecError::MalformedBinary { .. }));
    }

    #[test]
    fn crs_from_srid() {
        let bytes = to_native(&crate::test::point::p_xyz().into()).unwrap();
        let decoded = from_native(&bytes).unwrap();
        assert_eq!(decoded.srid(), 4326);
        assert!(decoded.crs().is_geographic());
        assert_eq!(decoded.dimension(), Dimension::XYZ);
    }

    #[test]
    fn crs_override() {
        let bytes = example_polygon_bytes();
        let crs = Crs::projected(2154);
        let decoded = NativeDecoder::new().with_crs(crs.clone()).decode(&bytes).unwrap();
        assert_eq!(decoded.crs(), &crs);

        let crs = Crs::projected(2154).with_dimension(Dimension::XYZ);
        let err = NativeDecoder::new().with_crs(crs).decode(&bytes).unwrap_err();
        assert!(matches!(err, GeoCodecError::DimensionMismatch { .. }));
    }

    #[test]
    fn accepts_header() {
        let decoder = NativeDecoder::new();
        assert!(decoder.accepts(&example_polygon_bytes()));
        assert!(!decoder.accepts(&[0, 0, 0, 0, 2, 0]));
        assert!(!decoder.accepts(&[0, 0]));
    }

    #[test]
    fn multi_point_with_foreign_member() {
        // MULTIPOINT whose only child claims to be a line string
        let mut bytes = vec![];
        le_i32(&mut bytes, 0);
        bytes.extend_from_slice(&[1, 0x04]);
        le_i32(&mut bytes, 2);
        for value in [0., 0., 1., 1.] {
            bytes.extend_from_slice(&f64::to_le_bytes(value));
        }
        le_i32(&mut bytes, 1);
        bytes.push(1);
        le_i32(&mut bytes, 0);
        le_i32(&mut bytes, 2);
        for (parent, figure, typ) in [(-1, 0, 4u8), (0, 0, 2)] {
            le_i32(&mut bytes, parent);
            le_i32(&mut bytes, figure);
            bytes.push(typ);
        }
        let err = from_native(&bytes).unwrap_err();
        assert!(matches!(err, GeoCodecError::MalformedBinary { .. }));
    }
}
