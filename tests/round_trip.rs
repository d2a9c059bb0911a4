use std::borrow::Borrow;

use geocodec::crs::Crs;
use geocodec::geometry::{
    GeometryCollection, LineString, LinearRing, MultiPoint, MultiPolygon, Point, Polygon,
};
use geocodec::io::mysql::{MySqlDecoder, MySqlEncoder};
use geocodec::io::sqlserver::{NativeDecoder, NativeEncoder};
use geocodec::io::wkb::{Endianness, WkbDecoder, WkbDialect, WkbEncoder};
use geocodec::io::wkt::{WktDecoder, WktDialect, WktEncoder};
use geocodec::position::{Dimension, Position, PositionSequence};
use geocodec::{Decoder, Encoder, Geometry};

fn ring(crs: &Crs, coords: &[f64]) -> LinearRing {
    let positions = PositionSequence::from_interleaved(crs.dimension(), coords.to_vec()).unwrap();
    LinearRing::new(positions, crs.clone()).unwrap()
}

fn geometries() -> Vec<Geometry> {
    let plane = Crs::cartesian_2d();
    let wgs84_z = Crs::from_srid_and_dimension(4326, Dimension::XYZ);
    let lambert_m = Crs::from_srid_and_dimension(31370, Dimension::XYM);

    let point = Point::new(Position::xy(3., 7.), plane.clone()).unwrap();
    let line = LineString::new(
        PositionSequence::from_interleaved(
            Dimension::XYZ,
            vec![4.35, 50.85, 13., 4.4, 50.9, 15., 4.5, 50.8, 11.],
        )
        .unwrap(),
        wgs84_z.clone(),
    )
    .unwrap();
    let measured = Point::new(Position::xym(150000., 170000., 2.5), lambert_m).unwrap();
    let shell = ring(&plane, &[0., 0., 10., 0., 10., 10., 0., 10., 0., 0.]);
    let hole = ring(&plane, &[2., 2., 4., 2., 4., 4., 2., 2.]);
    let polygon = Polygon::new(shell, vec![hole]).unwrap();
    let multi_polygon = MultiPolygon::new(vec![polygon.clone(), polygon.clone()], plane.clone())
        .unwrap();
    let multi_point = MultiPoint::new(vec![point.clone()], plane.clone()).unwrap();
    let nested =
        GeometryCollection::new(vec![multi_point.into(), polygon.clone().into()], plane.clone())
            .unwrap();
    let collection = GeometryCollection::new(
        vec![point.clone().into(), nested.into(), Point::empty(plane.clone()).into()],
        plane.clone(),
    )
    .unwrap();

    vec![
        point.into(),
        Point::empty(plane.clone()).into(),
        line.into(),
        measured.into(),
        polygon.into(),
        Polygon::empty(plane.clone()).into(),
        multi_polygon.into(),
        collection.into(),
        GeometryCollection::empty(plane).into(),
    ]
}

fn check_round_trip<E, D>(encoder: &E, decoder: &D)
where
    E: Encoder,
    E::Output: Borrow<D::Input>,
    D: Decoder,
{
    for geometry in geometries() {
        if !encoder.accepts(&geometry) {
            continue;
        }
        let encoded = encoder.encode(&geometry).unwrap();
        let input = Borrow::<D::Input>::borrow(&encoded);
        assert!(decoder.accepts(input));
        let decoded = decoder.decode(input).unwrap();
        assert_eq!(decoded, geometry);
    }
}

#[test]
fn native() {
    check_round_trip(&NativeEncoder, &NativeDecoder::new());
}

#[test]
fn ewkb() {
    for endianness in [Endianness::LittleEndian, Endianness::BigEndian] {
        let encoder = WkbEncoder::new()
            .with_endianness(endianness)
            .with_dialect(WkbDialect::PostGis);
        check_round_trip(&encoder, &WkbDecoder::new());
    }
}

#[test]
fn ewkt() {
    let encoder = WktEncoder::new().with_dialect(WktDialect::PostGis);
    check_round_trip(&encoder, &WktDecoder::new());
}

#[test]
fn mysql() {
    check_round_trip(&MySqlEncoder, &MySqlDecoder::new());
}

#[test]
fn native_to_wkb() {
    for geometry in geometries() {
        let native = NativeEncoder.encode(&geometry).unwrap();
        let decoded = NativeDecoder::new().decode(&native).unwrap();
        let encoder = WkbEncoder::new().with_dialect(WkbDialect::PostGis);
        assert_eq!(
            encoder.encode(&decoded).unwrap(),
            encoder.encode(&geometry).unwrap()
        );
    }
}

#[test]
fn iso_needs_crs() {
    let line = geometries().swap_remove(2);
    let buf = WkbEncoder::new().encode(&line).unwrap();
    let decoded = WkbDecoder::new().decode(&buf).unwrap();
    assert_eq!(decoded.srid(), 0);
    let decoded = WkbDecoder::new()
        .with_crs(line.crs().clone())
        .decode(&buf)
        .unwrap();
    assert_eq!(decoded, line);
}
