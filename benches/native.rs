use geo::polygon;

use criterion::{criterion_group, criterion_main, Criterion};
use geocodec::crs::Crs;
use geocodec::io::geo::from_geo;
use geocodec::io::sqlserver::{from_native, to_native};
use geocodec::io::wkb::{from_wkb, to_wkb};
use geocodec::Geometry;

fn create_data() -> Geometry {
    // An L shape
    let poly = polygon![
        (x: 0.0, y: 0.0),
        (x: 4.0, y: 0.0),
        (x: 4.0, y: 1.0),
        (x: 1.0, y: 1.0),
        (x: 1.0, y: 4.0),
        (x: 0.0, y: 4.0),
        (x: 0.0, y: 0.0),
    ];
    let multi = geo::MultiPolygon::new(vec![poly; 1000]);
    from_geo(&multi.into(), Crs::cartesian_2d()).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let geometry = create_data();
    let native = to_native(&geometry).unwrap();
    let wkb = to_wkb(&geometry).unwrap();

    c.bench_function("encode MultiPolygon to native", |b| {
        b.iter(|| {
            let _buf = to_native(&geometry).unwrap();
        })
    });
    c.bench_function("decode MultiPolygon from native", |b| {
        b.iter(|| {
            let _geometry = from_native(&native).unwrap();
        })
    });
    c.bench_function("decode MultiPolygon from WKB", |b| {
        b.iter(|| {
            let _geometry = from_wkb(&wkb).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
