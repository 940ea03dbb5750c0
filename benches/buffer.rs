use criterion::{criterion_group, criterion_main, Criterion};
use geohandle::scalar::{MultiPoint, Point};
use geohandle::Geom;

fn generate_data() -> MultiPoint {
    let points = (0..1_000).map(|i| {
        let x = (i % 50) as f64 * 3.0;
        let y = (i / 50) as f64 * 3.0;
        Point::new((x, y)).unwrap()
    });
    MultiPoint::new(points).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = generate_data();
    let point = points.get(0).unwrap();

    c.bench_function("buffer point", |b| {
        b.iter(|| {
            let _buffered = point.buffer(1.0, 8).unwrap();
        })
    });
    c.bench_function("buffer multipoint", |b| {
        b.iter(|| {
            let _buffered = points.buffer(1.0, 8).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
