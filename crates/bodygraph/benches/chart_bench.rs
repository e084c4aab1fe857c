use bodygraph::chart::{build_chart, ChartSettings};
use bodygraph::ephemeris::GeoLocation;
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_build_chart(c: &mut Criterion) {
    let birth = Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap();
    let location = GeoLocation {
        lat: 37.7749,
        lon: -122.4194,
    };
    let settings = ChartSettings::default();

    c.bench_function("build_chart", |b| {
        b.iter(|| build_chart(black_box(birth), black_box(&location), black_box(&settings)))
    });
}

criterion_group!(benches, bench_build_chart);
criterion_main!(benches);
