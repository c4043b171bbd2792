//! Benchmarking profile computation
//! using the test coefficient files and constant indices
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use iri_profile::prelude::*;

fn engine() -> IriEngine<FileCoefficientSource, FixedIndices, DipoleField> {
    IriEngine::new(
        FileCoefficientSource::new("test_resources/coefficients"),
        FixedIndices::new(50.0),
        DipoleField::default(),
    )
}

fn request(options: ModelOptions) -> ProfileRequest {
    ProfileRequest::new(
        Location::new(40.0, -75.0).unwrap(),
        EpochSpec::local(2007, 6, 21, 12.0).unwrap(),
        AltitudeGrid::new(60.0, 2000.0, 10.0).unwrap(),
    )
    .with_options(options)
}

fn benchmark(c: &mut Criterion) {
    let mut engine = engine();
    let mut grp = c.benchmark_group("profile");

    let full = request(ModelOptions::default());
    grp.bench_function("full", |b| {
        b.iter(|| {
            let _ = engine.profile(black_box(&full)).unwrap();
        })
    });

    let density = request(ModelOptions {
        temperatures: false,
        ions: false,
        ..Default::default()
    });
    grp.bench_function("density", |b| {
        b.iter(|| {
            let _ = engine.profile(black_box(&density)).unwrap();
        })
    });

    let layer = request(ModelOptions {
        bottomside: BottomsideVariant::Layer,
        temperatures: false,
        ions: false,
        ..Default::default()
    });
    grp.bench_function("layer", |b| {
        b.iter(|| {
            let _ = engine.profile(black_box(&layer)).unwrap();
        })
    });

    grp.bench_function("vertical_tec", |b| {
        b.iter(|| {
            let _ = engine.vertical_tec(black_box(&density), 2000.0).unwrap();
        })
    });

    grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
