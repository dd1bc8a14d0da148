//! Benchmarks for scene construction: layout and static geometry.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pac_geometry::{cache::SceneGeometry, layout, GeometryCache, GeometryEngine, ViewMode};
use pac_model::{sample_cases, Case, ImpactLevel};

fn many_cases(n: usize) -> Vec<Case> {
    (0..n)
        .map(|i| {
            let impact = ImpactLevel::ALL[i % ImpactLevel::ALL.len()];
            Case::new(impact, 70.0 + (i % 300) as f64 * 0.1)
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let engine = GeometryEngine::default();
    let mut group = c.benchmark_group("layout");
    for n in [14usize, 200, 2_000] {
        let cases = if n == 14 { sample_cases() } else { many_cases(n) };
        for mode in [ViewMode::Flat, ViewMode::Elevated] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), n),
                &cases,
                |b, cases| b.iter(|| layout::resolve(&engine, black_box(cases), mode)),
            );
        }
    }
    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let engine = GeometryEngine::default();
    c.bench_function("scene_geometry_build", |b| {
        b.iter(|| SceneGeometry::build(black_box(&engine)));
    });

    let cache = GeometryCache::default();
    let _ = cache.get_or_build(&engine);
    c.bench_function("scene_geometry_cached", |b| {
        b.iter(|| cache.get_or_build(black_box(&engine)));
    });
}

criterion_group!(benches, bench_layout, bench_geometry);
criterion_main!(benches);
