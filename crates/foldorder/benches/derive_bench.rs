//! Criterion benchmarks for condition derivation and the reference estimator
//! on synthetic spiral strips.
//!
//! - derive_all on a crease-seeded strip (one propagation pass worth of work).
//! - propagate from seeds to the fixed point.
//! - Estimator::run end to end.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use foldorder::api::{
    derive_all, draw_strip, propagate, seed_from_creases, Estimator, FaceCount, StripCfg,
    StripFold, StripReplay,
};

fn strip(n: usize) -> StripFold {
    let cfg = StripCfg {
        faces: FaceCount::Fixed(n),
        ..StripCfg::default()
    };
    draw_strip(cfg, StripReplay { seed: 5, index: n as u64 }).unwrap()
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    for &n in &[8usize, 32, 96] {
        let s = strip(n);
        let mut seeded = s.seeded.clone();
        seed_from_creases(&s.mesh, &mut seeded).unwrap();

        group.bench_with_input(BenchmarkId::new("derive_all", n), &seeded, |b, m| {
            b.iter(|| {
                derive_all(&s.mesh, m, &s.oracles.intersections, &s.oracles.coverage).unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("propagate", n), &seeded, |b, m| {
            b.iter_batched(
                || m.clone(),
                |mut m| propagate(&s.mesh, &s.oracles, &mut m).unwrap(),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("estimate", n), &s, |b, s| {
            b.iter(|| Estimator::default().run(&s.mesh, &s.oracles, &s.seeded).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_derive);
criterion_main!(benches);
