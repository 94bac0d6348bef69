//! Criterion micro-benchmarks for samplings and set algebra.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_core::IntegerIndex;
use tessera_sampling::{
    ConditionalSampling, DifferenceSampling, GridSampling, PointSampling, PolarGridSampling,
    Sampling, UnionSampling,
};

fn grid(lo: [i64; 2], hi: [i64; 2]) -> GridSampling {
    GridSampling::new(IntegerIndex::from(lo), IntegerIndex::from(hi)).unwrap()
}

/// Benchmark: iterate every point of a 100x100 grid.
fn bench_grid_iter_10k(c: &mut Criterion) {
    let g = grid([0, 0], [99, 99]);

    c.bench_function("grid_iter_10k", |b| {
        b.iter(|| {
            for p in g.grid_iter() {
                black_box(&p);
            }
        });
    });
}

/// Benchmark: union and difference of two overlapping 100x100 grids.
fn bench_grid_algebra(c: &mut Criterion) {
    let a = grid([0, 0], [99, 99]);
    let bgrid = grid([50, 50], [149, 149]);

    c.bench_function("union_overlapping_grids", |b| {
        let u = UnionSampling::<IntegerIndex, _, _>::new(&a, &bgrid).unwrap();
        b.iter(|| black_box(u.iter().count()));
    });

    c.bench_function("difference_overlapping_grids", |b| {
        let d = DifferenceSampling::<IntegerIndex, _, _>::new(&a, &bgrid).unwrap();
        b.iter(|| black_box(d.iter().count()));
    });
}

/// Benchmark: filter a grid by a disc predicate, then materialize it.
fn bench_conditional_disc(c: &mut Criterion) {
    let g = grid([-50, -50], [50, 50]);
    let disc = ConditionalSampling::new(&g, |p: &IntegerIndex| {
        let (x, y) = (p.get(0), p.get(1));
        x * x + y * y <= 2500
    });

    c.bench_function("conditional_disc_materialize", |b| {
        b.iter(|| black_box(PointSampling::from_sampling(&disc).len()));
    });
}

/// Benchmark: iterate a 64x256 polar grid.
fn bench_polar_iter(c: &mut Criterion) {
    let polar = PolarGridSampling::new(1.0, 64, 256).unwrap();

    c.bench_function("polar_iter_64x256", |b| {
        b.iter(|| {
            for p in polar.iter() {
                black_box(&p);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_grid_iter_10k,
    bench_grid_algebra,
    bench_conditional_disc,
    bench_polar_iter
);
criterion_main!(benches);
