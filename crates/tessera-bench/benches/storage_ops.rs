//! Criterion micro-benchmarks for storage backends and padded access.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_bench::{file_grid, memory_grid};
use tessera_core::IntegerIndex;
use tessera_nd::{BoundaryBehavior, NdView, PaddedNdDataSource};
use tessera_storage::{EvictionPolicy, IndexedDataSource, PagedConfig};
use tessera_test_utils::seeded_indices;

/// Benchmark: sequential scan of a 256x256 grid, in memory vs paged to file.
fn bench_sequential_scan(c: &mut Criterion) {
    let mem = memory_grid(256).unwrap();
    let file = file_grid(256, PagedConfig::new(1024)).unwrap();

    c.bench_function("scan_memory_64k", |b| {
        b.iter(|| {
            let mut out = 0.0f32;
            for i in 0..mem.size() {
                mem.get(i, &mut out).unwrap();
                black_box(out);
            }
        });
    });

    c.bench_function("scan_file_64k", |b| {
        b.iter(|| {
            let mut out = 0.0f32;
            for i in 0..file.size() {
                file.get(i, &mut out).unwrap();
                black_box(out);
            }
        });
    });
}

/// Benchmark: 10K scattered reads against one-frame and 16-frame caches.
fn bench_random_access(c: &mut Criterion) {
    let indices = seeded_indices(11, 10_000, 256 * 256);
    let single = file_grid(256, PagedConfig::new(1024)).unwrap();
    let wide = file_grid(
        256,
        PagedConfig::new(1024)
            .with_cache_pages(16)
            .with_eviction(EvictionPolicy::Lru),
    )
    .unwrap();

    for (name, grid) in [("random_file_1frame", &single), ("random_file_16frames", &wide)] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut out = 0.0f32;
                for &i in &indices {
                    grid.get(i, &mut out).unwrap();
                    black_box(out);
                }
            });
        });
    }
}

/// Benchmark: read a 3x3 mirror-padded neighbourhood around every cell.
fn bench_padded_stencil(c: &mut Criterion) {
    let padded = PaddedNdDataSource::new(memory_grid(100).unwrap(), BoundaryBehavior::Mirror).unwrap();

    c.bench_function("stencil_mirror_100x100", |b| {
        b.iter(|| {
            let mut coord = IntegerIndex::new(2);
            let mut out = 0.0f32;
            for y in 0..100 {
                for x in 0..100 {
                    let mut sum = 0.0;
                    for dy in -1..=1 {
                        for dx in -1..=1 {
                            coord.set(0, x + dx);
                            coord.set(1, y + dy);
                            padded.get_at(&coord, &mut out).unwrap();
                            sum += out;
                        }
                    }
                    black_box(sum);
                }
            }
        });
    });
}

criterion_group!(
    benches,
    bench_sequential_scan,
    bench_random_access,
    bench_padded_stencil
);
criterion_main!(benches);
