//! Micro-operation benchmarks for selective series.
//!
//! Run with: `cargo bench --bench series`
//!
//! Measures add, insert and query latency on full series of several
//! capacities, in both iteration orders. Scores come from a seeded RNG so
//! runs are comparable.

use std::hint::black_box;
use std::time::Instant;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use samplekit::series::{Order, SelectiveSeries};

const CAPACITIES: [usize; 3] = [16, 256, 4_096];
const OPS: u64 = 10_000;
const SEED: u64 = 0x5eed_5e1e;

fn scores(count: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count).map(|_| rng.gen_range(0.0..1.0)).collect()
}

fn full_series(capacity: usize, order: Order) -> SelectiveSeries<u64> {
    let mut series = SelectiveSeries::with_order(capacity, order);
    for (i, score) in scores(capacity).into_iter().enumerate() {
        series.add_scored(i as u64, i as u64, score);
    }
    series
}

fn order_name(order: Order) -> &'static str {
    match order {
        Order::Forward => "forward",
        Order::Reverse => "reverse",
    }
}

// ============================================================================
// Add (ns/op)
// ============================================================================

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_ns");
    group.throughput(Throughput::Elements(OPS));
    let stream = scores(OPS as usize);

    for order in [Order::Forward, Order::Reverse] {
        for capacity in CAPACITIES {
            group.bench_with_input(
                BenchmarkId::new(order_name(order), capacity),
                &capacity,
                |b, &capacity| {
                    b.iter_custom(|iters| {
                        let mut elapsed = std::time::Duration::ZERO;
                        for _ in 0..iters {
                            let mut series = full_series(capacity, order);
                            let base = series.next_timestamp();
                            let start = Instant::now();
                            for (i, &score) in stream.iter().enumerate() {
                                black_box(series.push(i as u64, base + i as u64, score));
                            }
                            elapsed += start.elapsed();
                        }
                        elapsed
                    })
                },
            );
        }
    }
    group.finish();
}

// ============================================================================
// Insert (ns/op)
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ns");
    group.throughput(Throughput::Elements(OPS));

    let mut rng = StdRng::seed_from_u64(SEED ^ 1);
    let stream: Vec<(u64, f32)> = (0..OPS)
        .map(|_| (rng.gen_range(0..1_000_000), rng.gen_range(0.0..1.0)))
        .collect();

    for capacity in CAPACITIES {
        group.bench_with_input(BenchmarkId::new("forward", capacity), &capacity, |b, &capacity| {
            b.iter_custom(|iters| {
                let mut elapsed = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut series: SelectiveSeries<u64> = SelectiveSeries::new(capacity);
                    let start = Instant::now();
                    for (i, &(ts, score)) in stream.iter().enumerate() {
                        black_box(series.insert(i as u64, ts, score));
                    }
                    elapsed += start.elapsed();
                }
                elapsed
            })
        });
    }
    group.finish();
}

// ============================================================================
// Queries
// ============================================================================

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for capacity in CAPACITIES {
        let series = full_series(capacity, Order::Forward);
        let span = capacity as u64;

        group.bench_with_input(BenchmarkId::new("worst", capacity), &series, |b, series| {
            b.iter(|| black_box(series.worst()))
        });

        group.bench_with_input(BenchmarkId::new("best_8", capacity), &series, |b, series| {
            b.iter(|| black_box(series.best(8).len()))
        });

        group.bench_with_input(
            BenchmarkId::new("find_by_exact_time", capacity),
            &series,
            |b, series| {
                let mut ts = 0u64;
                b.iter(|| {
                    ts = (ts + 7) % span;
                    black_box(series.find_by_exact_time(ts))
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("find_closest_time", capacity),
            &series,
            |b, series| {
                let mut ts = 0u64;
                b.iter(|| {
                    ts = (ts + 7) % (span * 2);
                    black_box(series.find_closest_time(ts))
                })
            },
        );
    }
    group.finish();
}

// ============================================================================
// Merge
// ============================================================================

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for capacity in CAPACITIES {
        let ours = full_series(capacity, Order::Forward);
        let theirs = full_series(capacity, Order::Reverse);

        group.bench_with_input(BenchmarkId::new("all_duplicates", capacity), &capacity, |b, _| {
            b.iter(|| {
                let mut series = ours.clone();
                black_box(series.merge(&theirs))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_insert, bench_queries, bench_merge);
criterion_main!(benches);
