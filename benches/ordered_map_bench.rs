//! Benchmark for OrderedMap vs standard BTreeMap.
//!
//! Measures the effect of insertion hints (correct, wrong, corrected and
//! chained from the returned position) and compares lookups and iteration
//! against Rust's standard BTreeMap.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordmap::ordered::{OrderedMap, Position};
use std::collections::BTreeMap;
use std::hint::black_box;

// =============================================================================
// emplace Benchmark
// =============================================================================

fn benchmark_emplace(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("emplace");

    for size in [1000, 10000, 100_500] {
        group.bench_with_input(BenchmarkId::new("plain", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = OrderedMap::new();
                for key in 0..size {
                    map.emplace(black_box(key), 'a');
                }
                black_box(map.len())
            });
        });

        // Ascending keys always belong at the end.
        group.bench_with_input(
            BenchmarkId::new("correct_hint", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    for key in 0..size {
                        map.emplace_hint(Position::END, black_box(key), 'b');
                    }
                    black_box(map.len())
                });
            },
        );

        // Descending keys never belong at the end.
        group.bench_with_input(
            BenchmarkId::new("wrong_hint", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    for key in (1..=size).rev() {
                        map.emplace_hint(Position::END, black_box(key), 'c');
                    }
                    black_box(map.len())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("corrected_hint", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    for key in (1..=size).rev() {
                        let hint = map.begin();
                        map.emplace_hint(hint, black_box(key), 'd');
                    }
                    black_box(map.len())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("returned_position", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    let mut hint = map.begin();
                    for key in 0..size {
                        hint = map.emplace_hint(hint, black_box(key), 'e');
                    }
                    black_box(map.len())
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for key in 0..size {
                    map.entry(black_box(key)).or_insert('f');
                }
                black_box(map.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let ordered_map: OrderedMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        group.bench_with_input(
            BenchmarkId::new("OrderedMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in 0..size {
                        if let Some(&value) = ordered_map.get(&black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = standard_map.get(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [1000, 10000] {
        let ordered_map: OrderedMap<i32, i32> = (0..size).map(|index| (index, index)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(ordered_map.values().copied().sum::<i32>()));
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(standard_map.values().copied().sum::<i32>()));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(benches, benchmark_emplace, benchmark_get, benchmark_iteration);

criterion_main!(benches);
