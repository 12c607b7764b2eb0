//! Benchmark for chain evaluation.
//!
//! Measures stage application on a live link, stream rebinding, and the cost
//! of replaying a compiled chain compared with building the link by hand.

use chainlink::builtins::{add, list, range, sum};
use chainlink::prelude::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn doubled() -> StreamTemplate {
    StreamTemplate::over(ANS).map(|value| Ok(Value::from(value.as_int()? * 2)))
}

// =============================================================================
// 1. Plain Calls
// =============================================================================

fn benchmark_plain_calls(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("plain_calls");

    for chain_length in [1, 5, 10] {
        group.bench_with_input(
            BenchmarkId::new("implicit_prepend", chain_length),
            &chain_length,
            |bencher, &length| {
                bencher.iter(|| {
                    let mut link = begin(black_box(0));
                    for _ in 0..length {
                        link.apply_with(add(), args![1]).unwrap();
                    }
                    black_box(link.into_result())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("explicit_placement", chain_length),
            &chain_length,
            |bencher, &length| {
                bencher.iter(|| {
                    let mut link = begin(black_box(0));
                    for _ in 0..length {
                        link.apply_with(add(), args![1, ANS]).unwrap();
                    }
                    black_box(link.into_result())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// 2. Stream Stages
// =============================================================================

fn benchmark_stream_stages(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("stream_stages");

    for size in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("map_then_sum", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut link = begin(black_box(size));
                link.apply(range())
                    .unwrap()
                    .apply(doubled())
                    .unwrap()
                    .apply(sum())
                    .unwrap();
                black_box(link.into_result())
            });
        });
    }

    group.finish();
}

// =============================================================================
// 3. Compiled Chains
// =============================================================================

fn benchmark_compiled_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("compiled_chain");
    let input = Value::list(0..100);

    let compiled = build(doubled())
        .apply(doubled())
        .apply(list())
        .compile();

    group.bench_function("replay", |bencher| {
        bencher.iter(|| black_box(compiled.call(black_box(input.clone())).unwrap()));
    });

    group.bench_function("direct", |bencher| {
        bencher.iter(|| {
            let mut link = begin(black_box(input.clone()));
            link.apply(doubled())
                .unwrap()
                .apply(doubled())
                .unwrap()
                .apply(list())
                .unwrap();
            black_box(link.into_result())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_plain_calls,
    benchmark_stream_stages,
    benchmark_compiled_chain
);
criterion_main!(benches);
