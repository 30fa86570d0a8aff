//! Phase arithmetic benchmark.
//!
//! Target: parsing and normalization stay well under 1us per call even for
//! long chained expressions, since the rule catalogue calls into phase
//! arithmetic on every matched vertex.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use zxdx_core::prelude::*;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("phase_parse");

    for expr in ["pi", "-3/4*pi", "1*2*3*pi/4", "0.5*pi"] {
        group.bench_with_input(BenchmarkId::new("expr", expr), &expr, |b, expr| {
            b.iter(|| Phase::parse(expr))
        });
    }

    group.finish();
}

fn bench_add_chain(c: &mut Criterion) {
    c.bench_function("phase_add_chain", |b| {
        b.iter(|| {
            let mut p = Phase::ZERO;
            for i in 1..100 {
                p = p + Phase::new(1, i);
            }
            p
        })
    });
}

criterion_group!(benches, bench_parse, bench_add_chain);
criterion_main!(benches);
