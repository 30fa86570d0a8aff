//! Simplification-driver benchmark: a long spider chain run through
//! `full_reduce`, grounded on `qns_rewire/benches/rewire.rs`'s structure.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use zxdx_zx::prelude::*;

fn build_chain(n: usize) -> ZxDiagram {
    let mut d = ZxDiagram::new();
    let input = d.add_input(0, 0.0);
    let mut prev = input;
    for i in 0..n {
        let z = d.add_vertex(0, VertexKind::Z, Phase::ZERO, (i + 1) as f64);
        d.add_edge(prev, z, EdgeKind::Simple).unwrap();
        prev = z;
    }
    let output = d.add_output(0, (n + 1) as f64);
    d.add_edge(prev, output, EdgeKind::Simple).unwrap();
    d
}

fn bench_full_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_reduce");
    for n in [10usize, 50, 200] {
        group.bench_with_input(BenchmarkId::new("chain_len", n), &n, |b, &n| {
            b.iter_batched(|| build_chain(n), |mut d| full_reduce(&mut d).unwrap(), criterion::BatchSize::SmallInput);
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_reduce);
criterion_main!(benches);
