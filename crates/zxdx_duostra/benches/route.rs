//! Mapping-pipeline benchmark: a line device and a random two-qubit-heavy
//! circuit run through the full scheduler+router loop, grounded on
//! `qns_rewire/benches/rewire.rs`'s structure.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use zxdx_core::config::SchedulerConfig;
use zxdx_core::device::{CouplingEdge, PhysicalQubit};
use zxdx_core::{Device, Gate, GateKind};
use zxdx_duostra::placer::{Placer, StaticPlacer};
use zxdx_duostra::router::DuostraRouter;
use zxdx_duostra::scheduler::{run_mapping, GreedyScheduler};
use zxdx_duostra::topology::CircuitTopology;

fn line_device(n: usize) -> Device {
    let qubits = vec![
        PhysicalQubit {
            single_gate_delay: 35.0,
            single_gate_error: 1e-4,
        };
        n
    ];
    let edges = (0..n - 1)
        .map(|i| CouplingEdge {
            a: i,
            b: i + 1,
            cx_delay: 300.0,
            cx_error: 1e-2,
        })
        .collect();
    Device::new("line", Vec::new(), qubits, edges)
}

fn far_reaching_circuit(n: usize, gates: usize) -> Vec<Gate> {
    (0..gates)
        .map(|i| {
            let a = i % n;
            let b = (i + n / 2) % n;
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            Gate::plain(GateKind::Cx, vec![lo, hi.max(lo + 1)]).unwrap()
        })
        .collect()
}

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");
    for n in [8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::new("qubits", n), &n, |b, &n| {
            let device = line_device(n);
            let cfg = SchedulerConfig::default();
            b.iter_batched(
                || {
                    let placement = StaticPlacer.place(n, &device).unwrap();
                    let topology = CircuitTopology::new(far_reaching_circuit(n, n * 2));
                    (topology, placement)
                },
                |(mut topology, placement)| {
                    run_mapping(&mut topology, &device, placement, &DuostraRouter, &mut GreedyScheduler, &cfg).unwrap()
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_route);
criterion_main!(benches);
