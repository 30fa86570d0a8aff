//! Integration tests for the seed scenarios and device-mapping invariants.

use zxdx_duostra::prelude::*;
use zxdx_core::device::{CouplingEdge, PhysicalQubit};

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

#[test]
fn s5_greedy_routing_on_4_qubit_line_produces_two_swaps_one_cx() {
    let dev = line_device(4);
    let placement = StaticPlacer.place(4, &dev).unwrap();
    let mut topology = CircuitTopology::new(vec![Gate::plain(GateKind::Cx, vec![0, 3]).unwrap()]);
    let cfg = SchedulerConfig::default();

    let result = run_mapping(&mut topology, &dev, placement, &DuostraRouter, &mut GreedyScheduler, &cfg).unwrap();

    let swaps = result.ops.iter().filter(|op| matches!(op, RoutedOp::Swap(_, _))).count();
    let gates = result.ops.iter().filter(|op| matches!(op, RoutedOp::Gate(_))).count();
    assert_eq!(swaps, 2);
    assert_eq!(gates, 1);
}

#[test]
fn invariant_9_scheduler_terminates_with_every_gate_exactly_once() {
    let dev = line_device(6);
    let placement = StaticPlacer.place(6, &dev).unwrap();
    let logical = vec![
        Gate::plain(GateKind::H, vec![0]).unwrap(),
        Gate::plain(GateKind::Cx, vec![0, 5]).unwrap(),
        Gate::plain(GateKind::Cx, vec![1, 4]).unwrap(),
        Gate::plain(GateKind::H, vec![2]).unwrap(),
    ];
    let mut topology = CircuitTopology::new(logical.clone());
    let cfg = SchedulerConfig::default();

    let result = run_mapping(&mut topology, &dev, placement, &DuostraRouter, &mut GreedyScheduler, &cfg).unwrap();

    let emitted_gate_count = result.ops.iter().filter(|op| matches!(op, RoutedOp::Gate(_))).count();
    assert_eq!(emitted_gate_count, logical.len());
    assert!(result.ops.len() >= logical.len());
    assert!(topology.all_executed());
}

#[test]
fn invariant_10_mapping_equivalence_holds_after_routing() {
    let dev = line_device(4);
    let placement = StaticPlacer.place(4, &dev).unwrap();
    let logical = vec![Gate::plain(GateKind::Cx, vec![0, 3]).unwrap()];
    let mut topology = CircuitTopology::new(logical.clone());
    let cfg = SchedulerConfig::default();

    let result = run_mapping(&mut topology, &dev, placement.clone(), &DuostraRouter, &mut BaseScheduler, &cfg).unwrap();

    let mut expanded = Vec::new();
    for op in result.ops {
        match op {
            RoutedOp::Swap(a, b) => {
                expanded.push(Gate::plain(GateKind::Cx, vec![a, b]).unwrap());
                expanded.push(Gate::plain(GateKind::Cx, vec![b, a]).unwrap());
                expanded.push(Gate::plain(GateKind::Cx, vec![a, b]).unwrap());
            }
            RoutedOp::Gate(g) => expanded.push(g),
        }
    }

    check_equivalence(&logical, &expanded, &dev, &placement, false).unwrap();
}

#[test]
fn placement_survives_a_full_mapping_run_as_a_bijection() {
    let dev = line_device(5);
    let placement = StaticPlacer.place(5, &dev).unwrap();
    let logical = vec![
        Gate::plain(GateKind::Cx, vec![0, 4]).unwrap(),
        Gate::plain(GateKind::Cx, vec![1, 3]).unwrap(),
    ];
    let mut topology = CircuitTopology::new(logical);
    let cfg = SchedulerConfig::default();

    let result = run_mapping(&mut topology, &dev, placement, &DuostraRouter, &mut GreedyScheduler, &cfg).unwrap();

    let mut seen = vec![false; 5];
    for l in 0..5 {
        seen[result.final_placement.physical_of(l)] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
