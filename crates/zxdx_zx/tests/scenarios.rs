//! Integration tests for the seed scenarios that cross rule boundaries.

use zxdx_zx::prelude::*;

#[test]
fn s2_identity_removal_collapses_zero_phase_spider() {
    let mut d = ZxDiagram::new();
    let i0 = d.add_input(0, 0.0);
    let z1 = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
    let z2 = d.add_vertex(0, VertexKind::Z, Phase::new(1, 2), 2.0);
    let o3 = d.add_output(0, 3.0);
    d.add_edge(i0, z1, EdgeKind::Simple).unwrap();
    d.add_edge(z1, z2, EdgeKind::Simple).unwrap();
    d.add_edge(z2, o3, EdgeKind::Simple).unwrap();

    interior_clifford(&mut d).unwrap();

    assert!(!d.contains(z1));
    assert!(d.contains(z2));
    assert!(d.get(i0).unwrap().neighbors.contains(&(z2, EdgeKind::Simple)));
}

#[test]
fn s3_spider_fusion_sums_phases_and_unions_neighbors() {
    let mut d = ZxDiagram::new();
    let z1 = d.add_vertex(0, VertexKind::Z, Phase::new(1, 4), 0.0);
    let z2 = d.add_vertex(0, VertexKind::Z, Phase::new(1, 2), 1.0);
    let x = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 0.0);
    let y = d.add_vertex(2, VertexKind::Z, Phase::ZERO, 1.0);
    d.add_edge(z1, x, EdgeKind::Hadamard).unwrap();
    d.add_edge(z1, z2, EdgeKind::Simple).unwrap();
    d.add_edge(z2, y, EdgeKind::Hadamard).unwrap();

    interior_clifford(&mut d).unwrap();

    assert!(!d.contains(z2));
    assert!(d.contains(z1));
    assert_eq!(d.get(z1).unwrap().phase, Phase::new(3, 4));
    assert!(d.get(z1).unwrap().neighbors.contains(&(x, EdgeKind::Hadamard)));
    assert!(d.get(z1).unwrap().neighbors.contains(&(y, EdgeKind::Hadamard)));
}

#[test]
fn s4_interior_pivot_complements_neighborhood() {
    let mut d = ZxDiagram::new();
    let a = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
    let b = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 0.0);
    let x = d.add_vertex(2, VertexKind::Z, Phase::ZERO, 0.0);
    let y = d.add_vertex(3, VertexKind::Z, Phase::ZERO, 0.0);
    let z = d.add_vertex(4, VertexKind::Z, Phase::ZERO, 0.0);
    d.add_edge(a, b, EdgeKind::Hadamard).unwrap();
    d.add_edge(a, x, EdgeKind::Hadamard).unwrap();
    d.add_edge(a, y, EdgeKind::Hadamard).unwrap();
    d.add_edge(b, x, EdgeKind::Hadamard).unwrap();
    d.add_edge(b, z, EdgeKind::Hadamard).unwrap();

    interior_clifford(&mut d).unwrap();

    assert!(!d.contains(a));
    assert!(!d.contains(b));
    assert!(d.get(y).unwrap().neighbors.contains(&(z, EdgeKind::Hadamard)));
    assert_eq!(d.get(y).unwrap().phase, Phase::ZERO);
    assert_eq!(d.get(z).unwrap().phase, Phase::ZERO);
    assert_eq!(d.get(x).unwrap().phase, Phase::PI);
}

#[test]
fn invariants_hold_after_full_reduce_on_random_shaped_diagram() {
    let mut d = ZxDiagram::new();
    let i0 = d.add_input(0, 0.0);
    let z1 = d.add_vertex(0, VertexKind::Z, Phase::new(1, 4), 1.0);
    let z2 = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 2.0);
    let x1 = d.add_vertex(1, VertexKind::X, Phase::ZERO, 1.0);
    let o1 = d.add_output(0, 3.0);
    let o2 = d.add_output(1, 3.0);
    d.add_edge(i0, z1, EdgeKind::Simple).unwrap();
    d.add_edge(z1, z2, EdgeKind::Hadamard).unwrap();
    d.add_edge(z2, o1, EdgeKind::Simple).unwrap();
    d.add_edge(z2, x1, EdgeKind::Simple).unwrap();
    d.add_edge(x1, o2, EdgeKind::Simple).unwrap();

    let report = full_reduce(&mut d).unwrap();
    d.check_invariants().unwrap();
    let _ = report.total();
}

#[test]
fn exchange_format_round_trips_s4_diagram() {
    let mut d = ZxDiagram::new();
    let a = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
    let b = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 0.0);
    d.add_edge(a, b, EdgeKind::Hadamard).unwrap();

    let text = write_zx_exchange(&d);
    let reparsed = read_zx_exchange(&text).unwrap();
    assert_eq!(reparsed.len(), d.len());
}
