//! Pivots an n*pi Z vertex against a non-Clifford Z neighbor by first
//! transferring the non-Clifford phase onto a fresh gadget leaf, then
//! running the ordinary pivot reconnection. Grounded on
//! `pivotGadgetRule.cpp`/`pivot.cpp`; the phase-transfer step is grounded on
//! `ZXGraph::transferPhase` (referenced from `pivotBoundaryRule.cpp`).

use crate::diagram::{EdgeKind, VertexKind, ZxDiagram};
use crate::rule::{NewVertex, Rule, VertexRef, ZXOperation};
use std::collections::HashSet;
use zxdx_core::Phase;

#[derive(Default)]
pub struct PivotGadgetRule;

impl Rule for PivotGadgetRule {
    fn name(&self) -> &'static str {
        "pivot_gadget"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut taken: HashSet<u64> = HashSet::new();

        let mut edges = Vec::new();
        diagram.for_each_edge(|u, v, t| {
            if t == EdgeKind::Hadamard {
                edges.push((u, v));
            }
        });

        for (a, b) in edges {
            if taken.contains(&a) || taken.contains(&b) {
                continue;
            }
            let (Ok(rec_a), Ok(rec_b)) = (diagram.get(a), diagram.get(b)) else {
                continue;
            };
            if rec_a.kind != VertexKind::Z || rec_b.kind != VertexKind::Z {
                continue;
            }
            let a_pi = rec_a.phase.is_multiple_of_pi();
            let b_pi = rec_b.phase.is_multiple_of_pi();
            if a_pi == b_pi {
                continue;
            }
            let (pi_vertex, gadget_vertex) = if a_pi { (a, b) } else { (b, a) };
            let gadget_rec = diagram.get(gadget_vertex).unwrap();
            if gadget_rec.neighbors.len() == 1 {
                // already a bare phase gadget leaf; leave it for phase_gadget_fusion.
                taken.insert(pi_vertex);
                taken.insert(gadget_vertex);
                continue;
            }
            let pi_rec = diagram.get(pi_vertex).unwrap();

            let mut interior = true;
            for &(nb, _) in pi_rec.neighbors.iter().filter(|&&(id, _)| id != gadget_vertex) {
                match diagram.get(nb) {
                    Ok(r) if r.kind == VertexKind::Z && !taken.contains(&nb) => {}
                    _ => {
                        interior = false;
                        break;
                    }
                }
            }
            for &(nb, _) in gadget_rec.neighbors.iter().filter(|&&(id, _)| id != pi_vertex) {
                match diagram.get(nb) {
                    Ok(r) if r.kind == VertexKind::Z && !taken.contains(&nb) => {}
                    _ => {
                        interior = false;
                        break;
                    }
                }
            }
            if !interior {
                taken.insert(pi_vertex);
                taken.insert(gadget_vertex);
                continue;
            }

            taken.insert(pi_vertex);
            taken.insert(gadget_vertex);
            for &(nb, _) in pi_rec.neighbors.iter().chain(gadget_rec.neighbors.iter()) {
                taken.insert(nb);
            }

            let only_pi: HashSet<u64> = pi_rec
                .neighbors
                .iter()
                .map(|&(id, _)| id)
                .filter(|&id| id != gadget_vertex)
                .collect();
            let only_gadget: HashSet<u64> = gadget_rec
                .neighbors
                .iter()
                .map(|&(id, _)| id)
                .filter(|&id| id != pi_vertex)
                .collect();
            let shared: Vec<u64> = only_pi.intersection(&only_gadget).copied().collect();
            let n0: Vec<u64> = only_pi.difference(&only_gadget.iter().copied().collect()).copied().collect();
            let n1: Vec<u64> = only_gadget.difference(&only_pi.iter().copied().collect()).copied().collect();

            let pi_phase = pi_rec.phase;
            let gadget_phase = gadget_rec.phase;

            let mut op = ZXOperation {
                vertices_to_remove: vec![pi_vertex, gadget_vertex],
                vertices_to_add: vec![NewVertex {
                    kind: VertexKind::Z,
                    phase: gadget_phase + pi_phase,
                    qubit: gadget_rec.qubit,
                    column: gadget_rec.column,
                }],
                ..Default::default()
            };
            let leaf = VertexRef::New(0);
            let mut n1_full: Vec<VertexRef> = n1.iter().map(|&id| VertexRef::Existing(id)).collect();
            n1_full.push(leaf);

            for &s in &n0 {
                for &t in &n1_full {
                    op.edges_to_add.push((VertexRef::Existing(s), t, EdgeKind::Hadamard));
                }
                for &t in &shared {
                    op.edges_to_add.push((VertexRef::Existing(s), VertexRef::Existing(t), EdgeKind::Hadamard));
                }
            }
            for &s in &n1_full {
                for &t in &shared {
                    op.edges_to_add.push((s, VertexRef::Existing(t), EdgeKind::Hadamard));
                }
            }
            for &v in &n0 {
                if let Ok(rec) = diagram.get(v) {
                    op.phase_sets.push((v, rec.phase));
                }
            }
            for &v in &n1 {
                if let Ok(rec) = diagram.get(v) {
                    op.phase_sets.push((v, rec.phase + pi_phase));
                }
            }
            for &v in &shared {
                if let Ok(rec) = diagram.get(v) {
                    op.phase_sets.push((v, rec.phase + pi_phase + Phase::PI));
                }
            }
            ops.push(op);
        }
        ops
    }
}
