//! Removes a `±pi/2`-phase Z vertex whose entire neighborhood is Z vertices
//! joined by Hadamard edges, complementing the neighborhood (every pair of
//! neighbors gains a Hadamard edge) and shifting each neighbor's phase by
//! `∓pi/2`. Grounded on `localComplementRule.cpp`.

use crate::diagram::{EdgeKind, VertexKind, ZxDiagram};
use crate::rule::{Rule, VertexRef, ZXOperation};
use std::collections::HashSet;
use zxdx_core::Phase;

#[derive(Default)]
pub struct LocalComplementationRule;

impl Rule for LocalComplementationRule {
    fn name(&self) -> &'static str {
        "local_complementation"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut taken: HashSet<u64> = HashSet::new();

        for v in diagram.vertex_ids() {
            if taken.contains(&v) {
                continue;
            }
            let Ok(rec) = diagram.get(v) else { continue };
            if rec.kind != VertexKind::Z || !(rec.phase == Phase::new(1, 2) || rec.phase == Phase::new(3, 2)) {
                continue;
            }
            let mut ok = true;
            let mut self_loop_hadamards = 0usize;
            for &(nb, t) in &rec.neighbors {
                if nb == v {
                    if t == EdgeKind::Hadamard {
                        self_loop_hadamards += 1;
                    }
                    continue;
                }
                if t != EdgeKind::Hadamard || taken.contains(&nb) {
                    ok = false;
                    break;
                }
                let Ok(nb_rec) = diagram.get(nb) else {
                    ok = false;
                    break;
                };
                if nb_rec.kind != VertexKind::Z {
                    ok = false;
                    break;
                }
            }
            if !ok {
                continue;
            }

            let neighbors: Vec<_> = rec.neighbors.iter().filter(|&&(nb, _)| nb != v).map(|&(nb, _)| nb).collect();
            for &nb in &neighbors {
                taken.insert(nb);
            }
            taken.insert(v);

            let p = rec.phase + Phase::new(self_loop_hadamards as i64, 2);
            let mut op = ZXOperation {
                vertices_to_remove: vec![v],
                ..Default::default()
            };
            for i in 0..neighbors.len() {
                if let Ok(nb_rec) = diagram.get(neighbors[i]) {
                    op.phase_sets.push((neighbors[i], nb_rec.phase - p));
                }
                for j in (i + 1)..neighbors.len() {
                    op.edges_to_add.push((
                        VertexRef::Existing(neighbors[i]),
                        VertexRef::Existing(neighbors[j]),
                        EdgeKind::Hadamard,
                    ));
                }
            }
            ops.push(op);
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complements_neighborhood_and_shifts_phase() {
        let mut d = ZxDiagram::new();
        let v = d.add_vertex(0, VertexKind::Z, Phase::new(1, 2), 0.0);
        let a = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 0.0);
        let b = d.add_vertex(2, VertexKind::Z, Phase::ZERO, 0.0);
        d.add_edge(v, a, EdgeKind::Hadamard).unwrap();
        d.add_edge(v, b, EdgeKind::Hadamard).unwrap();

        LocalComplementationRule.apply(&mut d).unwrap();

        assert!(!d.contains(v));
        assert!(d.get(a).unwrap().neighbors.contains(&(b, EdgeKind::Hadamard)));
        assert_eq!(d.get(a).unwrap().phase, Phase::new(-1, 2));
    }
}
