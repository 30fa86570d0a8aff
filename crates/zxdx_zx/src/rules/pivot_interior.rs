//! The interior pivot rule: two Hadamard-adjacent, n*pi-phase Z vertices
//! whose entire neighborhoods are interior Z vertices reached by Hadamard
//! edges. Grounded on `pivotRule.cpp` (match) and `pivotRuleInterface.cpp`
//! (the shared reconnection core in [`crate::rules::pivot_core`]).

use crate::diagram::{EdgeKind, VertexKind, ZxDiagram};
use crate::rule::{Rule, ZXOperation};
use crate::rules::pivot_core;
use std::collections::HashSet;

#[derive(Default)]
pub struct PivotInteriorRule;

impl Rule for PivotInteriorRule {
    fn name(&self) -> &'static str {
        "pivot_interior"
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

        for (vs, vt) in edges {
            if taken.contains(&vs) || taken.contains(&vt) {
                continue;
            }
            let (Ok(rec_s), Ok(rec_t)) = (diagram.get(vs), diagram.get(vt)) else {
                continue;
            };
            if rec_s.kind != VertexKind::Z || rec_t.kind != VertexKind::Z {
                continue;
            }
            if !rec_s.phase.is_multiple_of_pi() || !rec_t.phase.is_multiple_of_pi() {
                continue;
            }

            let mut interior = true;
            let mut others = Vec::new();
            for v in [vs, vt] {
                let rec = diagram.get(v).unwrap();
                for &(nb, t) in &rec.neighbors {
                    if nb == vs || nb == vt {
                        continue;
                    }
                    if t != EdgeKind::Hadamard {
                        interior = false;
                        break;
                    }
                    let Ok(nb_rec) = diagram.get(nb) else {
                        interior = false;
                        break;
                    };
                    if nb_rec.kind != VertexKind::Z || taken.contains(&nb) {
                        interior = false;
                        break;
                    }
                    others.push(nb);
                }
                if !interior {
                    break;
                }
            }
            if !interior {
                taken.insert(vs);
                taken.insert(vt);
                continue;
            }

            taken.insert(vs);
            taken.insert(vt);
            for nb in others {
                taken.insert(nb);
            }

            if let Some(op) = pivot_core(diagram, vs, vt) {
                ops.push(op);
            }
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zxdx_core::Phase;

    #[test]
    fn pivots_interior_pair() {
        let mut d = ZxDiagram::new();
        let vs = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
        let vt = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 0.0);
        let a = d.add_vertex(2, VertexKind::Z, Phase::ZERO, 0.0);
        let b = d.add_vertex(3, VertexKind::Z, Phase::ZERO, 0.0);
        d.add_edge(vs, vt, EdgeKind::Hadamard).unwrap();
        d.add_edge(vs, a, EdgeKind::Hadamard).unwrap();
        d.add_edge(vt, b, EdgeKind::Hadamard).unwrap();

        PivotInteriorRule.apply(&mut d).unwrap();

        assert!(!d.contains(vs));
        assert!(!d.contains(vt));
        assert!(d.get(a).unwrap().neighbors.contains(&(b, EdgeKind::Hadamard)));
    }
}
