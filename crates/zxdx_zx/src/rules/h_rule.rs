//! Replaces an arity-2, pi-phase H-box (an ordinary Hadamard gate) with a
//! single edge, toggling its type. Grounded on `hrule.cpp`/`hadamardRule.cpp`
//! (the same rule appears twice across the retrieved sources under both
//! names; this crate keeps only the single rewrite).

use crate::diagram::{EdgeKind, VertexKind, ZxDiagram};
use crate::rule::{Rule, VertexRef, ZXOperation};
use std::collections::HashSet;

#[derive(Default)]
pub struct HRule;

impl Rule for HRule {
    fn name(&self) -> &'static str {
        "h_rule"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut taken = HashSet::new();

        for v in diagram.vertex_ids() {
            let Ok(rec) = diagram.get(v) else { continue };
            if rec.kind != VertexKind::HBox || rec.neighbors.len() != 2 || !rec.phase.is_multiple_of_pi() {
                continue;
            }
            let mut it = rec.neighbors.iter();
            let &(n0, t0) = it.next().unwrap();
            let &(n1, t1) = it.next().unwrap();
            if taken.contains(&n0) || taken.contains(&n1) {
                continue;
            }
            taken.insert(n0);
            taken.insert(n1);

            let merged = if t0 == t1 { EdgeKind::Hadamard } else { EdgeKind::Simple };
            ops.push(ZXOperation {
                vertices_to_remove: vec![v],
                edges_to_add: vec![(VertexRef::Existing(n0), VertexRef::Existing(n1), merged)],
                ..Default::default()
            });
        }
        ops
    }
}
