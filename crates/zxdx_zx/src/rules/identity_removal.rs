//! Removes degree-2, zero-phase Z/X spiders, splicing their two neighbors
//! together directly. Grounded on `idRemovalRule.cpp`.

use crate::diagram::{EdgeKind, VertexKind, ZxDiagram};
use crate::rule::{Rule, VertexRef, ZXOperation};
use std::collections::HashSet;
use zxdx_core::Phase;

#[derive(Default)]
pub struct IdentityRemovalRule;

impl Rule for IdentityRemovalRule {
    fn name(&self) -> &'static str {
        "identity_removal"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut taken = HashSet::new();

        for v in diagram.vertex_ids() {
            if taken.contains(&v) {
                continue;
            }
            let Ok(rec) = diagram.get(v) else { continue };
            if !rec.phase.is_zero() || !rec.kind.is_spider() || rec.neighbors.len() != 2 {
                continue;
            }
            let mut it = rec.neighbors.iter();
            let &(n0, t0) = it.next().unwrap();
            let &(n1, t1) = it.next().unwrap();
            if taken.contains(&n0) || taken.contains(&n1) {
                continue;
            }

            taken.insert(v);
            taken.insert(n0);
            taken.insert(n1);

            let merged = t0.compose(t1);
            let mut op = ZXOperation {
                vertices_to_remove: vec![v],
                ..Default::default()
            };
            if n0 == n1 {
                if let Ok(n0_rec) = diagram.get(n0) {
                    op.phase_sets.push((n0, n0_rec.phase + Phase::PI));
                }
            } else {
                op.edges_to_add
                    .push((VertexRef::Existing(n0), VertexRef::Existing(n1), merged));
            }
            ops.push(op);
        }
        ops
    }
}
