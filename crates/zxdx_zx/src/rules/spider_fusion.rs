//! Fuses two same-color spiders joined by a simple edge into one, summing
//! their phases. Grounded on `spiderFusionRule.cpp`.

use crate::diagram::ZxDiagram;
use crate::diagram::EdgeKind;
use crate::rule::{Rule, VertexRef, ZXOperation};
use std::collections::HashSet;
use zxdx_core::Phase;

#[derive(Default)]
pub struct SpiderFusionRule;

impl Rule for SpiderFusionRule {
    fn name(&self) -> &'static str {
        "spider_fusion"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut taken: HashSet<u64> = HashSet::new();

        diagram.for_each_edge(|v0, v1, t| {
            if t != EdgeKind::Simple || taken.contains(&v0) || taken.contains(&v1) {
                return;
            }
            let (Ok(rec0), Ok(rec1)) = (diagram.get(v0), diagram.get(v1)) else {
                return;
            };
            if rec0.kind != rec1.kind || !rec0.kind.is_spider() {
                return;
            }

            taken.insert(v0);
            taken.insert(v1);
            for &(nb, _) in &rec1.neighbors {
                taken.insert(nb);
            }

            let mut merged_phase = rec0.phase + rec1.phase;
            let mut op = ZXOperation {
                vertices_to_remove: vec![v1],
                ..Default::default()
            };
            for &(neighbor, etype) in &rec1.neighbors {
                if neighbor == v0 {
                    if etype == EdgeKind::Hadamard {
                        merged_phase = merged_phase + Phase::PI;
                    }
                } else {
                    op.edges_to_add.push((
                        VertexRef::Existing(v0),
                        VertexRef::Existing(neighbor),
                        etype,
                    ));
                }
            }
            op.phase_sets.push((v0, merged_phase));
            ops.push(op);
        });

        ops
    }
}
