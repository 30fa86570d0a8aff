//! Copies a `0`/`pi` Z state through its single Z neighbor, pushing the
//! state onto every vertex the neighbor touches (a boundary neighbor gets a
//! fresh Z state of its own instead). Grounded on `stateCopyRule.cpp`.

use crate::diagram::{EdgeKind, VertexId, VertexKind, ZxDiagram};
use crate::rule::{NewVertex, Rule, VertexRef, ZXOperation};
use std::collections::HashSet;
use zxdx_core::Phase;

#[derive(Default)]
pub struct StateCopyRule;

impl Rule for StateCopyRule {
    fn name(&self) -> &'static str {
        "state_copy"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut invalid: HashSet<VertexId> = HashSet::new();

        for v in diagram.vertex_ids() {
            if invalid.contains(&v) {
                continue;
            }
            let Ok(rec) = diagram.get(v) else { continue };
            if rec.kind != VertexKind::Z || !(rec.phase.is_zero() || rec.phase == Phase::PI) || rec.neighbors.len() != 1 {
                continue;
            }
            let &(axel, _) = rec.neighbors.iter().next().unwrap();
            let Ok(axel_rec) = diagram.get(axel) else { continue };
            if axel_rec.kind != VertexKind::Z {
                continue;
            }

            let targets: Vec<(VertexId, EdgeKind)> = axel_rec.neighbors.iter().filter(|&&(id, _)| id != v).copied().collect();
            for &(t, _) in &targets {
                invalid.insert(t);
            }

            let mut op = ZXOperation {
                vertices_to_remove: vec![v, axel],
                ..Default::default()
            };
            let mut new_idx = 0usize;
            for &(target, etype) in &targets {
                let Ok(target_rec) = diagram.get(target) else { continue };
                if target_rec.kind == VertexKind::Boundary {
                    op.vertices_to_add.push(NewVertex {
                        kind: VertexKind::Z,
                        phase: rec.phase,
                        qubit: target_rec.qubit,
                        column: (target_rec.column + axel_rec.column) / 2.0,
                    });
                    let new_ref = VertexRef::New(new_idx);
                    new_idx += 1;
                    op.edges_to_remove.push((axel, target, etype));
                    op.edges_to_add.push((new_ref, VertexRef::Existing(target), etype.toggle()));
                    op.edges_to_add.push((VertexRef::Existing(axel), new_ref, EdgeKind::Hadamard));
                } else {
                    op.phase_sets.push((target, rec.phase + target_rec.phase));
                }
            }
            ops.push(op);
        }
        ops
    }
}
