//! Fuses phase gadgets that act on the same vertex group into one. Grounded
//! on `phaseGadgetRule.cpp`.

use crate::diagram::{VertexId, VertexKind, ZxDiagram};
use crate::rule::{Rule, ZXOperation};
use std::collections::HashMap;
use zxdx_core::Phase;

#[derive(Default)]
pub struct PhaseGadgetFusionRule;

impl Rule for PhaseGadgetFusionRule {
    fn name(&self) -> &'static str {
        "phase_gadget_fusion"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut axel_to_leaf: HashMap<VertexId, VertexId> = HashMap::new();
        let mut group_to_axels: HashMap<Vec<VertexId>, Vec<VertexId>> = HashMap::new();

        for v in diagram.vertex_ids() {
            let Ok(rec) = diagram.get(v) else { continue };
            if rec.phase.denominator() <= 2 || rec.neighbors.len() != 1 {
                continue;
            }
            let &(axel, _) = rec.neighbors.iter().next().unwrap();
            let Ok(axel_rec) = diagram.get(axel) else { continue };
            if axel_rec.kind == VertexKind::Boundary || axel_rec.phase.denominator() != 1 {
                continue;
            }
            if axel_to_leaf.contains_key(&axel) {
                continue;
            }
            axel_to_leaf.insert(axel, v);

            let mut group: Vec<VertexId> = axel_rec.neighbors.iter().map(|&(id, _)| id).filter(|&id| id != v).collect();
            if group.is_empty() {
                continue;
            }
            group.sort_unstable();
            group_to_axels.entry(group).or_default().push(axel);
        }

        let mut ops = Vec::new();
        for (_, axels) in group_to_axels {
            let mut total = Phase::ZERO;
            let mut flip_any = false;
            let mut leaves = Vec::new();
            for &axel in &axels {
                let leaf = axel_to_leaf[&axel];
                let Ok(leaf_rec) = diagram.get(leaf) else { continue };
                let mut leaf_phase = leaf_rec.phase;
                if diagram.get(axel).map(|r| r.phase == Phase::PI).unwrap_or(false) {
                    flip_any = true;
                    leaf_phase = -leaf_phase;
                }
                total = total + leaf_phase;
                leaves.push(leaf);
            }
            if leaves.len() > 1 || flip_any {
                let mut op = ZXOperation::default();
                op.phase_sets.push((leaves[0], total));
                op.vertices_to_remove.extend(axels.iter().skip(1).copied());
                op.vertices_to_remove.extend(leaves.iter().skip(1).copied());
                ops.push(op);
            }
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::EdgeKind;

    #[test]
    fn fuses_two_gadgets_on_same_group() {
        let mut d = ZxDiagram::new();
        let a = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
        let b = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 0.0);

        let axel1 = d.add_vertex(2, VertexKind::Z, Phase::ZERO, 1.0);
        let leaf1 = d.add_vertex(2, VertexKind::Z, Phase::new(1, 4), 2.0);
        d.add_edge(axel1, leaf1, EdgeKind::Hadamard).unwrap();
        d.add_edge(axel1, a, EdgeKind::Hadamard).unwrap();
        d.add_edge(axel1, b, EdgeKind::Hadamard).unwrap();

        let axel2 = d.add_vertex(3, VertexKind::Z, Phase::ZERO, 1.0);
        let leaf2 = d.add_vertex(3, VertexKind::Z, Phase::new(1, 4), 2.0);
        d.add_edge(axel2, leaf2, EdgeKind::Hadamard).unwrap();
        d.add_edge(axel2, a, EdgeKind::Hadamard).unwrap();
        d.add_edge(axel2, b, EdgeKind::Hadamard).unwrap();

        PhaseGadgetFusionRule.apply(&mut d).unwrap();

        assert!(!d.contains(axel2));
        assert!(!d.contains(leaf2));
        assert_eq!(d.get(leaf1).unwrap().phase, Phase::new(1, 2));
    }
}
