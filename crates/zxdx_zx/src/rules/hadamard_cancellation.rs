//! Cancels a chain of two directly-adjacent, arity-2 H-boxes, reconnecting
//! their outer neighbors with a single composed edge. Grounded on
//! `hBoxFusionRule.cpp`.

use crate::diagram::{EdgeKind, VertexKind, ZxDiagram};
use crate::rule::{Rule, VertexRef, ZXOperation};
use std::collections::HashSet;

#[derive(Default)]
pub struct HadamardCancellationRule;

impl Rule for HadamardCancellationRule {
    fn name(&self) -> &'static str {
        "hadamard_cancellation"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut taken = HashSet::new();

        let h_boxes: Vec<_> = diagram
            .vertex_ids()
            .filter(|&v| diagram.get(v).map(|r| r.kind == VertexKind::HBox && r.neighbors.len() == 2).unwrap_or(false))
            .collect();

        for &u in &h_boxes {
            if taken.contains(&u) {
                continue;
            }
            let Ok(u_rec) = diagram.get(u) else { continue };
            for &(w, t_uw) in &u_rec.neighbors {
                if w == u || taken.contains(&w) {
                    continue;
                }
                let Ok(w_rec) = diagram.get(w) else { continue };
                if w_rec.kind != VertexKind::HBox || w_rec.neighbors.len() != 2 {
                    continue;
                }
                let other_u = u_rec.neighbors.iter().find(|&&(id, _)| id != w).copied();
                let other_w = w_rec.neighbors.iter().find(|&&(id, _)| id != u).copied();
                let (Some((ou, t_ou)), Some((ow, t_ow))) = (other_u, other_w) else {
                    continue;
                };
                if ou == w || ow == u {
                    continue;
                }

                taken.insert(u);
                taken.insert(w);
                taken.insert(ou);
                taken.insert(ow);

                let merged = t_ou.compose(t_uw).compose(t_uw).compose(t_ow);
                ops.push(ZXOperation {
                    vertices_to_remove: vec![u, w],
                    edges_to_add: vec![(VertexRef::Existing(ou), VertexRef::Existing(ow), merged)],
                    ..Default::default()
                });
                break;
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
    fn cancels_adjacent_hbox_pair() {
        let mut d = ZxDiagram::new();
        let a = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
        let h1 = d.add_vertex(0, VertexKind::HBox, Phase::PI, 1.0);
        let h2 = d.add_vertex(0, VertexKind::HBox, Phase::PI, 2.0);
        let b = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 3.0);
        d.add_edge(a, h1, EdgeKind::Simple).unwrap();
        d.add_edge(h1, h2, EdgeKind::Hadamard).unwrap();
        d.add_edge(h2, b, EdgeKind::Simple).unwrap();

        HadamardCancellationRule.apply(&mut d).unwrap();

        assert!(!d.contains(h1));
        assert!(!d.contains(h2));
        assert_eq!(d.get(a).unwrap().degree(), 1);
    }
}
