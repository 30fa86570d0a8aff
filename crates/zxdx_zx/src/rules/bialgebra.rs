//! The bialgebra rule: a zero-phase X-Z pair joined by a simple edge, whose
//! neighborhoods are disjoint, phase-free, opposite-colored and simple-edge
//! only, collapses into a complete bipartite simple-edge connection between
//! their neighbors. Grounded on `bialgebraRule.cpp`.

use crate::diagram::{EdgeKind, VertexId, VertexKind, ZxDiagram};
use crate::rule::{Rule, VertexRef, ZXOperation};
use std::collections::HashSet;

#[derive(Default)]
pub struct BialgebraRule;

fn has_duplicate(ids: &[VertexId]) -> bool {
    let set: HashSet<_> = ids.iter().collect();
    set.len() != ids.len()
}

impl Rule for BialgebraRule {
    fn name(&self) -> &'static str {
        "bialgebra"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation> {
        let mut ops = Vec::new();
        let mut taken: HashSet<VertexId> = HashSet::new();

        diagram.for_each_edge(|left, right, t| {
            if t != EdgeKind::Simple || taken.contains(&left) || taken.contains(&right) {
                return;
            }
            let (Ok(l), Ok(r)) = (diagram.get(left), diagram.get(right)) else {
                return;
            };
            if !l.phase.is_zero() || !r.phase.is_zero() {
                return;
            }
            let opposite = (l.kind == VertexKind::X && r.kind == VertexKind::Z) || (l.kind == VertexKind::Z && r.kind == VertexKind::X);
            if !opposite || l.neighbors.len() == 1 || r.neighbors.len() == 1 {
                return;
            }

            let left_neighbors: Vec<VertexId> = l.neighbors.iter().map(|&(id, _)| id).filter(|&id| id != right).collect();
            let right_neighbors: Vec<VertexId> = r.neighbors.iter().map(|&(id, _)| id).filter(|&id| id != left).collect();
            if has_duplicate(&left_neighbors) || has_duplicate(&right_neighbors) {
                return;
            }
            if !l.neighbors.iter().all(|&(_, et)| et == EdgeKind::Simple) || !r.neighbors.iter().all(|&(_, et)| et == EdgeKind::Simple) {
                return;
            }
            for &id in &left_neighbors {
                let Ok(rec) = diagram.get(id) else { return };
                if !rec.phase.is_zero() || rec.kind != r.kind {
                    return;
                }
            }
            for &id in &right_neighbors {
                let Ok(rec) = diagram.get(id) else { return };
                if !rec.phase.is_zero() || rec.kind != l.kind {
                    return;
                }
            }

            taken.insert(left);
            taken.insert(right);
            for &id in left_neighbors.iter().chain(right_neighbors.iter()) {
                taken.insert(id);
            }

            let mut op = ZXOperation {
                vertices_to_remove: vec![left, right],
                ..Default::default()
            };
            for &a in &left_neighbors {
                for &b in &right_neighbors {
                    op.edges_to_add.push((VertexRef::Existing(a), VertexRef::Existing(b), EdgeKind::Simple));
                }
            }
            ops.push(op);
        });

        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zxdx_core::Phase;

    #[test]
    fn bialgebra_collapses_xz_pair() {
        let mut d = ZxDiagram::new();
        let x = d.add_vertex(0, VertexKind::X, Phase::ZERO, 0.0);
        let z = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
        let a = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 0.0);
        let b = d.add_vertex(2, VertexKind::X, Phase::ZERO, 1.0);
        d.add_edge(x, z, EdgeKind::Simple).unwrap();
        d.add_edge(x, a, EdgeKind::Simple).unwrap();
        d.add_edge(z, b, EdgeKind::Simple).unwrap();

        BialgebraRule.apply(&mut d).unwrap();

        assert!(!d.contains(x));
        assert!(!d.contains(z));
        assert!(d.get(a).unwrap().neighbors.contains(&(b, EdgeKind::Simple)));
    }
}
