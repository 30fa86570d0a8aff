//! Pivots a Z vertex attached to a diagram boundary against an interior
//! n*pi Z neighbor, first decoupling the boundary with a buffer spider.
//! Grounded on `pivotBoundaryRule.cpp`. Unlike the other pivot variants,
//! the match here names only the `(boundary, vs, vt)` triple; applying it
//! requires the buffer-insertion and phase-transfer side effects to run
//! before the shared pivot reconnection is computed, so this rule performs
//! its own multi-step `apply` rather than replaying one precomputed
//! [`ZXOperation`].

use crate::diagram::{EdgeKind, VertexId, VertexKind, ZxDiagram};
use crate::error::Result;
use crate::rule::Rule;
use crate::rules::pivot_core;
use std::collections::HashSet;
use zxdx_core::Phase;

#[derive(Default)]
pub struct PivotBoundaryRule;

struct Match {
    boundary: VertexId,
    vs: VertexId,
    vt: VertexId,
}

impl PivotBoundaryRule {
    fn scan(&self, diagram: &ZxDiagram) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut taken: HashSet<VertexId> = HashSet::new();

        let boundaries: Vec<VertexId> = diagram.inputs().iter().chain(diagram.outputs().iter()).copied().collect();

        for boundary in boundaries {
            let Ok(b_rec) = diagram.get(boundary) else { continue };
            let Some(&(vs, _)) = b_rec.neighbors.iter().next() else { continue };
            if taken.contains(&vs) {
                continue;
            }
            let Ok(vs_rec) = diagram.get(vs) else { continue };
            if vs_rec.kind != VertexKind::Z {
                taken.insert(vs);
                continue;
            }

            let mut vt = None;
            for &(nb, t) in &vs_rec.neighbors {
                if taken.contains(&nb) || nb == boundary || t != EdgeKind::Hadamard {
                    continue;
                }
                let Ok(nb_rec) = diagram.get(nb) else { continue };
                if nb_rec.kind != VertexKind::Z || !nb_rec.phase.is_multiple_of_pi() || nb_rec.neighbors.len() == 1 {
                    continue;
                }
                vt = Some(nb);
                break;
            }
            let Some(vt) = vt else { continue };

            let mut boundary_count = 0;
            let mut shape_ok = true;
            for &(nb, t) in &vs_rec.neighbors {
                if diagram.get(nb).map(|r| r.kind == VertexKind::Boundary).unwrap_or(false) {
                    boundary_count += 1;
                } else if diagram.get(nb).map(|r| r.kind != VertexKind::Z).unwrap_or(true) || t != EdgeKind::Hadamard {
                    shape_ok = false;
                }
            }
            if boundary_count > 1 || !shape_ok {
                continue;
            }
            let vt_rec = diagram.get(vt).unwrap();
            if !vt_rec.neighbors.iter().all(|&(nb, t)| t == EdgeKind::Hadamard && diagram.get(nb).map(|r| r.kind == VertexKind::Z).unwrap_or(false)) {
                continue;
            }

            taken.insert(vs);
            taken.insert(vt);
            for &(nb, _) in vs_rec.neighbors.iter().chain(vt_rec.neighbors.iter()) {
                taken.insert(nb);
            }

            matches.push(Match { boundary, vs, vt });
        }
        matches
    }
}

impl Rule for PivotBoundaryRule {
    fn name(&self) -> &'static str {
        "pivot_boundary"
    }

    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<crate::rule::ZXOperation> {
        // Matching here yields side-effecting steps, not a precomputed
        // batch; see `apply` below. This is reported empty so the generic
        // default `apply` never runs it twice.
        let _ = self.scan(diagram);
        Vec::new()
    }

    fn apply(&self, diagram: &mut ZxDiagram) -> Result<usize> {
        let matches = self.scan(diagram);
        let count = matches.len();

        for m in matches {
            if !diagram.contains(m.vs) || !diagram.contains(m.vt) {
                continue;
            }
            let edge_to_boundary = diagram
                .get(m.vs)?
                .neighbors
                .iter()
                .find(|&&(nb, _)| nb == m.boundary)
                .copied();
            if let Some((_, t)) = edge_to_boundary {
                diagram.add_buffer(m.boundary, m.vs, t)?;
            }

            if !diagram.get(m.vs)?.phase.is_multiple_of_pi() {
                diagram.transfer_phase(m.vs, Phase::ZERO)?;
            }
            if !diagram.get(m.vt)?.phase.is_multiple_of_pi() {
                diagram.transfer_phase(m.vt, Phase::ZERO)?;
            }

            if let Some(op) = pivot_core(diagram, m.vs, m.vt) {
                op.apply_to(diagram)?;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivots_boundary_adjacent_vertex() {
        let mut d = ZxDiagram::new();
        let bnd = d.add_output(0, 0.0);
        let vs = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
        let vt = d.add_vertex(1, VertexKind::Z, Phase::ZERO, 2.0);
        let a = d.add_vertex(2, VertexKind::Z, Phase::ZERO, 2.0);
        d.add_edge(bnd, vs, EdgeKind::Simple).unwrap();
        d.add_edge(vs, vt, EdgeKind::Hadamard).unwrap();
        d.add_edge(vt, a, EdgeKind::Hadamard).unwrap();

        let applied = PivotBoundaryRule.apply(&mut d).unwrap();
        assert_eq!(applied, 1);
        assert!(!d.contains(vs));
        assert!(!d.contains(vt));
    }
}
