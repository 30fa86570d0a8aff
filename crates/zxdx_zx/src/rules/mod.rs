//! The twelve local rewrite rules, one file each, grounded on the
//! corresponding `examples/original_source/src/simplifier/*.cpp` file named
//! in the repository's design ledger.

mod bialgebra;
mod h_rule;
mod hadamard_cancellation;
mod identity_removal;
mod local_complementation;
mod phase_gadget_fusion;
mod pivot_boundary;
mod pivot_gadget;
mod pivot_interior;
mod spider_fusion;
mod state_copy;

pub use bialgebra::BialgebraRule;
pub use h_rule::HRule;
pub use hadamard_cancellation::HadamardCancellationRule;
pub use identity_removal::IdentityRemovalRule;
pub use local_complementation::LocalComplementationRule;
pub use phase_gadget_fusion::PhaseGadgetFusionRule;
pub use pivot_boundary::PivotBoundaryRule;
pub use pivot_gadget::PivotGadgetRule;
pub use pivot_interior::PivotInteriorRule;
pub use spider_fusion::SpiderFusionRule;
pub use state_copy::StateCopyRule;

use crate::diagram::{EdgeKind, VertexId, ZxDiagram};
use crate::rule::ZXOperation;
use std::collections::HashSet;
use zxdx_core::Phase;

/// Shared core of the pivot family: given two Hadamard-adjacent Z vertices
/// with n*pi phase whose other neighbors are partitioned into
/// exclusively-`vs`, exclusively-`vt`, and shared sets, builds the
/// reconnection operation common to interior, gadget and boundary pivot.
/// Grounded on `pivotRuleInterface.cpp`.
pub(crate) fn pivot_core(diagram: &ZxDiagram, vs: VertexId, vt: VertexId) -> Option<ZXOperation> {
    let rec_s = diagram.get(vs).ok()?;
    let rec_t = diagram.get(vt).ok()?;
    let phase_s = rec_s.phase;
    let phase_t = rec_t.phase;

    let mut set_s: HashSet<VertexId> = rec_s
        .neighbors
        .iter()
        .map(|&(id, _)| id)
        .filter(|&id| id != vt)
        .collect();
    let mut set_t: HashSet<VertexId> = rec_t
        .neighbors
        .iter()
        .map(|&(id, _)| id)
        .filter(|&id| id != vs)
        .collect();

    let shared: Vec<VertexId> = set_s.intersection(&set_t).copied().collect();
    for id in &shared {
        set_s.remove(id);
        set_t.remove(id);
    }
    let only_s: Vec<VertexId> = set_s.into_iter().collect();
    let only_t: Vec<VertexId> = set_t.into_iter().collect();

    let mut op = ZXOperation::default();

    for &s in &only_s {
        for &t in &only_t {
            op.edges_to_add
                .push((crate::rule::VertexRef::Existing(s), crate::rule::VertexRef::Existing(t), EdgeKind::Hadamard));
        }
        for &t in &shared {
            op.edges_to_add
                .push((crate::rule::VertexRef::Existing(s), crate::rule::VertexRef::Existing(t), EdgeKind::Hadamard));
        }
    }
    for &s in &only_t {
        for &t in &shared {
            op.edges_to_add
                .push((crate::rule::VertexRef::Existing(s), crate::rule::VertexRef::Existing(t), EdgeKind::Hadamard));
        }
    }

    for &v in &only_s {
        if let Ok(rec) = diagram.get(v) {
            op.phase_sets.push((v, rec.phase + phase_t));
        }
    }
    for &v in &only_t {
        if let Ok(rec) = diagram.get(v) {
            op.phase_sets.push((v, rec.phase + phase_s));
        }
    }
    for &v in &shared {
        if let Ok(rec) = diagram.get(v) {
            op.phase_sets.push((v, rec.phase + phase_s + phase_t + Phase::PI));
        }
    }

    op.vertices_to_remove.push(vs);
    op.vertices_to_remove.push(vt);

    Some(op)
}
