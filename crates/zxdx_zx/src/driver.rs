//! The simplification driver: runs individual rules to a local fixed
//! point and composes them into the named strategies spec §4.5 describes.
//! Grounded on `spec.md`'s driver module and the bounded-iteration style of
//! `gate_reorder/mod.rs`.

use crate::diagram::ZxDiagram;
use crate::error::Result;
use crate::rule::Rule;
use crate::rules::{
    BialgebraRule, HRule, HadamardCancellationRule, IdentityRemovalRule, LocalComplementationRule,
    PhaseGadgetFusionRule, PivotBoundaryRule, PivotGadgetRule, PivotInteriorRule, SpiderFusionRule,
    StateCopyRule,
};
use tracing::debug;

/// A report of how many times each rule fired during one driver run,
/// in the order the rules were attempted.
#[derive(Clone, Debug, Default)]
pub struct SimplifyReport {
    pub rule_counts: Vec<(&'static str, usize)>,
}

impl SimplifyReport {
    pub fn total(&self) -> usize {
        self.rule_counts.iter().map(|(_, n)| n).sum()
    }
}

/// Runs `rule` against `diagram` until it stops finding matches, returning
/// the total number of matches applied.
pub fn run_to_fixpoint(diagram: &mut ZxDiagram, rule: &dyn Rule) -> Result<usize> {
    let mut total = 0;
    loop {
        let applied = rule.apply(diagram)?;
        if applied == 0 {
            break;
        }
        debug!(rule = rule.name(), applied, "rule step");
        total += applied;
    }
    Ok(total)
}

/// Runs each rule in `rules` once per outer pass, looping passes until an
/// entire pass applies nothing. This is the primitive every composite
/// strategy below is built from.
pub fn run_step(diagram: &mut ZxDiagram, rules: &[&dyn Rule]) -> Result<SimplifyReport> {
    let mut report = SimplifyReport::default();
    loop {
        let mut pass_total = 0;
        for &rule in rules {
            let applied = run_to_fixpoint(diagram, rule)?;
            if applied > 0 {
                report.rule_counts.push((rule.name(), applied));
                pass_total += applied;
            }
        }
        if pass_total == 0 {
            break;
        }
    }
    Ok(report)
}

/// Eliminates H-boxes, leaving a pure Z/X spider diagram with Hadamard
/// edges standing in for every Hadamard gate.
pub fn to_z_graph(diagram: &mut ZxDiagram) -> Result<SimplifyReport> {
    run_step(diagram, &[&HRule, &HadamardCancellationRule])
}

/// Saturates the Hadamard-related rules: H-box elimination and H-box
/// fusion.
pub fn hadamard_reduce(diagram: &mut ZxDiagram) -> Result<SimplifyReport> {
    to_z_graph(diagram)
}

/// Reduces the diagram using only Clifford-sound interior rules: spider
/// fusion, H-box elimination, local complementation, interior pivot and
/// identity removal.
pub fn interior_clifford(diagram: &mut ZxDiagram) -> Result<SimplifyReport> {
    run_step(
        diagram,
        &[
            &SpiderFusionRule,
            &HRule,
            &HadamardCancellationRule,
            &IdentityRemovalRule,
            &LocalComplementationRule,
            &PivotInteriorRule,
        ],
    )
}

/// `interior_clifford` plus the boundary-aware pivot variant.
pub fn clifford(diagram: &mut ZxDiagram) -> Result<SimplifyReport> {
    let mut report = interior_clifford(diagram)?;
    let boundary_report = run_step(diagram, &[&PivotBoundaryRule])?;
    if boundary_report.total() > 0 {
        report.rule_counts.extend(boundary_report.rule_counts);
        let more = interior_clifford(diagram)?;
        report.rule_counts.extend(more.rule_counts);
    }
    Ok(report)
}

/// The full reduction strategy: `clifford` plus the non-Clifford rules
/// (pivot-gadget, phase-gadget fusion, state copy, bialgebra), iterated
/// until a whole pass changes nothing.
pub fn full_reduce(diagram: &mut ZxDiagram) -> Result<SimplifyReport> {
    let mut report = clifford(diagram)?;
    loop {
        let extra = run_step(
            diagram,
            &[&PivotGadgetRule, &PhaseGadgetFusionRule, &StateCopyRule, &BialgebraRule],
        )?;
        if extra.total() == 0 {
            break;
        }
        report.rule_counts.extend(extra.rule_counts);
        let more = clifford(diagram)?;
        if more.total() == 0 {
            break;
        }
        report.rule_counts.extend(more.rule_counts);
    }
    Ok(report)
}

/// Runs only the rules that never need to inspect a concrete phase value
/// (beyond recognizing `0`/`pi`/Clifford multiples), leaving diagrams with
/// unresolved symbolic phase parameters safely reducible. Skips the
/// pivot-gadget/phase-gadget/state-copy/bialgebra family since those key on
/// exact non-Clifford phase comparisons.
pub fn symbolic_reduce(diagram: &mut ZxDiagram) -> Result<SimplifyReport> {
    clifford(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{EdgeKind, VertexKind};
    use zxdx_core::Phase;

    #[test]
    fn full_reduce_collapses_identity_chain() {
        let mut d = ZxDiagram::new();
        let i0 = d.add_input(0, 0.0);
        let z1 = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
        let z2 = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 2.0);
        let o3 = d.add_output(0, 3.0);
        d.add_edge(i0, z1, EdgeKind::Simple).unwrap();
        d.add_edge(z1, z2, EdgeKind::Simple).unwrap();
        d.add_edge(z2, o3, EdgeKind::Simple).unwrap();

        let report = full_reduce(&mut d).unwrap();
        assert!(report.total() > 0);
        assert!(d.get(i0).unwrap().neighbors.contains(&(o3, EdgeKind::Simple)));
    }
}
