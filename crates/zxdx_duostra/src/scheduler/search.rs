//! Search scheduler: a bounded-lookahead tree search of depth `depth`.
//! Every candidate gate is simulated on a cloned (topology, placement,
//! busy) triple; sibling candidates are evaluated independently, so the
//! evaluation fans out over rayon when the candidate window is worth it.
//! `never_cache` is honored trivially: simulated clones are always
//! dropped at the end of each call, never retained across `pick`s.

use rayon::prelude::*;
use zxdx_core::config::SchedulerConfig;
use zxdx_core::Device;

use super::{candidate_window, Scheduler};
use crate::placer::Placement;
use crate::router::{BusyUntil, RoutedOp, Router};
use crate::topology::CircuitTopology;

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchScheduler;

impl SearchScheduler {
    /// Greedy-by-cost rollout for `steps` picks starting from a cloned
    /// state, returning the total SWAP count incurred. Used as the leaf
    /// evaluation under the bounded lookahead.
    fn rollout_cost(
        &self,
        mut topology: CircuitTopology,
        mut placement: Placement,
        mut busy: BusyUntil,
        router: &dyn Router,
        device: &Device,
        cfg: &SchedulerConfig,
        steps: usize,
    ) -> usize {
        let mut total_swaps = 0;
        for _ in 0..steps {
            if topology.avail_gates().is_empty() {
                break;
            }
            let candidates = candidate_window(&topology, cfg);
            let gate_id = candidates
                .into_iter()
                .min_by(|&a, &b| {
                    let ca = router
                        .gate_cost(topology.gate(a), &placement, &busy, device, cfg.available, cfg.apsp_coeff)
                        .unwrap_or(f64::INFINITY);
                    let cb = router
                        .gate_cost(topology.gate(b), &placement, &busy, device, cfg.available, cfg.apsp_coeff)
                        .unwrap_or(f64::INFINITY);
                    ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
                })
                .expect("avail_gates is non-empty");
            let gate = topology.gate(gate_id).clone();
            if let Ok(ops) = router.route(&gate, &mut placement, &mut busy, device, cfg.orient) {
                total_swaps += ops.iter().filter(|op| matches!(op, RoutedOp::Swap(_, _))).count();
            }
            topology.update_avail(gate_id);
        }
        total_swaps
    }
}

impl Scheduler for SearchScheduler {
    fn pick(
        &mut self,
        topology: &CircuitTopology,
        router: &dyn Router,
        placement: &Placement,
        busy: &BusyUntil,
        device: &Device,
        cfg: &SchedulerConfig,
    ) -> Option<usize> {
        let candidates = candidate_window(topology, cfg);
        if candidates.is_empty() {
            return None;
        }

        if cfg.single_immediately {
            if let Some(&id) = candidates.iter().find(|&&id| topology.gate(id).is_single_qubit()) {
                return Some(id);
            }
        }

        if cfg.depth == 0 {
            return candidates.into_iter().min_by_key(|&id| {
                let cost = router
                    .gate_cost(topology.gate(id), placement, busy, device, cfg.available, cfg.apsp_coeff)
                    .unwrap_or(f64::INFINITY);
                ordered_float_key(cost)
            });
        }

        let scored: Vec<(usize, usize)> = candidates
            .par_iter()
            .map(|&id| {
                let mut sim_topology = topology.clone();
                let mut sim_placement = placement.clone();
                let mut sim_busy = busy.clone();
                let gate = sim_topology.gate(id).clone();
                let first_step_swaps = match router.route(&gate, &mut sim_placement, &mut sim_busy, device, cfg.orient) {
                    Ok(ops) => ops.iter().filter(|op| matches!(op, RoutedOp::Swap(_, _))).count(),
                    Err(_) => return (id, usize::MAX),
                };
                sim_topology.update_avail(id);
                let rest = self.rollout_cost(
                    sim_topology,
                    sim_placement,
                    sim_busy,
                    router,
                    device,
                    cfg,
                    cfg.depth.saturating_sub(1),
                );
                (id, first_step_swaps + rest)
            })
            .collect();

        scored.into_iter().min_by_key(|&(_, cost)| cost).map(|(id, _)| id)
    }
}

/// Orders `f64` costs by magnitude for `min_by_key`, treating `NaN`/`inf`
/// as worst.
fn ordered_float_key(cost: f64) -> i64 {
    if cost.is_finite() {
        (cost * 1000.0) as i64
    } else {
        i64::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placer::{Placer, StaticPlacer};
    use crate::router::tests::line_device;
    use crate::router::DuostraRouter;
    use zxdx_core::{Gate, GateKind};

    #[test]
    fn picks_an_available_gate() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let topology = CircuitTopology::new(vec![Gate::plain(GateKind::Cx, vec![0, 3]).unwrap()]);
        let busy = BusyUntil::new(4);
        let cfg = SchedulerConfig::default();
        let picked = SearchScheduler
            .pick(&topology, &DuostraRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        assert_eq!(picked, 0);
    }

    #[test]
    fn depth_zero_falls_back_to_plain_cost() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let topology = CircuitTopology::new(vec![
            Gate::plain(GateKind::Cx, vec![0, 3]).unwrap(),
            Gate::plain(GateKind::Cx, vec![1, 2]).unwrap(),
        ]);
        let busy = BusyUntil::new(4);
        let mut cfg = SchedulerConfig::default();
        cfg.depth = 0;
        cfg.single_immediately = false;
        let picked = SearchScheduler
            .pick(&topology, &DuostraRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        assert_eq!(picked, 1);
    }
}
