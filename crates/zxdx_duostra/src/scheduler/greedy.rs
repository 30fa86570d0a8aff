//! Greedy scheduler: from the first K candidates, prefer any gate already
//! executable; otherwise pick the candidate whose `gate_cost` is extremal.
//! `single_immediately` floods single-qubit gates whenever one is
//! available, to keep the pipeline short.

use zxdx_core::config::SchedulerConfig;
use zxdx_core::Device;

use super::{candidate_window, Scheduler};
use crate::placer::Placement;
use crate::router::{BusyUntil, Router};
use crate::topology::CircuitTopology;

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyScheduler;

impl Scheduler for GreedyScheduler {
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

        if let Some(&id) = candidates
            .iter()
            .find(|&&id| router.is_executable(topology.gate(id), placement, device))
        {
            return Some(id);
        }

        candidates
            .into_iter()
            .map(|id| {
                let cost = router
                    .gate_cost(topology.gate(id), placement, busy, device, cfg.available, cfg.apsp_coeff)
                    .unwrap_or(f64::INFINITY);
                (id, cost)
            })
            .fold(None, |best: Option<(usize, f64)>, (id, cost)| match best {
                None => Some((id, cost)),
                Some((best_id, best_cost)) => {
                    let pick_new = match cfg.cost {
                        zxdx_core::config::Extremum::Min => cost < best_cost,
                        zxdx_core::config::Extremum::Max => cost > best_cost,
                    };
                    if pick_new {
                        Some((id, cost))
                    } else {
                        Some((best_id, best_cost))
                    }
                }
            })
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placer::{Placer, StaticPlacer};
    use crate::router::tests::line_device;
    use crate::router::ApspRouter;
    use zxdx_core::{Gate, GateKind};

    #[test]
    fn prefers_already_executable_gate() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let topology = CircuitTopology::new(vec![
            Gate::plain(GateKind::Cx, vec![0, 3]).unwrap(),
            Gate::plain(GateKind::Cx, vec![1, 2]).unwrap(),
        ]);
        let busy = crate::router::BusyUntil::new(4);
        let mut cfg = SchedulerConfig::default();
        cfg.single_immediately = false;
        let picked = GreedyScheduler
            .pick(&topology, &ApspRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        assert_eq!(picked, 1);
    }

    #[test]
    fn single_immediately_prefers_single_qubit_gate() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let topology = CircuitTopology::new(vec![
            Gate::plain(GateKind::Cx, vec![1, 2]).unwrap(),
            Gate::plain(GateKind::H, vec![0]).unwrap(),
        ]);
        let busy = crate::router::BusyUntil::new(4);
        let mut cfg = SchedulerConfig::default();
        cfg.single_immediately = true;
        let picked = GreedyScheduler
            .pick(&topology, &ApspRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        assert_eq!(picked, 1);
    }

    #[test]
    fn falls_back_to_cost_when_nothing_executable() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let topology = CircuitTopology::new(vec![Gate::plain(GateKind::Cx, vec![0, 3]).unwrap()]);
        let busy = crate::router::BusyUntil::new(4);
        let mut cfg = SchedulerConfig::default();
        cfg.single_immediately = false;
        let picked = GreedyScheduler
            .pick(&topology, &ApspRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        assert_eq!(picked, 0);
    }
}
