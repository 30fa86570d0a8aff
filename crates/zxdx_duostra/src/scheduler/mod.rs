//! The scheduler: chooses which available gate to route next, and the
//! driving loop that runs a full mapping to completion (§4.10).

pub mod base;
pub mod greedy;
pub mod random;
pub mod search;
pub mod static_;

pub use base::BaseScheduler;
pub use greedy::GreedyScheduler;
pub use random::RandomScheduler;
pub use search::SearchScheduler;
pub use static_::StaticScheduler;

use tracing::{debug, info};
use zxdx_core::config::SchedulerConfig;
use zxdx_core::Device;

use crate::error::{MappingError, Result};
use crate::placer::Placement;
use crate::router::{BusyUntil, RoutedOp, Router};
use crate::topology::CircuitTopology;

/// A strategy that picks one gate id out of `topology.avail_gates()`.
pub trait Scheduler {
    fn pick(
        &mut self,
        topology: &CircuitTopology,
        router: &dyn Router,
        placement: &Placement,
        busy: &BusyUntil,
        device: &Device,
        cfg: &SchedulerConfig,
    ) -> Option<usize>;
}

/// Truncates `avail_gates` to the configured top-K candidate window.
pub(crate) fn candidate_window(topology: &CircuitTopology, cfg: &SchedulerConfig) -> Vec<usize> {
    use zxdx_core::config::Candidates;
    match cfg.candidates {
        Candidates::Unbounded => topology.avail_gates().to_vec(),
        Candidates::Limited(k) => topology.avail_gates().iter().take(k).copied().collect(),
    }
}

/// The full operation sequence produced by one mapping run, plus the
/// final placement.
#[derive(Debug)]
pub struct MappingResult {
    pub ops: Vec<RoutedOp>,
    pub final_placement: Placement,
}

/// Drives `scheduler`+`router` over `topology` to completion: the state
/// machine of §4.10 (`Idle -> PickCandidate -> RouteOrSwap -> UpdatePlacement
/// -> UpdateTopology -> Idle`), one atomic step per iteration.
pub fn run_mapping(
    topology: &mut CircuitTopology,
    device: &Device,
    mut placement: Placement,
    router: &dyn Router,
    scheduler: &mut dyn Scheduler,
    cfg: &SchedulerConfig,
) -> Result<MappingResult> {
    let mut busy = BusyUntil::new(device.num_qubits());
    let mut ops = Vec::new();

    while !topology.avail_gates().is_empty() {
        let gate_id = scheduler
            .pick(topology, router, &placement, &busy, device, cfg)
            .ok_or(MappingError::NoAvailableGates)?;
        let gate = topology.gate(gate_id).clone();
        let routed = router.route(&gate, &mut placement, &mut busy, device, cfg.orient)?;
        debug!(gate_id, ops = routed.len(), "routed gate");
        ops.extend(routed);
        topology.update_avail(gate_id);
    }

    info!(gates = topology.num_gates(), ops = ops.len(), "mapping complete");
    Ok(MappingResult {
        ops,
        final_placement: placement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placer::{Placer, StaticPlacer};
    use crate::router::tests::line_device;
    use crate::router::DuostraRouter;
    use zxdx_core::{Gate, GateKind};

    #[test]
    fn s5_full_mapping_produces_one_cx_and_two_swaps() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let mut topology = CircuitTopology::new(vec![Gate::plain(GateKind::Cx, vec![0, 3]).unwrap()]);
        let router = DuostraRouter;
        let mut scheduler = BaseScheduler;
        let cfg = SchedulerConfig::default();

        let result = run_mapping(&mut topology, &dev, placement, &router, &mut scheduler, &cfg).unwrap();

        let swaps = result.ops.iter().filter(|op| matches!(op, RoutedOp::Swap(_, _))).count();
        let gates = result.ops.iter().filter(|op| matches!(op, RoutedOp::Gate(_))).count();
        assert_eq!(swaps, 2);
        assert_eq!(gates, 1);
    }
}
