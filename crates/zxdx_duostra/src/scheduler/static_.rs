//! Static scheduler: returns gates in DAG topological order. Since every
//! gate's predecessors have strictly smaller ids by construction, the
//! lowest-id available gate is always next in topological order.

use zxdx_core::config::SchedulerConfig;
use zxdx_core::Device;

use super::Scheduler;
use crate::placer::Placement;
use crate::router::{BusyUntil, Router};
use crate::topology::CircuitTopology;

#[derive(Clone, Copy, Debug, Default)]
pub struct StaticScheduler;

impl Scheduler for StaticScheduler {
    fn pick(
        &mut self,
        topology: &CircuitTopology,
        _router: &dyn Router,
        _placement: &Placement,
        _busy: &BusyUntil,
        _device: &Device,
        _cfg: &SchedulerConfig,
    ) -> Option<usize> {
        topology.avail_gates().iter().copied().min()
    }
}
