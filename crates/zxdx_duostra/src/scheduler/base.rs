//! Base scheduler: returns the first available gate.

use zxdx_core::config::SchedulerConfig;
use zxdx_core::Device;

use super::Scheduler;
use crate::placer::Placement;
use crate::router::{BusyUntil, Router};
use crate::topology::CircuitTopology;

#[derive(Clone, Copy, Debug, Default)]
pub struct BaseScheduler;

impl Scheduler for BaseScheduler {
    fn pick(
        &mut self,
        topology: &CircuitTopology,
        _router: &dyn Router,
        _placement: &Placement,
        _busy: &BusyUntil,
        _device: &Device,
        _cfg: &SchedulerConfig,
    ) -> Option<usize> {
        topology.avail_gates().first().copied()
    }
}
