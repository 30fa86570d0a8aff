//! Random scheduler: uniform over `avail_gates`, using a seedable RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use zxdx_core::config::SchedulerConfig;
use zxdx_core::Device;

use super::Scheduler;
use crate::placer::Placement;
use crate::router::{BusyUntil, Router};
use crate::topology::CircuitTopology;

pub struct RandomScheduler {
    rng: StdRng,
}

impl RandomScheduler {
    pub fn new(seed: u64) -> RandomScheduler {
        RandomScheduler {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Scheduler for RandomScheduler {
    fn pick(
        &mut self,
        topology: &CircuitTopology,
        _router: &dyn Router,
        _placement: &Placement,
        _busy: &BusyUntil,
        _device: &Device,
        _cfg: &SchedulerConfig,
    ) -> Option<usize> {
        topology.avail_gates().choose(&mut self.rng).copied()
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
    fn always_picks_from_avail_set() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let topology = CircuitTopology::new(vec![
            Gate::plain(GateKind::H, vec![0]).unwrap(),
            Gate::plain(GateKind::H, vec![1]).unwrap(),
        ]);
        let busy = crate::router::BusyUntil::new(4);
        let cfg = SchedulerConfig::default();
        let mut scheduler = RandomScheduler::new(42);
        let picked = scheduler
            .pick(&topology, &ApspRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        assert!(topology.avail_gates().contains(&picked));
    }

    #[test]
    fn same_seed_picks_same_gate() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let topology = CircuitTopology::new(vec![
            Gate::plain(GateKind::H, vec![0]).unwrap(),
            Gate::plain(GateKind::H, vec![1]).unwrap(),
            Gate::plain(GateKind::H, vec![2]).unwrap(),
        ]);
        let busy = crate::router::BusyUntil::new(4);
        let cfg = SchedulerConfig::default();
        let a = RandomScheduler::new(9)
            .pick(&topology, &ApspRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        let b = RandomScheduler::new(9)
            .pick(&topology, &ApspRouter, &placement, &busy, &dev, &cfg)
            .unwrap();
        assert_eq!(a, b);
    }
}
