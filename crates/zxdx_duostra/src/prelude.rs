//! Convenience re-exports for downstream crates and tests.

pub use crate::equivalence::check_equivalence;
pub use crate::error::{MappingError, Result};
pub use crate::placer::{DfsPlacer, Placement, Placer, RandomPlacer, StaticPlacer};
pub use crate::router::{ApspRouter, BusyUntil, DuostraRouter, RoutedOp, Router};
pub use crate::scheduler::{run_mapping, BaseScheduler, GreedyScheduler, MappingResult, RandomScheduler, Scheduler, SearchScheduler, StaticScheduler};
pub use crate::topology::{CircuitTopology, GateRecord};
pub use zxdx_core::config::SchedulerConfig;
pub use zxdx_core::{Device, Gate, GateKind};
