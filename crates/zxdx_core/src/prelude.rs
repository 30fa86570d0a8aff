//! Convenience re-exports for downstream crates.

pub use crate::config::{
    Candidates, Extremum, PipelineConfig, PlacerKind, RouterKind, SchedulerConfig, SchedulerKind,
    SimplifyConfig, SimplifyStrategy,
};
pub use crate::device::{CouplingEdge, Device, PhysicalQubit};
pub use crate::error::{CoreError, Result};
pub use crate::gate::{Gate, GateKind};
pub use crate::phase::{Phase, Rational};
pub use crate::util::{global_config, set_global_config, OrderedIdMap, Progress};
