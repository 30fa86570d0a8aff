//! The Duostra device-mapping core: a circuit-topology DAG, device-aware
//! placement, routers that bring two-qubit gates adjacent, schedulers that
//! pick the next gate to route, and a mapping equivalence checker.
//!
//! # Example
//!
//! ```
//! use zxdx_core::config::SchedulerConfig;
//! use zxdx_core::device::{CouplingEdge, PhysicalQubit};
//! use zxdx_core::{Device, Gate, GateKind};
//! use zxdx_duostra::placer::{Placer, StaticPlacer};
//! use zxdx_duostra::router::DuostraRouter;
//! use zxdx_duostra::scheduler::{run_mapping, BaseScheduler};
//! use zxdx_duostra::topology::CircuitTopology;
//!
//! let qubits = vec![PhysicalQubit { single_gate_delay: 35.0, single_gate_error: 1e-4 }; 4];
//! let edges = (0..3)
//!     .map(|i| CouplingEdge { a: i, b: i + 1, cx_delay: 300.0, cx_error: 1e-2 })
//!     .collect();
//! let device = Device::new("line4", Vec::new(), qubits, edges);
//! let placement = StaticPlacer.place(4, &device).unwrap();
//! let mut topology = CircuitTopology::new(vec![Gate::plain(GateKind::Cx, vec![0, 3]).unwrap()]);
//!
//! let result = run_mapping(
//!     &mut topology,
//!     &device,
//!     placement,
//!     &DuostraRouter,
//!     &mut BaseScheduler,
//!     &SchedulerConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(result.ops.len(), 3);
//! ```

pub mod equivalence;
pub mod error;
pub mod placer;
pub mod prelude;
pub mod router;
pub mod scheduler;
pub mod topology;

pub use equivalence::check_equivalence;
pub use error::{MappingError, Result};
pub use placer::{DfsPlacer, Placement, Placer, RandomPlacer, StaticPlacer};
pub use router::{ApspRouter, BusyUntil, DuostraRouter, RoutedOp, Router};
pub use scheduler::{run_mapping, BaseScheduler, GreedyScheduler, MappingResult, RandomScheduler, Scheduler, SearchScheduler, StaticScheduler};
pub use topology::{CircuitTopology, GateRecord};
