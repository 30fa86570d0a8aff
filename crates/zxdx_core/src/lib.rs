//! Shared types for the ZX simplification engine and the Duostra
//! device-mapping core: exact rational phases, the circuit gate-kind
//! table, the device coupling graph, pipeline configuration and the
//! unified error type.
//!
//! # Example
//!
//! ```
//! use zxdx_core::prelude::*;
//!
//! let p = Phase::parse("-3/4*pi").unwrap();
//! assert_eq!(p, Phase::new(5, 4));
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod gate;
pub mod phase;
pub mod prelude;
pub mod util;

pub use device::{CouplingEdge, Device, PhysicalQubit};
pub use error::{CoreError, Result};
pub use gate::{Gate, GateKind};
pub use phase::{Phase, Rational};
