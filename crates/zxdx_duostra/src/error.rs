//! Error type for the device-mapping pipeline: topology construction,
//! routing, scheduling and equivalence checking.

use thiserror::Error;
use zxdx_core::CoreError;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A qubit index in a gate record exceeds the circuit's declared width.
    #[error("gate references logical qubit {0}, circuit declares {1} qubits")]
    InvalidLogicalQubit(usize, usize),

    /// A placement isn't a bijection onto the device's physical qubits.
    #[error("placement is not a valid bijection: {0}")]
    BadPlacement(String),

    /// The router could not bring a gate's qubits adjacent because the
    /// device graph is disconnected across them.
    #[error("cannot route gate on qubits {0:?}: {1}")]
    RoutingInfeasible(Vec<usize>, String),

    /// An equivalence check found a mismatch.
    #[error("mapping inequivalent at logical gate {gate_id}: {reason}")]
    Inequivalent { gate_id: usize, reason: String },

    /// A scheduler step was asked to act with nothing available.
    #[error("scheduler has no available gates")]
    NoAvailableGates,
}

pub type Result<T> = std::result::Result<T, MappingError>;

impl MappingError {
    pub fn bad_placement(msg: impl Into<String>) -> Self {
        Self::BadPlacement(msg.into())
    }

    pub fn routing_infeasible(qubits: Vec<usize>, reason: impl Into<String>) -> Self {
        Self::RoutingInfeasible(qubits, reason.into())
    }

    pub fn inequivalent(gate_id: usize, reason: impl Into<String>) -> Self {
        Self::Inequivalent {
            gate_id,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_gate_id() {
        let err = MappingError::inequivalent(3, "kind mismatch");
        assert!(err.to_string().contains('3'));
    }
}
