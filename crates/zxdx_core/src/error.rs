//! Error types shared by the ZX simplifier and the Duostra mapper.

use thiserror::Error;

/// Unified error type for `zxdx-core` and its consumers.
#[derive(Error, Debug)]
pub enum CoreError {
    // ============ Phase errors ============
    /// A `Phase` was constructed with a zero denominator.
    #[error("phase denominator must be nonzero")]
    PhaseZeroDenominator,

    /// Division of a phase by a zero rational.
    #[error("phase division by zero")]
    PhaseDivisionByZero,

    /// The phase parser rejected malformed input.
    #[error("malformed phase expression: {0:?}")]
    PhaseParse(String),

    // ============ Device / config errors ============
    /// Generic device description error.
    #[error("device error: {0}")]
    Device(String),

    /// A device text description failed to parse.
    #[error("device file parse error at line {line}: {reason}")]
    DeviceParse { line: usize, reason: String },

    /// A qubit index referenced in a circuit or coupling list does not exist.
    #[error("invalid qubit index {0}, device has {1} qubits")]
    InvalidQubit(usize, usize),

    // ============ Gate errors ============
    /// The qubit list passed to a gate did not match its kind's arity.
    #[error("gate kind {kind} expects {expected} qubit(s), got {got}")]
    GateArityMismatch {
        kind: String,
        expected: String,
        got: usize,
    },

    /// An unrecognized gate kind name was encountered while parsing.
    #[error("unknown gate kind {0:?}")]
    UnknownGateKind(String),

    /// Configuration error (malformed JSON, unknown option value).
    #[error("configuration error: {0}")]
    Config(String),

    /// The device's coupling graph is disconnected and a gate crosses
    /// components — routing is impossible.
    #[error("device graph is disconnected: qubit {0} cannot reach qubit {1}")]
    Disconnected(usize, usize),

    // ============ I/O ============
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for `zxdx-core` operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Creates a device error with the given message.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a device file parse error at the given 1-based line number.
    pub fn device_parse(line: usize, reason: impl Into<String>) -> Self {
        Self::DeviceParse {
            line,
            reason: reason.into(),
        }
    }

    /// Creates a gate-arity-mismatch error.
    pub fn gate_arity(kind: impl Into<String>, expected: impl Into<String>, got: usize) -> Self {
        Self::GateArityMismatch {
            kind: kind.into(),
            expected: expected.into(),
            got,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_line() {
        let err = CoreError::device_parse(4, "unknown section 'gate sett:'");
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains("unknown section"));
    }

    #[test]
    fn result_type_roundtrips() {
        fn returns_ok() -> Result<i32> {
            Ok(1)
        }
        fn returns_err() -> Result<i32> {
            Err(CoreError::config("bad value"))
        }
        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
