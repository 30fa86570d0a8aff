//! Error types for the ZX simplification engine.

use thiserror::Error;
use zxdx_core::CoreError;

/// Unified error type for `zxdx-zx` operations.
#[derive(Error, Debug)]
pub enum ZxError {
    /// Propagated from `zxdx-core` (phase parse/arithmetic failures).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A vertex id was referenced that does not exist in the diagram (it
    /// was never created, or has already been removed).
    #[error("unknown vertex id {0}")]
    UnknownVertex(u64),

    /// A structural precondition was violated (e.g. `toggle_vertex` called
    /// on a boundary vertex).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The ZX exchange format rejected malformed input.
    #[error("exchange format error at line {line}: {reason}")]
    ExchangeParse { line: usize, reason: String },

    /// A duplicate vertex id was encountered while reading the exchange
    /// format.
    #[error("duplicate vertex id {0} in exchange format input")]
    DuplicateId(u64),
}

/// Result type alias for `zxdx-zx` operations.
pub type Result<T> = std::result::Result<T, ZxError>;

impl ZxError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn exchange_parse(line: usize, reason: impl Into<String>) -> Self {
        Self::ExchangeParse {
            line,
            reason: reason.into(),
        }
    }
}
