//! Convenience re-exports for downstream crates and tests.

pub use crate::diagram::{DiagramStats, EdgeKind, VertexId, VertexKind, VertexRecord, ZxDiagram};
pub use crate::driver::{clifford, full_reduce, hadamard_reduce, interior_clifford, symbolic_reduce, to_z_graph, SimplifyReport};
pub use crate::error::{Result, ZxError};
pub use crate::io::{read_zx_exchange, write_zx_exchange};
pub use crate::rule::{NewVertex, Rule, VertexRef, ZXOperation};
pub use zxdx_core::Phase;
