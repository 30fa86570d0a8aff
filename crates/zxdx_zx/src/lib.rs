//! The ZX-calculus diagram simplification engine: a typed vertex/edge
//! arena, twelve local rewrite rules matched and applied in fixed batches,
//! composite simplification strategies, and the ZX exchange file format.
//!
//! # Example
//!
//! ```
//! use zxdx_zx::prelude::*;
//!
//! let mut d = ZxDiagram::new();
//! let i0 = d.add_input(0, 0.0);
//! let z1 = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
//! let z2 = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 2.0);
//! let o3 = d.add_output(0, 3.0);
//! d.add_edge(i0, z1, EdgeKind::Simple).unwrap();
//! d.add_edge(z1, z2, EdgeKind::Simple).unwrap();
//! d.add_edge(z2, o3, EdgeKind::Simple).unwrap();
//!
//! full_reduce(&mut d).unwrap();
//! assert!(d.get(i0).unwrap().neighbors.contains(&(o3, EdgeKind::Simple)));
//! ```

pub mod diagram;
pub mod driver;
pub mod error;
pub mod io;
pub mod prelude;
pub mod rule;
pub mod rules;

pub use diagram::{DiagramStats, EdgeKind, VertexId, VertexKind, VertexRecord, ZxDiagram};
pub use driver::{clifford, full_reduce, hadamard_reduce, interior_clifford, symbolic_reduce, to_z_graph, SimplifyReport};
pub use error::{Result, ZxError};
pub use rule::{NewVertex, Rule, VertexRef, ZXOperation};
