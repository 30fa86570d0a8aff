//! The rewrite-rule framework: a pure matcher that proposes non-overlapping
//! matches, and an applier that replays a batched [`ZXOperation`] against a
//! diagram. Grounded on the taken-set discipline in
//! `pivotRule.cpp` and the `update(graph, op)` batched-replay pattern in
//! `bialgebraRule.cpp`.

use crate::diagram::{EdgeKind, VertexId, VertexKind, ZxDiagram};
use crate::error::Result;
use zxdx_core::Phase;

/// A single vertex to be added as part of a rewrite, referenced by later
/// edges in the same operation via its index into `vertices_to_add`
/// (resolved by [`ZXOperation::apply_to`] before any edge is added).
#[derive(Clone, Debug)]
pub struct NewVertex {
    pub kind: VertexKind,
    pub phase: Phase,
    pub qubit: i64,
    pub column: f64,
}

/// A reference to either an existing vertex or one of this operation's own
/// `vertices_to_add`, by index.
#[derive(Clone, Copy, Debug)]
pub enum VertexRef {
    Existing(VertexId),
    New(usize),
}

/// A batched, declarative diagram edit produced by a rule's `apply`. Replay
/// order is fixed: add vertices, add edges, remove edges, set phases on
/// surviving vertices, remove vertices, then sweep isolated vertices.
#[derive(Clone, Debug, Default)]
pub struct ZXOperation {
    pub vertices_to_add: Vec<NewVertex>,
    pub edges_to_add: Vec<(VertexRef, VertexRef, EdgeKind)>,
    pub edges_to_remove: Vec<(VertexId, VertexId, EdgeKind)>,
    /// Absolute phase assignments for vertices that survive this operation,
    /// computed from pre-mutation data by `find_matches`.
    pub phase_sets: Vec<(VertexId, Phase)>,
    pub vertices_to_remove: Vec<VertexId>,
}

impl ZXOperation {
    pub fn is_empty(&self) -> bool {
        self.vertices_to_add.is_empty()
            && self.edges_to_add.is_empty()
            && self.edges_to_remove.is_empty()
            && self.phase_sets.is_empty()
            && self.vertices_to_remove.is_empty()
    }

    /// Replays this operation against `diagram` in the fixed order.
    pub fn apply_to(self, diagram: &mut ZxDiagram) -> Result<()> {
        let mut resolved = Vec::with_capacity(self.vertices_to_add.len());
        for nv in self.vertices_to_add {
            resolved.push(diagram.add_vertex(nv.qubit, nv.kind, nv.phase, nv.column));
        }
        let resolve = |r: VertexRef| match r {
            VertexRef::Existing(id) => id,
            VertexRef::New(i) => resolved[i],
        };
        for (u, v, t) in self.edges_to_add {
            diagram.add_edge(resolve(u), resolve(v), t)?;
        }
        for (u, v, t) in self.edges_to_remove {
            diagram.remove_edge(u, v, t);
        }
        for (v, phase) in self.phase_sets {
            if diagram.contains(v) {
                diagram.set_phase(v, phase)?;
            }
        }
        for v in self.vertices_to_remove {
            if diagram.contains(v) {
                diagram.remove_vertex(v)?;
            }
        }
        diagram.remove_isolated_vertices();
        Ok(())
    }
}

/// A single local rewrite rule. `find_matches` is pure (never mutates the
/// diagram) and returns a set of non-overlapping matches, each already
/// converted to a [`ZXOperation`]; `apply` replays all of them against the
/// diagram in one pass.
pub trait Rule {
    /// A short, stable identifier used in logs and driver reports.
    fn name(&self) -> &'static str;

    /// Scans `diagram` for match sites, enforcing the taken-set discipline:
    /// no vertex participates in more than one returned match.
    fn find_matches(&self, diagram: &ZxDiagram) -> Vec<ZXOperation>;

    /// Replays every match found by `find_matches` and returns how many
    /// were applied.
    fn apply(&self, diagram: &mut ZxDiagram) -> Result<usize> {
        let matches = self.find_matches(diagram);
        let count = matches.len();
        for op in matches {
            op.apply_to(diagram)?;
        }
        Ok(count)
    }
}
