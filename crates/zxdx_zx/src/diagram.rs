//! The ZX-diagram data model: a typed graph of vertices (boundary/Z/X/H-box)
//! joined by typed edges (simple/Hadamard), held in an arena indexed by a
//! monotonically assigned [`VertexId`] (§9's design note).

use crate::error::{Result, ZxError};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use zxdx_core::Phase;

/// A stable, monotonically assigned vertex identifier. Removed vertices are
/// never reused within a diagram instance.
pub type VertexId = u64;

/// The four vertex types.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum VertexKind {
    Boundary,
    Z,
    X,
    HBox,
}

impl VertexKind {
    pub fn is_spider(self) -> bool {
        matches!(self, VertexKind::Z | VertexKind::X)
    }

    /// The opposite spider color; only meaningful for `Z`/`X`.
    pub fn opposite_spider(self) -> VertexKind {
        match self {
            VertexKind::Z => VertexKind::X,
            VertexKind::X => VertexKind::Z,
            other => other,
        }
    }
}

/// The two edge types. Composition law: `Simple ∘ Simple = Simple`,
/// `Simple ∘ Hadamard = Hadamard`, `Hadamard ∘ Hadamard = Simple`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    Simple,
    Hadamard,
}

impl EdgeKind {
    pub fn toggle(self) -> EdgeKind {
        match self {
            EdgeKind::Simple => EdgeKind::Hadamard,
            EdgeKind::Hadamard => EdgeKind::Simple,
        }
    }

    pub fn compose(self, other: EdgeKind) -> EdgeKind {
        if self == other {
            EdgeKind::Simple
        } else {
            EdgeKind::Hadamard
        }
    }
}

/// A vertex's full record: type, phase, layout hints, and its neighbor
/// multiset keyed by `(other_vertex, edge_type)`.
#[derive(Clone, Debug)]
pub struct VertexRecord {
    pub kind: VertexKind,
    pub phase: Phase,
    pub qubit: i64,
    pub column: f64,
    pub neighbors: IndexSet<(VertexId, EdgeKind)>,
}

impl VertexRecord {
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Aggregate statistics over a diagram, used by tests asserting the
/// rule-convergence potential (size + H-box count) strictly decreases.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DiagramStats {
    pub boundary_count: usize,
    pub z_count: usize,
    pub x_count: usize,
    pub hbox_count: usize,
    pub simple_edge_count: usize,
    pub hadamard_edge_count: usize,
}

impl DiagramStats {
    /// The potential used to prove rule-to-saturation termination: vertex
    /// count plus H-box count.
    pub fn potential(&self) -> usize {
        self.boundary_count + self.z_count + self.x_count + self.hbox_count + self.hbox_count
    }
}

/// An ordered set of vertices with distinguished input/output boundary
/// sequences, a monotone id counter, and no shared ownership: edges are
/// plain `(VertexId, EdgeKind)` pairs rather than back-references.
#[derive(Clone, Debug, Default)]
pub struct ZxDiagram {
    vertices: IndexMap<VertexId, VertexRecord>,
    next_id: VertexId,
    inputs: Vec<VertexId>,
    outputs: Vec<VertexId>,
}

impl ZxDiagram {
    pub fn new() -> ZxDiagram {
        ZxDiagram::default()
    }

    fn fresh_id(&mut self) -> VertexId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn get(&self, v: VertexId) -> Result<&VertexRecord> {
        self.vertices.get(&v).ok_or(ZxError::UnknownVertex(v))
    }

    fn get_mut(&mut self, v: VertexId) -> Result<&mut VertexRecord> {
        self.vertices.get_mut(&v).ok_or(ZxError::UnknownVertex(v))
    }

    /// Overwrites `v`'s phase. A no-op on the edge-fusion invariant: callers
    /// must not set a nonzero phase on a boundary vertex.
    pub fn set_phase(&mut self, v: VertexId, phase: Phase) -> Result<()> {
        self.get_mut(v)?.phase = phase;
        Ok(())
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains_key(&v)
    }

    pub fn inputs(&self) -> &[VertexId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[VertexId] {
        &self.outputs
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Creates a boundary vertex recorded in the input list at logical
    /// qubit `q`.
    pub fn add_input(&mut self, q: i64, col: f64) -> VertexId {
        let id = self.add_vertex(q, VertexKind::Boundary, Phase::ZERO, col);
        self.inputs.push(id);
        id
    }

    /// Creates a boundary vertex recorded in the output list at logical
    /// qubit `q`.
    pub fn add_output(&mut self, q: i64, col: f64) -> VertexId {
        let id = self.add_vertex(q, VertexKind::Boundary, Phase::ZERO, col);
        self.outputs.push(id);
        id
    }

    /// Creates a non-boundary vertex.
    pub fn add_vertex(&mut self, q: i64, kind: VertexKind, phase: Phase, col: f64) -> VertexId {
        let id = self.fresh_id();
        let phase = if kind == VertexKind::Boundary { Phase::ZERO } else { phase };
        self.vertices.insert(
            id,
            VertexRecord {
                kind,
                phase,
                qubit: q,
                column: col,
                neighbors: IndexSet::new(),
            },
        );
        id
    }

    /// Inserts `(v, t)` into `u`'s neighbors and symmetrically `(u, t)` into
    /// `v`'s. If an edge of the *same* type already exists between `u` and
    /// `v`, it is fused per the Z/X-spider rules of §4.2: for two same-color
    /// spiders, a parallel edge of identical type annihilates (the existing
    /// edge is removed, absorbing a scalar); otherwise the duplicate is
    /// simply dropped.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, t: EdgeKind) -> Result<()> {
        if !self.contains(u) {
            return Err(ZxError::UnknownVertex(u));
        }
        if !self.contains(v) {
            return Err(ZxError::UnknownVertex(v));
        }

        let already_present = self.get(u)?.neighbors.contains(&(v, t));
        if already_present {
            let same_color_spiders = {
                let ku = self.get(u)?.kind;
                let kv = self.get(v)?.kind;
                ku.is_spider() && ku == kv
            };
            if same_color_spiders {
                self.remove_edge(u, v, t);
            }
            return Ok(());
        }

        self.get_mut(u)?.neighbors.insert((v, t));
        if u != v {
            self.get_mut(v)?.neighbors.insert((u, t));
        }
        Ok(())
    }

    /// Removes exactly one edge of type `t` between `u` and `v`, if present.
    /// A no-op if the edge does not exist (structural edits don't fail on
    /// callers' preconditions not holding, per §4.2).
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId, t: EdgeKind) {
        if let Some(rec) = self.vertices.get_mut(&u) {
            rec.neighbors.shift_remove(&(v, t));
        }
        if u != v {
            if let Some(rec) = self.vertices.get_mut(&v) {
                rec.neighbors.shift_remove(&(u, t));
            }
        }
    }

    /// Severs all incident edges symmetrically, then deletes `v`.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        let neighbors: Vec<(VertexId, EdgeKind)> =
            self.get(v)?.neighbors.iter().copied().collect();
        for (other, t) in neighbors {
            if other != v {
                if let Some(rec) = self.vertices.get_mut(&other) {
                    rec.neighbors.shift_remove(&(v, t));
                }
            }
        }
        self.vertices.shift_remove(&v);
        self.inputs.retain(|&id| id != v);
        self.outputs.retain(|&id| id != v);
        Ok(())
    }

    /// Deletes every non-boundary vertex of degree 0.
    pub fn remove_isolated_vertices(&mut self) {
        let isolated: Vec<VertexId> = self
            .vertices
            .iter()
            .filter(|(_, rec)| rec.kind != VertexKind::Boundary && rec.degree() == 0)
            .map(|(&id, _)| id)
            .collect();
        for id in isolated {
            self.vertices.shift_remove(&id);
        }
    }

    /// Switches `v` between `Z` and `X` while toggling every incident edge
    /// type; used by local-complement and pivot.
    pub fn toggle_vertex(&mut self, v: VertexId) -> Result<()> {
        let neighbors: Vec<(VertexId, EdgeKind)> = {
            let rec = self.get(v)?;
            if !rec.kind.is_spider() {
                return Err(ZxError::precondition(format!(
                    "toggle_vertex requires a Z or X vertex, got {:?}",
                    rec.kind
                )));
            }
            rec.neighbors.iter().copied().collect()
        };
        for (other, t) in &neighbors {
            let other = *other;
            let t = *t;
            if other != v {
                if let Some(rec) = self.vertices.get_mut(&other) {
                    rec.neighbors.shift_remove(&(v, t));
                    rec.neighbors.insert((v, t.toggle()));
                }
            }
        }
        let rec = self.get_mut(v)?;
        rec.kind = rec.kind.opposite_spider();
        rec.neighbors = neighbors.into_iter().map(|(o, t)| (o, t.toggle())).collect();
        Ok(())
    }

    /// Inserts a new Z vertex `b` between `from` and `protected`, connected
    /// to `from` by edge type `t` and to `protected` by `toggle(t)`. Used to
    /// decouple a boundary or otherwise forbidden vertex from a rewrite
    /// site without changing the diagram's semantics.
    pub fn add_buffer(&mut self, protected: VertexId, from: VertexId, t: EdgeKind) -> Result<VertexId> {
        let qubit = self.get(protected)?.qubit;
        self.remove_edge(from, protected, t);
        let buffer = self.add_vertex(qubit, VertexKind::Z, Phase::ZERO, 0.0);
        self.add_edge(from, buffer, t)?;
        self.add_edge(buffer, protected, t.toggle())?;
        Ok(buffer)
    }

    /// Unfuses `v.phase - keep` onto a new Z gadget leaf attached by a
    /// Hadamard edge, leaving `v` with `keep`. Returns the new leaf's id.
    pub fn transfer_phase(&mut self, v: VertexId, keep: Phase) -> Result<VertexId> {
        let (qubit, remainder) = {
            let rec = self.get(v)?;
            (rec.qubit, rec.phase - keep)
        };
        self.get_mut(v)?.phase = keep;
        let leaf = self.add_vertex(qubit, VertexKind::Z, remainder, 0.0);
        self.add_edge(v, leaf, EdgeKind::Hadamard)?;
        Ok(leaf)
    }

    /// Conjugates every phase and swaps the input/output role of
    /// boundaries.
    pub fn adjoint(&mut self) {
        for rec in self.vertices.values_mut() {
            rec.phase = -rec.phase;
        }
        std::mem::swap(&mut self.inputs, &mut self.outputs);
        self.inputs.reverse();
        self.outputs.reverse();
    }

    /// Concatenates `self` with `other`, identifying `self`'s outputs with
    /// `other`'s inputs by logical qubit. `other` is consumed.
    pub fn compose(&mut self, other: ZxDiagram) -> Result<()> {
        if self.outputs.len() != other.inputs.len() {
            return Err(ZxError::precondition(
                "compose requires equal boundary arity on the composed edge",
            ));
        }
        let mut remap: IndexMap<VertexId, VertexId> = IndexMap::new();
        for (&old_id, rec) in &other.vertices {
            if other.inputs.contains(&old_id) {
                continue;
            }
            let new_id = self.add_vertex(rec.qubit, rec.kind, rec.phase, rec.column);
            remap.insert(old_id, new_id);
        }
        for (&old_id, rec) in &other.vertices {
            if other.inputs.contains(&old_id) {
                continue;
            }
            let new_u = remap[&old_id];
            for &(old_v, t) in &rec.neighbors {
                if other.inputs.contains(&old_v) {
                    continue;
                }
                if let Some(&new_v) = remap.get(&old_v) {
                    if new_u < new_v || (new_u == new_v) {
                        self.add_edge(new_u, new_v, t)?;
                    }
                }
            }
        }
        let self_outputs = std::mem::take(&mut self.outputs);
        for (self_out, other_in) in self_outputs.iter().zip(other.inputs.iter()) {
            let other_interior_neighbor = other
                .get(*other_in)
                .map_err(|_| ZxError::precondition("malformed composed diagram"))?
                .neighbors
                .iter()
                .next()
                .copied();
            if let Some((interior, t)) = other_interior_neighbor {
                if let Some(&new_interior) = remap.get(&interior) {
                    self.add_edge(*self_out, new_interior, t)?;
                }
            }
        }
        self.outputs = other.outputs.iter().filter_map(|id| remap.get(id).copied()).collect();
        Ok(())
    }

    /// Disjoint-unions `self` with `other`, lifting `other`'s logical qubit
    /// ids by `self`'s current qubit count.
    pub fn tensor_product(&self, other: &ZxDiagram, qubit_offset: i64) -> ZxDiagram {
        let mut out = self.clone();
        let mut remap: IndexMap<VertexId, VertexId> = IndexMap::new();
        for (&old_id, rec) in &other.vertices {
            let new_id = out.add_vertex(rec.qubit + qubit_offset, rec.kind, rec.phase, rec.column);
            remap.insert(old_id, new_id);
        }
        let mut seen: IndexSet<(VertexId, VertexId, EdgeKind)> = IndexSet::new();
        for (&old_id, rec) in &other.vertices {
            let new_u = remap[&old_id];
            for &(old_v, t) in &rec.neighbors {
                let new_v = remap[&old_v];
                let key = if new_u <= new_v { (new_u, new_v, t) } else { (new_v, new_u, t) };
                if seen.insert(key) {
                    let _ = out.add_edge(new_u, new_v, t);
                }
            }
        }
        out.inputs.extend(other.inputs.iter().map(|id| remap[id]));
        out.outputs.extend(other.outputs.iter().map(|id| remap[id]));
        out
    }

    /// Visits each unordered edge exactly once, the lower-id endpoint
    /// first.
    pub fn for_each_edge(&self, mut f: impl FnMut(VertexId, VertexId, EdgeKind)) {
        for (&u, rec) in &self.vertices {
            for &(v, t) in &rec.neighbors {
                if u <= v {
                    f(u, v, t);
                }
            }
        }
    }

    /// Aggregate vertex/edge counts by type, used by tests that assert the
    /// rule-convergence potential.
    pub fn stats(&self) -> DiagramStats {
        let mut stats = DiagramStats::default();
        for rec in self.vertices.values() {
            match rec.kind {
                VertexKind::Boundary => stats.boundary_count += 1,
                VertexKind::Z => stats.z_count += 1,
                VertexKind::X => stats.x_count += 1,
                VertexKind::HBox => stats.hbox_count += 1,
            }
        }
        self.for_each_edge(|_, _, t| match t {
            EdgeKind::Simple => stats.simple_edge_count += 1,
            EdgeKind::Hadamard => stats.hadamard_edge_count += 1,
        });
        stats
    }

    /// True iff every invariant of §3 holds: symmetric adjacency, boundary
    /// vertices have degree 1 and phase 0, and inputs/outputs are all
    /// boundary vertices. Used by tests, not called on the hot path.
    pub fn check_invariants(&self) -> Result<()> {
        for (&id, rec) in &self.vertices {
            for &(other, t) in &rec.neighbors {
                if other == id {
                    continue;
                }
                let other_rec = self.get(other)?;
                if !other_rec.neighbors.contains(&(id, t)) {
                    return Err(ZxError::precondition(format!(
                        "adjacency asymmetry between {id} and {other}"
                    )));
                }
            }
            if rec.kind == VertexKind::Boundary {
                if rec.degree() != 1 {
                    return Err(ZxError::precondition(format!(
                        "boundary vertex {id} has degree {}",
                        rec.degree()
                    )));
                }
                if !rec.phase.is_zero() {
                    return Err(ZxError::precondition(format!(
                        "boundary vertex {id} has nonzero phase"
                    )));
                }
            }
        }
        for id in self.inputs.iter().chain(self.outputs.iter()) {
            if self.get(*id)?.kind != VertexKind::Boundary {
                return Err(ZxError::precondition(format!(
                    "input/output {id} is not a boundary vertex"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line3() -> (ZxDiagram, VertexId, VertexId, VertexId, VertexId) {
        let mut d = ZxDiagram::new();
        let i0 = d.add_input(0, 0.0);
        let z1 = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
        let z2 = d.add_vertex(0, VertexKind::Z, Phase::new(1, 4), 2.0);
        let o3 = d.add_output(0, 3.0);
        d.add_edge(i0, z1, EdgeKind::Simple).unwrap();
        d.add_edge(z1, z2, EdgeKind::Simple).unwrap();
        d.add_edge(z2, o3, EdgeKind::Simple).unwrap();
        (d, i0, z1, z2, o3)
    }

    #[test]
    fn adjacency_is_symmetric() {
        let (d, ..) = line3();
        d.check_invariants().unwrap();
    }

    #[test]
    fn boundary_arity_and_phase() {
        let (d, i0, _, _, o3) = line3();
        assert_eq!(d.get(i0).unwrap().degree(), 1);
        assert_eq!(d.get(o3).unwrap().phase, Phase::ZERO);
    }

    #[test]
    fn remove_vertex_severs_symmetrically() {
        let (mut d, _, z1, z2, _) = line3();
        d.remove_vertex(z1).unwrap();
        assert!(!d.get(z2).unwrap().neighbors.iter().any(|&(o, _)| o == z1));
    }

    #[test]
    fn same_color_duplicate_simple_edge_annihilates() {
        let mut d = ZxDiagram::new();
        let a = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
        let b = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
        d.add_edge(a, b, EdgeKind::Simple).unwrap();
        d.add_edge(a, b, EdgeKind::Simple).unwrap();
        assert_eq!(d.get(a).unwrap().degree(), 0);
        assert_eq!(d.get(b).unwrap().degree(), 0);
    }

    #[test]
    fn toggle_vertex_flips_color_and_incident_edges() {
        let mut d = ZxDiagram::new();
        let a = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
        let b = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 1.0);
        d.add_edge(a, b, EdgeKind::Hadamard).unwrap();
        d.toggle_vertex(a).unwrap();
        assert_eq!(d.get(a).unwrap().kind, VertexKind::X);
        assert!(d.get(a).unwrap().neighbors.contains(&(b, EdgeKind::Simple)));
        assert!(d.get(b).unwrap().neighbors.contains(&(a, EdgeKind::Simple)));
    }

    #[test]
    fn for_each_edge_visits_lower_id_first() {
        let (d, i0, z1, z2, o3) = line3();
        let mut seen = Vec::new();
        d.for_each_edge(|u, v, _| seen.push((u, v)));
        assert_eq!(seen, vec![(i0, z1), (z1, z2), (z2, o3)]);
    }

    #[test]
    fn remove_isolated_vertices_drops_degree_zero_interior() {
        let mut d = ZxDiagram::new();
        let z = d.add_vertex(0, VertexKind::Z, Phase::ZERO, 0.0);
        d.remove_isolated_vertices();
        assert!(!d.contains(z));
    }
}
