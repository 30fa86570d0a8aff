//! Mapping equivalence checker: verifies a routed physical circuit matches
//! a logical circuit up to device permutation, walking a per-logical-qubit
//! cursor and recognizing CX-CX-CX SWAP decompositions inline (§4.11).

use zxdx_core::{Device, Gate, GateKind};

use crate::error::{MappingError, Result};
use crate::placer::Placement;

/// Per-qubit cursor into the logical circuit: for logical qubit `q`,
/// `gates[q]` lists the indices (into the flat logical gate list) of every
/// gate touching `q`, in program order; `pos[q]` is the next expected one.
struct LogicalCursor<'a> {
    logical: &'a [Gate],
    gates_by_qubit: Vec<Vec<usize>>,
    pos: Vec<usize>,
}

impl<'a> LogicalCursor<'a> {
    fn new(logical: &'a [Gate], num_qubits: usize) -> LogicalCursor<'a> {
        let mut gates_by_qubit = vec![Vec::new(); num_qubits];
        for (idx, gate) in logical.iter().enumerate() {
            for &q in gate.qubits() {
                gates_by_qubit[q].push(idx);
            }
        }
        LogicalCursor {
            logical,
            gates_by_qubit,
            pos: vec![0; num_qubits],
        }
    }

    fn next_gate_index(&self, logical_qubit: usize) -> Option<usize> {
        self.gates_by_qubit
            .get(logical_qubit)
            .and_then(|g| g.get(self.pos[logical_qubit]))
            .copied()
    }

    fn advance(&mut self, logical_qubit: usize) {
        self.pos[logical_qubit] += 1;
    }

    fn all_consumed(&self) -> bool {
        self.gates_by_qubit
            .iter()
            .zip(&self.pos)
            .all(|(g, &p)| p >= g.len())
    }

    fn gate(&self, idx: usize) -> &Gate {
        &self.logical[idx]
    }
}

fn matching_kind_and_phase(a: &Gate, b: &Gate) -> bool {
    a.kind() == b.kind() && a.phase() == b.phase()
}

/// Checks whether `physical` (routed output for `logical` on `device`
/// starting from `initial_placement`) is equivalent to `logical`.
pub fn check_equivalence(
    logical: &[Gate],
    physical: &[Gate],
    device: &Device,
    initial_placement: &Placement,
    reverse: bool,
) -> Result<()> {
    let mut pi = initial_placement.clone();
    let mut cursor = LogicalCursor::new(logical, pi.num_logical());

    let order: Vec<usize> = if reverse {
        (0..physical.len()).rev().collect()
    } else {
        (0..physical.len()).collect()
    };

    let mut i = 0;
    while i < order.len() {
        let g = &physical[order[i]];

        if g.kind() == GateKind::Cx && g.qubits().len() == 2 {
            let (pa, pb) = (g.qubits()[0], g.qubits()[1]);
            let la = pi.logical_of(pa);
            let lb = pi.logical_of(pb);
            let expects_cx_here = la
                .zip(lb)
                .and_then(|(la, lb)| {
                    let idx_a = cursor.next_gate_index(la)?;
                    let idx_b = cursor.next_gate_index(lb)?;
                    if idx_a == idx_b {
                        Some(matching_kind_and_phase(cursor.gate(idx_a), g))
                    } else {
                        Some(false)
                    }
                })
                .unwrap_or(false);

            if !expects_cx_here && i + 2 < order.len() {
                let g2 = &physical[order[i + 1]];
                let g3 = &physical[order[i + 2]];
                let is_swap_decomposition = g2.kind() == GateKind::Cx
                    && g3.kind() == GateKind::Cx
                    && g2.qubits() == [pb, pa]
                    && g3.qubits() == [pa, pb];
                if is_swap_decomposition {
                    pi.swap_physical(pa, pb);
                    i += 3;
                    continue;
                }
            }
        }

        match g.qubits().len() {
            1 => {
                let p = g.qubits()[0];
                let l = pi
                    .logical_of(p)
                    .ok_or_else(|| MappingError::bad_placement(format!("physical qubit {p} hosts no logical qubit")))?;
                let idx = cursor
                    .next_gate_index(l)
                    .ok_or_else(|| MappingError::inequivalent(l, "physical gate with no remaining logical counterpart"))?;
                if !matching_kind_and_phase(cursor.gate(idx), g) {
                    return Err(MappingError::inequivalent(idx, "single-qubit kind/phase mismatch"));
                }
                cursor.advance(l);
            }
            2 => {
                let (p0, p1) = (g.qubits()[0], g.qubits()[1]);
                if !device.are_connected(p0, p1) {
                    return Err(MappingError::inequivalent(0, format!("physical qubits {p0},{p1} not adjacent")));
                }
                let l0 = pi
                    .logical_of(p0)
                    .ok_or_else(|| MappingError::bad_placement(format!("physical qubit {p0} hosts no logical qubit")))?;
                let l1 = pi
                    .logical_of(p1)
                    .ok_or_else(|| MappingError::bad_placement(format!("physical qubit {p1} hosts no logical qubit")))?;
                let idx0 = cursor
                    .next_gate_index(l0)
                    .ok_or_else(|| MappingError::inequivalent(l0, "physical two-qubit gate with no remaining logical counterpart"))?;
                let idx1 = cursor
                    .next_gate_index(l1)
                    .ok_or_else(|| MappingError::inequivalent(l1, "physical two-qubit gate with no remaining logical counterpart"))?;
                if idx0 != idx1 {
                    return Err(MappingError::inequivalent(idx0, "cursors disagree on the next logical gate"));
                }
                let expected = cursor.gate(idx0);
                if !matching_kind_and_phase(expected, g) {
                    return Err(MappingError::inequivalent(idx0, "two-qubit kind/phase mismatch"));
                }
                let expected_qubits: Vec<usize> = expected.qubits().iter().map(|&lq| pi.physical_of(lq)).collect();
                if expected_qubits != g.qubits() {
                    return Err(MappingError::inequivalent(idx0, "control/target orientation mismatch"));
                }
                cursor.advance(l0);
                cursor.advance(l1);
            }
            _ => {
                return Err(MappingError::inequivalent(0, "unsupported gate arity in equivalence check"));
            }
        }

        i += 1;
    }

    if !cursor.all_consumed() {
        return Err(MappingError::inequivalent(0, "logical circuit has unconsumed gates"));
    }

    Ok(())
}
