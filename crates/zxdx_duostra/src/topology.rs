//! Circuit-topology DAG: per-qubit dependency tracking and the
//! availability frontier the schedulers consume (§4.6).

use std::collections::HashMap;
use zxdx_core::Gate;

/// A single gate plus its position in the original circuit order.
#[derive(Clone, Debug)]
pub struct GateRecord {
    pub id: usize,
    pub gate: Gate,
}

/// The circuit's dependency DAG: for each gate, the successors unlocked by
/// executing it, and a live predecessor counter used to maintain
/// `avail_gates`.
///
/// `remaining_preds` replaces the original's separate "executed gates"
/// count map: each gate starts with its in-degree and counts down to zero
/// as predecessors execute, at which point it enters `avail_gates`.
#[derive(Clone, Debug)]
pub struct CircuitTopology {
    gates: Vec<GateRecord>,
    successors: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
    remaining_preds: Vec<usize>,
    avail_gates: Vec<usize>,
    executed: Vec<bool>,
}

impl CircuitTopology {
    /// Builds the DAG from a linear gate list: each gate is linked to the
    /// most recent prior gate on each qubit it touches.
    pub fn new(gates: Vec<Gate>) -> CircuitTopology {
        let n = gates.len();
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        let mut last_gate_on_qubit: HashMap<usize, usize> = HashMap::new();

        let records: Vec<GateRecord> = gates
            .into_iter()
            .enumerate()
            .map(|(id, gate)| GateRecord { id, gate })
            .collect();

        for record in &records {
            for &q in record.gate.qubits() {
                if let Some(&prev) = last_gate_on_qubit.get(&q) {
                    successors[prev].push(record.id);
                    in_degree[record.id] += 1;
                }
                last_gate_on_qubit.insert(q, record.id);
            }
        }

        let avail_gates: Vec<usize> = in_degree
            .iter()
            .enumerate()
            .filter_map(|(id, &deg)| if deg == 0 { Some(id) } else { None })
            .collect();

        CircuitTopology {
            gates: records,
            successors,
            remaining_preds: in_degree.clone(),
            in_degree,
            avail_gates,
            executed: vec![false; n],
        }
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn gate(&self, id: usize) -> &Gate {
        &self.gates[id].gate
    }

    pub fn is_executed(&self, id: usize) -> bool {
        self.executed[id]
    }

    pub fn all_executed(&self) -> bool {
        self.executed.iter().all(|&e| e)
    }

    /// Gates currently ready to route: in-degree exhausted, not yet
    /// executed.
    pub fn avail_gates(&self) -> &[usize] {
        &self.avail_gates
    }

    /// Marks `gate_id` executed, decrements every successor's remaining
    /// predecessor count, and admits any successor that reaches zero into
    /// `avail_gates`.
    pub fn update_avail(&mut self, gate_id: usize) {
        debug_assert!(!self.executed[gate_id]);
        self.executed[gate_id] = true;
        self.avail_gates.retain(|&g| g != gate_id);

        for &succ in &self.successors[gate_id].clone() {
            self.remaining_preds[succ] -= 1;
            if self.remaining_preds[succ] == 0 {
                self.avail_gates.push(succ);
            }
        }
    }

    /// DAG topological order (construction order of successors is already
    /// dependency-respecting since every predecessor has a smaller id).
    pub fn topological_order(&self) -> Vec<usize> {
        (0..self.gates.len()).collect()
    }
}
