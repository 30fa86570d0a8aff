//! The router: decides how to bring a gate's qubits adjacent and what it
//! costs, behind one strategy trait (§4.9).

pub mod apsp;
pub mod duostra;

pub use apsp::ApspRouter;
pub use duostra::DuostraRouter;

use zxdx_core::config::Extremum;
use zxdx_core::{Device, Gate};

use crate::error::Result;
use crate::placer::Placement;

/// A single physical operation emitted by the router: either a SWAP
/// inserted to improve connectivity, or the routed gate itself.
#[derive(Clone, Debug, PartialEq)]
pub enum RoutedOp {
    Swap(usize, usize),
    Gate(Gate),
}

/// Tracks each physical qubit's busy-until time, owned exclusively by the
/// router during routing (§5).
#[derive(Clone, Debug)]
pub struct BusyUntil {
    times: Vec<f64>,
}

impl BusyUntil {
    pub fn new(num_qubits: usize) -> BusyUntil {
        BusyUntil {
            times: vec![0.0; num_qubits],
        }
    }

    pub fn at(&self, physical: usize) -> f64 {
        self.times[physical]
    }

    pub fn advance_to(&mut self, physical: usize, end_time: f64) {
        if end_time > self.times[physical] {
            self.times[physical] = end_time;
        }
    }

    pub fn combine(&self, a: usize, b: usize, select: Extremum) -> f64 {
        let (ta, tb) = (self.times[a], self.times[b]);
        match select {
            Extremum::Min => ta.min(tb),
            Extremum::Max => ta.max(tb),
        }
    }
}

/// A strategy for bringing a gate's qubits adjacent on the device.
pub trait Router {
    /// True iff every qubit of `gate` maps to pairwise-adjacent physical
    /// qubits (trivially true for single-qubit gates).
    fn is_executable(&self, gate: &Gate, placement: &Placement, device: &Device) -> bool {
        if gate.qubits().len() < 2 {
            return true;
        }
        let physical: Vec<usize> = gate.qubits().iter().map(|&q| placement.physical_of(q)).collect();
        physical
            .iter()
            .zip(physical.iter().skip(1))
            .all(|(&a, &b)| device.are_connected(a, b))
    }

    /// Heuristic cost of resolving `gate` given the current placement and
    /// busy-until times.
    fn gate_cost(
        &self,
        gate: &Gate,
        placement: &Placement,
        busy: &BusyUntil,
        device: &Device,
        select: Extremum,
        apsp_coeff: u32,
    ) -> Result<f64> {
        if gate.qubits().len() < 2 {
            let q = placement.physical_of(gate.qubits()[0]);
            return Ok(busy.at(q));
        }
        let a = placement.physical_of(gate.qubits()[0]);
        let b = placement.physical_of(gate.qubits().last().copied().unwrap());
        let dist = device.distance(a, b)? as f64;
        let busy_term = busy.combine(a, b, select);
        Ok(apsp_coeff as f64 * dist + busy_term)
    }

    /// Emits the ordered SWAPs that bring `gate`'s qubits adjacent, then
    /// the gate itself, mutating `placement` and `busy` in place.
    fn route(
        &self,
        gate: &Gate,
        placement: &mut Placement,
        busy: &mut BusyUntil,
        device: &Device,
        orient: bool,
    ) -> Result<Vec<RoutedOp>>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::placer::{Placer, StaticPlacer};
    use zxdx_core::device::{CouplingEdge, PhysicalQubit};
    use zxdx_core::GateKind;

    pub(crate) fn line_device(n: usize) -> Device {
        let qubits = vec![
            PhysicalQubit {
                single_gate_delay: 35.0,
                single_gate_error: 1e-4,
            };
            n
        ];
        let edges = (0..n - 1)
            .map(|i| CouplingEdge {
                a: i,
                b: i + 1,
                cx_delay: 300.0,
                cx_error: 1e-2,
            })
            .collect();
        Device::new("line", Vec::new(), qubits, edges)
    }

    #[test]
    fn single_qubit_gate_is_always_executable() {
        let dev = line_device(3);
        let placement = StaticPlacer.place(3, &dev).unwrap();
        let gate = Gate::plain(GateKind::H, vec![2]).unwrap();
        let router = ApspRouter;
        assert!(router.is_executable(&gate, &placement, &dev));
    }

    #[test]
    fn distant_two_qubit_gate_is_not_executable() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        let gate = Gate::plain(GateKind::Cx, vec![0, 3]).unwrap();
        let router = ApspRouter;
        assert!(!router.is_executable(&gate, &placement, &dev));
    }
}
