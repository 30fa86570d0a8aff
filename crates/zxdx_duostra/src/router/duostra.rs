//! Duostra router: greedy endpoint selection. At each step, among every
//! candidate SWAP touching either of the gate's current physical qubits,
//! picks the one minimizing the resulting distance, with a tie-break on
//! the earliest free time (§4.9).

use zxdx_core::{Device, Gate};

use super::{BusyUntil, RoutedOp, Router};
use crate::error::{MappingError, Result};
use crate::placer::Placement;

pub struct DuostraRouter;

const SWAP_DELAY: f64 = 300.0;

impl DuostraRouter {
    /// Among every physical qubit adjacent to `a` or `b`, picks the SWAP
    /// partner that most reduces `distance(a, b)`, breaking ties by
    /// whichever candidate pair is free soonest.
    fn best_swap(&self, a: usize, b: usize, busy: &BusyUntil, device: &Device) -> Result<(usize, usize)> {
        let current = device.distance(a, b)?;
        let mut best: Option<((usize, usize), u32, f64)> = None;

        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for &n in device.neighbors(a) {
            candidates.push((a, n));
        }
        for &n in device.neighbors(b) {
            candidates.push((b, n));
        }

        for (stay, n) in candidates {
            let other = if stay == a { b } else { a };
            let resulting = device.distance(n, other)?;
            let free_at = busy.at(stay).max(busy.at(n));
            let better = match &best {
                None => true,
                Some((_, best_dist, best_free)) => {
                    resulting < *best_dist || (resulting == *best_dist && free_at < *best_free)
                }
            };
            if better {
                best = Some(((stay, n), resulting, free_at));
            }
        }

        best.map(|(pair, _, _)| pair)
            .ok_or_else(|| MappingError::routing_infeasible(vec![a, b], format!("no improving SWAP from distance {current}")))
    }
}

impl Router for DuostraRouter {
    fn route(
        &self,
        gate: &Gate,
        placement: &mut Placement,
        busy: &mut BusyUntil,
        device: &Device,
        orient: bool,
    ) -> Result<Vec<RoutedOp>> {
        let mut ops = Vec::new();

        if gate.qubits().len() >= 2 {
            let logical_a = gate.qubits()[0];
            let logical_b = gate.qubits().last().copied().unwrap();
            let (keep_logical, other_logical) = if orient && logical_a < logical_b {
                (logical_a, logical_b)
            } else {
                (logical_b, logical_a)
            };
            let _ = keep_logical;

            loop {
                let pa = placement.physical_of(logical_a);
                let pb = placement.physical_of(logical_b);
                if device.are_connected(pa, pb) {
                    break;
                }
                let (stay, moved) = self.best_swap(pa, pb, busy, device)?;
                let start = busy.at(stay).max(busy.at(moved));
                let end = start + SWAP_DELAY;
                busy.advance_to(stay, end);
                busy.advance_to(moved, end);
                placement.swap_physical(stay, moved);
                ops.push(RoutedOp::Swap(stay, moved));
            }
            let _ = other_logical;
        }

        let mapping: Vec<usize> = (0..placement.num_logical()).map(|l| placement.physical_of(l)).collect();
        let physical_gate = gate.map_qubits(&mapping);
        let start = gate
            .qubits()
            .iter()
            .map(|&l| busy.at(placement.physical_of(l)))
            .fold(0.0_f64, f64::max);
        let delay = if gate.qubits().len() >= 2 {
            device
                .edge(
                    placement.physical_of(gate.qubits()[0]),
                    placement.physical_of(gate.qubits().last().copied().unwrap()),
                )
                .map(|e| e.cx_delay)
                .unwrap_or(SWAP_DELAY)
        } else {
            device.qubit(placement.physical_of(gate.qubits()[0]))?.single_gate_delay
        };
        for &l in gate.qubits() {
            busy.advance_to(placement.physical_of(l), start + delay);
        }
        ops.push(RoutedOp::Gate(physical_gate));
        Ok(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placer::{Placer, StaticPlacer};
    use crate::router::tests::line_device;
    use zxdx_core::GateKind;

    #[test]
    fn s5_greedy_routing_on_4_qubit_line() {
        let dev = line_device(4);
        let mut placement = StaticPlacer.place(4, &dev).unwrap();
        let mut busy = BusyUntil::new(4);
        let gate = Gate::plain(GateKind::Cx, vec![0, 3]).unwrap();
        let ops = DuostraRouter.route(&gate, &mut placement, &mut busy, &dev, true).unwrap();

        let swaps = ops.iter().filter(|op| matches!(op, RoutedOp::Swap(_, _))).count();
        let gates = ops.iter().filter(|op| matches!(op, RoutedOp::Gate(_))).count();
        assert_eq!(swaps, 2);
        assert_eq!(gates, 1);
    }

    #[test]
    fn no_swaps_needed_for_adjacent_gate() {
        let dev = line_device(4);
        let mut placement = StaticPlacer.place(4, &dev).unwrap();
        let mut busy = BusyUntil::new(4);
        let gate = Gate::plain(GateKind::Cx, vec![1, 2]).unwrap();
        let ops = DuostraRouter.route(&gate, &mut placement, &mut busy, &dev, true).unwrap();
        assert_eq!(ops.len(), 1);
    }
}
