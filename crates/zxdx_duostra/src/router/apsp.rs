//! APSP router: walks the precomputed shortest path between a gate's two
//! physical qubits, swapping one endpoint toward the other one hop at a
//! time (§4.9).

use zxdx_core::{Device, Gate};

use super::{BusyUntil, RoutedOp, Router};
use crate::error::{MappingError, Result};
use crate::placer::Placement;

pub struct ApspRouter;

/// SWAP delay when not decomposed into three CX gates.
const SWAP_DELAY: f64 = 300.0;

impl ApspRouter {
    /// Picks the neighbor of `from` that is one hop closer to `target`.
    fn step_toward(&self, from: usize, target: usize, device: &Device) -> Result<usize> {
        let current = device.distance(from, target)?;
        device
            .neighbors(from)
            .iter()
            .copied()
            .find(|&n| device.distance(n, target).map(|d| d + 1 == current).unwrap_or(false))
            .ok_or_else(|| MappingError::routing_infeasible(vec![from, target], "no shortest-path neighbor found"))
    }
}

impl Router for ApspRouter {
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
            let (stationary_logical, moving_logical) = if orient && logical_a < logical_b {
                (logical_a, logical_b)
            } else if orient {
                (logical_b, logical_a)
            } else {
                (logical_a, logical_b)
            };

            loop {
                let stationary = placement.physical_of(stationary_logical);
                let moving = placement.physical_of(moving_logical);
                if device.are_connected(stationary, moving) {
                    break;
                }
                let next = self.step_toward(moving, stationary, device)?;
                let start = busy.at(moving).max(busy.at(next));
                let end = start + SWAP_DELAY;
                busy.advance_to(moving, end);
                busy.advance_to(next, end);
                placement.swap_physical(moving, next);
                ops.push(RoutedOp::Swap(moving, next));
            }
        }

        let physical_gate = gate.map_qubits(&physical_mapping(placement));
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

/// Builds a dense `mapping[logical] = physical` table for `Gate::map_qubits`.
fn physical_mapping(placement: &Placement) -> Vec<usize> {
    (0..placement.num_logical()).map(|l| placement.physical_of(l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placer::{Placer, StaticPlacer};
    use crate::router::tests::line_device;
    use zxdx_core::GateKind;

    #[test]
    fn routes_adjacent_gate_with_no_swaps() {
        let dev = line_device(4);
        let mut placement = StaticPlacer.place(4, &dev).unwrap();
        let mut busy = BusyUntil::new(4);
        let gate = Gate::plain(GateKind::Cx, vec![0, 1]).unwrap();
        let ops = ApspRouter.route(&gate, &mut placement, &mut busy, &dev, true).unwrap();
        assert_eq!(ops.len(), 1);
        assert!(matches!(ops[0], RoutedOp::Gate(_)));
    }

    #[test]
    fn routes_distant_gate_with_swaps_then_gate() {
        let dev = line_device(4);
        let mut placement = StaticPlacer.place(4, &dev).unwrap();
        let mut busy = BusyUntil::new(4);
        let gate = Gate::plain(GateKind::Cx, vec![0, 3]).unwrap();
        let ops = ApspRouter.route(&gate, &mut placement, &mut busy, &dev, true).unwrap();
        let swaps = ops.iter().filter(|op| matches!(op, RoutedOp::Swap(_, _))).count();
        assert_eq!(swaps, 2);
        assert!(matches!(ops.last().unwrap(), RoutedOp::Gate(_)));
    }

    #[test]
    fn routing_leaves_gate_qubits_adjacent_in_final_placement() {
        let dev = line_device(4);
        let mut placement = StaticPlacer.place(4, &dev).unwrap();
        let mut busy = BusyUntil::new(4);
        let gate = Gate::plain(GateKind::Cx, vec![0, 3]).unwrap();
        ApspRouter.route(&gate, &mut placement, &mut busy, &dev, true).unwrap();
        let pa = placement.physical_of(0);
        let pb = placement.physical_of(3);
        assert!(dev.are_connected(pa, pb));
    }
}
