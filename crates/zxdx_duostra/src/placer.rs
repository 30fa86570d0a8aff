//! Initial placement strategies: produce a logical→physical bijection of
//! length equal to the number of logical qubits (§4.8).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use zxdx_core::Device;

use crate::error::{MappingError, Result};

/// A logical→physical qubit mapping. `map(l)` gives the physical qubit
/// hosting logical qubit `l`; `invert(p)` is its preimage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    logical_to_physical: Vec<usize>,
    physical_to_logical: Vec<usize>,
}

impl Placement {
    pub fn new(logical_to_physical: Vec<usize>, num_physical: usize) -> Result<Placement> {
        let mut physical_to_logical = vec![usize::MAX; num_physical];
        for (logical, &physical) in logical_to_physical.iter().enumerate() {
            if physical >= num_physical {
                return Err(MappingError::bad_placement(format!(
                    "logical {logical} maps to out-of-range physical {physical}"
                )));
            }
            if physical_to_logical[physical] != usize::MAX {
                return Err(MappingError::bad_placement(format!(
                    "physical {physical} assigned to two logical qubits"
                )));
            }
            physical_to_logical[physical] = logical;
        }
        Ok(Placement {
            logical_to_physical,
            physical_to_logical,
        })
    }

    pub fn num_logical(&self) -> usize {
        self.logical_to_physical.len()
    }

    pub fn physical_of(&self, logical: usize) -> usize {
        self.logical_to_physical[logical]
    }

    pub fn logical_of(&self, physical: usize) -> Option<usize> {
        match self.physical_to_logical.get(physical) {
            Some(&l) if l != usize::MAX => Some(l),
            _ => None,
        }
    }

    /// Swaps the logical qubits currently hosted on `a` and `b`.
    pub fn swap_physical(&mut self, a: usize, b: usize) {
        let la = self.physical_to_logical[a];
        let lb = self.physical_to_logical[b];
        if la != usize::MAX {
            self.logical_to_physical[la] = b;
        }
        if lb != usize::MAX {
            self.logical_to_physical[lb] = a;
        }
        self.physical_to_logical.swap(a, b);
    }
}

/// A strategy that builds an initial `Placement` for a circuit on a device.
pub trait Placer {
    fn place(&self, num_logical: usize, device: &Device) -> Result<Placement>;
}

/// Identity mapping, wrapping around if there are more logical qubits than
/// physical ones would otherwise allow distinct slots (still bijective:
/// wrap only applies when `num_logical <= device.num_qubits()`, which the
/// caller is responsible for guaranteeing).
pub struct StaticPlacer;

impl Placer for StaticPlacer {
    fn place(&self, num_logical: usize, device: &Device) -> Result<Placement> {
        if num_logical > device.num_qubits() {
            return Err(MappingError::bad_placement(format!(
                "circuit needs {num_logical} qubits, device has {}",
                device.num_qubits()
            )));
        }
        let mapping: Vec<usize> = (0..num_logical).map(|l| l % device.num_qubits()).collect();
        Placement::new(mapping, device.num_qubits())
    }
}

/// Uniform random permutation over a seeded RNG.
pub struct RandomPlacer {
    pub seed: u64,
}

impl Placer for RandomPlacer {
    fn place(&self, num_logical: usize, device: &Device) -> Result<Placement> {
        if num_logical > device.num_qubits() {
            return Err(MappingError::bad_placement(format!(
                "circuit needs {num_logical} qubits, device has {}",
                device.num_qubits()
            )));
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut physical: Vec<usize> = (0..device.num_qubits()).collect();
        physical.shuffle(&mut rng);
        let mapping = physical[..num_logical].to_vec();
        Placement::new(mapping, device.num_qubits())
    }
}

/// Depth-first discovery order over the coupling graph, keeping logically
/// adjacent qubits physically near.
pub struct DfsPlacer;

impl Placer for DfsPlacer {
    fn place(&self, num_logical: usize, device: &Device) -> Result<Placement> {
        if num_logical > device.num_qubits() {
            return Err(MappingError::bad_placement(format!(
                "circuit needs {num_logical} qubits, device has {}",
                device.num_qubits()
            )));
        }
        let mut visited = vec![false; device.num_qubits()];
        let mut order = Vec::with_capacity(device.num_qubits());
        let mut stack = vec![0usize];
        while let Some(q) = stack.pop() {
            if visited[q] {
                continue;
            }
            visited[q] = true;
            order.push(q);
            let mut neighbors: Vec<usize> = device.neighbors(q).to_vec();
            neighbors.sort_unstable_by(|a, b| b.cmp(a));
            for n in neighbors {
                if !visited[n] {
                    stack.push(n);
                }
            }
        }
        for q in 0..device.num_qubits() {
            if !visited[q] {
                order.push(q);
            }
        }
        let mapping = order[..num_logical].to_vec();
        Placement::new(mapping, device.num_qubits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zxdx_core::device::{CouplingEdge, PhysicalQubit};

    fn line_device(n: usize) -> Device {
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
    fn static_placer_is_identity() {
        let dev = line_device(4);
        let placement = StaticPlacer.place(4, &dev).unwrap();
        for l in 0..4 {
            assert_eq!(placement.physical_of(l), l);
        }
    }

    #[test]
    fn random_placer_is_a_bijection() {
        let dev = line_device(4);
        let placement = RandomPlacer { seed: 7 }.place(4, &dev).unwrap();
        let mut seen = vec![false; 4];
        for l in 0..4 {
            seen[placement.physical_of(l)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn random_placer_is_deterministic_given_seed() {
        let dev = line_device(4);
        let a = RandomPlacer { seed: 3 }.place(4, &dev).unwrap();
        let b = RandomPlacer { seed: 3 }.place(4, &dev).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dfs_placer_visits_every_qubit() {
        let dev = line_device(5);
        let placement = DfsPlacer.place(5, &dev).unwrap();
        let mut seen = vec![false; 5];
        for l in 0..5 {
            seen[placement.physical_of(l)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn placer_rejects_circuit_too_wide_for_device() {
        let dev = line_device(2);
        assert!(StaticPlacer.place(3, &dev).is_err());
    }

    #[test]
    fn swap_physical_exchanges_logical_owners() {
        let dev = line_device(3);
        let mut placement = StaticPlacer.place(3, &dev).unwrap();
        placement.swap_physical(0, 1);
        assert_eq!(placement.physical_of(0), 1);
        assert_eq!(placement.physical_of(1), 0);
        assert_eq!(placement.logical_of(0), Some(1));
        assert_eq!(placement.logical_of(1), Some(0));
    }
}
