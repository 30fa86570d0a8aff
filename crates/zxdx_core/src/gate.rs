//! Circuit gate records: the kind table of §6, shared by the ZX exchange
//! format, the circuit-topology DAG and the mapping equivalence checker.

use crate::error::{CoreError, Result};
use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The gate-kind table. Arity and whether a phase is carried are fixed per
/// kind, except for the multi-controlled variants whose arity is the number
/// of qubits supplied (last one is the target).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    SDag,
    T,
    TDag,
    Sx,
    Sy,
    Rx,
    Ry,
    Rz,
    Px,
    Py,
    Pz,
    Cx,
    Cz,
    Swap,
    Ccx,
    Ccz,
    McPx,
    McPy,
    McPz,
    McRx,
    McRy,
    McRz,
}

impl GateKind {
    /// Fixed arity, or `None` for the multi-controlled variants whose arity
    /// is determined by the gate record's qubit list.
    pub fn fixed_arity(self) -> Option<usize> {
        use GateKind::*;
        match self {
            H | X | Y | Z | S | SDag | T | TDag | Sx | Sy | Rx | Ry | Rz | Px | Py | Pz => {
                Some(1)
            }
            Cx | Cz | Swap => Some(2),
            Ccx | Ccz => Some(3),
            McPx | McPy | McPz | McRx | McRy | McRz => None,
        }
    }

    /// True iff gates of this kind carry a phase parameter.
    pub fn carries_phase(self) -> bool {
        use GateKind::*;
        matches!(
            self,
            Rx | Ry | Rz | Px | Py | Pz | McPx | McPy | McPz | McRx | McRy | McRz
        )
    }

    /// True iff this kind is its own inverse for phase 0 (Clifford
    /// involutions); used by the equivalence checker's kind comparison.
    pub fn is_self_inverse(self) -> bool {
        use GateKind::*;
        matches!(self, H | X | Y | Z | Cx | Cz | Swap | Ccx | Ccz)
    }

    /// The case-insensitive name used in device files, circuit records and
    /// the ZX exchange format's gate-set lists.
    pub fn name(self) -> &'static str {
        use GateKind::*;
        match self {
            H => "h",
            X => "x",
            Y => "y",
            Z => "z",
            S => "s",
            SDag => "sdg",
            T => "t",
            TDag => "tdg",
            Sx => "sx",
            Sy => "sy",
            Rx => "rx",
            Ry => "ry",
            Rz => "rz",
            Px => "px",
            Py => "py",
            Pz => "pz",
            Cx => "cx",
            Cz => "cz",
            Swap => "swap",
            Ccx => "ccx",
            Ccz => "ccz",
            McPx => "mcpx",
            McPy => "mcpy",
            McPz => "mcpz",
            McRx => "mcrx",
            McRy => "mcry",
            McRz => "mcrz",
        }
    }

    /// Parses a case-insensitive gate kind name.
    pub fn parse(name: &str) -> Result<GateKind> {
        use GateKind::*;
        Ok(match name.to_ascii_lowercase().as_str() {
            "h" => H,
            "x" => X,
            "y" => Y,
            "z" => Z,
            "s" => S,
            "sdg" | "s_dag" | "sdag" => SDag,
            "t" => T,
            "tdg" | "t_dag" | "tdag" => TDag,
            "sx" => Sx,
            "sy" => Sy,
            "rx" => Rx,
            "ry" => Ry,
            "rz" => Rz,
            "px" => Px,
            "py" => Py,
            "pz" => Pz,
            "cx" | "cnot" => Cx,
            "cz" => Cz,
            "swap" => Swap,
            "ccx" | "toffoli" => Ccx,
            "ccz" => Ccz,
            "mcpx" => McPx,
            "mcpy" => McPy,
            "mcpz" => McPz,
            "mcrx" => McRx,
            "mcry" => McRy,
            "mcrz" => McRz,
            other => return Err(CoreError::UnknownGateKind(other.to_string())),
        })
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single gate applied to an ordered list of qubits; the last qubit is the
/// target, preceding qubits are controls (for `Swap` both are targets).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    kind: GateKind,
    qubits: Vec<usize>,
    phase: Phase,
}

impl Gate {
    /// Builds a gate, validating arity against the kind's fixed arity (when
    /// it has one) and zeroing the phase for kinds that don't carry one.
    pub fn new(kind: GateKind, qubits: Vec<usize>, phase: Phase) -> Result<Gate> {
        if let Some(expected) = kind.fixed_arity() {
            if qubits.len() != expected {
                return Err(CoreError::gate_arity(
                    kind.name(),
                    expected.to_string(),
                    qubits.len(),
                ));
            }
        } else if qubits.len() < 2 {
            return Err(CoreError::gate_arity(kind.name(), "n (n>=2)", qubits.len()));
        }
        let phase = if kind.carries_phase() { phase } else { Phase::ZERO };
        Ok(Gate { kind, qubits, phase })
    }

    /// Convenience constructor for non-phase gates.
    pub fn plain(kind: GateKind, qubits: Vec<usize>) -> Result<Gate> {
        Self::new(kind, qubits, Phase::ZERO)
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn arity(&self) -> usize {
        self.qubits.len()
    }

    /// The last qubit in the record: the target for controlled gates, or
    /// the sole operand for single-qubit gates.
    pub fn target(&self) -> usize {
        *self.qubits.last().expect("gate always has at least one qubit")
    }

    /// All qubits but the target.
    pub fn controls(&self) -> &[usize] {
        &self.qubits[..self.qubits.len() - 1]
    }

    pub fn is_single_qubit(&self) -> bool {
        self.qubits.len() == 1
    }

    pub fn is_two_qubit(&self) -> bool {
        self.qubits.len() == 2
    }

    /// Remaps every qubit index through `mapping` (`mapping[logical] =
    /// physical`), preserving order — used when lowering a logical circuit
    /// onto physical qubits during routing.
    pub fn map_qubits(&self, mapping: &[usize]) -> Gate {
        Gate {
            kind: self.kind,
            qubits: self.qubits.iter().map(|&q| mapping[q]).collect(),
            phase: self.phase,
        }
    }

    /// A `Swap` gate on the given pair, used by the router to emit the
    /// physical operations that bring a two-qubit gate's qubits adjacent.
    pub fn swap(a: usize, b: usize) -> Gate {
        Gate {
            kind: GateKind::Swap,
            qubits: vec![a, b],
            phase: Phase::ZERO,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{q}")?;
        }
        if self.kind.carries_phase() {
            write!(f, "; {}", self.phase)?;
        }
        write!(f, ")")
    }
}
