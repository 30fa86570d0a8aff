//! The device coupling graph: physical qubits, coupling edges with
//! per-edge CX timing/error, and a memoized all-pairs-shortest-path cache.

use crate::error::{CoreError, Result};
use crate::gate::GateKind;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Default single-qubit gate delay (ns) when a device file omits `SGTIME`.
pub const DEFAULT_SINGLE_GATE_DELAY: f64 = 35.0;
/// Default single-qubit gate error when a device file omits `SGERROR`.
pub const DEFAULT_SINGLE_GATE_ERROR: f64 = 1e-4;
/// Default CX delay (ns) when a device file omits `CNOTTIME`.
pub const DEFAULT_CX_DELAY: f64 = 300.0;
/// Default CX error when a device file omits `CNOTERROR`.
pub const DEFAULT_CX_ERROR: f64 = 1e-2;

/// A physical qubit's static properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalQubit {
    pub single_gate_delay: f64,
    pub single_gate_error: f64,
}

/// An unordered coupling edge with its CX timing/error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CouplingEdge {
    pub a: usize,
    pub b: usize,
    pub cx_delay: f64,
    pub cx_error: f64,
}

impl CouplingEdge {
    /// The pair in a canonical `(min, max)` order, used as a map key.
    pub fn key(a: usize, b: usize) -> (usize, usize) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// The device coupling graph. Immutable once built: the APSP cache is
/// populated lazily on first use and is then fixed for the device's
/// lifetime (§5). Per-qubit busy-until times are *not* stored here — they
/// belong to whichever placement/router view is actively routing.
#[derive(Debug)]
pub struct Device {
    name: String,
    gate_set: Vec<GateKind>,
    qubits: Vec<PhysicalQubit>,
    adjacency: Vec<Vec<usize>>,
    edges: BTreeMap<(usize, usize), CouplingEdge>,
    apsp: OnceLock<Vec<Vec<u32>>>,
}

impl Device {
    /// Builds a device from its parts, deriving a symmetric adjacency list
    /// from the edge set.
    pub fn new(
        name: impl Into<String>,
        gate_set: Vec<GateKind>,
        qubits: Vec<PhysicalQubit>,
        edges: Vec<CouplingEdge>,
    ) -> Device {
        let n = qubits.len();
        let mut adjacency = vec![Vec::new(); n];
        let mut edge_map = BTreeMap::new();
        for e in edges {
            let key = CouplingEdge::key(e.a, e.b);
            if !adjacency[e.a].contains(&e.b) {
                adjacency[e.a].push(e.b);
            }
            if !adjacency[e.b].contains(&e.a) {
                adjacency[e.b].push(e.a);
            }
            edge_map.insert(key, e);
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }
        Device {
            name: name.into(),
            gate_set,
            qubits,
            adjacency,
            edges: edge_map,
            apsp: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn gate_set(&self) -> &[GateKind] {
        &self.gate_set
    }

    pub fn qubit(&self, q: usize) -> Result<&PhysicalQubit> {
        self.qubits
            .get(q)
            .ok_or_else(|| CoreError::InvalidQubit(q, self.qubits.len()))
    }

    pub fn neighbors(&self, q: usize) -> &[usize] {
        &self.adjacency[q]
    }

    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(&b)
    }

    pub fn edge(&self, a: usize, b: usize) -> Option<&CouplingEdge> {
        self.edges.get(&CouplingEdge::key(a, b))
    }

    /// Hop-count shortest-path distance between `a` and `b`, computed by
    /// Floyd–Warshall on first call and cached for the device's lifetime.
    pub fn distance(&self, a: usize, b: usize) -> Result<u32> {
        let table = self.apsp.get_or_init(|| self.compute_apsp());
        let d = table[a][b];
        if d == u32::MAX {
            return Err(CoreError::Disconnected(a, b));
        }
        Ok(d)
    }

    fn compute_apsp(&self) -> Vec<Vec<u32>> {
        let n = self.qubits.len();
        let mut dist = vec![vec![u32::MAX; n]; n];
        for i in 0..n {
            dist[i][i] = 0;
        }
        for (&(a, b), _) in &self.edges {
            dist[a][b] = 1;
            dist[b][a] = 1;
        }
        for k in 0..n {
            for i in 0..n {
                if dist[i][k] == u32::MAX {
                    continue;
                }
                for j in 0..n {
                    if dist[k][j] == u32::MAX {
                        continue;
                    }
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }
        dist
    }
}

/// Parses the line-oriented device text format of §6: `#` comments,
/// `name:`, `qubit number:`, `gate set: { ... }`, `coupling: [[...], ...]`,
/// and optional `SGERROR:`/`SGTIME:`/`CNOTERROR:`/`CNOTTIME:` sections.
/// `CNOTERROR`/`CNOTTIME`, when present, are shaped exactly like `coupling`:
/// row `i`'s entries give the error/delay for the edges `coupling[i]` lists,
/// in the same order.
pub fn parse_device(text: &str) -> Result<Device> {
    let mut name: Option<String> = None;
    let mut num_qubits: Option<usize> = None;
    let mut gate_set: Vec<GateKind> = Vec::new();
    let mut coupling: Vec<Vec<usize>> = Vec::new();
    let mut sg_error: Vec<f64> = Vec::new();
    let mut sg_time: Vec<f64> = Vec::new();
    let mut cx_error: Vec<Vec<f64>> = Vec::new();
    let mut cx_time: Vec<Vec<f64>> = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (key, rest) = line
            .split_once(':')
            .ok_or_else(|| CoreError::device_parse(line_no, "expected '<section>: <value>'"))?;
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => name = Some(rest.trim().to_string()),
            "qubit number" => {
                num_qubits = Some(rest.trim().parse().map_err(|_| {
                    CoreError::device_parse(line_no, "qubit number must be an unsigned integer")
                })?)
            }
            "gate set" => {
                let names = parse_curly_list(rest)
                    .map_err(|_| CoreError::device_parse(line_no, "malformed gate set"))?;
                for n in names {
                    gate_set.push(
                        GateKind::parse(&n)
                            .map_err(|_| CoreError::device_parse(line_no, format!("unknown gate {n:?}")))?,
                    );
                }
            }
            "coupling" => {
                coupling = parse_nested_usize(rest)
                    .map_err(|_| CoreError::device_parse(line_no, "malformed coupling list"))?
            }
            "sgerror" => {
                sg_error = parse_flat_f64(rest)
                    .map_err(|_| CoreError::device_parse(line_no, "malformed SGERROR list"))?
            }
            "sgtime" => {
                sg_time = parse_flat_f64(rest)
                    .map_err(|_| CoreError::device_parse(line_no, "malformed SGTIME list"))?
            }
            "cnoterror" => {
                cx_error = parse_nested_f64(rest)
                    .map_err(|_| CoreError::device_parse(line_no, "malformed CNOTERROR list"))?
            }
            "cnottime" => {
                cx_time = parse_nested_f64(rest)
                    .map_err(|_| CoreError::device_parse(line_no, "malformed CNOTTIME list"))?
            }
            other => {
                return Err(CoreError::device_parse(
                    line_no,
                    format!("unrecognized section {other:?}"),
                ))
            }
        }
    }

    let name = name.ok_or_else(|| CoreError::device_parse(0, "missing 'name' section"))?;
    let num_qubits =
        num_qubits.ok_or_else(|| CoreError::device_parse(0, "missing 'qubit number' section"))?;

    let qubits: Vec<PhysicalQubit> = (0..num_qubits)
        .map(|i| PhysicalQubit {
            single_gate_delay: sg_time.get(i).copied().unwrap_or(DEFAULT_SINGLE_GATE_DELAY),
            single_gate_error: sg_error.get(i).copied().unwrap_or(DEFAULT_SINGLE_GATE_ERROR),
        })
        .collect();

    let mut edges = Vec::new();
    for (i, row) in coupling.iter().enumerate() {
        for (k, &j) in row.iter().enumerate() {
            if i >= num_qubits || j >= num_qubits {
                return Err(CoreError::InvalidQubit(i.max(j), num_qubits));
            }
            let delay = cx_time.get(i).and_then(|r| r.get(k)).copied().unwrap_or(DEFAULT_CX_DELAY);
            let error = cx_error.get(i).and_then(|r| r.get(k)).copied().unwrap_or(DEFAULT_CX_ERROR);
            edges.push(CouplingEdge {
                a: i,
                b: j,
                cx_delay: delay,
                cx_error: error,
            });
        }
    }

    Ok(Device::new(name, gate_set, qubits, edges))
}

fn parse_curly_list(s: &str) -> std::result::Result<Vec<String>, ()> {
    let s = s.trim();
    let inner = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')).ok_or(())?;
    Ok(inner
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

fn parse_nested_f64(s: &str) -> std::result::Result<Vec<Vec<f64>>, ()> {
    let s = s.trim();
    let inner = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')).ok_or(())?;
    let mut rows = Vec::new();
    let mut depth = 0i32;
    let mut cur = String::new();
    for c in inner.chars() {
        match c {
            '[' => {
                depth += 1;
                if depth == 1 {
                    cur.clear();
                } else {
                    cur.push(c);
                }
            }
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let nums = cur
                        .split(',')
                        .map(|t| t.trim())
                        .filter(|t| !t.is_empty())
                        .map(|t| t.parse::<f64>().map_err(|_| ()))
                        .collect::<std::result::Result<Vec<f64>, ()>>()?;
                    rows.push(nums);
                } else {
                    cur.push(c);
                }
            }
            ',' if depth == 0 => {}
            _ => {
                if depth >= 1 {
                    cur.push(c);
                }
            }
        }
    }
    Ok(rows)
}

fn parse_nested_usize(s: &str) -> std::result::Result<Vec<Vec<usize>>, ()> {
    parse_nested_f64(s).map(|rows| {
        rows.into_iter()
            .map(|row| row.into_iter().map(|f| f as usize).collect())
            .collect()
    })
}

fn parse_flat_f64(s: &str) -> std::result::Result<Vec<f64>, ()> {
    let s = s.trim();
    let inner = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')).ok_or(())?;
    inner
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f64>().map_err(|_| ()))
        .collect()
}
