//! The line-oriented ZX exchange format: one vertex per line, reachable
//! neighbors named inline by id and edge type. Grounded directly on
//! `spec.md`'s "ZX exchange format" section since no teacher or example
//! file defines an equivalent wire format for a ZX diagram.

use crate::diagram::{EdgeKind, VertexId, VertexKind, ZxDiagram};
use crate::error::{Result, ZxError};
use std::collections::HashMap;
use std::fmt::Write as _;
use zxdx_core::Phase;

struct PendingEdge {
    from: VertexId,
    to_external: u64,
    kind: EdgeKind,
}

/// Parses the ZX exchange format into a diagram. Vertex ids in the text are
/// remapped to this diagram's own [`VertexId`] sequence; duplicate external
/// ids are rejected.
pub fn read_zx_exchange(text: &str) -> Result<ZxDiagram> {
    let mut diagram = ZxDiagram::new();
    let mut external_to_internal: HashMap<u64, VertexId> = HashMap::new();
    let mut pending_edges: Vec<PendingEdge> = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut chars = line.chars();
        let tag = chars.next().ok_or_else(|| ZxError::exchange_parse(line_no, "empty line"))?;
        let rest = chars.as_str();

        let digit_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digit_end == 0 {
            return Err(ZxError::exchange_parse(line_no, "missing vertex id"));
        }
        let external_id: u64 = rest[..digit_end]
            .parse()
            .map_err(|_| ZxError::exchange_parse(line_no, "malformed vertex id"))?;
        if external_to_internal.contains_key(&external_id) {
            return Err(ZxError::DuplicateId(external_id));
        }

        let mut tokens = rest[digit_end..].split_whitespace().peekable();

        let kind = match tag {
            'I' | 'O' => None,
            'Z' => Some(VertexKind::Z),
            'X' => Some(VertexKind::X),
            'H' => Some(VertexKind::HBox),
            other => return Err(ZxError::exchange_parse(line_no, format!("unknown vertex tag '{other}'"))),
        };

        let mut qubit = 0i64;
        let mut column = 0.0f64;
        if tag == 'I' || tag == 'O' {
            let qtok = tokens.next().ok_or_else(|| ZxError::exchange_parse(line_no, "missing qubit index"))?;
            qubit = qtok.parse().map_err(|_| ZxError::exchange_parse(line_no, "malformed qubit index"))?;
        } else if let Some(&tok) = tokens.peek() {
            if tok.starts_with('(') {
                let tok = tokens.next().unwrap();
                let inner = tok.trim_start_matches('(').trim_end_matches(')');
                let mut parts = inner.split(',');
                let q = parts.next().ok_or_else(|| ZxError::exchange_parse(line_no, "malformed (q,c)"))?;
                let c = parts.next().ok_or_else(|| ZxError::exchange_parse(line_no, "malformed (q,c)"))?;
                qubit = q.trim().parse().map_err(|_| ZxError::exchange_parse(line_no, "malformed qubit in (q,c)"))?;
                column = c.trim().parse().map_err(|_| ZxError::exchange_parse(line_no, "malformed column in (q,c)"))?;
            }
        }

        let mut neighbor_tokens = Vec::new();
        let mut phase_token = None;
        for tok in tokens {
            if is_neighbor_token(tok) {
                neighbor_tokens.push(tok);
            } else if phase_token.is_none() {
                phase_token = Some(tok);
            } else {
                return Err(ZxError::exchange_parse(line_no, format!("unexpected extra token '{tok}'")));
            }
        }

        let phase = match (tag, phase_token) {
            ('H', _) => Phase::PI,
            (_, Some(tok)) => Phase::parse(tok).map_err(|e| ZxError::exchange_parse(line_no, e.to_string()))?,
            (_, None) => Phase::ZERO,
        };

        let internal_id = match kind {
            Some(k) => diagram.add_vertex(qubit, k, phase, column),
            None if tag == 'I' => diagram.add_input(qubit, column),
            None => diagram.add_output(qubit, column),
        };
        external_to_internal.insert(external_id, internal_id);

        for tok in neighbor_tokens {
            let edge_kind = match tok.chars().next() {
                Some('S') => EdgeKind::Simple,
                Some('H') => EdgeKind::Hadamard,
                _ => return Err(ZxError::exchange_parse(line_no, format!("malformed neighbor token '{tok}'"))),
            };
            let to_external: u64 = tok[1..]
                .parse()
                .map_err(|_| ZxError::exchange_parse(line_no, format!("malformed neighbor id in '{tok}'")))?;
            pending_edges.push(PendingEdge {
                from: internal_id,
                to_external,
                kind: edge_kind,
            });
        }
    }

    for edge in pending_edges {
        let to = *external_to_internal
            .get(&edge.to_external)
            .ok_or(ZxError::UnknownVertex(edge.to_external))?;
        diagram.add_edge(edge.from, to, edge.kind)?;
    }

    Ok(diagram)
}

fn is_neighbor_token(tok: &str) -> bool {
    let mut chars = tok.chars();
    matches!(chars.next(), Some('S') | Some('H')) && !tok[1..].is_empty() && tok[1..].chars().all(|c| c.is_ascii_digit())
}

/// Serializes a diagram back to the exchange format, listing each vertex on
/// its own line with its lower-id-first-visited edges attached to the
/// lower-id endpoint only (matching [`ZxDiagram::for_each_edge`]'s order).
pub fn write_zx_exchange(diagram: &ZxDiagram) -> String {
    let mut out = String::new();
    let mut edges_by_vertex: HashMap<VertexId, Vec<String>> = HashMap::new();
    diagram.for_each_edge(|u, v, t| {
        let tag = match t {
            EdgeKind::Simple => 'S',
            EdgeKind::Hadamard => 'H',
        };
        edges_by_vertex.entry(u).or_default().push(format!("{tag}{v}"));
    });

    for id in diagram.vertex_ids() {
        let rec = diagram.get(id).expect("vertex id from this diagram's own iterator");
        let neighbors = edges_by_vertex.get(&id).cloned().unwrap_or_default().join(" ");
        match rec.kind {
            VertexKind::Boundary if diagram.inputs().contains(&id) => {
                let _ = writeln!(out, "I{id} {} {}", rec.qubit, neighbors);
            }
            VertexKind::Boundary => {
                let _ = writeln!(out, "O{id} {} {}", rec.qubit, neighbors);
            }
            VertexKind::Z | VertexKind::X => {
                let tag = if rec.kind == VertexKind::Z { 'Z' } else { 'X' };
                let _ = writeln!(out, "{tag}{id} ({},{}) {} {}", rec.qubit, rec.column, neighbors, rec.phase);
            }
            VertexKind::HBox => {
                let _ = writeln!(out, "H{id} ({},{}) {}", rec.qubit, rec.column, neighbors);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_a_small_diagram() {
        let text = "I0 0 S1\nZ1 (0,1) S0 H2\nO2 0 H1\n";
        let diagram = read_zx_exchange(text).unwrap();
        assert_eq!(diagram.len(), 3);
        let out = write_zx_exchange(&diagram);
        let reparsed = read_zx_exchange(&out).unwrap();
        assert_eq!(reparsed.len(), 3);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let text = "I0 0 S1\nZ1 S0\nZ1 S0\n";
        assert!(read_zx_exchange(text).is_err());
    }

    #[test]
    fn h_box_carries_implicit_pi_phase() {
        let text = "Z0 S1\nH1 (0,1) S0 S2\nZ2 S1\n";
        let diagram = read_zx_exchange(text).unwrap();
        let hbox = diagram.vertex_ids().find(|&id| diagram.get(id).unwrap().kind == VertexKind::HBox).unwrap();
        assert_eq!(diagram.get(hbox).unwrap().phase, Phase::PI);
    }
}
