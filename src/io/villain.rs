//! Villain layout: a single hypergraph pickle plus an optional `L.pickle`.
//!
//! # Supported shapes
//! `H.pickle` is read when present, `H.pkl` otherwise. The pickled object
//! may be:
//! - a dict edge → node list, used as-is;
//! - a pair `(node_indices, edge_indices)` of equal-length sequences, where
//!   incidence `i` places node `node_indices[i]` in edge `edge_indices[i]`;
//!   edges are numbered by first appearance;
//! - a triple `(center, _, hyperedges)`; edge `i` is `hyperedges[i]` and
//!   node ids are converted with Python `int()`.

use crate::hypergraph_error::HypergraphError;
use crate::io::pickle::{PickleValue, load_pickle};
use crate::io::{
    LayoutDetector, LayoutKind, Probe, RawDataset, hypergraph_from_mapping, load_labels, missing,
};
use crate::topology::hypergraph::Hypergraph;
use crate::topology::key::Key;
use std::path::Path;

pub const HYPERGRAPH_FILE: &str = "H.pickle";
pub const HYPERGRAPH_FILE_ALT: &str = "H.pkl";
pub const LABELS_FILE: &str = "L.pickle";

#[derive(Debug, Default, Clone, Copy)]
pub struct VillainLayout;

impl LayoutDetector for VillainLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Villain
    }

    fn probe(&self, dir: &Path) -> Result<Probe, HypergraphError> {
        let primary = dir.join(HYPERGRAPH_FILE);
        let alt = dir.join(HYPERGRAPH_FILE_ALT);
        let hg_path = if primary.is_file() {
            primary
        } else if alt.is_file() {
            alt
        } else {
            return Ok(Probe::Missing(vec![
                missing(LayoutKind::Villain, primary),
                missing(LayoutKind::Villain, alt),
            ]));
        };

        let hypergraph = decode_hypergraph(load_pickle(&hg_path)?, &hg_path)?;

        let labels_path = dir.join(LABELS_FILE);
        let labels = load_labels(&labels_path)?;
        let mut sources = vec![hg_path];
        if !labels.is_absent() {
            sources.push(labels_path);
        }

        Ok(Probe::Loaded(RawDataset {
            layout: LayoutKind::Villain,
            hypergraph,
            labels,
            sources,
        }))
    }
}

/// Decode any of the supported hypergraph shapes.
pub fn decode_hypergraph(value: PickleValue, path: &Path) -> Result<Hypergraph, HypergraphError> {
    match value {
        PickleValue::Map(entries) => hypergraph_from_mapping(entries, path),
        PickleValue::Seq(mut parts) if parts.len() == 2 => {
            let edges = parts.pop().unwrap_or(PickleValue::None);
            let nodes = parts.pop().unwrap_or(PickleValue::None);
            from_parallel_indices(nodes, edges, path)
        }
        PickleValue::Seq(mut parts) if parts.len() == 3 => {
            let hyperedges = parts.pop().unwrap_or(PickleValue::None);
            from_hyperedge_list(hyperedges, path)
        }
        other => Err(HypergraphError::malformed(
            path,
            "hypergraph",
            format!(
                "expected a dict, (node_indices, edge_indices) or (center, _, hyperedges); found {}",
                describe(&other)
            ),
        )),
    }
}

fn describe(value: &PickleValue) -> String {
    match value {
        PickleValue::Seq(items) => format!("sequence of length {}", items.len()),
        other => other.type_name().to_string(),
    }
}

fn keys_of(value: &PickleValue, field: &str, path: &Path) -> Result<Vec<Key>, HypergraphError> {
    let items = value.as_seq().ok_or_else(|| {
        HypergraphError::malformed(path, field, format!("expected a sequence, found {}", value.type_name()))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            Key::from_pickle(v).ok_or_else(|| {
                HypergraphError::malformed(
                    path,
                    field,
                    format!("entry {i} ({}) is not a usable id", v.python_repr()),
                )
            })
        })
        .collect()
}

fn from_parallel_indices(
    nodes: PickleValue,
    edges: PickleValue,
    path: &Path,
) -> Result<Hypergraph, HypergraphError> {
    let nodes = keys_of(&nodes, "node_indices", path)?;
    let edges = keys_of(&edges, "edge_indices", path)?;
    if nodes.len() != edges.len() {
        return Err(HypergraphError::malformed(
            path,
            "node_indices/edge_indices",
            format!(
                "parallel arrays differ in length: {} node indices vs {} edge indices",
                nodes.len(),
                edges.len()
            ),
        ));
    }
    Ok(Hypergraph::from_incidence_pairs(nodes, edges))
}

fn from_hyperedge_list(hyperedges: PickleValue, path: &Path) -> Result<Hypergraph, HypergraphError> {
    let list = hyperedges.as_seq().ok_or_else(|| {
        HypergraphError::malformed(
            path,
            "hyperedges",
            format!("expected a sequence of node lists, found {}", hyperedges.type_name()),
        )
    })?;
    let mut hg = Hypergraph::new();
    for (i, edge) in list.iter().enumerate() {
        let field = format!("hyperedges[{i}]");
        let members = edge.as_seq().ok_or_else(|| {
            HypergraphError::malformed(path, &field, format!("expected a node list, found {}", edge.type_name()))
        })?;
        let nodes = members
            .iter()
            .map(|v| {
                v.python_int().map(Key::Int).ok_or_else(|| {
                    HypergraphError::malformed(
                        path,
                        &field,
                        format!("node {} is not convertible to int", v.python_repr()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        hg.insert_edge(Key::Int(i as i64), nodes);
    }
    Ok(hg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> PickleValue {
        PickleValue::Seq(v.iter().copied().map(PickleValue::Int).collect())
    }

    fn edges(hg: &Hypergraph) -> Vec<(Key, Vec<Key>)> {
        hg.edges().map(|(k, n)| (k.clone(), n.to_vec())).collect()
    }

    #[test]
    fn parallel_indices_are_grouped() {
        let value = PickleValue::Seq(vec![ints(&[0, 0, 1]), ints(&[0, 1, 1])]);
        let hg = decode_hypergraph(value, Path::new("H.pickle")).unwrap();
        assert_eq!(
            edges(&hg),
            vec![
                (Key::Int(0), vec![Key::Int(0)]),
                (Key::Int(1), vec![Key::Int(0), Key::Int(1)]),
            ]
        );
    }

    #[test]
    fn hyperedge_triple_is_enumerated() {
        let value = PickleValue::Seq(vec![
            PickleValue::None,
            PickleValue::None,
            PickleValue::Seq(vec![
                ints(&[3, 1]),
                PickleValue::Seq(vec![PickleValue::Str("2".into()), PickleValue::Float(4.0)]),
            ]),
        ]);
        let hg = decode_hypergraph(value, Path::new("H.pkl")).unwrap();
        assert_eq!(
            edges(&hg),
            vec![
                (Key::Int(0), vec![Key::Int(3), Key::Int(1)]),
                (Key::Int(1), vec![Key::Int(2), Key::Int(4)]),
            ]
        );
    }

    #[test]
    fn length_mismatch_is_malformed() {
        let value = PickleValue::Seq(vec![ints(&[0, 1]), ints(&[0])]);
        let err = decode_hypergraph(value, Path::new("H.pickle")).unwrap_err();
        assert!(matches!(err, HypergraphError::MalformedStructure { .. }));
    }

    #[test]
    fn unknown_shape_is_malformed() {
        let err = decode_hypergraph(ints(&[1, 2, 3, 4]), Path::new("H.pickle")).unwrap_err();
        match err {
            HypergraphError::MalformedStructure { detail, .. } => {
                assert!(detail.contains("length 4"), "{detail}")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
