//! Dense renumbering of raw node and edge identifiers.
//!
//! Nodes are numbered by their sorted position in the node universe (every
//! node referenced by any edge, deduplicated). Edges are numbered in the
//! hypergraph's insertion order and are never sorted.

use crate::hypergraph_error::HypergraphError;
use crate::topology::hypergraph::Hypergraph;
use crate::topology::key::{Key, KeyShape};
use std::collections::{HashMap, HashSet};

/// Bidirectional raw key ↔ dense index table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DenseIndex {
    /// Dense index → raw key.
    key_of: Vec<Key>,
    /// Raw key → dense index.
    index_of: HashMap<Key, usize>,
}

impl DenseIndex {
    /// Number keys in the given order. Repeated keys keep their first index.
    pub fn from_ordered<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        let mut out = Self::default();
        for key in keys {
            if !out.index_of.contains_key(&key) {
                out.index_of.insert(key.clone(), out.key_of.len());
                out.key_of.push(key);
            }
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.key_of.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.key_of.is_empty()
    }

    #[inline]
    pub fn index_of(&self, key: &Key) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    #[inline]
    pub fn key_of(&self, index: usize) -> Option<&Key> {
        self.key_of.get(index)
    }

    /// Raw keys in dense order.
    pub fn keys(&self) -> &[Key] {
        &self.key_of
    }
}

/// Dense numbering of one hypergraph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Renumbering {
    pub nodes: DenseIndex,
    pub edges: DenseIndex,
}

/// Sorted, deduplicated set of every node referenced by an edge.
///
/// All node keys must be mutually orderable (see [`KeyShape::compatible`]);
/// otherwise the first conflicting pair (in edge order) is reported.
pub fn node_universe(hg: &Hypergraph) -> Result<Vec<Key>, HypergraphError> {
    let mut seen: HashSet<&Key> = HashSet::new();
    let mut nodes: Vec<Key> = Vec::new();
    let mut merged: Option<KeyShape> = None;

    for (_, members) in hg.edges() {
        for node in members {
            if !seen.insert(node) {
                continue;
            }
            let shape = node.shape();
            match merged.as_mut() {
                None => merged = Some(shape),
                Some(m) if m.compatible(&shape) => m.merge(&shape),
                Some(_) => return Err(incomparable(&nodes, node, &shape)),
            }
            nodes.push(node.clone());
        }
    }

    nodes.sort_unstable();
    Ok(nodes)
}

fn incomparable(earlier: &[Key], node: &Key, shape: &KeyShape) -> HypergraphError {
    let first = earlier
        .iter()
        .find(|k| !k.shape().compatible(shape))
        .or(earlier.first());
    HypergraphError::IncomparableKeys {
        first: first.map(Key::to_string).unwrap_or_default(),
        first_shape: first.map(|k| k.shape().to_string()).unwrap_or_default(),
        second: node.to_string(),
        second_shape: shape.to_string(),
    }
}

/// Build node and edge tables for `hg`.
pub fn renumber(hg: &Hypergraph) -> Result<Renumbering, HypergraphError> {
    let nodes = DenseIndex::from_ordered(node_universe(hg)?);
    let edges = DenseIndex::from_ordered(hg.edges().map(|(k, _)| k.clone()));
    log::debug!(
        "renumbered {} nodes and {} edges",
        nodes.len(),
        edges.len()
    );
    Ok(Renumbering { nodes, edges })
}
