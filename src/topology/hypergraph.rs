//! Ordered edge → node-list mapping.
//!
//! Edge order is the order edges were inserted (the source dictionary
//! order) and is what dense edge indices are assigned from. Re-inserting an
//! existing edge key replaces its node list but keeps its position, like a
//! Python dict.

use crate::topology::key::Key;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hypergraph {
    edges: Vec<(Key, Vec<Key>)>,
    position: HashMap<Key, usize>,
}

impl Hypergraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(edge key, nodes)` pairs in iteration order.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (Key, Vec<Key>)>,
    {
        let mut hg = Self::new();
        for (key, nodes) in edges {
            hg.insert_edge(key, nodes);
        }
        hg
    }

    /// Group parallel `(node, edge)` incidence pairs into per-edge node
    /// lists. Edges are ordered by first appearance.
    pub fn from_incidence_pairs<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = Key>,
        E: IntoIterator<Item = Key>,
    {
        let mut hg = Self::new();
        for (node, edge) in nodes.into_iter().zip(edges) {
            match hg.position.get(&edge) {
                Some(&pos) => hg.edges[pos].1.push(node),
                None => {
                    hg.insert_edge(edge, vec![node]);
                }
            }
        }
        hg
    }

    /// Insert or replace the node list of `key`. Returns the previous list.
    pub fn insert_edge(&mut self, key: Key, nodes: Vec<Key>) -> Option<Vec<Key>> {
        match self.position.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.edges[pos].1, nodes)),
            None => {
                self.position.insert(key.clone(), self.edges.len());
                self.edges.push((key, nodes));
                None
            }
        }
    }

    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Node list of `key`, if present.
    pub fn nodes_of(&self, key: &Key) -> Option<&[Key]> {
        self.position
            .get(key)
            .map(|&pos| self.edges[pos].1.as_slice())
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&Key, &[Key])> + '_ {
        self.edges.iter().map(|(k, nodes)| (k, nodes.as_slice()))
    }

    /// Total number of (node, edge) incidences, duplicates included.
    pub fn total_incidences(&self) -> usize {
        self.edges.iter().map(|(_, nodes)| nodes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incidence_pairs_group_by_first_appearance() {
        // node_indices=[0,0,1], edge_indices=[0,1,1]
        let nodes = [0, 0, 1].map(Key::Int);
        let edges = [0, 1, 1].map(Key::Int);
        let hg = Hypergraph::from_incidence_pairs(nodes, edges);
        let got: Vec<_> = hg.edges().map(|(k, n)| (k.clone(), n.to_vec())).collect();
        assert_eq!(
            got,
            vec![
                (Key::Int(0), vec![Key::Int(0)]),
                (Key::Int(1), vec![Key::Int(0), Key::Int(1)]),
            ]
        );
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut hg = Hypergraph::new();
        hg.insert_edge(Key::from("b"), vec![Key::Int(1)]);
        hg.insert_edge(Key::from("a"), vec![Key::Int(2)]);
        let prev = hg.insert_edge(Key::from("b"), vec![Key::Int(3)]);
        assert_eq!(prev, Some(vec![Key::Int(1)]));
        let order: Vec<_> = hg.edges().map(|(k, _)| k.to_string()).collect();
        assert_eq!(order, ["b", "a"]);
        assert_eq!(hg.nodes_of(&Key::from("b")), Some(&[Key::Int(3)][..]));
        assert_eq!(hg.total_incidences(), 2);
    }
}
