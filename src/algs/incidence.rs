//! Node-by-edge incidence matrix construction.

use crate::algs::renumber::Renumbering;
use crate::data::csr::{CooBuilder, CsrMatrix, DuplicateHandling};
use crate::data::incidence::IncidenceMeta;
use crate::hypergraph_error::HypergraphError;
use crate::topology::hypergraph::Hypergraph;

/// Value stored for every incidence.
pub const INCIDENCE_VALUE: f64 = 1.0;

/// Behavior for edges with an empty node list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EmptyEdgeHandling {
    /// Skip silently.
    Ignore,
    /// Skip and log a warning.
    #[default]
    Warn,
    /// Abort the conversion.
    Error,
}

/// Output of [`build_incidence`].
#[derive(Clone, Debug, PartialEq)]
pub struct IncidenceBuild {
    pub matrix: CsrMatrix,
    pub meta: IncidenceMeta,
    /// Dense indices of edges that contributed no entries.
    pub empty_edges: Vec<usize>,
}

/// Build the `(n_nodes, n_edges)` incidence matrix of `hg`.
///
/// Empty edges keep their column (the column is simply empty), so edge
/// indices stay aligned with the edge-key order.
pub fn build_incidence(
    hg: &Hypergraph,
    renumbering: &Renumbering,
    empty_edges: EmptyEdgeHandling,
    duplicates: DuplicateHandling,
) -> Result<IncidenceBuild, HypergraphError> {
    let meta = IncidenceMeta {
        n_nodes: renumbering.nodes.len(),
        n_edges: renumbering.edges.len(),
    };
    let mut coo = CooBuilder::with_capacity(meta.n_nodes, meta.n_edges, hg.total_incidences());
    let mut skipped = Vec::new();

    for (edge_key, members) in hg.edges() {
        let col = renumbering.edges.index_of(edge_key).ok_or_else(|| {
            HypergraphError::InvalidCsr(format!("edge `{edge_key}` missing from edge table"))
        })?;
        if members.is_empty() {
            match empty_edges {
                EmptyEdgeHandling::Error => {
                    return Err(HypergraphError::EmptyEdge {
                        index: col,
                        key: edge_key.to_string(),
                    });
                }
                EmptyEdgeHandling::Warn => {
                    log::warn!("Skipping empty edge `{edge_key}` (index {col})");
                }
                EmptyEdgeHandling::Ignore => {}
            }
            skipped.push(col);
            continue;
        }
        for node in members {
            let row = renumbering.nodes.index_of(node).ok_or_else(|| {
                HypergraphError::InvalidCsr(format!(
                    "node `{node}` of edge `{edge_key}` missing from node table"
                ))
            })?;
            coo.push(row, col, INCIDENCE_VALUE)?;
        }
    }

    let matrix = coo.into_csr(duplicates)?;
    log::debug!(
        "incidence matrix {}x{} with {} nonzeros",
        meta.n_nodes,
        meta.n_edges,
        matrix.nnz()
    );
    Ok(IncidenceBuild {
        matrix,
        meta,
        empty_edges: skipped,
    })
}
