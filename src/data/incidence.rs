//! Converted dataset: incidence matrix, aligned labels and shape metadata.

use crate::data::csr::CsrMatrix;
use crate::debug_invariants::DebugInvariants;
use crate::hypergraph_error::HypergraphError;
use std::fmt;
use std::str::FromStr;

/// `(n_nodes, n_edges)`, persisted next to the matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IncidenceMeta {
    pub n_nodes: usize,
    pub n_edges: usize,
}

/// Renders as `"<n_nodes> <n_edges>"`.
impl fmt::Display for IncidenceMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.n_nodes, self.n_edges)
    }
}

impl FromStr for IncidenceMeta {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let mut next = |what: &str| -> Result<usize, String> {
            let tok = parts.next().ok_or_else(|| format!("missing {what}"))?;
            tok.parse::<usize>()
                .map_err(|_| format!("invalid {what}: {tok}"))
        };
        let n_nodes = next("n_nodes")?;
        let n_edges = next("n_edges")?;
        if let Some(extra) = parts.next() {
            return Err(format!("unexpected trailing token: {extra}"));
        }
        Ok(Self { n_nodes, n_edges })
    }
}

/// Node-by-edge incidence matrix together with one label per node.
#[derive(Clone, Debug, PartialEq)]
pub struct IncidenceDataset {
    matrix: CsrMatrix,
    labels: Vec<i64>,
}

impl IncidenceDataset {
    /// Pair a matrix with its labels; `labels.len()` must equal the row count.
    pub fn try_new(matrix: CsrMatrix, labels: Vec<i64>) -> Result<Self, HypergraphError> {
        let ds = Self { matrix, labels };
        ds.validate_invariants()?;
        Ok(ds)
    }

    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    pub fn meta(&self) -> IncidenceMeta {
        IncidenceMeta {
            n_nodes: self.matrix.n_rows(),
            n_edges: self.matrix.n_cols(),
        }
    }
}

impl DebugInvariants for IncidenceDataset {
    const NAME: &'static str = "IncidenceDataset";

    fn validate_invariants(&self) -> Result<(), HypergraphError> {
        self.matrix.validate_invariants()?;
        if self.labels.len() != self.matrix.n_rows() {
            return Err(HypergraphError::InvalidCsr(format!(
                "{} labels for {} nodes",
                self.labels.len(),
                self.matrix.n_rows()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_text_form() {
        let meta = IncidenceMeta {
            n_nodes: 3,
            n_edges: 2,
        };
        assert_eq!(meta.to_string(), "3 2");
        assert_eq!("3 2\n".parse::<IncidenceMeta>(), Ok(meta));
        assert!("3".parse::<IncidenceMeta>().is_err());
        assert!("3 x".parse::<IncidenceMeta>().is_err());
        assert!("3 2 1".parse::<IncidenceMeta>().is_err());
    }

    #[test]
    fn label_count_must_match_rows() {
        let m = CsrMatrix::empty(2, 1);
        assert!(IncidenceDataset::try_new(m.clone(), vec![-1]).is_err());
        let ds = IncidenceDataset::try_new(m, vec![-1, 4]).unwrap();
        assert_eq!(ds.meta(), IncidenceMeta { n_nodes: 2, n_edges: 1 });
    }
}
