//! Classic layout: `hypergraph.pickle` (dict edge → node list) and
//! `labels.pickle` (dict or list). Both files are required.

use crate::hypergraph_error::HypergraphError;
use crate::io::pickle::{PickleValue, load_pickle};
use crate::io::{
    LayoutDetector, LayoutKind, Probe, RawDataset, hypergraph_from_mapping, load_labels, missing,
};
use std::path::Path;

pub const HYPERGRAPH_FILE: &str = "hypergraph.pickle";
pub const LABELS_FILE: &str = "labels.pickle";

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicLayout;

impl LayoutDetector for ClassicLayout {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Classic
    }

    fn probe(&self, dir: &Path) -> Result<Probe, HypergraphError> {
        let hg_path = dir.join(HYPERGRAPH_FILE);
        let labels_path = dir.join(LABELS_FILE);

        let absent: Vec<_> = [&hg_path, &labels_path]
            .into_iter()
            .filter(|p| !p.is_file())
            .map(|p| missing(LayoutKind::Classic, p.clone()))
            .collect();
        if !absent.is_empty() {
            return Ok(Probe::Missing(absent));
        }

        let hypergraph = match load_pickle(&hg_path)? {
            PickleValue::Map(entries) => hypergraph_from_mapping(entries, &hg_path)?,
            other => {
                return Err(HypergraphError::malformed(
                    &hg_path,
                    "hypergraph",
                    format!("expected a dict of edge -> nodes, found {}", other.type_name()),
                ));
            }
        };
        let labels = load_labels(&labels_path)?;

        Ok(Probe::Loaded(RawDataset {
            layout: LayoutKind::Classic,
            hypergraph,
            labels,
            sources: vec![hg_path, labels_path],
        }))
    }
}
