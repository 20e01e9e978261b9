//! Dataset I/O: pickle layouts in, text artifacts out.
//!
//! Input layouts are probed by [`LayoutDetector`]s in a fixed order. A probe
//! either loads the dataset or reports which required files are missing;
//! only missing files lead to the next layout being tried. Everything else
//! (undecodable pickle, unexpected shape) is fatal.

pub mod classic;
pub mod csr_text;
pub mod json;
pub mod pickle;
pub mod villain;

use crate::hypergraph_error::HypergraphError;
use crate::io::pickle::PickleValue;
use crate::topology::hypergraph::Hypergraph;
use crate::topology::key::Key;
use crate::topology::labels::LabelSource;
use itertools::Itertools;
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported on-disk layouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    /// `hypergraph.pickle` + `labels.pickle`
    Classic,
    /// `H.pickle`/`H.pkl` + optional `L.pickle`
    Villain,
}

impl LayoutKind {
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Classic => "classic",
            LayoutKind::Villain => "villain",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hypergraph and raw labels as loaded from one dataset directory.
#[derive(Clone, Debug)]
pub struct RawDataset {
    pub layout: LayoutKind,
    pub hypergraph: Hypergraph,
    pub labels: LabelSource,
    /// Files that were read.
    pub sources: Vec<PathBuf>,
}

/// Result of probing one layout.
#[derive(Debug)]
pub enum Probe {
    Loaded(RawDataset),
    /// Required files that are absent, one error per file.
    Missing(Vec<HypergraphError>),
}

/// A dataset layout that can be recognized in a directory.
pub trait LayoutDetector {
    fn kind(&self) -> LayoutKind;

    /// Load the dataset in `dir`, or report missing required files.
    fn probe(&self, dir: &Path) -> Result<Probe, HypergraphError>;
}

/// Detectors in the order they are tried: classic, then Villain.
pub fn default_detectors() -> Vec<Box<dyn LayoutDetector>> {
    vec![
        Box::new(classic::ClassicLayout),
        Box::new(villain::VillainLayout),
    ]
}

/// Load `dir` with the default detectors.
pub fn load_dataset(dir: &Path) -> Result<RawDataset, HypergraphError> {
    load_with(dir, &default_detectors())
}

/// Try each detector in order; the first that finds its files wins.
pub fn load_with(
    dir: &Path,
    detectors: &[Box<dyn LayoutDetector>],
) -> Result<RawDataset, HypergraphError> {
    if !dir.is_dir() {
        return Err(HypergraphError::NotADirectory(dir.to_path_buf()));
    }
    let mut attempts = Vec::with_capacity(detectors.len());
    for detector in detectors {
        match detector.probe(dir)? {
            Probe::Loaded(raw) => {
                log::info!(
                    "Loaded {} format from {} ({} edges)",
                    raw.layout,
                    dir.display(),
                    raw.hypergraph.n_edges()
                );
                return Ok(raw);
            }
            Probe::Missing(missing) => {
                log::debug!("{} layout not present in {}", detector.kind(), dir.display());
                attempts.push(format!("{}: {}", detector.kind(), missing.iter().join("; ")));
            }
        }
    }
    Err(HypergraphError::NoSupportedFormat {
        dir: dir.to_path_buf(),
        attempts: attempts.join(" | "),
    })
}

/// `Missing` probe entry for `path`.
pub(crate) fn missing(layout: LayoutKind, path: PathBuf) -> HypergraphError {
    HypergraphError::MissingInput {
        layout: layout.name(),
        path,
    }
}

/// Decode an edge → node-list dictionary. Edge keys may be any hashable
/// value; node ids must be usable [`Key`]s.
pub(crate) fn hypergraph_from_mapping(
    entries: Vec<(PickleValue, PickleValue)>,
    path: &Path,
) -> Result<Hypergraph, HypergraphError> {
    let mut hg = Hypergraph::new();
    for (k, v) in entries {
        let edge = Key::edge_from_pickle(&k).ok_or_else(|| {
            HypergraphError::malformed(
                path,
                "edge key",
                format!("{} of type {} is not a usable key", k.python_repr(), k.type_name()),
            )
        })?;
        let members = v.as_seq().ok_or_else(|| {
            HypergraphError::malformed(
                path,
                format!("edge `{edge}`"),
                format!("expected a node sequence, found {}", v.type_name()),
            )
        })?;
        let nodes = members
            .iter()
            .map(|n| {
                Key::from_pickle(n).ok_or_else(|| {
                    HypergraphError::malformed(
                        path,
                        format!("edge `{edge}`"),
                        format!("node {} of type {} is not a usable id", n.python_repr(), n.type_name()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        hg.insert_edge(edge, nodes);
    }
    Ok(hg)
}

/// Load an optional label file; absent files yield [`LabelSource::Absent`].
pub(crate) fn load_labels(path: &Path) -> Result<LabelSource, HypergraphError> {
    if !path.is_file() {
        return Ok(LabelSource::Absent);
    }
    LabelSource::from_pickle(pickle::load_pickle(path)?, path)
}
