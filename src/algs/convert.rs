//! End-to-end conversion of one dataset directory.
//!
//! load → renumber → incidence matrix → label alignment → text artifacts
//! (and, optionally, the JSON export). Each run reads only its own
//! directory and writes only below it.

use crate::algs::align::{AlignedLabels, align_labels};
use crate::algs::incidence::{EmptyEdgeHandling, build_incidence};
use crate::algs::renumber::{Renumbering, renumber};
use crate::data::csr::DuplicateHandling;
use crate::data::incidence::IncidenceDataset;
use crate::hypergraph_error::HypergraphError;
use crate::io::csr_text::CsrTextWriter;
use crate::io::json::write_json_export;
use crate::io::{LayoutKind, RawDataset, load_dataset};
use crate::topology::labels::LabelMode;
use std::path::{Path, PathBuf};

/// Name of the output subdirectory.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "processed";

/// Options for [`convert_dataset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Scalar labels only, or labels plus attribute records.
    pub label_mode: LabelMode,
    /// How empty edges are reported.
    pub empty_edges: EmptyEdgeHandling,
    /// Whether repeated incidences are kept or summed.
    pub duplicates: DuplicateHandling,
    /// Output directory, relative to the dataset directory.
    pub output_subdir: PathBuf,
    /// Dataset name for the JSON export; `None` disables it.
    pub json_export: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            label_mode: LabelMode::Scalar,
            empty_edges: EmptyEdgeHandling::Warn,
            duplicates: DuplicateHandling::Keep,
            output_subdir: PathBuf::from(DEFAULT_OUTPUT_SUBDIR),
            json_export: None,
        }
    }
}

impl ConvertOptions {
    pub fn with_empty_edges(mut self, handling: EmptyEdgeHandling) -> Self {
        self.empty_edges = handling;
        self
    }

    pub fn with_duplicates(mut self, handling: DuplicateHandling) -> Self {
        self.duplicates = handling;
        self
    }

    pub fn with_output_subdir(mut self, subdir: impl Into<PathBuf>) -> Self {
        self.output_subdir = subdir.into();
        self
    }

    /// Enable the JSON export; also switches labels to rich mode.
    pub fn with_json_export(mut self, name: impl Into<String>) -> Self {
        self.json_export = Some(name.into());
        self.label_mode = LabelMode::Rich;
        self
    }
}

/// In-memory result of converting a [`RawDataset`].
#[derive(Clone, Debug)]
pub struct Conversion {
    pub renumbering: Renumbering,
    pub dataset: IncidenceDataset,
    pub labels: AlignedLabels,
    pub empty_edges: Vec<usize>,
}

/// Summary of one [`convert_dataset`] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    pub layout: LayoutKind,
    pub n_nodes: usize,
    pub n_edges: usize,
    pub nnz: usize,
    pub empty_edges: Vec<usize>,
    pub labelled_nodes: usize,
    pub written: Vec<PathBuf>,
}

/// Convert a loaded dataset without touching the filesystem.
pub fn convert_raw(raw: &RawDataset, opts: &ConvertOptions) -> Result<Conversion, HypergraphError> {
    let renumbering = renumber(&raw.hypergraph)?;
    log::info!(
        "Hypergraph loaded: {} nodes, {} edges",
        renumbering.nodes.len(),
        renumbering.edges.len()
    );

    let build = build_incidence(&raw.hypergraph, &renumbering, opts.empty_edges, opts.duplicates)?;
    if !build.empty_edges.is_empty() {
        log::warn!("{} empty edge(s) skipped", build.empty_edges.len());
    }

    let labels = align_labels(&renumbering.nodes, &raw.labels, opts.label_mode)?;
    let dataset = IncidenceDataset::try_new(build.matrix, labels.labels.clone())?;

    Ok(Conversion {
        renumbering,
        dataset,
        labels,
        empty_edges: build.empty_edges,
    })
}

/// Load, convert and write the dataset in `dir`.
///
/// Every error is tagged with `dir`.
pub fn convert_dataset(dir: &Path, opts: &ConvertOptions) -> Result<ConversionReport, HypergraphError> {
    run(dir, opts).map_err(|e| e.in_dataset(dir))
}

fn run(dir: &Path, opts: &ConvertOptions) -> Result<ConversionReport, HypergraphError> {
    let raw = load_dataset(dir)?;
    let conversion = convert_raw(&raw, opts)?;

    let out_dir = dir.join(&opts.output_subdir);
    let mut written = CsrTextWriter.write_dir(&out_dir, &conversion.dataset)?;

    if let Some(name) = &opts.json_export {
        written.extend(write_json_export(
            dir,
            name,
            &raw.hypergraph,
            &conversion.renumbering.nodes,
            &conversion.labels,
        )?);
    }

    let meta = conversion.dataset.meta();
    Ok(ConversionReport {
        layout: raw.layout,
        n_nodes: meta.n_nodes,
        n_edges: meta.n_edges,
        nnz: conversion.dataset.matrix().nnz(),
        empty_edges: conversion.empty_edges,
        labelled_nodes: conversion.labels.resolved(),
        written,
    })
}
