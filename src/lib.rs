#![cfg_attr(docsrs, feature(doc_cfg))]
//! # hypergraph-sieve
//!
//! hypergraph-sieve converts hypergraph datasets stored as Python pickles into
//! a compressed-row (CSR) node-by-edge incidence matrix with one integer label
//! per node, written as plain-text artifacts for downstream numeric codes
//! (label propagation and friends).
//!
//! ## Pipeline
//! 1. [`io::load_dataset`] probes the supported layouts in order ("classic":
//!    `hypergraph.pickle` + `labels.pickle`; "Villain": `H.pickle`/`H.pkl` +
//!    optional `L.pickle`).
//! 2. [`algs::renumber`] assigns dense node indices by sorted id and dense
//!    edge indices by edge order.
//! 3. [`algs::build_incidence`] accumulates coordinate triples and compresses
//!    them into a [`data::CsrMatrix`].
//! 4. [`algs::align_labels`] maps raw labels onto the dense node order, using
//!    the sentinel `-1` for anything unresolvable.
//! 5. [`io::csr_text::CsrTextWriter`] writes `processed/H_data.txt`,
//!    `H_indices.txt`, `H_indptr.txt`, `labels.txt` and `meta.txt`.
//!
//! [`algs::convert_dataset`] runs all of the above for one directory.
//!
//! ## Determinism
//!
//! Node order depends only on the set of node ids, and edge order only on the
//! order of the source dictionary, so re-running on unchanged input produces
//! byte-identical artifacts.
//!
//! ## Usage
//!
//! ```no_run
//! use hypergraph_sieve::prelude::*;
//! use std::path::Path;
//!
//! let report = convert_dataset(Path::new("data/cora"), &ConvertOptions::default())?;
//! println!("{} nodes, {} edges, {} nonzeros", report.n_nodes, report.n_edges, report.nnz);
//! # Ok::<(), HypergraphError>(())
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod hypergraph_error;
pub mod io;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::align::{AlignedLabels, align_labels};
    pub use crate::algs::convert::{ConversionReport, ConvertOptions, convert_dataset, convert_raw};
    pub use crate::algs::incidence::{EmptyEdgeHandling, build_incidence};
    pub use crate::algs::renumber::{DenseIndex, Renumbering, renumber};
    pub use crate::data::csr::{CooBuilder, CsrMatrix, DuplicateHandling};
    pub use crate::data::incidence::{IncidenceDataset, IncidenceMeta};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::hypergraph_error::HypergraphError;
    pub use crate::io::csr_text::{CsrTextReader, CsrTextWriter};
    pub use crate::io::{LayoutDetector, LayoutKind, RawDataset, load_dataset};
    pub use crate::topology::hypergraph::Hypergraph;
    pub use crate::topology::key::Key;
    pub use crate::topology::labels::{LabelMode, LabelSource, SENTINEL_LABEL};
}
