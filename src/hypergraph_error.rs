//! HypergraphError: Unified error type for hypergraph-sieve public APIs
//!
//! Every fallible operation in the crate returns this type. Structural and
//! format problems abort a conversion; per-node label failures never reach
//! this type (they resolve to the sentinel label instead).

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for hypergraph-sieve operations.
#[derive(Debug, Error)]
pub enum HypergraphError {
    /// The dataset path does not exist or is not a directory.
    #[error("Dataset path `{0}` is not a directory")]
    NotADirectory(PathBuf),
    /// Reading or writing a file failed.
    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A pickle file could not be decoded.
    #[error("Failed to decode pickle `{path}`: {source}")]
    Pickle {
        path: PathBuf,
        #[source]
        source: serde_pickle::Error,
    },
    /// The pickle stores numpy arrays or scalars instead of builtin containers.
    #[error(
        "Pickle `{path}` contains numpy objects ({module}); re-save it with plain lists, e.g. `array.tolist()`"
    )]
    NumpyObjects { path: PathBuf, module: &'static str },
    /// A required input file of a layout is absent.
    #[error("Layout `{layout}`: required file `{path}` not found")]
    MissingInput { layout: &'static str, path: PathBuf },
    /// No layout detector found its required files.
    #[error("No supported hypergraph format in `{dir}` ({attempts})")]
    NoSupportedFormat { dir: PathBuf, attempts: String },
    /// A file decoded but its contents do not have the expected shape.
    #[error("Malformed `{field}` in `{path}`: {detail}")]
    MalformedStructure {
        path: PathBuf,
        field: String,
        detail: String,
    },
    /// Node identifiers of different shapes cannot be ordered together.
    #[error("Incomparable node ids: `{first}` ({first_shape}) vs `{second}` ({second_shape})")]
    IncomparableKeys {
        first: String,
        first_shape: String,
        second: String,
        second_shape: String,
    },
    /// An edge with no nodes, under strict empty-edge handling.
    #[error("Edge `{key}` (index {index}) has no nodes")]
    EmptyEdge { index: usize, key: String },
    /// A CSR structure violates its invariants.
    #[error("Invalid CSR structure: {0}")]
    InvalidCsr(String),
    /// A text artifact contains an unparseable token.
    #[error("Parse error in `{path}` line {line}: {detail}")]
    TextParse {
        path: PathBuf,
        line: usize,
        detail: String,
    },
    /// JSON export failed.
    #[error("JSON export to `{path}` failed: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Context wrapper naming the dataset a failure belongs to.
    #[error("Dataset `{dir}`: {source}")]
    Dataset {
        dir: PathBuf,
        #[source]
        source: Box<HypergraphError>,
    },
}

impl HypergraphError {
    /// Build an [`HypergraphError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HypergraphError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build an [`HypergraphError::MalformedStructure`].
    pub fn malformed(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        HypergraphError::MalformedStructure {
            path: path.into(),
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Attach the dataset directory, unless already attached.
    pub fn in_dataset(self, dir: impl Into<PathBuf>) -> Self {
        match self {
            e @ HypergraphError::Dataset { .. } => e,
            e @ HypergraphError::NotADirectory(_) => e,
            e @ HypergraphError::NoSupportedFormat { .. } => e,
            other => HypergraphError::Dataset {
                dir: dir.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping dataset context wrappers.
    pub fn root(&self) -> &HypergraphError {
        match self {
            HypergraphError::Dataset { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = HypergraphError> = std::result::Result<T, E>;
