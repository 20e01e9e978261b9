//! Raw node labels as found on disk.
//!
//! Label pickles come in three shapes: a dict of scalars, a dict of
//! per-node attribute dicts, or a flat list indexed by node id. They are
//! classified once, at load time, into a [`LabelSource`]; alignment then
//! only asks the source for the entry of each node.

use crate::hypergraph_error::HypergraphError;
use crate::io::pickle::PickleValue;
use crate::topology::key::Key;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Integer written for nodes without a resolvable label.
pub const SENTINEL_LABEL: i64 = -1;

/// How nested label records are treated during alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelMode {
    /// Only integer labels are produced.
    #[default]
    Scalar,
    /// Integer labels plus per-node attribute records (JSON export).
    Rich,
}

/// One raw label entry.
#[derive(Clone, Debug, PartialEq)]
pub enum RawLabel {
    /// A value that may convert to an integer.
    Scalar(PickleValue),
    /// A nested attribute mapping; never converted to an integer.
    Record(Vec<(PickleValue, PickleValue)>),
}

impl RawLabel {
    pub fn from_pickle(value: PickleValue) -> Self {
        match value {
            PickleValue::Map(entries) => RawLabel::Record(entries),
            other => RawLabel::Scalar(other),
        }
    }

    /// Integer label, if the entry converts with Python `int()` semantics.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawLabel::Scalar(v) => v.python_int(),
            RawLabel::Record(_) => None,
        }
    }
}

/// Normalized label source for one dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LabelSource {
    /// No label file.
    #[default]
    Absent,
    /// Labels keyed by raw node id.
    Mapping {
        entries: HashMap<Key, RawLabel>,
        origin: PathBuf,
    },
    /// Labels indexed by integer node id.
    Array {
        values: Vec<RawLabel>,
        origin: PathBuf,
    },
}

impl LabelSource {
    /// Classify a decoded label pickle. `None` entries in a mapping count
    /// as missing, matching a `dict.get(...) is None` check. Mapping keys
    /// that no node id can equal (`2.5`, `None`) are dropped.
    pub fn from_pickle(value: PickleValue, origin: &Path) -> Result<Self, HypergraphError> {
        match value {
            PickleValue::None => Ok(LabelSource::Absent),
            PickleValue::Map(raw) => {
                let mut entries = HashMap::with_capacity(raw.len());
                for (k, v) in raw {
                    let Some(key) = Key::from_pickle(&k) else {
                        log::debug!(
                            "{}: ignoring label key {} of type {}; it cannot match a node id",
                            origin.display(),
                            k.python_repr(),
                            k.type_name()
                        );
                        continue;
                    };
                    if v == PickleValue::None {
                        entries.remove(&key);
                        continue;
                    }
                    entries.insert(key, RawLabel::from_pickle(v));
                }
                Ok(LabelSource::Mapping {
                    entries,
                    origin: origin.to_path_buf(),
                })
            }
            PickleValue::Seq(items) => Ok(LabelSource::Array {
                values: items.into_iter().map(RawLabel::from_pickle).collect(),
                origin: origin.to_path_buf(),
            }),
            other => Err(HypergraphError::malformed(
                origin,
                "labels",
                format!("expected a dict or a sequence, found {}", other.type_name()),
            )),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, LabelSource::Absent)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        match self {
            LabelSource::Absent => 0,
            LabelSource::Mapping { entries, .. } => entries.len(),
            LabelSource::Array { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw label for `key`.
    ///
    /// Array sources require integer keys: any other key is a malformed
    /// structure, while integers outside `0..len` simply have no label.
    pub fn lookup(&self, key: &Key) -> Result<Option<&RawLabel>, HypergraphError> {
        match self {
            LabelSource::Absent => Ok(None),
            LabelSource::Mapping { entries, .. } => Ok(entries.get(key)),
            LabelSource::Array { values, origin } => {
                let idx = key.as_int().ok_or_else(|| {
                    HypergraphError::malformed(
                        origin,
                        "labels",
                        format!(
                            "label array of length {} cannot be indexed by node id `{key}` ({})",
                            values.len(),
                            key.shape()
                        ),
                    )
                })?;
                Ok(usize::try_from(idx).ok().and_then(|i| values.get(i)))
            }
        }
    }
}
