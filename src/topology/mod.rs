//! Raw hypergraph model: identifiers, edge lists and label sources.
//!
//! These types describe a dataset as it was found on disk, before any
//! renumbering. Dense indices and matrices live in [`crate::algs`] and
//! [`crate::data`].

pub mod hypergraph;
pub mod key;
pub mod labels;

pub use hypergraph::Hypergraph;
pub use key::{Key, KeyShape};
pub use labels::{LabelMode, LabelSource, RawLabel, SENTINEL_LABEL};
