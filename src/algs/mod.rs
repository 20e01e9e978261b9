//! Re-export public algorithms.

pub mod align;
pub mod convert;
pub mod incidence;
pub mod renumber;

pub use align::{AlignedLabels, align_labels};
pub use convert::{ConversionReport, ConvertOptions, convert_dataset, convert_raw};
pub use incidence::{EmptyEdgeHandling, build_incidence};
pub use renumber::{DenseIndex, Renumbering, renumber};
