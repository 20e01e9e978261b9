//! Data module: sparse matrices and the converted dataset

pub mod csr;
pub mod incidence;

pub use crate::debug_invariants::DebugInvariants;

pub use csr::{CooBuilder, CsrMatrix, DuplicateHandling};
pub use incidence::{IncidenceDataset, IncidenceMeta};
