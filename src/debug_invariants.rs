//! Structural self-checks for the sparse containers.
//!
//! `validate_invariants` runs wherever data enters the crate (the COO
//! builder, `try_new` constructors, the text reader) and reports the first
//! violation as an error. `debug_assert_invariants` repeats the check after
//! in-crate construction; it only does work in debug builds or with the
//! `strict-invariants` feature.

use crate::hypergraph_error::HypergraphError;

/// Whether [`DebugInvariants::debug_assert_invariants`] checks anything in
/// this build.
pub const INVARIANT_CHECKS: bool = cfg!(any(debug_assertions, feature = "strict-invariants"));

pub trait DebugInvariants {
    /// Type name used in panic messages.
    const NAME: &'static str;

    /// The first violated invariant, if any.
    fn validate_invariants(&self) -> Result<(), HypergraphError>;

    /// Panic on a violated invariant when checks are compiled in.
    fn debug_assert_invariants(&self) {
        if INVARIANT_CHECKS {
            if let Err(e) = self.validate_invariants() {
                panic!("[invariants] {}: {e}", Self::NAME);
            }
        }
    }
}
