//! Error types for the transformation stages.

use thiserror::Error;

/// Errors raised by the transformation stages.
///
/// Labeling and aggregation never fail; only the post-filter check does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Records that should have been filtered out survived the filter.
    #[error("filter invariant violated: {violations} of {total} records do not satisfy {predicate}")]
    FilterInvariant {
        predicate: String,
        violations: usize,
        total: usize,
    },
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
