//! Error taxonomy shared by every aggregator in this crate.

use std::fmt::Debug;

/// Everything that can go wrong while driving a rolling aggregator.
///
/// Each variant corresponds to one entry of the error taxonomy: invariant
/// violations (`EmptyWindow`, `IndexOrder`) indicate upstream misuse or a
/// bug in this crate; the others are ordinary, expected failure modes of
/// otherwise well-formed usage (asking for a value before enough data has
/// arrived, mixing incompatible window types, and so on).
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RollingError {
    /// A value could not be used by the operation it was given to.
    #[error("value incompatible with this operation: {0}")]
    Type(String),

    /// The operation does not support the window type it was constructed with.
    #[error("window type {found:?} is not supported by this operation, expected {expected:?}")]
    WindowType {
        expected: &'static str,
        found: &'static str,
    },

    /// `current_value` was requested before enough elements had arrived.
    #[error("insufficient data: need at least {required} element(s), have {available}")]
    InsufficientData { required: usize, available: usize },

    /// `remove_old` was called on a window that holds no elements.
    #[error("remove_old called on an empty window")]
    EmptyWindow,

    /// A numerically invalid input was supplied (e.g. a reference probability of zero).
    #[error("domain error: {0}")]
    Domain(String),

    /// An indexed stream produced a non-monotone index.
    #[error("index out of order: {previous:?} was followed by {next:?}")]
    IndexOrder { previous: String, next: String },

    /// `ApplyPairwise`'s two streams terminated at different points.
    #[error("paired streams have mismatched lengths: {a} vs {b}")]
    StreamMismatch { a: usize, b: usize },
}

impl RollingError {
    pub(crate) fn index_order<T: Debug>(previous: &T, next: &T) -> Self {
        RollingError::IndexOrder {
            previous: format!("{previous:?}"),
            next: format!("{next:?}"),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RollingError>;
