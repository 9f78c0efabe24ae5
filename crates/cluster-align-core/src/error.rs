//! Error types for cluster-align-core.
//!
//! All fallible operations return [`ClusterResult`]. Partitioning and
//! distance computations fail with a descriptive error rather than
//! returning a placeholder value; the one deliberately silent condition is
//! an unmapped category, which is recorded as
//! [`UNASSIGNED`](crate::types::UNASSIGNED) in the category map and
//! surfaced through `tracing::warn!` instead of an error.

use thiserror::Error;

/// Result alias for cluster-align-core operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Top-level error type for clustering and alignment operations.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The requested cluster count cannot be satisfied by the batch.
    ///
    /// Raised when `k < 2`, `k` exceeds the number of vectors, or `k`
    /// exceeds the number of distinct vectors in the batch.
    #[error("invalid cluster count: k={k} for batch of {n} vectors ({distinct} distinct)")]
    InvalidClusterCount {
        /// Requested cluster count
        k: usize,
        /// Number of vectors in the batch
        n: usize,
        /// Number of distinct vectors in the batch
        distinct: usize,
    },

    /// A cluster violated a precondition of a distance or silhouette
    /// computation (empty where members are required, or a single cluster
    /// where at least two are required).
    #[error("degenerate cluster: {0}")]
    DegenerateCluster(String),

    /// The cluster-count sweep produced too few scorable candidates for
    /// the elbow or silhouette rule to apply.
    #[error("cluster count sweep produced {scorable} scorable candidates, need at least 2")]
    DegenerateSweep {
        /// Number of candidates that were successfully scored
        scorable: usize,
    },

    /// A vector in the batch does not match the batch dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the first vector in the batch
        expected: usize,
        /// Dimensionality of the offending vector
        actual: usize,
    },

    /// Two parallel per-item sequences disagree in length.
    #[error("parallel sequences disagree in length: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first sequence
        left: usize,
        /// Length of the second sequence
        right: usize,
    },

    /// Expansion hit a category with no entry in the category map.
    #[error("category not present in category-to-cluster map: {0}")]
    UnknownCategory(String),

    /// An input that requires at least one element was empty.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}

impl ClusterError {
    /// Build a [`ClusterError::DegenerateCluster`] from a message.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateCluster(msg.into())
    }
}
