//! Shared identifier types for cluster assignments.

/// Identifier of a discovered cluster.
///
/// Valid assignments are in `[0, k)`. The value [`UNASSIGNED`] is reserved
/// for categories that never won a majority vote and must be treated as
/// "no data" by downstream consumers, never as cluster zero.
pub type ClusterId = i32;

/// Reserved cluster id for categories that map to no cluster.
pub const UNASSIGNED: ClusterId = -1;
