//! Regrouping of per-item data by assigned cluster.

use std::collections::BTreeMap;

use crate::error::{ClusterError, ClusterResult};
use crate::types::ClusterId;

/// Transient mapping from cluster id to the items assigned to it.
pub type ClusterPartition<T> = BTreeMap<ClusterId, Vec<T>>;

/// Group a parallel item sequence by its per-item cluster labels.
///
/// Pure regrouping, no numeric computation: each bucket preserves the
/// original relative order of its items, so concatenating the buckets in
/// ascending cluster id yields a permutation of the input. Works for
/// auxiliary response records and for the vectors themselves when
/// building a quality-metric partition. Items labeled
/// [`UNASSIGNED`](crate::types::UNASSIGNED) land in the `-1` bucket.
///
/// # Errors
///
/// [`ClusterError::LengthMismatch`] if the sequences disagree in length.
pub fn group_by_cluster<T: Clone>(
    labels: &[ClusterId],
    items: &[T],
) -> ClusterResult<ClusterPartition<T>> {
    if labels.len() != items.len() {
        return Err(ClusterError::LengthMismatch {
            left: labels.len(),
            right: items.len(),
        });
    }

    let mut partition: ClusterPartition<T> = BTreeMap::new();
    for (&label, item) in labels.iter().zip(items.iter()) {
        partition.entry(label).or_default().push(item.clone());
    }
    Ok(partition)
}
