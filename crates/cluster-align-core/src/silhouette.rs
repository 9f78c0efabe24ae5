//! Silhouette score over a labeled vector batch.
//!
//! For each point, `a` is its mean Euclidean distance to the other
//! members of its own cluster and `b` its mean distance to the nearest
//! other cluster; the point's silhouette is `(b - a) / max(a, b)`. The
//! batch score is the mean over all points. A point that is alone in its
//! cluster contributes 0.

use crate::error::{ClusterError, ClusterResult};
use crate::metrics::euclidean_distance;
use crate::types::ClusterId;

/// Compute the mean silhouette score of a labeled batch.
///
/// `assignments` is parallel to `vectors`; labels must cover `[0, k)`
/// with every cluster non-empty.
///
/// # Errors
///
/// - [`ClusterError::LengthMismatch`] if the sequences disagree.
/// - [`ClusterError::DegenerateCluster`] if `k < 2`, `k > n - 1`, a
///   label falls outside `[0, k)`, or some cluster is empty. These
///   conditions have no meaningful score and fail loudly rather than
///   returning a degenerate value.
pub fn silhouette_score(
    vectors: &[Vec<f32>],
    assignments: &[ClusterId],
    k: usize,
) -> ClusterResult<f32> {
    let n = vectors.len();
    if n != assignments.len() {
        return Err(ClusterError::LengthMismatch {
            left: n,
            right: assignments.len(),
        });
    }
    if n == 0 {
        return Err(ClusterError::EmptyInput("silhouette batch"));
    }
    if k < 2 || k > n - 1 {
        return Err(ClusterError::degenerate(format!(
            "silhouette requires 2 <= k <= n - 1, got k={k} with n={n}"
        )));
    }

    let mut cluster_sizes = vec![0usize; k];
    for &label in assignments {
        if label < 0 || label as usize >= k {
            return Err(ClusterError::degenerate(format!(
                "assignment {label} outside [0, {k})"
            )));
        }
        cluster_sizes[label as usize] += 1;
    }
    if let Some(empty) = cluster_sizes.iter().position(|&c| c == 0) {
        return Err(ClusterError::degenerate(format!(
            "cluster {empty} has no members"
        )));
    }

    let mut total = 0.0f64;
    for (i, vector) in vectors.iter().enumerate() {
        let own = assignments[i] as usize;
        if cluster_sizes[own] == 1 {
            continue; // singleton contributes 0
        }

        // Accumulate distance sums from point i to every cluster
        let mut sums = vec![0.0f64; k];
        for (j, other) in vectors.iter().enumerate() {
            if i == j {
                continue;
            }
            sums[assignments[j] as usize] += f64::from(euclidean_distance(vector, other));
        }

        let a = sums[own] / (cluster_sizes[own] - 1) as f64;
        let b = (0..k)
            .filter(|&c| c != own)
            .map(|c| sums[c] / cluster_sizes[c] as f64)
            .fold(f64::MAX, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok((total / n as f64) as f32)
}
