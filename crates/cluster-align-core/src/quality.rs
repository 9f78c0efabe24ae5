//! Cluster quality metrics: within-cluster cohesion and between-cluster
//! separation over a partition of raw (un-normalized) vectors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};
use crate::grouping::ClusterPartition;
use crate::metrics::{cosine_distance, euclidean_distance};
use crate::types::ClusterId;

/// Quality metrics for one cluster partition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Mean pairwise cosine distance within each cluster.
    pub within: BTreeMap<ClusterId, f32>,
    /// Mean pairwise Euclidean distance between cluster centroids.
    pub between: f32,
}

/// Mean pairwise cosine distance within each cluster.
///
/// For a cluster of m >= 2 members: the mean of `1 - cosine_similarity`
/// over all unordered member pairs, a value in `[0, 2]`. Clusters with
/// one or zero members report exactly 0.0; that is a defined value, not
/// an error. O(m^2) per cluster, acceptable at this domain's cluster
/// sizes.
pub fn within_distances(partition: &ClusterPartition<Vec<f32>>) -> BTreeMap<ClusterId, f32> {
    let mut within = BTreeMap::new();
    for (&cluster, members) in partition {
        let m = members.len();
        if m <= 1 {
            within.insert(cluster, 0.0);
            continue;
        }

        let mut sum = 0.0f64;
        for i in 0..m {
            for j in (i + 1)..m {
                sum += f64::from(cosine_distance(&members[i], &members[j]));
            }
        }
        let pairs = (m * (m - 1) / 2) as f64;
        within.insert(cluster, (sum / pairs) as f32);
    }
    within
}

/// Mean pairwise Euclidean distance between cluster centroids.
///
/// Each centroid is the coordinate-wise mean of its members; the result
/// is the mean distance over all unordered centroid pairs.
///
/// # Errors
///
/// [`ClusterError::DegenerateCluster`] if fewer than two non-empty
/// clusters exist; the caller must supply at least two.
pub fn between_distance(partition: &ClusterPartition<Vec<f32>>) -> ClusterResult<f32> {
    let centroids: Vec<Vec<f32>> = partition
        .values()
        .filter(|members| !members.is_empty())
        .map(|members| centroid(members))
        .collect();

    let c = centroids.len();
    if c < 2 {
        return Err(ClusterError::degenerate(format!(
            "between-cluster distance needs at least 2 non-empty clusters, got {c}"
        )));
    }

    let mut sum = 0.0f64;
    for i in 0..c {
        for j in (i + 1)..c {
            sum += f64::from(euclidean_distance(&centroids[i], &centroids[j]));
        }
    }
    let pairs = (c * (c - 1) / 2) as f64;
    Ok((sum / pairs) as f32)
}

/// Compute both quality metrics for a partition.
pub fn quality_report(partition: &ClusterPartition<Vec<f32>>) -> ClusterResult<QualityReport> {
    Ok(QualityReport {
        within: within_distances(partition),
        between: between_distance(partition)?,
    })
}

/// Coordinate-wise mean of a non-empty member list.
fn centroid(members: &[Vec<f32>]) -> Vec<f32> {
    let dim = members[0].len();
    let mut mean = vec![0.0f32; dim];
    for member in members {
        for (acc, x) in mean.iter_mut().zip(member.iter()) {
            *acc += x;
        }
    }
    for elem in &mut mean {
        *elem /= members.len() as f32;
    }
    mean
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition_of(groups: &[(ClusterId, Vec<Vec<f32>>)]) -> ClusterPartition<Vec<f32>> {
        groups.iter().cloned().collect()
    }

    #[test]
    fn test_within_identical_vectors_zero() {
        let partition = partition_of(&[
            (0, vec![vec![1.0, 0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0, 0.0]]),
            (1, vec![vec![0.0, 1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0]]),
        ]);
        let within = within_distances(&partition);
        assert!(within[&0].abs() < 1e-6);
        assert!(within[&1].abs() < 1e-6);
    }

    #[test]
    fn test_within_singleton_and_empty_are_defined_zero() {
        let partition = partition_of(&[
            (0, vec![vec![1.0, 2.0]]),
            (1, vec![]),
            (2, vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
        ]);
        let within = within_distances(&partition);
        assert_eq!(within[&0], 0.0);
        assert_eq!(within[&1], 0.0);
        // Orthogonal pair: cosine distance exactly 1
        assert!((within[&2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_within_range_valid_cosine() {
        let partition = partition_of(&[(
            0,
            vec![
                vec![1.0, 0.5],
                vec![-1.0, -0.5],
                vec![0.3, 0.9],
                vec![-0.2, 0.7],
            ],
        )]);
        let within = within_distances(&partition);
        assert!((0.0..=2.0).contains(&within[&0]));
    }

    #[test]
    fn test_between_two_axis_clusters_sqrt_two() {
        // Centroids land on [1,0,0,0] and [0,1,0,0]; distance sqrt(2)
        let partition = partition_of(&[
            (0, vec![vec![1.0, 0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0, 0.0]]),
            (1, vec![vec![0.0, 1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0]]),
        ]);
        let between = between_distance(&partition).unwrap();
        assert!((between - 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_between_permutation_invariant() {
        let a = vec![vec![0.0, 0.0], vec![0.2, 0.0]];
        let b = vec![vec![3.0, 4.0]];
        let c = vec![vec![-1.0, 2.0], vec![-1.0, 2.2]];

        let forward = partition_of(&[(0, a.clone()), (1, b.clone()), (2, c.clone())]);
        let relabeled = partition_of(&[(0, c), (1, a), (2, b)]);

        let d1 = between_distance(&forward).unwrap();
        let d2 = between_distance(&relabeled).unwrap();
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn test_between_single_cluster_fails() {
        let partition = partition_of(&[(0, vec![vec![1.0, 2.0], vec![3.0, 4.0]])]);
        let err = between_distance(&partition).unwrap_err();
        assert!(matches!(err, ClusterError::DegenerateCluster(_)));
    }

    #[test]
    fn test_between_ignores_empty_clusters() {
        let partition = partition_of(&[
            (0, vec![vec![0.0, 0.0]]),
            (1, vec![]),
            (2, vec![vec![3.0, 4.0]]),
        ]);
        let between = between_distance(&partition).unwrap();
        assert!((between - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_quality_report_combined_scenario() {
        let partition = partition_of(&[
            (0, vec![vec![1.0, 0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0, 0.0]]),
            (1, vec![vec![0.0, 1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0]]),
        ]);
        let report = quality_report(&partition).unwrap();

        assert!(report.within[&0].abs() < 1e-6);
        assert!(report.within[&1].abs() < 1e-6);
        assert!((report.between - 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_quality_report_serde_roundtrip() {
        let partition = partition_of(&[
            (0, vec![vec![1.0, 0.0]]),
            (1, vec![vec![0.0, 1.0]]),
        ]);
        let report = quality_report(&partition).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let restored: QualityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
    }
}
