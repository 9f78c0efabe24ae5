//! Tests for KMeansPartitioner fitting behavior.

use crate::kmeans::{KMeansConfig, KMeansPartitioner};

use super::helpers::{three_group_batch, two_axis_batch};

#[test]
fn test_fit_returns_assignment_per_item_in_range() {
    let batch = three_group_batch();
    for k in [2, 3, 5] {
        let partitioner = KMeansPartitioner::new(KMeansConfig::new(k).unwrap());
        let fit = partitioner.fit(&batch).unwrap();

        assert_eq!(fit.assignments.len(), batch.len());
        for &label in &fit.assignments {
            assert!(label >= 0 && (label as usize) < k);
        }
        assert_eq!(fit.k(), k);
    }
}

#[test]
fn test_fit_separates_distinct_groups() {
    let batch = three_group_batch();
    let partitioner = KMeansPartitioner::new(KMeansConfig::new(3).unwrap());
    let fit = partitioner.fit(&batch).unwrap();

    // Items within a group share a label, and the three groups get three
    // different labels
    for group in 0..3 {
        let labels: Vec<_> = fit.assignments[group * 5..(group + 1) * 5].to_vec();
        assert!(
            labels.iter().all(|&l| l == labels[0]),
            "group {group} split across clusters: {labels:?}"
        );
    }
    let mut group_labels = [
        fit.assignments[0],
        fit.assignments[5],
        fit.assignments[10],
    ];
    group_labels.sort_unstable();
    assert_eq!(group_labels, [0, 1, 2]);
}

#[test]
fn test_fit_two_axis_groups() {
    let batch = two_axis_batch();
    let partitioner = KMeansPartitioner::new(KMeansConfig::new(2).unwrap());
    let fit = partitioner.fit(&batch).unwrap();

    assert_eq!(fit.assignments[0], fit.assignments[1]);
    assert_eq!(fit.assignments[2], fit.assignments[3]);
    assert_ne!(fit.assignments[0], fit.assignments[2]);
    // Identical vectors sit on their centroid
    assert!(fit.inertia < 1e-6);
    assert!(fit.converged);
}

#[test]
fn test_fit_deterministic_for_fixed_seed() {
    let batch = three_group_batch();
    let config = KMeansConfig::new(3).unwrap().with_seed(1234);

    let fit_a = KMeansPartitioner::new(config.clone()).fit(&batch).unwrap();
    let fit_b = KMeansPartitioner::new(config).fit(&batch).unwrap();

    assert_eq!(fit_a.assignments, fit_b.assignments);
    assert_eq!(fit_a.inertia, fit_b.inertia);
}

#[test]
fn test_fit_raw_skips_normalization() {
    // Two groups that differ only in magnitude collapse under
    // normalization but separate on the raw vectors
    let batch = vec![
        vec![1.0, 1.0],
        vec![1.01, 1.0],
        vec![10.0, 10.0],
        vec![10.01, 10.0],
    ];
    let partitioner = KMeansPartitioner::new(KMeansConfig::new(2).unwrap());
    let fit = partitioner.fit_raw(&batch).unwrap();

    assert_eq!(fit.assignments[0], fit.assignments[1]);
    assert_eq!(fit.assignments[2], fit.assignments[3]);
    assert_ne!(fit.assignments[0], fit.assignments[2]);
}

#[test]
fn test_fit_inertia_decreases_with_k() {
    let batch = three_group_batch();
    let mut previous = f32::MAX;
    for k in [2, 3, 5] {
        let partitioner = KMeansPartitioner::new(KMeansConfig::new(k).unwrap());
        let fit = partitioner.fit_raw(&batch).unwrap();
        assert!(
            fit.inertia <= previous,
            "inertia should not grow with k: k={k}, {} > {previous}",
            fit.inertia
        );
        previous = fit.inertia;
    }
}

#[test]
fn test_fit_every_cluster_nonempty() {
    let batch = three_group_batch();
    let partitioner = KMeansPartitioner::new(KMeansConfig::new(5).unwrap());
    let fit = partitioner.fit(&batch).unwrap();

    let mut counts = vec![0usize; 5];
    for &label in &fit.assignments {
        counts[label as usize] += 1;
    }
    assert!(counts.iter().all(|&c| c > 0), "empty cluster: {counts:?}");
}
