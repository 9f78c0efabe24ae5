//! K-means helper algorithms: seeded k-means++ initialization, centroid
//! updates, and inertia.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::metrics::euclidean_distance_squared;

/// Initialize centroids with k-means++.
///
/// The first centroid is drawn uniformly; each subsequent centroid is
/// drawn with probability proportional to its squared distance from the
/// nearest already-chosen centroid. All draws come from the caller's rng,
/// so a fixed seed gives a fixed initialization.
///
/// Caller guarantees `1 <= k <= vectors.len()`.
pub(super) fn kmeans_plus_plus_init(
    vectors: &[Vec<f32>],
    k: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec<f32>> {
    let n = vectors.len();
    let mut centroids = Vec::with_capacity(k);

    let first_idx = rng.gen_range(0..n);
    centroids.push(vectors[first_idx].clone());

    // Squared distance from each point to its nearest chosen centroid
    let mut min_distances = vec![f32::MAX; n];

    for _ in 1..k {
        let last = centroids.last().expect("at least one centroid");
        for (i, vector) in vectors.iter().enumerate() {
            let dist = euclidean_distance_squared(vector, last);
            if dist < min_distances[i] {
                min_distances[i] = dist;
            }
        }

        let total: f32 = min_distances.iter().sum();
        if total <= 0.0 {
            // Every point coincides with a centroid; take the next point
            // not already chosen so centroids stay distinct where possible
            let next = vectors
                .iter()
                .find(|v| {
                    !centroids
                        .iter()
                        .any(|c| euclidean_distance_squared(c, v) < 1e-10)
                })
                .unwrap_or(&vectors[0]);
            centroids.push(next.clone());
            continue;
        }

        // Weighted draw: walk the cumulative D^2 mass until the target
        let target = rng.gen::<f32>() * total;
        let mut cumulative = 0.0f32;
        let mut chosen = n - 1;
        for (i, &d) in min_distances.iter().enumerate() {
            cumulative += d;
            if cumulative >= target {
                chosen = i;
                break;
            }
        }
        centroids.push(vectors[chosen].clone());
    }

    centroids
}

/// Compute new centroids as the coordinate-wise mean of assigned points.
///
/// A cluster with no members keeps a zero centroid; the caller repairs
/// empty clusters before invoking this.
pub(super) fn compute_centroids(
    vectors: &[Vec<f32>],
    assignments: &[usize],
    k: usize,
    dim: usize,
) -> Vec<Vec<f32>> {
    let mut sums = vec![vec![0.0f32; dim]; k];
    let mut counts = vec![0usize; k];

    for (vector, &cluster) in vectors.iter().zip(assignments.iter()) {
        counts[cluster] += 1;
        for (acc, x) in sums[cluster].iter_mut().zip(vector.iter()) {
            *acc += x;
        }
    }

    for (sum, count) in sums.iter_mut().zip(counts) {
        if count > 0 {
            for elem in sum.iter_mut() {
                *elem /= count as f32;
            }
        }
    }

    sums
}

/// Assign each vector to its nearest centroid.
pub(super) fn assign_to_nearest(vectors: &[Vec<f32>], centroids: &[Vec<f32>]) -> Vec<usize> {
    vectors
        .iter()
        .map(|vector| {
            let mut min_dist = f32::MAX;
            let mut best = 0;
            for (j, centroid) in centroids.iter().enumerate() {
                let dist = euclidean_distance_squared(vector, centroid);
                if dist < min_dist {
                    min_dist = dist;
                    best = j;
                }
            }
            best
        })
        .collect()
}

/// Compute inertia: the sum of squared distances from each point to its
/// assigned centroid.
pub(super) fn compute_inertia(
    vectors: &[Vec<f32>],
    assignments: &[usize],
    centroids: &[Vec<f32>],
) -> f32 {
    vectors
        .iter()
        .zip(assignments.iter())
        .map(|(vector, &cluster)| euclidean_distance_squared(vector, &centroids[cluster]))
        .sum()
}

/// Relocate centroids of empty clusters to the points farthest from their
/// current centroids, reassigning those points.
///
/// Keeps every cluster non-empty so downstream silhouette and alignment
/// steps never see a hole in the id space.
pub(super) fn repair_empty_clusters(
    vectors: &[Vec<f32>],
    assignments: &mut [usize],
    centroids: &mut [Vec<f32>],
    k: usize,
) {
    let mut counts = vec![0usize; k];
    for &cluster in assignments.iter() {
        counts[cluster] += 1;
    }

    for empty in 0..k {
        if counts[empty] > 0 {
            continue;
        }
        // Farthest point whose donor cluster keeps at least one member
        let mut worst_idx = None;
        let mut worst_dist = -1.0f32;
        for (i, vector) in vectors.iter().enumerate() {
            let donor = assignments[i];
            if counts[donor] <= 1 {
                continue;
            }
            let dist = euclidean_distance_squared(vector, &centroids[donor]);
            if dist > worst_dist {
                worst_dist = dist;
                worst_idx = Some(i);
            }
        }
        if let Some(idx) = worst_idx {
            let donor = assignments[idx];
            counts[donor] -= 1;
            counts[empty] += 1;
            assignments[idx] = empty;
            centroids[empty] = vectors[idx].clone();
        }
    }
}
