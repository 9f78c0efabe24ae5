//! The k-means partitioner: restarts of Lloyd's algorithm over a
//! validated batch.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{ClusterError, ClusterResult};
use crate::metrics::euclidean_distance;
use crate::normalize::{normalize, validate_batch};
use crate::types::ClusterId;

use super::algorithms::{
    assign_to_nearest, compute_centroids, compute_inertia, kmeans_plus_plus_init,
    repair_empty_clusters,
};
use super::config::KMeansConfig;

/// Result of a k-means fit.
#[derive(Clone, Debug)]
pub struct KMeansFit {
    /// Per-item cluster assignment, in input order; each value in `[0, k)`.
    pub assignments: Vec<ClusterId>,

    /// Final cluster centroids, indexed by cluster id.
    pub centroids: Vec<Vec<f32>>,

    /// Sum of squared distances from each point to its assigned centroid.
    pub inertia: f32,

    /// Lloyd iterations used by the winning restart.
    pub iterations: usize,

    /// Whether the winning restart converged before hitting the
    /// iteration limit.
    pub converged: bool,
}

impl KMeansFit {
    /// Number of clusters in this fit.
    #[inline]
    pub fn k(&self) -> usize {
        self.centroids.len()
    }
}

/// Partitions a vector batch into a fixed number of clusters.
#[derive(Clone, Debug)]
pub struct KMeansPartitioner {
    config: KMeansConfig,
}

impl KMeansPartitioner {
    /// Create a partitioner from a validated configuration.
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Access the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Fit the batch after scaling every vector to unit L2 norm.
    ///
    /// This is the partitioning entry point of the pipeline: clustering
    /// operates on directions, not magnitudes.
    ///
    /// # Errors
    ///
    /// [`ClusterError::InvalidClusterCount`] when `k` exceeds the number
    /// of vectors or of distinct vectors; batch validation errors for an
    /// empty or ragged batch.
    pub fn fit(&self, vectors: &[Vec<f32>]) -> ClusterResult<KMeansFit> {
        validate_batch(vectors)?;
        self.check_k(vectors)?;
        let normed = normalize(vectors);
        self.run(&normed)
    }

    /// Fit the batch exactly as given, without normalization.
    ///
    /// Used by cluster-count selection, which scores candidates on the
    /// raw vectors.
    pub fn fit_raw(&self, vectors: &[Vec<f32>]) -> ClusterResult<KMeansFit> {
        validate_batch(vectors)?;
        self.check_k(vectors)?;
        self.run(vectors)
    }

    fn check_k(&self, vectors: &[Vec<f32>]) -> ClusterResult<()> {
        let k = self.config.k;
        let n = vectors.len();
        let distinct = count_distinct(vectors);
        if k < 2 || k > n || k > distinct {
            return Err(ClusterError::InvalidClusterCount { k, n, distinct });
        }
        Ok(())
    }

    fn run(&self, vectors: &[Vec<f32>]) -> ClusterResult<KMeansFit> {
        let k = self.config.k;
        let dim = vectors[0].len();
        let mut seed_rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        debug!(
            k,
            n = vectors.len(),
            n_init = self.config.n_init,
            max_iterations = self.config.max_iterations,
            "starting k-means fit"
        );

        let mut best: Option<KMeansFit> = None;
        for restart in 0..self.config.n_init {
            let restart_seed = seed_rng.gen::<u64>();
            let fit = self.run_once(vectors, k, dim, restart_seed);
            debug!(
                restart,
                inertia = fit.inertia,
                iterations = fit.iterations,
                converged = fit.converged,
                "k-means restart finished"
            );
            match &best {
                Some(current) if current.inertia <= fit.inertia => {}
                _ => best = Some(fit),
            }
        }

        // n_init > 0 is enforced by config validation
        best.ok_or(ClusterError::EmptyInput("no k-means restarts executed"))
    }

    fn run_once(&self, vectors: &[Vec<f32>], k: usize, dim: usize, seed: u64) -> KMeansFit {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut centroids = kmeans_plus_plus_init(vectors, k, &mut rng);
        let mut assignments = vec![0usize; vectors.len()];
        let mut iterations = 0;
        let mut converged = false;

        for iter in 0..self.config.max_iterations {
            iterations = iter + 1;

            assignments = assign_to_nearest(vectors, &centroids);
            repair_empty_clusters(vectors, &mut assignments, &mut centroids, k);

            let new_centroids = compute_centroids(vectors, &assignments, k, dim);

            let max_movement = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(old, new)| euclidean_distance(old, new))
                .fold(0.0f32, f32::max);

            centroids = new_centroids;

            if max_movement < self.config.tolerance {
                converged = true;
                break;
            }
        }

        let inertia = compute_inertia(vectors, &assignments, &centroids);
        KMeansFit {
            assignments: assignments.into_iter().map(|c| c as ClusterId).collect(),
            centroids,
            inertia,
            iterations,
            converged,
        }
    }
}

/// Count bit-exact distinct vectors in the batch.
fn count_distinct(vectors: &[Vec<f32>]) -> usize {
    let mut seen: HashSet<Vec<u32>> = HashSet::with_capacity(vectors.len());
    for vector in vectors {
        seen.insert(vector.iter().map(|x| x.to_bits()).collect());
    }
    seen.len()
}
