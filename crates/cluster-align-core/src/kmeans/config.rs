//! Configuration for k-means partitioning.

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};

/// Configuration for a k-means fit.
///
/// All parameters are validated at construction time; `k` is additionally
/// validated against the batch when fitting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters (k). Must be >= 2.
    pub k: usize,

    /// Maximum Lloyd iterations per restart. Must be > 0.
    pub max_iterations: usize,

    /// Convergence tolerance for centroid movement.
    ///
    /// A restart stops once the largest centroid movement in an iteration
    /// falls below this. Must be finite and > 0.0.
    pub tolerance: f32,

    /// Number of independent restarts; the lowest-inertia run wins.
    /// Must be > 0.
    pub n_init: usize,

    /// Seed for centroid initialization. Restart r draws its own rng
    /// stream from a generator seeded with this value, so runs are
    /// reproducible end to end.
    pub seed: u64,
}

impl KMeansConfig {
    /// Create a configuration for `k` clusters with default fitting
    /// parameters (300 iterations, tolerance 1e-4, 10 restarts, seed 42).
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidClusterCount`] if `k < 2`.
    pub fn new(k: usize) -> ClusterResult<Self> {
        Self {
            k,
            ..Self::default()
        }
        .validated()
    }

    /// Replace the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the restart count.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_init == 0`.
    pub fn with_n_init(mut self, n_init: usize) -> ClusterResult<Self> {
        self.n_init = n_init;
        self.validated()
    }

    /// Replace iteration limit and tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations == 0` or the tolerance is not
    /// a finite positive number.
    pub fn with_limits(mut self, max_iterations: usize, tolerance: f32) -> ClusterResult<Self> {
        self.max_iterations = max_iterations;
        self.tolerance = tolerance;
        self.validated()
    }

    fn validated(self) -> ClusterResult<Self> {
        if self.k < 2 {
            return Err(ClusterError::InvalidClusterCount {
                k: self.k,
                n: 0,
                distinct: 0,
            });
        }
        if self.max_iterations == 0 {
            return Err(ClusterError::degenerate("max_iterations must be > 0"));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ClusterError::degenerate(
                "tolerance must be a finite positive number",
            ));
        }
        if self.n_init == 0 {
            return Err(ClusterError::degenerate("n_init must be > 0"));
        }
        Ok(self)
    }
}

impl Default for KMeansConfig {
    /// Default configuration: k=2, 300 iterations, tolerance 1e-4,
    /// 10 restarts, seed 42.
    fn default() -> Self {
        Self {
            k: 2,
            max_iterations: 300,
            tolerance: 1e-4,
            n_init: 10,
            seed: 42,
        }
    }
}
