//! Cluster-count selection: sweep candidate k values, score each fit by
//! inertia and silhouette, and recommend a count.
//!
//! The sweep fits the raw vectors exactly as given (normalization happens
//! later, inside the final partitioning step). A candidate whose fit or
//! silhouette cannot be computed is recorded as a gap in the score table
//! and the sweep continues; the table is returned as structured data for
//! an external reporting layer to render.
//!
//! # Recommendation rules
//!
//! - Inertia (elbow): the recommended k is the candidate at which the
//!   largest single-step inertia increase begins, scanning successive
//!   differences in ascending k with a strict greater-than comparison
//!   (first occurrence wins ties). This favors the point of steepest
//!   inertia change; downstream consumers use this value.
//! - Silhouette: the candidate with the maximum silhouette score, first
//!   occurrence on ties. Informational only.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ClusterError, ClusterResult};
use crate::kmeans::{KMeansConfig, KMeansPartitioner};
use crate::normalize::validate_batch;
use crate::silhouette::silhouette_score;

/// Half-open range of candidate cluster counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KRange {
    /// First candidate, inclusive. Must be >= 2.
    pub start: usize,
    /// End of the range, exclusive. Must leave at least 2 candidates.
    pub end: usize,
}

impl KRange {
    /// Create a validated candidate range.
    ///
    /// # Errors
    ///
    /// Returns an error if `start < 2` or the range holds fewer than two
    /// candidates.
    pub fn new(start: usize, end: usize) -> ClusterResult<Self> {
        if start < 2 {
            return Err(ClusterError::degenerate(format!(
                "candidate range must start at k >= 2, got {start}"
            )));
        }
        if end <= start + 1 {
            return Err(ClusterError::DegenerateSweep {
                scorable: end.saturating_sub(start),
            });
        }
        Ok(Self { start, end })
    }

    /// Iterate the candidate counts in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.start..self.end
    }
}

impl Default for KRange {
    /// Default candidate range `[2, 15)`.
    fn default() -> Self {
        Self { start: 2, end: 15 }
    }
}

/// Score row for one candidate cluster count.
///
/// `None` fields mark a gap: the candidate's fit (or its silhouette)
/// could not be computed and was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KScore {
    /// Candidate cluster count.
    pub k: usize,
    /// Sum of squared distances to assigned centroids, if the fit ran.
    pub inertia: Option<f32>,
    /// Mean silhouette score of the fit, if computable.
    pub silhouette: Option<f32>,
}

/// Outcome of a cluster-count sweep.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KSelection {
    /// Per-candidate score table, ascending k, gaps included.
    pub scores: Vec<KScore>,
    /// Recommended k by the inertia elbow rule. This is the value the
    /// pipeline uses downstream.
    pub best_k_inertia: usize,
    /// k with the maximum silhouette score. Informational.
    pub best_k_silhouette: usize,
}

/// Sweeps a range of candidate cluster counts over a vector batch.
#[derive(Clone, Debug)]
pub struct ClusterCountSelector {
    range: KRange,
    seed: u64,
    n_init: usize,
    max_iterations: usize,
    tolerance: f32,
}

impl Default for ClusterCountSelector {
    fn default() -> Self {
        let kmeans = KMeansConfig::default();
        Self {
            range: KRange::default(),
            seed: kmeans.seed,
            n_init: kmeans.n_init,
            max_iterations: kmeans.max_iterations,
            tolerance: kmeans.tolerance,
        }
    }
}

impl ClusterCountSelector {
    /// Create a selector with the default range `[2, 15)` and default
    /// k-means fitting parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate range.
    pub fn with_range(mut self, range: KRange) -> Self {
        self.range = range;
        self
    }

    /// Replace the sweep seed. Each candidate fit draws its own seed from
    /// this one, independently of the final partitioning seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run the sweep and apply both recommendation rules.
    ///
    /// # Errors
    ///
    /// Batch validation errors, or [`ClusterError::DegenerateSweep`] when
    /// fewer than two candidates could be scored by either rule.
    pub fn select(&self, vectors: &[Vec<f32>]) -> ClusterResult<KSelection> {
        validate_batch(vectors)?;

        let mut seed_rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut scores = Vec::with_capacity(self.range.end - self.range.start);

        for k in self.range.iter() {
            let candidate_seed = seed_rng.gen::<u64>();
            let config = KMeansConfig {
                k,
                max_iterations: self.max_iterations,
                tolerance: self.tolerance,
                n_init: self.n_init,
                seed: candidate_seed,
            };

            match KMeansPartitioner::new(config).fit_raw(vectors) {
                Ok(fit) => {
                    let silhouette = match silhouette_score(vectors, &fit.assignments, k) {
                        Ok(score) => Some(score),
                        Err(err) => {
                            warn!(k, %err, "silhouette not computable for candidate, recording gap");
                            None
                        }
                    };
                    debug!(k, inertia = fit.inertia, ?silhouette, "candidate scored");
                    scores.push(KScore {
                        k,
                        inertia: Some(fit.inertia),
                        silhouette,
                    });
                }
                Err(err) => {
                    warn!(k, %err, "candidate fit failed, recording gap");
                    scores.push(KScore {
                        k,
                        inertia: None,
                        silhouette: None,
                    });
                }
            }
        }

        let best_k_inertia = elbow_k(&scores)?;
        let best_k_silhouette = silhouette_k(&scores)?;

        debug!(best_k_inertia, best_k_silhouette, "sweep complete");

        Ok(KSelection {
            scores,
            best_k_inertia,
            best_k_silhouette,
        })
    }
}

/// Elbow rule over the scored candidates: the k at which the largest
/// single-step inertia increase begins.
fn elbow_k(scores: &[KScore]) -> ClusterResult<usize> {
    let scored: Vec<(usize, f32)> = scores
        .iter()
        .filter_map(|s| s.inertia.map(|inertia| (s.k, inertia)))
        .collect();
    if scored.len() < 2 {
        return Err(ClusterError::DegenerateSweep {
            scorable: scored.len(),
        });
    }

    let mut best_idx = 0;
    let mut best_diff = f32::MIN;
    for i in 0..scored.len() - 1 {
        let diff = scored[i + 1].1 - scored[i].1;
        if diff > best_diff {
            best_diff = diff;
            best_idx = i;
        }
    }
    Ok(scored[best_idx].0)
}

/// Maximum-silhouette rule over the scored candidates.
fn silhouette_k(scores: &[KScore]) -> ClusterResult<usize> {
    let scored: Vec<(usize, f32)> = scores
        .iter()
        .filter_map(|s| s.silhouette.map(|sil| (s.k, sil)))
        .collect();
    if scored.len() < 2 {
        return Err(ClusterError::DegenerateSweep {
            scorable: scored.len(),
        });
    }

    let mut best = scored[0];
    for &(k, sil) in &scored[1..] {
        if sil > best.1 {
            best = (k, sil);
        }
    }
    Ok(best.0)
}
