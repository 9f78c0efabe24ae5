//! One-shot clustering-and-alignment pipeline.
//!
//! [`run_pipeline`] is a pure function from (vector batch, labels,
//! config) to a result structure: selection (when k is unspecified) →
//! partitioning → category alignment → quality metrics → response
//! grouping. No global state; the only side effect is tracing output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::{align_categories, CategoryClusterMap};
use crate::error::{ClusterError, ClusterResult};
use crate::grouping::{group_by_cluster, ClusterPartition};
use crate::kmeans::{KMeansConfig, KMeansFit, KMeansPartitioner};
use crate::quality::{quality_report, QualityReport};
use crate::selection::{ClusterCountSelector, KRange, KSelection};
use crate::types::{ClusterId, UNASSIGNED};

/// Configuration for a pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fixed cluster count. `None` runs cluster-count selection and uses
    /// its elbow-rule recommendation.
    pub k: Option<usize>,

    /// Candidate range for selection when `k` is `None`.
    pub k_range: KRange,

    /// Lloyd iteration limit per restart.
    pub max_iterations: usize,

    /// Convergence tolerance for centroid movement.
    pub tolerance: f32,

    /// Independent k-means restarts per fit.
    pub n_init: usize,

    /// Base seed. The selection sweep and the final fit derive their own
    /// rng streams from it, so a run is reproducible end to end.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let kmeans = KMeansConfig::default();
        Self {
            k: None,
            k_range: KRange::default(),
            max_iterations: kmeans.max_iterations,
            tolerance: kmeans.tolerance,
            n_init: kmeans.n_init,
            seed: kmeans.seed,
        }
    }
}

/// Inputs for one pipeline run. All sequences are read-only borrows and
/// positionally aligned as documented per field.
#[derive(Clone, Copy, Debug)]
pub struct PipelineInputs<'a, R> {
    /// The vector batch to cluster.
    pub vectors: &'a [Vec<f32>],

    /// Per-item category labels, parallel to `vectors` (one vector per
    /// category, or all vectors with repeated category names).
    pub training_categories: &'a [String],

    /// The full set of distinct categories to map.
    pub category_set: &'a [String],

    /// Per-item category labels covering every original item; the
    /// category map is expanded back out over this sequence.
    pub all_categories: &'a [String],

    /// Optional auxiliary per-item records (e.g. brain-response
    /// vectors), parallel to `all_categories`.
    pub responses: Option<&'a [R]>,
}

/// Everything one pipeline run produces.
#[derive(Clone, Debug)]
pub struct PipelineOutput<R> {
    /// Score table and recommendations, present when k was auto-selected.
    pub selection: Option<KSelection>,

    /// The cluster count actually used.
    pub k: usize,

    /// The k-means fit over the normalized batch.
    pub fit: KMeansFit,

    /// Majority-vote category-to-cluster map.
    pub category_map: CategoryClusterMap,

    /// Expanded per-item cluster labels, parallel to `all_categories`.
    /// Items of unmapped categories carry [`UNASSIGNED`].
    pub item_clusters: Vec<ClusterId>,

    /// Quality metrics over the raw vectors grouped by their final
    /// cluster labels (unmapped items excluded).
    pub quality: QualityReport,

    /// Auxiliary records grouped by cluster, when supplied. The
    /// [`UNASSIGNED`] bucket is kept so callers can see what fell out.
    pub responses: Option<ClusterPartition<R>>,
}

/// Run the full pipeline for one batch.
///
/// # Errors
///
/// Any error from the underlying steps: batch validation, selection,
/// partitioning, alignment, expansion, or quality metrics.
pub fn run_pipeline<R: Clone>(
    inputs: &PipelineInputs<'_, R>,
    config: &PipelineConfig,
) -> ClusterResult<PipelineOutput<R>> {
    if inputs.vectors.len() != inputs.training_categories.len() {
        return Err(ClusterError::LengthMismatch {
            left: inputs.vectors.len(),
            right: inputs.training_categories.len(),
        });
    }

    let (k, selection) = match config.k {
        Some(k) => (k, None),
        None => {
            let selector = ClusterCountSelector::new()
                .with_range(config.k_range)
                .with_seed(config.seed);
            let selection = selector.select(inputs.vectors)?;
            (selection.best_k_inertia, Some(selection))
        }
    };

    debug!(
        k,
        n = inputs.vectors.len(),
        auto_selected = selection.is_some(),
        "pipeline partitioning"
    );

    let kmeans_config = KMeansConfig::new(k)?
        .with_seed(config.seed)
        .with_n_init(config.n_init)?
        .with_limits(config.max_iterations, config.tolerance)?;
    let fit = KMeansPartitioner::new(kmeans_config).fit(inputs.vectors)?;

    let category_map = align_categories(
        &fit.assignments,
        inputs.training_categories,
        inputs.category_set,
        k,
    )?;
    let item_clusters = category_map.expand(inputs.all_categories)?;

    // Quality runs on the raw vectors under their final labels; items
    // whose category won no cluster carry no data and are left out.
    let vector_labels = category_map.expand(inputs.training_categories)?;
    let mut kept_labels = Vec::with_capacity(vector_labels.len());
    let mut kept_vectors = Vec::with_capacity(vector_labels.len());
    for (label, vector) in vector_labels.iter().zip(inputs.vectors.iter()) {
        if *label != UNASSIGNED {
            kept_labels.push(*label);
            kept_vectors.push(vector.clone());
        }
    }
    let quality = quality_report(&group_by_cluster(&kept_labels, &kept_vectors)?)?;

    let responses = match inputs.responses {
        Some(records) => Some(group_by_cluster(&item_clusters, records)?),
        None => None,
    };

    Ok(PipelineOutput {
        selection,
        k,
        fit,
        category_map,
        item_clusters,
        quality,
        responses,
    })
}
