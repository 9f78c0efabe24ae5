//! Cluster-align core library.
//!
//! Clusters batches of high-dimensional vectors (word embeddings, sentence
//! embeddings, brain-response vectors) with k-means, then aligns a
//! pre-existing category labeling onto the discovered clusters by majority
//! vote and validates the partition with two distance metrics.
//!
//! # Pipeline
//!
//! 1. [`selection::ClusterCountSelector`] sweeps candidate cluster counts
//!    and recommends one via the within-cluster-sum-of-squares elbow rule
//!    (silhouette scores are reported alongside, informationally).
//! 2. [`kmeans::KMeansPartitioner`] L2-normalizes the batch and partitions
//!    it into `k` clusters.
//! 3. [`align::align_categories`] maps each category to the cluster where
//!    it most frequently lands, then expands that map back to a per-item
//!    cluster label sequence.
//! 4. [`quality`] computes within-cluster cosine cohesion and
//!    between-cluster centroid separation over the raw vectors.
//! 5. [`grouping::group_by_cluster`] regroups auxiliary per-item data
//!    (e.g. neuro-imaging responses) by cluster label.
//!
//! [`pipeline::run_pipeline`] drives all five steps as one pure function;
//! every step is also callable on its own.
//!
//! # Determinism
//!
//! All stochastic steps take an explicit `u64` seed (no global RNG state),
//! so repeated runs with the same inputs and seed produce identical
//! partitions. Result tables are keyed associatively (category, cluster
//! id), with cluster-id iteration always in ascending order.

pub mod align;
pub mod error;
pub mod grouping;
pub mod kmeans;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod quality;
pub mod selection;
pub mod silhouette;
pub mod types;

pub use align::{align_categories, CategoryClusterMap};
pub use error::{ClusterError, ClusterResult};
pub use grouping::{group_by_cluster, ClusterPartition};
pub use kmeans::{KMeansConfig, KMeansFit, KMeansPartitioner};
pub use normalize::normalize;
pub use pipeline::{run_pipeline, PipelineConfig, PipelineInputs, PipelineOutput};
pub use quality::{between_distance, quality_report, within_distances, QualityReport};
pub use selection::{ClusterCountSelector, KRange, KScore, KSelection};
pub use silhouette::silhouette_score;
pub use types::{ClusterId, UNASSIGNED};
