//! Majority-vote alignment of category labels onto discovered clusters.
//!
//! Given parallel per-item cluster assignments and category labels, each
//! category is mapped to the cluster in which it occurs most often. The
//! scan over clusters runs in ascending cluster id with a strict
//! greater-than comparison, so ties resolve to the lowest cluster id;
//! this iteration order is part of the contract and must not change.
//!
//! A category that never wins a vote maps to
//! [`UNASSIGNED`](crate::types::UNASSIGNED). That is not an error: it is
//! surfaced through `tracing::warn!` and listed by
//! [`CategoryClusterMap::unmapped`], and downstream consumers must treat
//! it as "no data".

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClusterError, ClusterResult};
use crate::types::{ClusterId, UNASSIGNED};

/// Immutable mapping from category label to discovered cluster.
///
/// One entry per distinct category supplied to alignment; built once per
/// run by [`align_categories`] and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryClusterMap {
    map: BTreeMap<String, ClusterId>,
}

impl CategoryClusterMap {
    /// Look up the cluster mapped to a category.
    pub fn get(&self, category: &str) -> Option<ClusterId> {
        self.map.get(category).copied()
    }

    /// Iterate entries in ascending category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ClusterId)> {
        self.map.iter().map(|(cat, &cluster)| (cat.as_str(), cluster))
    }

    /// Categories that never won a majority vote.
    ///
    /// Callers should exclude these from quality reporting before
    /// interpreting per-cluster metrics.
    pub fn unmapped(&self) -> Vec<&str> {
        self.map
            .iter()
            .filter(|(_, &cluster)| cluster == UNASSIGNED)
            .map(|(cat, _)| cat.as_str())
            .collect()
    }

    /// Number of categories in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map holds no categories.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Expand the map back out to a per-item cluster label sequence.
    ///
    /// Output is positionally aligned with `all_categories`. Items of an
    /// unmapped category expand to [`UNASSIGNED`].
    ///
    /// # Errors
    ///
    /// [`ClusterError::UnknownCategory`] if an item names a category with
    /// no entry in the map.
    pub fn expand(&self, all_categories: &[String]) -> ClusterResult<Vec<ClusterId>> {
        all_categories
            .iter()
            .map(|category| {
                self.get(category)
                    .ok_or_else(|| ClusterError::UnknownCategory(category.clone()))
            })
            .collect()
    }
}

/// Map each category to the cluster where it most frequently lands.
///
/// `assignments` and `categories` are parallel per-item arrays over the
/// alignment index set (one vector per category, or all vectors with
/// repeated category names). `category_set` is the full set of distinct
/// categories to map; a category absent from the training pairs maps to
/// [`UNASSIGNED`].
///
/// # Errors
///
/// - [`ClusterError::LengthMismatch`] if the parallel arrays disagree.
/// - [`ClusterError::DegenerateCluster`] if an assignment falls outside
///   `[0, k)`.
pub fn align_categories(
    assignments: &[ClusterId],
    categories: &[String],
    category_set: &[String],
    k: usize,
) -> ClusterResult<CategoryClusterMap> {
    if assignments.len() != categories.len() {
        return Err(ClusterError::LengthMismatch {
            left: assignments.len(),
            right: categories.len(),
        });
    }

    // Nested count table: cluster id -> category -> occurrence count.
    // Indexed by cluster so the vote below scans ascending ids.
    let mut counts: Vec<HashMap<&str, usize>> = vec![HashMap::new(); k];
    for (&cluster, category) in assignments.iter().zip(categories.iter()) {
        if cluster < 0 || cluster as usize >= k {
            return Err(ClusterError::degenerate(format!(
                "assignment {cluster} outside [0, {k})"
            )));
        }
        *counts[cluster as usize].entry(category.as_str()).or_insert(0) += 1;
    }

    let mut map = BTreeMap::new();
    for category in category_set {
        let mut chosen = UNASSIGNED;
        let mut max_count = 0usize;
        for (cluster, table) in counts.iter().enumerate() {
            if let Some(&count) = table.get(category.as_str()) {
                // Strict comparison: ties keep the lower cluster id
                if count > max_count {
                    max_count = count;
                    chosen = cluster as ClusterId;
                }
            }
        }
        if chosen == UNASSIGNED {
            warn!(category = %category, "category won no cluster, mapping to UNASSIGNED");
        }
        map.insert(category.clone(), chosen);
    }

    Ok(CategoryClusterMap { map })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_align_majority_vote() {
        let assignments = vec![0, 0, 1];
        let categories = strings(&["cat_a", "cat_a", "cat_b"]);
        let set = strings(&["cat_a", "cat_b"]);

        let map = align_categories(&assignments, &categories, &set, 2).unwrap();

        assert_eq!(map.get("cat_a"), Some(0));
        assert_eq!(map.get("cat_b"), Some(1));
        assert!(map.unmapped().is_empty());
    }

    #[test]
    fn test_align_winner_has_strictly_highest_count() {
        let assignments = vec![0, 0, 1, 1, 1, 2];
        let categories = strings(&["x", "y", "x", "x", "y", "y"]);
        let set = strings(&["x", "y"]);

        let map = align_categories(&assignments, &categories, &set, 3).unwrap();

        // Reconstruct the count table and confirm no other cluster has a
        // strictly higher count for each mapped category
        for (category, winner) in map.iter() {
            assert!(winner >= 0);
            let count_in = |cluster: ClusterId| {
                assignments
                    .iter()
                    .zip(categories.iter())
                    .filter(|(&a, c)| a == cluster && c.as_str() == category)
                    .count()
            };
            let winner_count = count_in(winner);
            for other in 0..3 {
                assert!(count_in(other) <= winner_count);
            }
        }
        assert_eq!(map.get("x"), Some(1)); // 2 in cluster 1 vs 1 in cluster 0
    }

    #[test]
    fn test_align_tie_keeps_lowest_cluster_id() {
        let assignments = vec![0, 1];
        let categories = strings(&["cat_a", "cat_a"]);
        let set = strings(&["cat_a"]);

        let map = align_categories(&assignments, &categories, &set, 2).unwrap();
        assert_eq!(map.get("cat_a"), Some(0));
    }

    #[test]
    fn test_align_absent_category_maps_to_unassigned() {
        let assignments = vec![0, 1];
        let categories = strings(&["cat_a", "cat_b"]);
        let set = strings(&["cat_a", "cat_b", "cat_ghost"]);

        let map = align_categories(&assignments, &categories, &set, 2).unwrap();

        assert_eq!(map.get("cat_ghost"), Some(UNASSIGNED));
        assert_eq!(map.unmapped(), vec!["cat_ghost"]);
    }

    #[test]
    fn test_align_length_mismatch_fails() {
        let assignments = vec![0, 1, 0];
        let categories = strings(&["a", "b"]);
        let err = align_categories(&assignments, &categories, &strings(&["a"]), 2).unwrap_err();
        assert!(matches!(
            err,
            ClusterError::LengthMismatch { left: 3, right: 2 }
        ));
    }

    #[test]
    fn test_align_out_of_range_assignment_fails() {
        let assignments = vec![0, 7];
        let categories = strings(&["a", "b"]);
        assert!(align_categories(&assignments, &categories, &strings(&["a", "b"]), 2).is_err());
    }

    #[test]
    fn test_expand_positionally_aligned() {
        let assignments = vec![0, 1];
        let categories = strings(&["cat_a", "cat_b"]);
        let set = strings(&["cat_a", "cat_b", "cat_ghost"]);
        let map = align_categories(&assignments, &categories, &set, 2).unwrap();

        let all = strings(&["cat_b", "cat_a", "cat_a", "cat_ghost", "cat_b"]);
        let expanded = map.expand(&all).unwrap();

        assert_eq!(expanded, vec![1, 0, 0, UNASSIGNED, 1]);
    }

    #[test]
    fn test_expand_unknown_category_fails() {
        let assignments = vec![0, 1];
        let categories = strings(&["cat_a", "cat_b"]);
        let map =
            align_categories(&assignments, &categories, &strings(&["cat_a", "cat_b"]), 2).unwrap();

        let err = map.expand(&strings(&["cat_a", "mystery"])).unwrap_err();
        assert!(matches!(err, ClusterError::UnknownCategory(name) if name == "mystery"));
    }

    #[test]
    fn test_map_serde_roundtrip() {
        let assignments = vec![0, 1];
        let categories = strings(&["cat_a", "cat_b"]);
        let map =
            align_categories(&assignments, &categories, &strings(&["cat_a", "cat_b"]), 2).unwrap();

        let json = serde_json::to_string(&map).unwrap();
        let restored: CategoryClusterMap = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, map);
    }
}
