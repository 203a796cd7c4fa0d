//! Performance tier assignment.
//!
//! Global pass over every product with a performance score: cluster the 1-D
//! scores into five groups, order groups by ascending mean, and hand out
//! tier names in that order. Sole writer of the tier field; never touches
//! prices or performance. Deterministic for a fixed product set, so
//! re-running on unchanged data is a no-op in effect.

use crate::domain::error::DomainError;
use crate::domain::ports::partitioner::Partitioner;
use crate::domain::ports::product_repository::ProductRepository;
use crate::domain::values::tier::Tier;
use std::collections::HashMap;
use std::sync::Arc;

/// All tiering knobs in one place. Seed and restart count belong to the
/// clustering run but are named here so the whole recompute is
/// reproducible from a single configuration value.
#[derive(Debug, Clone)]
pub struct TieringConfig {
    pub clusters: usize,
    pub seed: u64,
    pub restarts: usize,
}

impl Default for TieringConfig {
    fn default() -> Self {
        Self {
            clusters: 5,
            seed: 42,
            restarts: 10,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TierAssignment {
    pub name: String,
    pub tier: Tier,
}

pub struct TierUseCase {
    repo: Arc<dyn ProductRepository>,
    partitioner: Arc<dyn Partitioner>,
    config: TieringConfig,
}

impl TierUseCase {
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        partitioner: Arc<dyn Partitioner>,
        config: TieringConfig,
    ) -> Self {
        Self {
            repo,
            partitioner,
            config,
        }
    }

    /// Recompute and persist tiers for every product carrying a score.
    /// Zero scored products or a negative score is a caller bug and fails
    /// fast; degenerate inputs (fewer distinct scores than clusters) are
    /// handled by the partitioner.
    pub fn recompute(&self) -> Result<Vec<TierAssignment>, DomainError> {
        let products = self.repo.with_performance()?;
        if products.is_empty() {
            return Err(DomainError::InvalidInput(
                "No products with performance data; tiering needs at least one".into(),
            ));
        }

        let mut names = Vec::with_capacity(products.len());
        let mut scores = Vec::with_capacity(products.len());
        for p in &products {
            let score = p.rel_performance.ok_or_else(|| {
                DomainError::Database(format!("Product '{}' lost its score mid-read", p.name))
            })?;
            if !score.is_finite() || score < 0.0 {
                return Err(DomainError::InvalidInput(format!(
                    "Product '{}' has invalid performance score {score}",
                    p.name
                )));
            }
            names.push(p.name.clone());
            scores.push(score);
        }

        let cluster_ids = self.partitioner.partition(&scores, self.config.clusters)?;
        let tier_by_cluster = name_clusters(&scores, &cluster_ids)?;

        let mut assignments = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let tier = tier_by_cluster[&cluster_ids[i]];
            self.repo.set_tier(name, tier)?;
            assignments.push(TierAssignment {
                name: name.clone(),
                tier,
            });
        }
        Ok(assignments)
    }
}

/// Map each nonempty cluster id to a tier name, ascending by cluster mean.
/// With d < 5 nonempty clusters only the first d names are used, so sparse
/// catalogs still tier without inventing empty buckets.
fn name_clusters(
    scores: &[f64],
    cluster_ids: &[usize],
) -> Result<HashMap<usize, Tier>, DomainError> {
    let mut sums: HashMap<usize, (f64, usize)> = HashMap::new();
    for (score, id) in scores.iter().zip(cluster_ids) {
        let entry = sums.entry(*id).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let mut means: Vec<(usize, f64)> = sums
        .into_iter()
        .map(|(id, (sum, n))| (id, sum / n as f64))
        .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    if means.len() > Tier::ORDERED.len() {
        return Err(DomainError::InvalidInput(format!(
            "Partitioner produced {} clusters, at most {} supported",
            means.len(),
            Tier::ORDERED.len()
        )));
    }

    Ok(means
        .into_iter()
        .zip(Tier::ORDERED)
        .map(|((id, _), tier)| (id, tier))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_naming_is_ascending_by_mean() {
        // Cluster 2 has the lowest mean, then 0, then 1.
        let scores = [90.0, 95.0, 50.0, 55.0, 10.0];
        let ids = [1, 1, 0, 0, 2];
        let map = name_clusters(&scores, &ids).unwrap();
        assert_eq!(map[&2], Tier::Low);
        assert_eq!(map[&0], Tier::LowMid);
        assert_eq!(map[&1], Tier::HighMid);
    }

    #[test]
    fn test_default_config_fixes_the_clustering_run() {
        let cfg = TieringConfig::default();
        assert_eq!(cfg.clusters, 5);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.restarts, 10);
    }

    #[test]
    fn test_too_many_clusters_rejected() {
        let scores = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ids = [0, 1, 2, 3, 4, 5];
        assert!(name_clusters(&scores, &ids).is_err());
    }
}
