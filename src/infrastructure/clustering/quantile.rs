//! Deterministic quantile partitioner.
//!
//! No iteration, no randomness: equal values always share a cluster, and
//! clusters are contiguous ranges of the sorted distinct values. Used both
//! as a standalone partitioner and as the degenerate-input fallback for the
//! k-means implementation.

use crate::domain::error::DomainError;
use crate::domain::ports::partitioner::Partitioner;

pub struct QuantilePartitioner;

impl QuantilePartitioner {
    /// Cluster id per value. With `d <= k` distinct values each distinct
    /// value is its own cluster; otherwise distinct values are split into
    /// `k` rank buckets of near-equal size.
    pub fn assign(values: &[f64], k: usize) -> Result<Vec<usize>, DomainError> {
        if values.is_empty() {
            return Err(DomainError::InvalidInput(
                "Cannot partition an empty value set".into(),
            ));
        }
        if k == 0 {
            return Err(DomainError::InvalidInput(
                "Cluster count must be at least 1".into(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::InvalidInput(
                "Values must be finite numbers".into(),
            ));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();
        let distinct = sorted.len();

        let ids = values
            .iter()
            .map(|v| {
                // Linear scan; catalogs are hundreds of rows, not millions.
                let rank = sorted.iter().position(|d| d == v).unwrap_or(0);
                if distinct <= k {
                    rank
                } else {
                    rank * k / distinct
                }
            })
            .collect();
        Ok(ids)
    }
}

impl Partitioner for QuantilePartitioner {
    fn partition(&self, values: &[f64], k: usize) -> Result<Vec<usize>, DomainError> {
        Self::assign(values, k)
    }
}
