use crate::domain::error::DomainError;

/// One-dimensional clustering behind a swappable interface, so tier naming
/// never cares whether k-means, k-medoids or a quantile split did the work.
///
/// Contract: returns one cluster id (0..k, not necessarily all used) per
/// input value; same input must always yield the same partition. Fewer
/// distinct values than `k` is handled, not an error. Empty input or
/// `k == 0` is a caller bug and fails fast.
pub trait Partitioner: Send + Sync {
    fn partition(&self, values: &[f64], k: usize) -> Result<Vec<usize>, DomainError>;
}
