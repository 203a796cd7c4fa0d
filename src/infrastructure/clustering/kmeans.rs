//! Seeded 1-D k-means.
//!
//! Lloyd's algorithm with distance-weighted initial centroids, restarted
//! a fixed number of times from a fixed RNG seed; the run with the lowest
//! within-cluster sum of squares wins. Same input, same seed, same
//! partition: tier assignments must be stable across recomputes.

use crate::domain::error::DomainError;
use crate::domain::ports::partitioner::Partitioner;
use crate::infrastructure::clustering::quantile::QuantilePartitioner;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_ITERATIONS: usize = 100;

pub struct SeededKMeans {
    seed: u64,
    restarts: usize,
}

impl SeededKMeans {
    pub fn new(seed: u64, restarts: usize) -> Self {
        Self { seed, restarts }
    }
}

impl Default for SeededKMeans {
    fn default() -> Self {
        Self {
            seed: 42,
            restarts: 10,
        }
    }
}

impl Partitioner for SeededKMeans {
    fn partition(&self, values: &[f64], k: usize) -> Result<Vec<usize>, DomainError> {
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

        let mut distinct = values.to_vec();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        if distinct.len() < k {
            // Degenerate input: fewer distinct points than clusters. The
            // quantile split gives each distinct value its own cluster.
            return QuantilePartitioner::assign(values, k);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<(f64, Vec<usize>)> = None;

        for _ in 0..self.restarts.max(1) {
            let (inertia, assignment) = lloyd_run(values, k, &mut rng);
            let better = match &best {
                Some((best_inertia, _)) => inertia < *best_inertia,
                None => true,
            };
            if better {
                best = Some((inertia, assignment));
            }
        }

        // restarts >= 1 guarantees a run happened
        let (_, assignment) = best.ok_or_else(|| {
            DomainError::InvalidInput("Clustering produced no result".into())
        })?;
        Ok(assignment)
    }
}

/// One Lloyd run from a fresh distance-weighted initialization. Returns
/// (within-cluster sum of squares, cluster id per value).
fn lloyd_run(values: &[f64], k: usize, rng: &mut StdRng) -> (f64, Vec<usize>) {
    let mut centroids = init_centroids(values, k, rng);
    let mut assignment = vec![0usize; values.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (i, v) in values.iter().enumerate() {
            let nearest = nearest_centroid(*v, &centroids);
            if assignment[i] != nearest {
                assignment[i] = nearest;
                changed = true;
            }
        }

        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (v, id) in values.iter().zip(&assignment) {
            sums[*id] += v;
            counts[*id] += 1;
        }
        for c in 0..k {
            if counts[c] > 0 {
                centroids[c] = sums[c] / counts[c] as f64;
            } else {
                // Re-seed an emptied cluster on the point farthest from its
                // centroid, so all k clusters stay live.
                centroids[c] = farthest_point(values, &centroids, &assignment);
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    let inertia = values
        .iter()
        .zip(&assignment)
        .map(|(v, id)| (v - centroids[*id]).powi(2))
        .sum();
    (inertia, assignment)
}

/// k-means++ style seeding: first centroid uniform, the rest picked with
/// probability proportional to squared distance from the nearest chosen one.
fn init_centroids(values: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(values[rng.random_range(0..values.len())]);

    while centroids.len() < k {
        let weights: Vec<f64> = values
            .iter()
            .map(|v| {
                centroids
                    .iter()
                    .map(|c| (v - c).powi(2))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // All remaining mass sits on chosen centroids; caller already
            // ruled out distinct < k, so spread over arbitrary points.
            centroids.push(values[rng.random_range(0..values.len())]);
            continue;
        }

        let mut target = rng.random::<f64>() * total;
        let mut chosen = values.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            target -= w;
            if target <= 0.0 {
                chosen = i;
                break;
            }
        }
        centroids.push(values[chosen]);
    }
    centroids
}

fn nearest_centroid(value: f64, centroids: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = (value - c).powi(2);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

fn farthest_point(values: &[f64], centroids: &[f64], assignment: &[usize]) -> f64 {
    let mut best = values[0];
    let mut best_dist = -1.0;
    for (v, id) in values.iter().zip(assignment) {
        let d = (v - centroids[*id]).powi(2);
        if d > best_dist {
            best_dist = d;
            best = *v;
        }
    }
    best
}
