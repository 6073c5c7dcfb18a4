//! Bounded Lloyd-style centroid refinement.
//!
//! Before an individual is scored, its centroid matrix is polished with a few
//! k-means iterations: reassign every instance to its nearest centroid, then
//! recompute each centroid as the mean of its members. Iteration stops as
//! soon as the number of reassignments falls to the configured threshold or
//! the iteration cap is reached, so refinement is a bounded local search,
//! not a full k-means run.

use crate::dataset::{Dataset, Metric};

/// Outcome of one refinement pass.
#[derive(Clone, Debug)]
pub struct Refinement {
    /// Final per-instance cluster assignment.
    pub labels: Vec<usize>,
    /// Final per-cluster member counts.
    pub counts: Vec<usize>,
    /// Clusters that ended the pass with no members.
    pub empty_clusters: usize,
    /// Reassign/recompute iterations executed.
    pub iterations: usize,
}

/// Index of the centroid nearest to `row` under `metric`.
///
/// Ties resolve to the lowest index.
///
/// # Panics
/// Panics if `centroids` is empty or not a multiple of `dims`.
pub fn nearest<M: Metric>(centroids: &[f64], dims: usize, row: &[f64], metric: &M) -> usize {
    let k = centroids.len() / dims;
    assert!(k >= 1, "need at least one centroid");
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for j in 0..k {
        let c = &centroids[j * dims..(j + 1) * dims];
        let d = metric.distance(row, c);
        if d < best_dist {
            best_dist = d;
            best = j;
        }
    }
    best
}

/// Refines `centroids` in place by bounded Lloyd iteration.
///
/// Stops when the reassignment count drops to `min_reassign` or after
/// `max_iter` iterations (at least one iteration always runs). A cluster
/// that loses all members keeps its previous coordinates and is reported in
/// [`Refinement::empty_clusters`] for the final iteration.
///
/// # Panics
/// Panics if `centroids.len()` is not a positive multiple of `dims`.
pub fn refine<M: Metric>(
    centroids: &mut [f64],
    dims: usize,
    dataset: &Dataset,
    metric: &M,
    min_reassign: usize,
    max_iter: usize,
) -> Refinement {
    let k = centroids.len() / dims;
    assert!(k >= 1 && centroids.len() == k * dims, "malformed centroid matrix");

    let n = dataset.len();
    let mut labels = vec![usize::MAX; n];
    let mut sums = vec![0.0f64; k * dims];
    let mut counts = vec![0usize; k];
    let mut empty_clusters = 0;
    let mut iterations = 0;

    for _ in 0..max_iter.max(1) {
        iterations += 1;

        let mut changed = 0;
        for (i, row) in dataset.rows().enumerate() {
            let j = nearest(centroids, dims, row, metric);
            if labels[i] != j {
                labels[i] = j;
                changed += 1;
            }
        }

        sums.fill(0.0);
        counts.fill(0);
        for (i, row) in dataset.rows().enumerate() {
            let j = labels[i];
            counts[j] += 1;
            for (d, &v) in row.iter().enumerate() {
                sums[j * dims + d] += v;
            }
        }

        empty_clusters = 0;
        for j in 0..k {
            if counts[j] == 0 {
                empty_clusters += 1;
                continue;
            }
            let inv = 1.0 / counts[j] as f64;
            for d in 0..dims {
                centroids[j * dims + d] = sums[j * dims + d] * inv;
            }
        }

        if changed <= min_reassign {
            break;
        }
    }

    Refinement {
        labels,
        counts,
        empty_clusters,
        iterations,
    }
}
