//! Variance Ratio Criterion (VRC) fitness.
//!
//! A chromosome's centroid matrix induces a partition by nearest-centroid
//! assignment; its fitness is the Caliński–Harabasz variance ratio of that
//! partition: between-cluster variance over within-cluster variance, each
//! normalized by its degrees of freedom. Compact and well-separated
//! clusterings score high; the value is unbounded above and used directly as
//! fitness.
//!
//! The ratio is undefined for degenerate partitions (fewer than two clusters,
//! an empty cluster, zero within-cluster scatter, or K ≥ N); such individuals
//! carry the undefined sentinel and are excluded from elitism.
//!
//! # References
//!
//! - Caliński & Harabasz (1974), "A dendrite method for cluster analysis"

use crate::chromosome::Chromosome;
use crate::dataset::{Dataset, Metric};
use crate::refine::nearest;

/// Labels every instance with its nearest centroid.
pub fn assign_labels<M: Metric>(
    centroids: &[f64],
    dims: usize,
    dataset: &Dataset,
    metric: &M,
) -> Vec<usize> {
    dataset
        .rows()
        .map(|row| nearest(centroids, dims, row, metric))
        .collect()
}

/// VRC of a `k`-cluster partition, or `None` when undefined.
///
/// The decomposition uses the partition's own cluster means (not the raw
/// centroid matrix), with squared metric distances as the scatter measure:
///
/// `VRC = (B / (k − 1)) / (W / (n − k))`
pub fn variance_ratio<M: Metric>(
    labels: &[usize],
    k: usize,
    dataset: &Dataset,
    metric: &M,
) -> Option<f64> {
    let n = dataset.len();
    let dims = dataset.dims();
    if k < 2 || n <= k {
        return None;
    }

    let mut means = vec![0.0f64; k * dims];
    let mut counts = vec![0usize; k];
    let mut grand = vec![0.0f64; dims];
    for (i, row) in dataset.rows().enumerate() {
        let j = labels[i];
        counts[j] += 1;
        for (d, &v) in row.iter().enumerate() {
            means[j * dims + d] += v;
            grand[d] += v;
        }
    }
    if counts.iter().any(|&c| c == 0) {
        return None;
    }
    for j in 0..k {
        let inv = 1.0 / counts[j] as f64;
        for d in 0..dims {
            means[j * dims + d] *= inv;
        }
    }
    for g in &mut grand {
        *g /= n as f64;
    }

    let mut between = 0.0;
    for j in 0..k {
        let mean = &means[j * dims..(j + 1) * dims];
        let d = metric.distance(mean, &grand);
        between += counts[j] as f64 * d * d;
    }

    let mut within = 0.0;
    for (i, row) in dataset.rows().enumerate() {
        let mean = &means[labels[i] * dims..(labels[i] + 1) * dims];
        let d = metric.distance(row, mean);
        within += d * d;
    }
    if within == 0.0 {
        return None;
    }

    let vrc = (between / (k - 1) as f64) / (within / (n - k) as f64);
    vrc.is_finite().then_some(vrc)
}

/// Scores a chromosome from an already-computed partition.
///
/// Sets the objective (and validity) on success, clears it when the VRC is
/// undefined. Returns `true` when the score is defined.
pub fn score_partition<M: Metric>(
    individual: &mut Chromosome,
    labels: &[usize],
    dataset: &Dataset,
    metric: &M,
) -> bool {
    let k = individual.k(dataset.dims());
    match variance_ratio(labels, k, dataset, metric) {
        Some(vrc) => {
            individual.set_objective(vrc);
            true
        }
        None => {
            individual.clear_objective();
            false
        }
    }
}

/// Scores a chromosome from scratch: nearest-centroid partition, then VRC.
///
/// Used for individuals whose fitness went stale (crossover offspring) when
/// no refinement pass precedes scoring. Returns `true` when defined.
pub fn evaluate<M: Metric>(individual: &mut Chromosome, dataset: &Dataset, metric: &M) -> bool {
    let dims = dataset.dims();
    if individual.k(dims) < 2 {
        individual.clear_objective();
        return false;
    }
    let labels = assign_labels(individual.genes(), dims, dataset, metric);
    score_partition(individual, &labels, dataset, metric)
}
