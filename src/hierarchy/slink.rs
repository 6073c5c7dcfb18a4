//! SLINK single-linkage hierarchy over one attribute.
//!
//! Implements Sibson's pointer-representation recurrence: after inserting
//! points one at a time, `pi[i]` holds the nearest-merge target of point `i`
//! and `lambda[i]` the height at which that merge happens. The pair fully
//! encodes the single-linkage dendrogram in O(N) space after an O(N²) build.
//!
//! # References
//!
//! - Sibson (1973), "SLINK: An optimally efficient algorithm for the
//!   single-link cluster method"

use super::union_find::DisjointSet;

/// Pointer representation (`pi`, `lambda`) of a single-linkage dendrogram.
#[derive(Clone, Debug)]
pub struct SingleLinkage {
    pi: Vec<usize>,
    lambda: Vec<f64>,
}

impl SingleLinkage {
    /// Builds the hierarchy over `values` with distance `|a - b|`.
    ///
    /// `values` is one attribute column in instance order; the arrays are
    /// only valid once every instance has been inserted, which this
    /// constructor guarantees.
    pub fn build(values: &[f64]) -> Self {
        let n = values.len();
        let mut pi = vec![0usize; n];
        let mut lambda = vec![f64::INFINITY; n];
        let mut m = vec![0.0f64; n];

        for i in 0..n {
            pi[i] = i;
            lambda[i] = f64::INFINITY;
            for j in 0..i {
                m[j] = (values[j] - values[i]).abs();
            }
            for j in 0..i {
                if lambda[j] >= m[j] {
                    m[pi[j]] = m[pi[j]].min(lambda[j]);
                    lambda[j] = m[j];
                    pi[j] = i;
                } else {
                    m[pi[j]] = m[pi[j]].min(m[j]);
                }
            }
            for j in 0..i {
                if lambda[j] >= lambda[pi[j]] {
                    pi[j] = i;
                }
            }
        }

        Self { pi, lambda }
    }

    /// Number of points in the hierarchy.
    pub fn len(&self) -> usize {
        self.pi.len()
    }

    /// Returns `true` for a hierarchy over zero points.
    pub fn is_empty(&self) -> bool {
        self.pi.is_empty()
    }

    /// Cuts the dendrogram into (at most) `k` clusters.
    ///
    /// Merges `(i, pi[i])` in ascending `lambda` order until the live-set
    /// count drops to `k`. All merges sharing one height value are applied as
    /// a single batch before the stopping condition is re-checked, which
    /// makes the cut equivalent to thresholding at a single height and keeps
    /// it independent of tie order. Duplicate points can therefore collapse
    /// the partition below `k` clusters.
    pub fn cut(&self, k: usize) -> DisjointSet {
        let n = self.len();
        let mut sets = DisjointSet::new(n);
        if n == 0 || k >= n {
            return sets;
        }
        let k = k.max(1);

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            self.lambda[a]
                .partial_cmp(&self.lambda[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut pos = 0;
        while pos < n && sets.num_sets() > k {
            let height = self.lambda[order[pos]];
            // Apply the whole equal-height batch before re-checking.
            while pos < n && self.lambda[order[pos]] == height {
                let i = order[pos];
                sets.merge(i, self.pi[i]);
                pos += 1;
            }
        }
        sets
    }

    /// Convenience: dense cluster labels for a cut at `k`.
    pub fn labels_at(&self, k: usize) -> Vec<usize> {
        self.cut(k).labels()
    }
}
