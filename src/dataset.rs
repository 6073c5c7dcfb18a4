//! Dataset storage and distance metrics.
//!
//! Instances are immutable feature vectors of a fixed dimensionality `D`,
//! stored row-major in one flat buffer. The algorithm only ever reads them,
//! so the dataset is built once and shared by reference.

use crate::error::{Error, Result};

/// A read-only collection of `n` feature vectors of dimensionality `dims`.
#[derive(Clone, Debug)]
pub struct Dataset {
    data: Vec<f64>,
    dims: usize,
}

impl Dataset {
    /// Builds a dataset from row vectors.
    ///
    /// Returns [`Error::EmptyDataset`] for empty input and
    /// [`Error::DimensionMismatch`] when rows disagree on length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let dims = rows.first().map(Vec::len).ok_or(Error::EmptyDataset)?;
        if dims == 0 {
            return Err(Error::DimensionMismatch {
                expected: 1,
                found: 0,
            });
        }
        let mut data = Vec::with_capacity(rows.len() * dims);
        for row in rows {
            if row.len() != dims {
                return Err(Error::DimensionMismatch {
                    expected: dims,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, dims })
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.data.len() / self.dims
    }

    /// Returns `true` when the dataset has no instances.
    ///
    /// Construction rejects empty input, so this is only `false` in practice;
    /// it exists to pair with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Dimensionality `D` shared by all instances.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The `i`-th instance as a feature slice.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dims..(i + 1) * self.dims]
    }

    /// Iterates over all instances.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.dims)
    }

    /// One attribute's values across all instances, in instance order.
    ///
    /// # Panics
    /// Panics if `attr >= dims()`.
    pub fn column(&self, attr: usize) -> Vec<f64> {
        assert!(attr < self.dims, "attribute index out of range");
        self.rows().map(|r| r[attr]).collect()
    }

    /// `[min, max]` of every attribute across the whole dataset.
    pub fn attribute_ranges(&self) -> Vec<(f64, f64)> {
        let mut ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); self.dims];
        for row in self.rows() {
            for (d, &v) in row.iter().enumerate() {
                let (lo, hi) = &mut ranges[d];
                *lo = lo.min(v);
                *hi = hi.max(v);
            }
        }
        ranges
    }

    /// Index of the attribute with the widest value range.
    ///
    /// Ties resolve to the lowest index, so the choice is deterministic.
    pub fn widest_attribute(&self) -> usize {
        let mut best = 0;
        let mut best_range = f64::NEG_INFINITY;
        for (d, (lo, hi)) in self.attribute_ranges().iter().enumerate() {
            let range = hi - lo;
            if range > best_range {
                best_range = range;
                best = d;
            }
        }
        best
    }
}

/// Distance function over feature vectors.
///
/// Injected into every component that measures; the algorithm never assumes
/// a particular metric beyond symmetry and non-negativity.
pub trait Metric {
    /// Distance between two feature vectors of equal length.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Standard Euclidean (L2) distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(matches!(
            Dataset::from_rows(&[]),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Dataset::from_rows(&rows),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_row_access() {
        let ds = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dims(), 2);
        assert_eq!(ds.row(1), &[3.0, 4.0]);
        assert_eq!(ds.column(0), vec![1.0, 3.0]);
    }

    #[test]
    fn test_widest_attribute() {
        // Attribute 1 spans [0, 100], attribute 0 spans [0, 1].
        let ds = Dataset::from_rows(&[vec![0.0, 0.0], vec![1.0, 100.0]]).unwrap();
        assert_eq!(ds.widest_attribute(), 1);

        let ranges = ds.attribute_ranges();
        assert_eq!(ranges[1], (0.0, 100.0));
    }

    #[test]
    fn test_euclidean() {
        let d = Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }
}
