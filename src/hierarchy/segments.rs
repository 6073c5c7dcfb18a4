//! Per-cluster attribute ranges ("segments").
//!
//! Given a partition of the instances and one attribute column, each cluster
//! contributes the `[min, max]` span of that attribute among its members.
//! The spans bound where the initializer samples centroid-seed coordinates.

/// Computes a `k`-row segment table for one attribute.
///
/// `labels[i]` is instance `i`'s cluster in `0..k`; `column[i]` its attribute
/// value. Rows start at the `(+∞, −∞)` sentinel and stay there for clusters
/// the partition never reached (a cut can collapse below `k` on duplicate
/// points).
///
/// # Panics
/// Panics if `labels` and `column` differ in length or a label is `>= k`.
pub fn segment_table(labels: &[usize], column: &[f64], k: usize) -> Vec<(f64, f64)> {
    assert_eq!(labels.len(), column.len(), "labels/column length mismatch");
    let mut table = vec![(f64::INFINITY, f64::NEG_INFINITY); k];
    for (&label, &value) in labels.iter().zip(column.iter()) {
        assert!(label < k, "cluster label out of range");
        let (lo, hi) = &mut table[label];
        *lo = lo.min(value);
        *hi = hi.max(value);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_per_cluster() {
        let labels = [0, 0, 1, 1, 0];
        let column = [1.0, 3.0, -2.0, 4.0, 2.0];
        let table = segment_table(&labels, &column, 2);
        assert_eq!(table[0], (1.0, 3.0));
        assert_eq!(table[1], (-2.0, 4.0));
    }

    #[test]
    fn test_unreached_cluster_keeps_sentinel() {
        let table = segment_table(&[0, 0], &[1.0, 2.0], 3);
        assert_eq!(table[0], (1.0, 2.0));
        assert_eq!(table[1], (f64::INFINITY, f64::NEG_INFINITY));
        assert_eq!(table[2], (f64::INFINITY, f64::NEG_INFINITY));
    }

    #[test]
    fn test_singleton_cluster_has_point_range() {
        let table = segment_table(&[0, 1], &[5.0, -1.0], 2);
        assert_eq!(table[1], (-1.0, -1.0));
    }

    #[test]
    #[should_panic(expected = "cluster label out of range")]
    fn test_label_out_of_range_panics() {
        segment_table(&[2], &[0.0], 2);
    }
}
