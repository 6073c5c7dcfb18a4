//! Population initialization.
//!
//! Two interchangeable strategies build fresh individuals:
//!
//! - **Random sampling**: `K` distinct instances drawn uniformly become the
//!   centroids.
//! - **Segment sampling** (default): the dataset's widest-range attribute is
//!   pre-clustered once with SLINK; for a requested `K` the dendrogram is cut
//!   into `K` segments and each centroid coordinate is drawn uniformly inside
//!   its segment's attribute range. Segment tables are memoized per `K` for
//!   the lifetime of one run.
//!
//! The structural mutation path re-seeds individuals through the same segment
//! machinery, so the [`Initializer`] stays alive for the whole run.
//!
//! The segment bounds come from a single attribute but are applied to every
//! dimension of a sampled centroid, matching the seeding heuristic this
//! algorithm was published with; refinement immediately pulls seeds toward
//! per-dimension means.

use std::collections::HashMap;

use rand::Rng;

use crate::chromosome::Chromosome;
use crate::config::{InitMode, TgcaConfig};
use crate::dataset::Dataset;
use crate::hierarchy::{segment_table, SingleLinkage};

/// Builds individuals for the initial population and for re-seeding mutation.
///
/// Owns the SLINK hierarchy (built lazily on first segment request) and the
/// per-`K` segment-table cache; both are dropped with the initializer when a
/// run finalizes.
pub struct Initializer<'a> {
    dataset: &'a Dataset,
    attribute: usize,
    column: Vec<f64>,
    attr_range: (f64, f64),
    linkage: Option<SingleLinkage>,
    segments: HashMap<usize, Vec<(f64, f64)>>,
}

impl<'a> Initializer<'a> {
    /// Prepares an initializer over `dataset`.
    pub fn new(dataset: &'a Dataset) -> Self {
        let attribute = dataset.widest_attribute();
        let column = dataset.column(attribute);
        let attr_range = dataset.attribute_ranges()[attribute];
        Self {
            dataset,
            attribute,
            column,
            attr_range,
            linkage: None,
            segments: HashMap::new(),
        }
    }

    /// The attribute the segment heuristic operates on.
    pub fn attribute(&self) -> usize {
        self.attribute
    }

    /// Builds the full initial population for `config`.
    pub fn population<R: Rng>(&mut self, config: &TgcaConfig, rng: &mut R) -> Vec<Chromosome> {
        (0..config.population_size)
            .map(|_| match config.init_mode {
                InitMode::RandomSampling => {
                    self.random_individual(config.k_min, config.k_max, rng)
                }
                InitMode::SegmentSampling => {
                    self.segment_individual(config.k_min, config.k_max, rng)
                }
            })
            .collect()
    }

    /// One individual with `K ~ U[k_min, k_max]` distinct instances as
    /// centroids.
    ///
    /// # Panics
    /// Panics if `k_max` exceeds the instance count (the runner validates
    /// this before any individual is built).
    pub fn random_individual<R: Rng>(
        &self,
        k_min: usize,
        k_max: usize,
        rng: &mut R,
    ) -> Chromosome {
        let dims = self.dataset.dims();
        let k = rng.random_range(k_min..=k_max);
        let picks = rand::seq::index::sample(rng, self.dataset.len(), k);
        let mut genes = Vec::with_capacity(k * dims);
        for i in picks {
            genes.extend_from_slice(self.dataset.row(i));
        }
        Chromosome::from_genes(genes)
    }

    /// One individual with `K ~ U[k_min, k_max]` centroids sampled inside the
    /// SLINK segments for that `K`.
    pub fn segment_individual<R: Rng>(
        &mut self,
        k_min: usize,
        k_max: usize,
        rng: &mut R,
    ) -> Chromosome {
        let dims = self.dataset.dims();
        let fallback = self.attr_range;
        let k = rng.random_range(k_min..=k_max);
        let table = self.segments_for(k);

        let mut genes = Vec::with_capacity(k * dims);
        for &(lo, hi) in table.iter().take(k) {
            // A cut can collapse below k on duplicate points, leaving the
            // sentinel row; sample the whole attribute range instead.
            let (lo, hi) = if lo <= hi { (lo, hi) } else { fallback };
            for _ in 0..dims {
                let g = if hi > lo { rng.random_range(lo..hi) } else { lo };
                genes.push(g);
            }
        }
        Chromosome::from_genes(genes)
    }

    /// The memoized segment table for `k`, building hierarchy and table on
    /// first use.
    fn segments_for(&mut self, k: usize) -> &[(f64, f64)] {
        if !self.segments.contains_key(&k) {
            let linkage = self
                .linkage
                .get_or_insert_with(|| SingleLinkage::build(&self.column));
            let labels = linkage.labels_at(k);
            let table = segment_table(&labels, &self.column, k);
            self.segments.insert(k, table);
        }
        &self.segments[&k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_dataset() -> Dataset {
        // Three groups on the wide attribute (index 1).
        let mut rows = Vec::new();
        for i in 0..4 {
            rows.push(vec![0.0, i as f64 * 0.1]);
            rows.push(vec![0.0, 50.0 + i as f64 * 0.1]);
            rows.push(vec![0.0, 100.0 + i as f64 * 0.1]);
        }
        Dataset::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_picks_widest_attribute() {
        let ds = line_dataset();
        let init = Initializer::new(&ds);
        assert_eq!(init.attribute(), 1);
    }

    #[test]
    fn test_random_individual_uses_instance_rows() {
        let ds = line_dataset();
        let init = Initializer::new(&ds);
        let mut rng = StdRng::seed_from_u64(42);
        let c = init.random_individual(2, 5, &mut rng);
        let k = c.k(ds.dims());
        assert!((2..=5).contains(&k));
        assert_eq!(c.len(), k * ds.dims());
        // Every centroid is an actual dataset row.
        for j in 0..k {
            let cen = c.centroid(j, ds.dims());
            assert!(
                ds.rows().any(|r| r == cen),
                "centroid {j} is not a dataset row"
            );
        }
        assert_eq!(c.objective(), None);
    }

    #[test]
    fn test_segment_sampling_respects_segment_bounds() {
        let ds = line_dataset();
        let mut init = Initializer::new(&ds);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let c = init.segment_individual(3, 3, &mut rng);
            assert_eq!(c.k(ds.dims()), 3);
            // The three segments are [0, 0.3], [50, 50.3], [100, 100.3];
            // every coordinate of centroid j (all dims) lies in segment j.
            for (j, lo) in [0.0, 50.0, 100.0].iter().enumerate() {
                for &g in c.centroid(j, ds.dims()) {
                    assert!(
                        g >= *lo && g <= lo + 0.3 + 1e-12,
                        "gene {g} outside segment {j}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_segment_table_is_memoized() {
        let ds = line_dataset();
        let mut init = Initializer::new(&ds);
        let mut rng = StdRng::seed_from_u64(3);
        let _ = init.segment_individual(2, 2, &mut rng);
        let _ = init.segment_individual(2, 2, &mut rng);
        assert_eq!(init.segments.len(), 1);
        let _ = init.segment_individual(3, 3, &mut rng);
        assert_eq!(init.segments.len(), 2);
    }

    #[test]
    fn test_population_size_and_k_range() {
        let ds = line_dataset();
        let mut init = Initializer::new(&ds);
        let config = TgcaConfig::default()
            .with_population_size(12)
            .with_k_range(2, 6)
            .with_seed(9);
        let mut rng = StdRng::seed_from_u64(9);
        let pop = init.population(&config, &mut rng);
        assert_eq!(pop.len(), 12);
        for c in &pop {
            let k = c.k(ds.dims());
            assert!((2..=6).contains(&k));
        }
    }

    #[test]
    fn test_duplicate_points_fall_back_to_attribute_range() {
        // All instances identical: every cut collapses to one cluster and
        // sentinel rows must not produce NaN genes.
        let ds = Dataset::from_rows(&vec![vec![2.0, 2.0]; 6]).unwrap();
        let mut init = Initializer::new(&ds);
        let mut rng = StdRng::seed_from_u64(5);
        let c = init.segment_individual(3, 3, &mut rng);
        assert!(c.genes().iter().all(|g| g.is_finite()));
        assert!(c.genes().iter().all(|&g| g == 2.0));
    }
}
