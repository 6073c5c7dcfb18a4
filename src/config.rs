//! Algorithm configuration.
//!
//! [`TgcaConfig`] holds every parameter that controls a run. Bad parameter
//! combinations are caught by [`validate`](TgcaConfig::validate) before the
//! evolutionary loop starts; dataset-dependent checks (the cluster-count
//! range against the instance count) happen in the runner.

use crate::error::{Error, Result};

/// How the initial population (and structural-mutation replacements) are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitMode {
    /// Sample `K` distinct instances uniformly and use them as centroids.
    RandomSampling,
    /// Cut a single-linkage hierarchy over the widest-range attribute at `K`
    /// and sample centroid coordinates inside the per-cluster segments.
    #[default]
    SegmentSampling,
}

/// Configuration for a TGCA run.
///
/// # Defaults
///
/// ```
/// use tgca::TgcaConfig;
///
/// let config = TgcaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tgca::{InitMode, TgcaConfig};
///
/// let config = TgcaConfig::default()
///     .with_k_range(2, 10)
///     .with_population_size(40)
///     .with_init_mode(InitMode::SegmentSampling)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TgcaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Lower bound (inclusive) of the evolving cluster count.
    pub k_min: usize,

    /// Upper bound (inclusive) of the evolving cluster count.
    pub k_max: usize,

    /// Probability of applying one-point crossover to a mated pair (0.0–1.0).
    pub crossover_prob: f64,

    /// Number of contiguous sub-populations the mating pool is split into
    /// for crossover. Pairing happens only within a sub-population.
    pub num_subpopulations: usize,

    /// Iteration cap for the per-evaluation centroid refinement.
    pub refine_max_iter: usize,

    /// Refinement stops once the reassignment count drops to this value.
    pub refine_min_reassign: usize,

    /// Number of generations to run. The loop body executes at least once.
    pub max_generations: usize,

    /// When enabled, a refined chromosome whose clusters went empty is
    /// compacted: the empty centroid rows are dropped, `K` shrinks, and the
    /// replacement is substituted into the population.
    pub delete_empty_clusters: bool,

    /// Population initialization strategy.
    pub init_mode: InitMode,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for TgcaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            k_min: 2,
            k_max: 10,
            crossover_prob: 0.8,
            num_subpopulations: 5,
            refine_max_iter: 10,
            refine_min_reassign: 0,
            max_generations: 100,
            delete_empty_clusters: true,
            init_mode: InitMode::default(),
            seed: None,
        }
    }
}

impl TgcaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the inclusive cluster-count range `[k_min, k_max]`.
    pub fn with_k_range(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.crossover_prob = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of crossover sub-populations.
    pub fn with_num_subpopulations(mut self, n: usize) -> Self {
        self.num_subpopulations = n;
        self
    }

    /// Sets the refinement iteration cap and reassignment threshold.
    pub fn with_refinement(mut self, max_iter: usize, min_reassign: usize) -> Self {
        self.refine_max_iter = max_iter;
        self.refine_min_reassign = min_reassign;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Enables or disables empty-cluster compaction.
    pub fn with_delete_empty_clusters(mut self, on: bool) -> Self {
        self.delete_empty_clusters = on;
        self
    }

    /// Sets the initialization strategy.
    pub fn with_init_mode(mut self, mode: InitMode) -> Self {
        self.init_mode = mode;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.k_min < 1 {
            return Err(Error::InvalidConfig("k_min must be at least 1".into()));
        }
        if self.k_min > self.k_max {
            return Err(Error::InvalidConfig(format!(
                "k_min ({}) must not exceed k_max ({})",
                self.k_min, self.k_max
            )));
        }
        if self.max_generations == 0 {
            return Err(Error::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.num_subpopulations == 0 {
            return Err(Error::InvalidConfig(
                "num_subpopulations must be at least 1".into(),
            ));
        }
        if self.refine_max_iter == 0 {
            return Err(Error::InvalidConfig(
                "refine_max_iter must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_prob) {
            return Err(Error::InvalidConfig(
                "crossover_prob must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
