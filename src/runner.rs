//! The evolutionary loop.
//!
//! [`TgcaRunner`] orchestrates one full run: initialization, then per
//! generation evaluate → elitism → statistics → select → crossover → mutate,
//! terminating at the configured generation count. The loop body always runs
//! at least once (generation 0 is evaluated), the whole computation is
//! sequential, and all randomness flows through one seeded generator so runs
//! are exactly reproducible.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::chromosome::Chromosome;
use crate::config::TgcaConfig;
use crate::crossover;
use crate::dataset::{Dataset, Metric};
use crate::error::{Error, Result};
use crate::fitness;
use crate::init::Initializer;
use crate::mutation;
use crate::refine;
use crate::selection;

/// Per-generation population statistics, delivered to the observer.
///
/// Moments cover only individuals whose objective is defined; all values are
/// 0.0 while no individual (or no best-ever) has a defined VRC.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index, starting at 0.
    pub generation: usize,
    /// Individuals with a defined objective this generation.
    pub evaluated: usize,
    /// Best-ever VRC found so far.
    pub best_so_far: f64,
    /// Minimum defined objective this generation.
    pub min: f64,
    /// Maximum defined objective this generation.
    pub max: f64,
    /// Mean of the defined objectives.
    pub mean: f64,
    /// Population standard deviation of the defined objectives.
    pub std_dev: f64,
}

/// Observer for run history. Purely observational: implementations must not
/// feed anything back into the algorithm.
pub trait RunObserver {
    /// Called once per generation after evaluation and elitism.
    fn on_generation(&mut self, _stats: &GenerationStats) {}

    /// Called when a strictly better best-ever chromosome is recorded.
    fn on_new_best(&mut self, _generation: usize, _vrc: f64, _k: usize) {}
}

/// The no-op observer.
impl RunObserver for () {}

/// Result of a TGCA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TgcaResult {
    /// The best chromosome found during the entire run.
    pub best: Chromosome,
    /// Its cluster count.
    pub best_k: usize,
    /// Its VRC value (same as `best.fitness()`).
    pub best_vrc: f64,
    /// Generation at which the best was first recorded.
    pub found_generation: usize,
    /// Elapsed wall-clock time at which the best was first recorded.
    pub found_elapsed: Duration,
    /// Total generations executed.
    pub generations: usize,
    /// Total wall-clock run time.
    pub elapsed: Duration,
    /// Evaluations that produced an undefined VRC, summed over the run.
    pub invalid_evaluations: usize,
    /// Best-so-far VRC at the end of each generation (0.0 until the first
    /// valid individual appears).
    pub history: Vec<f64>,
}

/// Executes the TGCA evolutionary loop.
///
/// # Usage
///
/// ```
/// use tgca::{Dataset, Euclidean, TgcaConfig, TgcaRunner};
///
/// let rows: Vec<Vec<f64>> = (0..20)
///     .map(|i| {
///         let base = if i < 10 { 0.0 } else { 50.0 };
///         vec![base + i as f64 * 0.1, base - i as f64 * 0.1]
///     })
///     .collect();
/// let dataset = Dataset::from_rows(&rows).unwrap();
/// let config = TgcaConfig::default()
///     .with_k_range(2, 5)
///     .with_population_size(10)
///     .with_max_generations(10)
///     .with_seed(42);
///
/// let result = TgcaRunner::run(&dataset, &Euclidean, &config).unwrap();
/// assert!(result.best_vrc > 0.0);
/// ```
pub struct TgcaRunner;

impl TgcaRunner {
    /// Runs the algorithm to termination.
    pub fn run<M: Metric>(
        dataset: &Dataset,
        metric: &M,
        config: &TgcaConfig,
    ) -> Result<TgcaResult> {
        Self::run_with_observer(dataset, metric, config, &mut ())
    }

    /// Runs the algorithm, reporting per-generation statistics to `observer`.
    pub fn run_with_observer<M: Metric>(
        dataset: &Dataset,
        metric: &M,
        config: &TgcaConfig,
        observer: &mut dyn RunObserver,
    ) -> Result<TgcaResult> {
        config.validate()?;
        if config.k_max > dataset.len() {
            return Err(Error::KRangeExceedsDataset {
                k_max: config.k_max,
                n: dataset.len(),
            });
        }

        let start = Instant::now();
        let dims = dataset.dims();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut init = Initializer::new(dataset);
        let mut population = init.population(config, &mut rng);

        let mut best: Option<Chromosome> = None;
        let mut found_generation = 0;
        let mut found_elapsed = Duration::ZERO;
        let mut invalid_evaluations = 0;
        let mut history = Vec::with_capacity(config.max_generations);

        for generation in 0..config.max_generations {
            invalid_evaluations +=
                evaluate_population(&mut population, dataset, metric, config);

            // Elitism: a strictly better individual replaces the best-ever.
            let gen_best = population
                .iter()
                .filter(|c| c.is_valid())
                .max_by(|a, b| {
                    a.fitness()
                        .partial_cmp(&b.fitness())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(gen_best) = gen_best {
                if best.as_ref().map_or(true, |b| gen_best.fitness() > b.fitness()) {
                    best = Some(gen_best.clone());
                    found_generation = generation;
                    found_elapsed = start.elapsed();
                    let k = gen_best.k(dims);
                    let vrc = gen_best.fitness();
                    info!(generation, vrc, k, "new best clustering");
                    observer.on_new_best(generation, vrc, k);
                }
            }

            let stats = generation_stats(
                generation,
                &population,
                best.as_ref().map(Chromosome::fitness).unwrap_or(0.0),
            );
            debug!(
                generation,
                evaluated = stats.evaluated,
                best_so_far = stats.best_so_far,
                mean = stats.mean,
                "generation complete"
            );
            history.push(stats.best_so_far);
            observer.on_generation(&stats);

            let mut pool =
                selection::select(std::mem::take(&mut population), dims, best.as_ref(), &mut rng)?;
            crossover::recombine(
                &mut pool,
                config.crossover_prob,
                config.num_subpopulations,
                &mut rng,
            );
            let (next, invalid) =
                mutation::mutate_pool(pool, dataset, metric, config, &mut init, &mut rng);
            invalid_evaluations += invalid;
            population = next;
        }

        let best = best.ok_or(Error::NoViableSolution {
            generations: config.max_generations,
        })?;
        Ok(TgcaResult {
            best_k: best.k(dims),
            best_vrc: best.fitness(),
            best,
            found_generation,
            found_elapsed,
            generations: config.max_generations,
            elapsed: start.elapsed(),
            invalid_evaluations,
            history,
        })
    }
}

/// Refines and scores every individual with `K ≥ 2`; returns the number of
/// evaluations that ended with an undefined VRC.
///
/// When empty-cluster compaction is enabled, an individual whose refinement
/// left clusters empty is replaced in its slot by a compacted chromosome
/// (empty centroid rows dropped, `K` shrunk) which is then scored if at
/// least two clusters survive.
fn evaluate_population<M: Metric>(
    population: &mut [Chromosome],
    dataset: &Dataset,
    metric: &M,
    config: &TgcaConfig,
) -> usize {
    let dims = dataset.dims();
    let mut invalid = 0;

    for slot in population.iter_mut() {
        let k = slot.k(dims);
        if k < 2 {
            // VRC needs at least two clusters; K=1 individuals stay unscored.
            continue;
        }

        let refinement = refine::refine(
            slot.genes_mut(),
            dims,
            dataset,
            metric,
            config.refine_min_reassign,
            config.refine_max_iter,
        );

        if refinement.empty_clusters > 0 {
            if config.delete_empty_clusters {
                let mut genes =
                    Vec::with_capacity((k - refinement.empty_clusters) * dims);
                for j in 0..k {
                    if refinement.counts[j] > 0 {
                        genes.extend_from_slice(slot.centroid(j, dims));
                    }
                }
                *slot = Chromosome::from_genes(genes);
                if slot.k(dims) >= 2 {
                    if !fitness::evaluate(slot, dataset, metric) {
                        invalid += 1;
                    }
                } else {
                    invalid += 1;
                }
            } else {
                slot.clear_objective();
                invalid += 1;
            }
        } else if !fitness::score_partition(slot, &refinement.labels, dataset, metric) {
            invalid += 1;
        }
    }
    invalid
}

/// Statistics over the individuals with a defined objective.
fn generation_stats(
    generation: usize,
    population: &[Chromosome],
    best_so_far: f64,
) -> GenerationStats {
    let defined: Vec<f64> = population
        .iter()
        .filter_map(Chromosome::objective)
        .collect();
    let evaluated = defined.len();
    if evaluated == 0 {
        return GenerationStats {
            generation,
            evaluated,
            best_so_far,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            std_dev: 0.0,
        };
    }

    let min = defined.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = defined.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = defined.iter().sum::<f64>() / evaluated as f64;
    let variance =
        defined.iter().map(|f| (f - mean) * (f - mean)).sum::<f64>() / evaluated as f64;

    GenerationStats {
        generation,
        evaluated,
        best_so_far,
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
    }
}
