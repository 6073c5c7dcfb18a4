//! Two-stage roulette-wheel selection with elitist preservation.
//!
//! Selection pressure adapts to how concentrated the population is on one
//! cluster count. While individuals still disagree on `K`
//! (`k_concentration < 1`), a fitness-sharing wheel de-weights duplicated
//! fitness values to protect structural diversity; once the population has
//! converged on a single `K`, the wheel falls back to plain
//! fitness-proportionate selection.
//!
//! The best-ever chromosome is always copied into slot 0 of the mating pool;
//! the remaining slots are filled by wheel draws with replacement. The old
//! population is consumed and dropped.

use std::collections::HashMap;

use rand::Rng;

use crate::chromosome::Chromosome;
use crate::error::{Error, Result};

/// Fraction of the pool sharing the most frequent cluster count.
///
/// `1.0` means every individual encodes the same `K`.
pub(crate) fn k_concentration(pool: &[Chromosome], dims: usize) -> f64 {
    if pool.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for c in pool {
        *counts.entry(c.k(dims)).or_insert(0) += 1;
    }
    let mode = counts.values().copied().max().unwrap_or(0);
    mode as f64 / pool.len() as f64
}

/// First-stage selection weights (fitness sharing).
///
/// With `alpha = exp(-kcon)` and `total_pow = Σ f_i^alpha`, an individual of
/// fitness `f` belonging to a group of `g` equal-fitness individuals weighs
///
/// `1 / (g + (total_pow − g·f^alpha) / f^alpha)`
///
/// so duplicated fitness values split their selection mass. A fitness of
/// exactly 0 (the undefined sentinel) weighs 0.
fn sharing_weights(pool: &[Chromosome], kcon: f64) -> Result<Vec<f64>> {
    let alpha = (-kcon).exp();

    let mut groups: HashMap<u64, usize> = HashMap::new();
    for c in pool {
        *groups.entry(c.fitness().to_bits()).or_insert(0) += 1;
    }
    let total_pow: f64 = pool
        .iter()
        .map(|c| c.fitness())
        .filter(|&f| f > 0.0)
        .map(|f| f.powf(alpha))
        .sum();

    pool.iter()
        .map(|c| {
            let f = c.fitness();
            if f == 0.0 {
                return Ok(0.0);
            }
            let group = *groups.get(&f.to_bits()).ok_or_else(|| {
                Error::Internal(format!("fitness {f} missing from frequency map"))
            })?;
            let f_pow = f.powf(alpha);
            let group_pow = group as f64 * f_pow;
            Ok(1.0 / (group as f64 + (total_pow - group_pow) / f_pow))
        })
        .collect()
}

/// One wheel draw over non-negative weights.
///
/// Degrades to a uniform draw when the total weight is zero (e.g. every
/// individual is invalid).
fn spin<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.random_range(0..n);
    }
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    n - 1 // floating-point fallback
}

/// Builds the mating pool for the next generation.
///
/// Chooses the selection stage from the population's `K`-concentration,
/// copies `best` (when one exists) into slot 0, and fills the rest with
/// wheel draws with replacement. Consumes the old population.
///
/// # Errors
/// [`Error::Internal`] when a fitness value is missing from its own
/// frequency map, which signals a programming defect, never user input.
pub fn select<R: Rng>(
    population: Vec<Chromosome>,
    dims: usize,
    best: Option<&Chromosome>,
    rng: &mut R,
) -> Result<Vec<Chromosome>> {
    assert!(!population.is_empty(), "cannot select from empty population");
    let n = population.len();

    let kcon = k_concentration(&population, dims);
    let weights = if kcon < 1.0 {
        sharing_weights(&population, kcon)?
    } else {
        population.iter().map(|c| c.fitness()).collect()
    };

    let mut pool = Vec::with_capacity(n);
    if let Some(best) = best {
        pool.push(best.clone());
    }
    while pool.len() < n {
        let idx = spin(&weights, rng);
        pool.push(population[idx].clone());
    }
    Ok(pool)
}
