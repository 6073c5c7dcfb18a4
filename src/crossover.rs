//! One-point variable-length crossover over sub-populations.
//!
//! The mating pool is split into contiguous sub-populations of near-equal
//! size and individuals are paired consecutively inside each one (an odd
//! sub-population leaves its first slot untouched). Each pair recombines in
//! place with the configured probability: one cut position inside the shorter
//! genome, then a suffix swap. Because genomes have different lengths, the
//! swap changes both participants' `K`; this is where new cluster counts
//! enter the population.

use rand::Rng;

use crate::chromosome::Chromosome;

/// Recombines the mating pool in place.
///
/// Pairs whose gate draw fails are left untouched, fitness included;
/// recombined pairs have their objectives reset by the suffix swap.
pub fn recombine<R: Rng>(
    pool: &mut [Chromosome],
    crossover_prob: f64,
    num_subpopulations: usize,
    rng: &mut R,
) {
    let n = pool.len();
    let subs = num_subpopulations.max(1).min(n.max(1));
    let base = n / subs;
    let remainder = n % subs;

    let mut start = 0;
    for s in 0..subs {
        let size = base + usize::from(s < remainder);
        mate_within(&mut pool[start..start + size], crossover_prob, rng);
        start += size;
    }
}

/// Pairs and recombines one contiguous sub-population.
fn mate_within<R: Rng>(sub: &mut [Chromosome], crossover_prob: f64, rng: &mut R) {
    // Odd size: the first individual sits out so the rest pair evenly.
    let offset = sub.len() % 2;
    let mut i = offset;
    while i + 1 < sub.len() {
        if rng.random_bool(crossover_prob) {
            let (left, right) = sub.split_at_mut(i + 1);
            let a = &mut left[i];
            let b = &mut right[0];
            let cut = rng.random_range(0..a.len().min(b.len()));
            a.swap_suffix(b, cut);
        }
        i += 2;
    }
}
