//! Variable-length chromosome encoding.
//!
//! A chromosome owns the coordinates of `K` centroids of dimensionality `D`
//! as one flat gene array of length `K × D`. `K` varies per individual and
//! changes over a run (crossover, empty-cluster compaction, re-seeding
//! mutation), so the encoding is a resizable owned buffer rather than a
//! fixed-width array.
//!
//! The objective (VRC, higher is better) lives on the individual as
//! `Option<f64>`; `None` is the undefined sentinel carried by freshly created
//! or degenerate individuals. Fitness equals the objective in this algorithm.

/// One individual: `K` concatenated centroid vectors plus scoring metadata.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<f64>,
    objective: Option<f64>,
    valid: bool,
}

impl Chromosome {
    /// Creates a chromosome of `len` genes, zero-filled, unscored.
    ///
    /// `len` must be a multiple of the dataset dimensionality; callers keep
    /// `D` consistent globally (it is a property of the dataset).
    pub fn new(len: usize) -> Self {
        Self {
            genes: vec![0.0; len],
            objective: None,
            valid: false,
        }
    }

    /// Creates a chromosome from an existing gene buffer, unscored.
    pub fn from_genes(genes: Vec<f64>) -> Self {
        Self {
            genes,
            objective: None,
            valid: false,
        }
    }

    /// Gene count (`K × D`).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` for a moved-from or zero-length chromosome.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of encoded centroids given the dataset dimensionality.
    pub fn k(&self, dims: usize) -> usize {
        self.genes.len() / dims
    }

    /// Reads one gene.
    ///
    /// # Panics
    /// Panics if `idx >= len()`.
    pub fn gene(&self, idx: usize) -> f64 {
        assert!(idx < self.genes.len(), "gene index out of range");
        self.genes[idx]
    }

    /// Writes one gene.
    ///
    /// # Panics
    /// Panics if `idx >= len()`.
    pub fn set_gene(&mut self, idx: usize, value: f64) {
        assert!(idx < self.genes.len(), "gene index out of range");
        self.genes[idx] = value;
    }

    /// The whole gene array.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Mutable access to the gene array.
    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// The `j`-th centroid as a feature slice.
    ///
    /// # Panics
    /// Panics if `j >= k(dims)`.
    pub fn centroid(&self, j: usize, dims: usize) -> &[f64] {
        &self.genes[j * dims..(j + 1) * dims]
    }

    /// Resizes the gene array, discarding previous contents and scoring.
    ///
    /// A no-op (apart from clearing the score) when the size is unchanged.
    pub fn resize(&mut self, new_len: usize) {
        if self.genes.len() != new_len {
            self.genes = vec![0.0; new_len];
        }
        self.clear_objective();
    }

    /// Takes ownership of this chromosome, leaving an empty (size 0,
    /// unscored) husk behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Exchanges the gene suffixes of two chromosomes starting at `cut`.
    ///
    /// Both individuals keep their prefix `[0, cut)` and receive the other's
    /// suffix, so their lengths (and `K`) may change. Both objectives reset
    /// to the undefined sentinel: the genomes just went stale.
    ///
    /// # Panics
    /// Panics if `cut >= min(self.len(), other.len())`.
    pub fn swap_suffix(&mut self, other: &mut Self, cut: usize) {
        assert!(
            cut < self.genes.len().min(other.genes.len()),
            "crossover cut out of range"
        );
        let tail_self = self.genes.split_off(cut);
        let tail_other = other.genes.split_off(cut);
        self.genes.extend(tail_other);
        other.genes.extend(tail_self);
        self.clear_objective();
        other.clear_objective();
    }

    /// The objective value, `None` while undefined.
    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    /// Records a defined objective and marks the individual valid.
    pub fn set_objective(&mut self, vrc: f64) {
        self.objective = Some(vrc);
        self.valid = true;
    }

    /// Resets the objective to the undefined sentinel and clears validity.
    pub fn clear_objective(&mut self) {
        self.objective = None;
        self.valid = false;
    }

    /// Fitness used by selection: the objective, or 0.0 while undefined.
    ///
    /// An undefined objective therefore receives zero selection weight.
    pub fn fitness(&self) -> f64 {
        self.objective.unwrap_or(0.0)
    }

    /// Whether the last evaluation produced a usable partition.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
