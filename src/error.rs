//! Error types for the TGCA crate.
//!
//! Recoverable conditions (a degenerate partition, an undefined VRC) are *not*
//! errors; they are represented by the undefined-objective sentinel on the
//! affected chromosome. The variants here cover configuration problems, bad
//! input data, and internal-consistency violations that must abort a run.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by dataset construction, configuration validation,
/// and the evolution driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dataset contains no instances.
    #[error("dataset is empty")]
    EmptyDataset,

    /// An instance's dimensionality differs from the dataset's.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimensionality of the first instance.
        expected: usize,
        /// Dimensionality of the offending instance.
        found: usize,
    },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured cluster-count range does not fit the dataset.
    #[error("k_max ({k_max}) exceeds the number of instances ({n})")]
    KRangeExceedsDataset {
        /// Configured upper cluster-count bound.
        k_max: usize,
        /// Number of instances in the dataset.
        n: usize,
    },

    /// An internal invariant was violated. Signals a programming defect,
    /// not a user error; the run must abort.
    #[error("internal consistency violation: {0}")]
    Internal(String),

    /// Every individual in every generation evaluated to an undefined VRC,
    /// so no best chromosome exists to return.
    #[error("no individual produced a valid clustering in {generations} generations")]
    NoViableSolution {
        /// Number of generations executed before giving up.
        generations: usize,
    },
}
