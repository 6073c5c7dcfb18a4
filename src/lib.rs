//! Two-stage genetic algorithm for automatic clustering (TGCA).
//!
//! Finds a partition of a dataset into an *unknown* number of clusters by
//! evolving a population of variable-length chromosomes, each encoding a
//! full centroid set for some cluster count `K` within a configured range.
//! Fitness is the Variance Ratio Criterion (VRC), a between/within-cluster
//! variance ratio that rewards compact and well-separated clusterings.
//!
//! # How it works
//!
//! - **Seeding**: a single-linkage hierarchy (SLINK) over the widest-range
//!   attribute pre-clusters the data; new individuals sample their centroid
//!   coordinates inside the per-cluster segments of a dendrogram cut.
//! - **Evaluation**: each individual's centroids are polished by bounded
//!   Lloyd iteration, then scored with the VRC of the induced partition.
//! - **Two-stage operators**: selection and mutation watch how concentrated
//!   the population is on one `K`. While cluster counts still disagree,
//!   fitness-sharing selection and whole-individual re-seeding keep the
//!   structural search alive; after convergence on a single `K`, plain
//!   fitness-proportionate selection and bounded per-gene perturbation take
//!   over to fine-tune coordinates.
//!
//! # Key Types
//!
//! - [`Dataset`] / [`Metric`] / [`Euclidean`]: input data and distance
//! - [`TgcaConfig`]: algorithm parameters (K range, population, operators)
//! - [`TgcaRunner`]: executes the evolutionary loop
//! - [`TgcaResult`]: best chromosome plus run statistics
//! - [`RunObserver`]: optional per-generation statistics sink
//!
//! # Example
//!
//! ```
//! use tgca::{Dataset, Euclidean, TgcaConfig, TgcaRunner};
//!
//! // Two obvious groups on a line.
//! let rows: Vec<Vec<f64>> = (0..30)
//!     .map(|i| {
//!         let base = if i < 15 { 0.0 } else { 100.0 };
//!         vec![base + i as f64 * 0.1]
//!     })
//!     .collect();
//! let dataset = Dataset::from_rows(&rows).unwrap();
//!
//! let config = TgcaConfig::default()
//!     .with_k_range(2, 6)
//!     .with_population_size(20)
//!     .with_max_generations(25)
//!     .with_seed(42);
//!
//! let result = TgcaRunner::run(&dataset, &Euclidean, &config).unwrap();
//! assert_eq!(result.best_k, 2);
//! ```
//!
//! # References
//!
//! - Caliński & Harabasz (1974), *A dendrite method for cluster analysis*
//! - Sibson (1973), *SLINK: An optimally efficient algorithm for the
//!   single-link cluster method*
//! - Hruschka et al. (2009), *A Survey of Evolutionary Algorithms for
//!   Clustering*

pub mod chromosome;
pub mod config;
pub mod crossover;
pub mod dataset;
pub mod error;
pub mod fitness;
pub mod hierarchy;
pub mod init;
pub mod mutation;
pub mod refine;
pub mod runner;
pub mod selection;

pub use chromosome::Chromosome;
pub use config::{InitMode, TgcaConfig};
pub use dataset::{Dataset, Euclidean, Metric};
pub use error::{Error, Result};
pub use runner::{GenerationStats, RunObserver, TgcaResult, TgcaRunner};
