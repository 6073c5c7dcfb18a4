//! Single-linkage pre-clustering used to seed centroid sampling.
//!
//! The initializer (and the structural mutation path) needs a cheap way to
//! partition the dataset into any requested number of clusters. A single
//! SLINK pass over the widest-range attribute encodes the full single-linkage
//! dendrogram; cutting it at a height yields a partition for any `K`, and the
//! per-cluster attribute ranges bound where centroid seeds are sampled.

mod segments;
mod slink;
mod union_find;

pub use segments::segment_table;
pub use slink::SingleLinkage;
pub use union_find::DisjointSet;
