//! Union-find (disjoint set union) over instance indices.
//!
//! Used to materialize concrete partitions from the single-linkage hierarchy:
//! merges are replayed in height order and the live-set counter tells the cut
//! routine when the target cluster count is reached.

/// Disjoint-set structure with path compression and union by rank.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    num_sets: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            num_sets: n,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the structure holds no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of live (disjoint) sets. Starts at `n`, decreases by exactly
    /// one per effective merge, never below 1 for non-empty structures.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Canonical representative of `x`'s set, with full path compression.
    ///
    /// # Panics
    /// Panics if `x >= len()`.
    pub fn find(&mut self, mut x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[x] != x {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    /// Unions the sets containing `a` and `b` by rank.
    ///
    /// Returns `true` when two previously distinct sets were merged,
    /// `false` when `a` and `b` already shared a set.
    ///
    /// # Panics
    /// Panics if `a` or `b` is `>= len()`.
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] = self.rank[ra].saturating_add(1);
        }
        self.num_sets -= 1;
        true
    }

    /// Labels every element with a dense cluster id in `0..num_sets()`.
    ///
    /// Ids are assigned in ascending order of canonical root, so the mapping
    /// is deterministic for a given merge history.
    pub fn labels(&mut self) -> Vec<usize> {
        let n = self.len();
        let mut roots: Vec<usize> = (0..n).map(|i| self.find(i)).collect();
        let mut distinct: Vec<usize> = roots.clone();
        distinct.sort_unstable();
        distinct.dedup();
        for r in &mut roots {
            // distinct is sorted, so this lookup cannot fail
            *r = distinct.binary_search(r).unwrap_or(0);
        }
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_singletons() {
        let mut ds = DisjointSet::new(4);
        assert_eq!(ds.num_sets(), 4);
        for i in 0..4 {
            assert_eq!(ds.find(i), i);
        }
    }

    #[test]
    fn test_merge_decrements_once() {
        let mut ds = DisjointSet::new(4);
        assert!(ds.merge(0, 1));
        assert_eq!(ds.num_sets(), 3);
        // Already merged: counter unchanged.
        assert!(!ds.merge(0, 1));
        assert!(!ds.merge(1, 0));
        assert_eq!(ds.num_sets(), 3);
        // Self-merge is a no-op.
        assert!(!ds.merge(2, 2));
        assert_eq!(ds.num_sets(), 3);
    }

    #[test]
    fn test_transitive_roots_agree() {
        let mut ds = DisjointSet::new(5);
        ds.merge(0, 1);
        ds.merge(1, 2);
        ds.merge(3, 4);
        let r = ds.find(0);
        assert_eq!(ds.find(1), r);
        assert_eq!(ds.find(2), r);
        assert_ne!(ds.find(3), r);
        // find is idempotent.
        assert_eq!(ds.find(r), r);
    }

    #[test]
    fn test_labels_are_dense_and_consistent() {
        let mut ds = DisjointSet::new(5);
        ds.merge(0, 4);
        ds.merge(1, 2);
        let labels = ds.labels();
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0], labels[4]);
        assert_eq!(labels[1], labels[2]);
        assert_ne!(labels[0], labels[1]);
        let max = *labels.iter().max().unwrap();
        assert_eq!(max + 1, ds.num_sets());
    }

    proptest! {
        #[test]
        fn prop_num_sets_tracks_effective_merges(
            merges in proptest::collection::vec((0usize..16, 0usize..16), 0..64)
        ) {
            let mut ds = DisjointSet::new(16);
            let mut expected = 16usize;
            for (a, b) in merges {
                if ds.merge(a, b) {
                    expected -= 1;
                }
                prop_assert_eq!(ds.num_sets(), expected);
            }
            prop_assert!(ds.num_sets() >= 1);
        }
    }
}
