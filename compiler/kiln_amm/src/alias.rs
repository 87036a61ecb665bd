//! Alias cliques for bitwise-copied records.
//!
//! A bitwise copy (`move y, x` with a bare symbol on the right) makes
//! two record variables share one heap state: their pointer fields are
//! identical. Ownership analysis must then treat them as one — when any
//! member of the clique is destroyed, every member's ownership ends.
//!
//! Cliques form an equivalence relation over the dense symbol indices
//! produced by extraction, represented as a union-find with union by
//! size and path compression. Cliques only ever grow; nothing splits
//! them for the lifetime of one function's analysis.

/// Union-find over dense symbol indices.
///
/// Indices are the positions assigned by
/// [`SymbolIndex`](crate::extract::SymbolIndex); every index starts in
/// its own singleton clique.
pub struct AliasMap {
    /// Parent pointers; a root points to itself.
    parent: Vec<usize>,
    /// Clique sizes, valid at roots only.
    size: Vec<usize>,
}

impl AliasMap {
    /// Create `n` singleton cliques.
    pub fn new(n: usize) -> Self {
        AliasMap {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Canonical representative of `index`'s clique.
    ///
    /// Compresses the path it walks.
    pub fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Point everything on the walked path directly at the root.
        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the cliques of `a` and `b`. Idempotent.
    pub fn merge(&mut self, a: usize, b: usize) {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
    }

    /// Are `a` and `b` in the same clique?
    pub fn same_clique(&self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// Every member of `index`'s clique, in ascending index order.
    pub fn members(&self, index: usize) -> Vec<usize> {
        let root = self.root(index);
        (0..self.parent.len())
            .filter(|&other| self.root(other) == root)
            .collect()
    }

    /// Root lookup without compression, for shared-borrow queries.
    fn root(&self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }
}
