use std::hash::Hash;

use crate::Map;

/// One-to-one mapping with constant time lookups in both directions.
#[derive(Debug)]
pub struct BiMap<L, R> {
    forward: Map<L, R>,
    backward: Map<R, L>,
}

impl<L, R> Default for BiMap<L, R> {
    fn default() -> Self {
        Self { forward: Map::default(), backward: Map::default() }
    }
}

impl<L: Copy + Hash + Eq, R: Copy + Hash + Eq> BiMap<L, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `l` and `r`, dropping any link either of them had before.
    pub fn insert(&mut self, l: L, r: R) {
        if let Some(old_r) = self.forward.insert(l, r) {
            self.backward.remove(&old_r);
        }
        if let Some(old_l) = self.backward.insert(r, l) {
            if old_l != l {
                self.forward.remove(&old_l);
            }
        }
    }

    pub fn right(&self, l: L) -> Option<R> {
        self.forward.get(&l).copied()
    }

    pub fn left(&self, r: R) -> Option<L> {
        self.backward.get(&r).copied()
    }
}
