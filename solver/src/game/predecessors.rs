use crate::index::IndexedVec;
use crate::Set;

use super::{Arena, VertexId};

/// Reverse adjacency of the edges that stay inside one subgame.
///
/// Built once per solve call. Consumers working on smaller subgames later on
/// filter the predecessors by membership instead of rebuilding it.
pub struct Predecessors {
    preds: IndexedVec<VertexId, Vec<VertexId>>,
}

impl Predecessors {
    pub fn new(arena: &Arena, subgame: &Set<VertexId>) -> Self {
        let mut preds = IndexedVec::from_elem(Vec::new(), arena.vertex_count());

        for &v in subgame {
            for w in arena.successors_in(v, subgame) {
                preds[w].push(v);
            }
        }

        Self { preds }
    }

    pub fn of(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.preds[v].iter().copied()
    }
}
