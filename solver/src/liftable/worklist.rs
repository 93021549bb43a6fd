use crate::game::VertexId;
use crate::{Map, Set};

/// Pending vertices of a [`Liftable`](super::Liftable).
///
/// Implementations only differ in the order vertices come out and in how
/// much bookkeeping they do to avoid duplicates; the fixed point reached is
/// the same for all of them.
pub trait Worklist: Default {
    fn push(&mut self, v: VertexId);
    fn pop(&mut self) -> Option<VertexId>;
}

/// Plain set, pops in no particular order.
#[derive(Default)]
pub struct SetWorklist {
    pending: Set<VertexId>,
}

impl Worklist for SetWorklist {
    fn push(&mut self, v: VertexId) {
        self.pending.insert(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.pending.swap_remove_index(0)
    }
}

/// Plain stack. A vertex pushed twice is popped twice.
#[derive(Default)]
pub struct StackWorklist {
    stack: Vec<VertexId>,
}

impl Worklist for StackWorklist {
    fn push(&mut self, v: VertexId) {
        self.stack.push(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.stack.pop()
    }
}

/// Stack with at most one live entry per vertex. Pushing a pending vertex
/// moves it to the top; the entry left behind goes stale and is skipped.
#[derive(Default)]
pub struct HybridWorklist {
    stack: Vec<VertexId>,
    live: Map<VertexId, usize>,
}

impl Worklist for HybridWorklist {
    fn push(&mut self, v: VertexId) {
        self.live.insert(v, self.stack.len());
        self.stack.push(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        while let Some(v) = self.stack.pop() {
            if self.live.get(&v) == Some(&self.stack.len()) {
                self.live.remove(&v);
                return Some(v);
            }
        }

        None
    }
}
