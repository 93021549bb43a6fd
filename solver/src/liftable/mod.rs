//! Work-list driven fixed points.
//!
//! A [`Liftable`] hands out vertices whose value may be stale. The caller
//! recomputes ("lifts") the value of each of them and reports successful
//! lifts back, which re-admits the predecessors of the lifted vertex. The
//! iteration ends when no vertex is pending, that is at a fixed point.
//! Termination is up to the caller: every successful lift must strictly
//! increase some bounded quantity.

mod worklist;


pub use worklist::{HybridWorklist, SetWorklist, StackWorklist, Worklist};

use crate::game::{Predecessors, VertexId};
use crate::Set;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Revisit {
    /// A successfully lifted vertex is never handed out again. Enough for
    /// monotone boolean values like attractor membership.
    Once,
    /// Vertices are re-admitted every time one of their successors is lifted.
    Many,
}

pub struct Liftable<'a, W> {
    subgame: &'a Set<VertexId>,
    preds: &'a Predecessors,
    queue: W,
    revisit: Revisit,
    settled: Set<VertexId>,
    lifts: usize,
}

impl<'a, W: Worklist> Liftable<'a, W> {
    pub fn new(
        subgame: &'a Set<VertexId>,
        seeds: impl IntoIterator<Item = VertexId>,
        preds: &'a Predecessors,
        revisit: Revisit,
    ) -> Self {
        let mut queue = W::default();
        for v in seeds {
            debug_assert!(subgame.contains(&v), "seed {v:?} is outside the subgame");
            queue.push(v);
        }

        Self { subgame, preds, queue, revisit, settled: Set::default(), lifts: 0 }
    }

    /// Reports that the value of `v` increased, so its predecessors need another look.
    pub fn lifted(&mut self, v: VertexId) {
        self.lifts += 1;

        if self.revisit == Revisit::Once {
            self.settled.insert(v);
        }

        for u in self.preds.of(v) {
            if self.subgame.contains(&u) && !self.settled.contains(&u) {
                self.queue.push(u);
            }
        }
    }

    /// Drives the iteration to its fixed point. `lift` returns whether the
    /// value of the given vertex increased.
    pub fn run(mut self, mut lift: impl FnMut(VertexId) -> bool) -> usize {
        while let Some(v) = self.next() {
            if lift(v) {
                self.lifted(v);
            }
        }

        self.lifts
    }
}

impl<W: Worklist> Iterator for Liftable<'_, W> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.queue.pop()?;
            if !self.settled.contains(&v) {
                return Some(v);
            }
        }
    }
}
