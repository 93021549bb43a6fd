//! Cheap simplifications run before handing a game to a real solver.
//!
//! Self-loops won by their owner (or forced on them) decide their attractor
//! right away, and chains of vertices with a single move are collapsed into
//! one. What remains is solved by the wrapped solver and the result is mapped
//! back to the original vertices.

mod bimap;
mod reduction;


use log::debug;

pub use bimap::BiMap;
pub use reduction::{Chains, Reduction};

use crate::error::SolveError;
use crate::game::{Arena, Player};
use crate::solution::{PartialSolution, Solution};
use crate::Solver;

/// Wraps a solver with the graph reductions.
pub struct Preprocessed<S> {
    inner: S,
}

impl<S> Preprocessed<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Default> Default for Preprocessed<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Solver> Solver for Preprocessed<S> {
    fn solve(&self, arena: &Arena) -> Result<Solution, SolveError> {
        let mut reduction = Reduction::new(arena);
        let mut resolved = PartialSolution::default();

        let (mut loops, mut merges) = (0, 0);
        loop {
            let removed = reduction.remove_self_loops(&mut resolved);
            let merged = reduction.compress_chains();
            loops += removed;
            merges += merged;

            if removed == 0 && merged == 0 {
                break;
            }
        }

        debug!(
            "preprocessing: {loops} vertices decided by self-loops, {merges} chain merges, {} of {} left",
            reduction.len(),
            arena.vertex_count()
        );

        if !reduction.is_empty() {
            let (residual, ids) = reduction.snapshot()?;
            let solution = self.inner.solve(&residual)?;

            let compressed = |v| ids.left(v).unwrap_or_else(|| unreachable!("{v:?} isn't mapped"));
            for player in [Player::P0, Player::P1] {
                let region = solution.winning_region(player).iter().map(|&v| compressed(v));
                resolved.region_mut(player).extend(region);
            }
            for (&v, &w) in solution.strategy() {
                resolved.strategy.insert(compressed(v), compressed(w));
            }
        }

        Ok(reduction.expand(&resolved).into_solution(arena))
    }
}
