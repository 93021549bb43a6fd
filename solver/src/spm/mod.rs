//! Small progress measures.
//!
//! Every vertex gets a [`Measure`] that starts at zero and is lifted until
//! nothing changes anymore. Vertices that end up at `Top` are won by the
//! counted player, the others by its opponent, who wins by always moving to
//! the successor with the smallest measure.

mod measure;


use std::marker::PhantomData;

use log::debug;

pub use measure::{table_size, Level, Measure, MeasureSpace};

use crate::error::SolveError;
use crate::game::{Arena, Player, Predecessors, VertexId};
use crate::index::IndexedVec;
use crate::liftable::{HybridWorklist, Liftable, Revisit, Worklist};
use crate::solution::{PartialSolution, Solution};
use crate::{Map, Set, Solver};

/// Fixed point of one lifting run.
pub struct Measured {
    /// Vertices measured `Top`, won by the counted player.
    pub top: Set<VertexId>,
    /// Vertices with a finite measure, a dominion of the opponent.
    pub finite: Set<VertexId>,
    /// Choices of the opponent on its vertices in `finite`.
    pub strategy: Map<VertexId, VertexId>,
    pub lifts: usize,
}

/// Lifts all the vertices of `subgame` until the measures are stable.
pub fn lift<W: Worklist>(
    arena: &Arena,
    preds: &Predecessors,
    subgame: &Set<VertexId>,
    space: &MeasureSpace,
) -> (IndexedVec<VertexId, Measure>, usize) {
    // Vertices outside the subgame are never read.
    let mut measures = IndexedVec::from_elem(Measure::Top, arena.vertex_count());
    for &v in subgame {
        measures[v] = space.zero();
    }
    let counted = space.counted();

    let liftable = Liftable::<W>::new(subgame, subgame.iter().copied(), preds, Revisit::Many);
    let lifts = liftable.run(|v| {
        if measures[v].is_top() {
            return false;
        }

        let level = space.level(arena.priority_of(v));
        let progs = arena.successors_in(v, subgame).map(|w| space.prog(level, &measures[w]));
        let best = match arena.player_of(v) == counted {
            true => progs.max(),
            false => progs.min(),
        };

        match best {
            Some(m) if m > measures[v] => {
                measures[v] = m;
                true
            }
            _ => false,
        }
    });

    (measures, lifts)
}

/// Runs the lifting for `counted` and splits `subgame` according to the result.
pub fn measure<W: Worklist>(
    arena: &Arena,
    preds: &Predecessors,
    subgame: &Set<VertexId>,
    counted: Player,
    size_bound: Option<usize>,
) -> Result<Measured, SolveError> {
    let space = MeasureSpace::new(arena, subgame, counted, size_bound)?;
    let (measures, lifts) = lift::<W>(arena, preds, subgame, &space);

    let (top, finite): (Set<_>, Set<_>) = subgame.iter().partition(|&&v| measures[v].is_top());

    let mut strategy = Map::default();
    for &v in &finite {
        if arena.player_of(v) == counted {
            continue;
        }

        let level = space.level(arena.priority_of(v));
        let best = arena
            .successors_in(v, subgame)
            .min_by_key(|&w| space.prog(level, &measures[w]));
        if let Some(w) = best {
            debug_assert!(finite.contains(&w), "{v:?} has finite measure but its best move is top");
            strategy.insert(v, w);
        }
    }

    debug!(
        "progress measures for {counted:?} (bound {size_bound:?}, {} counters): {} top, {} finite, {lifts} lifts",
        space.counters(),
        top.len(),
        finite.len()
    );

    Ok(Measured { top, finite, strategy, lifts })
}

/// Solves `subgame` exactly by lifting once for each player: each run gives
/// the winning strategy of the player whose measures stay finite.
pub fn solve_subgame<W: Worklist>(
    arena: &Arena,
    preds: &Predecessors,
    subgame: &Set<VertexId>,
) -> Result<PartialSolution, SolveError> {
    let odd = measure::<W>(arena, preds, subgame, Player::P1, None)?;
    let even = measure::<W>(arena, preds, subgame, Player::P0, None)?;

    debug_assert!(odd.finite == even.top, "progress measure runs disagree on the winners");

    let mut strategy = odd.strategy;
    strategy.extend(even.strategy);

    Ok(PartialSolution { regions: [odd.finite, even.finite], strategy })
}

/// The small progress measures algorithm on its own.
pub struct SmallProgressMeasures<W = HybridWorklist> {
    _worklist: PhantomData<W>,
}

impl<W> SmallProgressMeasures<W> {
    pub fn new() -> Self {
        Self { _worklist: PhantomData }
    }
}

impl<W> Default for SmallProgressMeasures<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Worklist> Solver for SmallProgressMeasures<W> {
    fn solve(&self, arena: &Arena) -> Result<Solution, SolveError> {
        let subgame = arena.full_subgame();
        let preds = Predecessors::new(arena, &subgame);

        let solution = solve_subgame::<W>(arena, &preds, &subgame)?;

        Ok(solution.into_solution(arena))
    }
}
