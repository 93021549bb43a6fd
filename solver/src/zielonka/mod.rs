//! Zielonka's recursive algorithm, optionally accelerated with big steps.
//!
//! The recursion runs on an explicit stack of pending subgames, so deep
//! games don't exhaust the native stack.

pub mod bigstep;


use std::marker::PhantomData;

use log::{debug, trace};

use crate::attractor::{attractor, Attractor};
use crate::error::SolveError;
use crate::game::{Arena, Player, Predecessors, VertexId};
use crate::liftable::{HybridWorklist, Worklist};
use crate::solution::{PartialSolution, Solution};
use crate::{spm, Set, Solver};

pub struct Zielonka<W = HybridWorklist> {
    big_step: bool,
    _worklist: PhantomData<W>,
}

impl<W> Zielonka<W> {
    /// The plain recursive algorithm.
    pub fn new() -> Self {
        Self { big_step: false, _worklist: PhantomData }
    }

    /// Searches small dominions with bounded progress measures before each
    /// recursive step, and solves games with two priorities directly.
    pub fn big_step() -> Self {
        Self { big_step: true, _worklist: PhantomData }
    }
}

impl<W> Default for Zielonka<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Worklist> Solver for Zielonka<W> {
    fn solve(&self, arena: &Arena) -> Result<Solution, SolveError> {
        let subgame = arena.full_subgame();
        let preds = Predecessors::new(arena, &subgame);

        let mut recursion = Recursion::<W> {
            arena,
            preds: &preds,
            big_step: self.big_step,
            steps: 0,
            _worklist: PhantomData,
        };
        let solution = recursion.run(subgame)?;

        debug!("zielonka solved {} vertices in {} steps", arena.vertex_count(), recursion.steps);

        Ok(solution.into_solution(arena))
    }
}

/// One level of the recursion, waiting for the solution of a smaller subgame.
struct Level {
    depth: usize,
    /// The player favoured by the highest priority of `subgame`.
    player: Player,
    subgame: Set<VertexId>,
    /// Vertices with the highest priority.
    top: Set<VertexId>,
    /// Attractor of `top` for `player`.
    attracted: Attractor,
    /// Parts of the game already known to be won by the opponent.
    lost: PartialSolution,
}

enum Task {
    Solve(Set<VertexId>, usize),
    /// Waiting for the subgame without the attractor of the top priority.
    Lower(Level),
    /// Waiting for the subgame without the opponent's dominions, which are
    /// already solved.
    Rest(PartialSolution),
}

enum Step {
    Done(PartialSolution),
    /// Solve the subgame at the given depth, then resume with the task.
    Descend(Task, Set<VertexId>, usize),
}

struct Recursion<'a, W> {
    arena: &'a Arena,
    preds: &'a Predecessors,
    big_step: bool,
    steps: usize,
    _worklist: PhantomData<W>,
}

impl<W: Worklist> Recursion<'_, W> {
    fn run(&mut self, subgame: Set<VertexId>) -> Result<PartialSolution, SolveError> {
        let mut tasks = vec![Task::Solve(subgame, 0)];
        let mut solved = Vec::new();

        while let Some(task) = tasks.pop() {
            let step = match task {
                Task::Solve(subgame, depth) => {
                    self.steps += 1;
                    self.enter(subgame, depth)?
                }
                Task::Lower(level) => {
                    let lower = solved.pop().unwrap_or_else(|| unreachable!("missing solution"));
                    self.after_lower(level, lower)
                }
                Task::Rest(lost) => {
                    let mut rest = solved.pop().unwrap_or_else(|| unreachable!("missing solution"));
                    rest.merge(lost);
                    Step::Done(rest)
                }
            };

            match step {
                Step::Done(solution) => solved.push(solution),
                Step::Descend(resume, subgame, depth) => {
                    tasks.push(resume);
                    tasks.push(Task::Solve(subgame, depth));
                }
            }
        }

        debug_assert_eq!(solved.len(), 1);
        Ok(solved.pop().unwrap_or_default())
    }

    fn enter(&mut self, subgame: Set<VertexId>, depth: usize) -> Result<Step, SolveError> {
        let Some(max_priority) = self.arena.max_priority_in(&subgame) else {
            return Ok(Step::Done(PartialSolution::default()));
        };

        if max_priority == 0 {
            return Ok(Step::Done(self.won_by(Player::P0, subgame)));
        }

        let (subgame, lost) = match self.big_step {
            true => {
                if self.arena.priority_count_in(&subgame) <= 2 {
                    trace!("{depth}: two priorities left, solving {} vertices", subgame.len());
                    return spm::solve_subgame::<W>(self.arena, self.preds, &subgame).map(Step::Done);
                }

                self.remove_small_dominion(subgame, Player::of_priority(max_priority))?
            }
            false => (subgame, PartialSolution::default()),
        };

        // Removing a dominion may have removed the highest priority as well.
        let Some(max_priority) = self.arena.max_priority_in(&subgame) else {
            return Ok(Step::Done(lost));
        };
        let player = Player::of_priority(max_priority);

        let top = subgame
            .iter()
            .copied()
            .filter(|&v| self.arena.priority_of(v) == max_priority)
            .collect::<Set<_>>();
        let attracted = self.attractor(&subgame, top.iter().copied(), player);
        let lower = subgame.iter().copied().filter(|v| !attracted.set.contains(v)).collect();

        trace!(
            "{depth}: {} vertices, priority {max_priority} for {player:?}, attracted {}",
            subgame.len(),
            attracted.set.len()
        );

        let level = Level { depth, player, subgame, top, attracted, lost };
        Ok(Step::Descend(Task::Lower(level), lower, depth + 1))
    }

    fn after_lower(&mut self, level: Level, mut lower: PartialSolution) -> Step {
        let Level { depth, player, subgame, top, attracted, mut lost } = level;
        let opponent = player.opponent();

        if lower.region(opponent).is_empty() {
            // The opponent can't win anywhere: `player` wins the whole subgame.
            lower.region_mut(player).extend(attracted.set.iter().copied());
            lower.strategy.extend(attracted.strategy);

            for &v in top.iter().filter(|&&v| self.arena.player_of(v) == player) {
                let w = self.successor_in(v, &subgame);
                lower.strategy.insert(v, w);
            }

            lower.merge(lost);
            return Step::Done(lower);
        }

        // The opponent's region of the lower game is a dominion in the whole subgame.
        let won = lower.region(opponent);
        let escape = self.attractor(&subgame, won.iter().copied(), opponent);

        trace!("{depth}: {:?} dominion of {} vertices", opponent, escape.set.len());

        for (&v, &w) in &lower.strategy {
            if won.contains(&v) {
                lost.strategy.insert(v, w);
            }
        }
        lost.strategy.extend(escape.strategy);
        lost.region_mut(opponent).extend(escape.set.iter().copied());

        let rest = subgame.into_iter().filter(|v| !escape.set.contains(v)).collect();

        Step::Descend(Task::Rest(lost), rest, depth + 1)
    }

    /// Searches a dominion of the opponent of `player` with size bounded by
    /// `pi`, then removes its attractor from the subgame.
    fn remove_small_dominion(
        &mut self,
        subgame: Set<VertexId>,
        player: Player,
    ) -> Result<(Set<VertexId>, PartialSolution), SolveError> {
        let opponent = player.opponent();
        let bound = bigstep::pi(subgame.len(), self.arena.priority_count_in(&subgame));
        let measured = spm::measure::<W>(self.arena, self.preds, &subgame, player, Some(bound))?;

        if measured.finite.is_empty() {
            return Ok((subgame, PartialSolution::default()));
        }

        let escape = self.attractor(&subgame, measured.finite.iter().copied(), opponent);
        debug!(
            "big step: {opponent:?} dominion of {} vertices (bound {bound}), attracting {}",
            measured.finite.len(),
            escape.set.len()
        );

        let mut lost = PartialSolution::default();
        lost.strategy.extend(measured.strategy);
        lost.strategy.extend(escape.strategy);
        let rest = subgame.into_iter().filter(|v| !escape.set.contains(v)).collect();
        *lost.region_mut(opponent) = escape.set;

        Ok((rest, lost))
    }

    fn attractor(
        &self,
        subgame: &Set<VertexId>,
        target: impl IntoIterator<Item = VertexId>,
        player: Player,
    ) -> Attractor {
        attractor::<W>(self.arena, self.preds, subgame, target, player)
    }

    /// Assigns the whole subgame to `player`, with an arbitrary strategy.
    fn won_by(&self, player: Player, subgame: Set<VertexId>) -> PartialSolution {
        let mut solution = PartialSolution::default();

        for &v in subgame.iter().filter(|&&v| self.arena.player_of(v) == player) {
            let w = self.successor_in(v, &subgame);
            solution.strategy.insert(v, w);
        }
        *solution.region_mut(player) = subgame;

        solution
    }

    fn successor_in(&self, v: VertexId, subgame: &Set<VertexId>) -> VertexId {
        self.arena
            .successors_in(v, subgame)
            .next()
            .unwrap_or_else(|| unreachable!("{v:?} has no successor inside its subgame"))
    }
}
