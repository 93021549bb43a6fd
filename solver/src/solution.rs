use either::Either;

use crate::game::{Arena, Player, VertexId};
use crate::index::IndexedVec;
use crate::{Map, Set};

/// Winning regions and strategies of both players on some subgame.
///
/// Strategy entries only exist for vertices owned by the player whose region
/// contains them.
#[derive(Debug, Default)]
pub struct PartialSolution {
    pub regions: [Set<VertexId>; 2],
    pub strategy: Map<VertexId, VertexId>,
}

impl PartialSolution {
    pub fn region(&self, player: Player) -> &Set<VertexId> {
        &self.regions[player.index()]
    }

    pub fn region_mut(&mut self, player: Player) -> &mut Set<VertexId> {
        &mut self.regions[player.index()]
    }

    pub fn len(&self) -> usize {
        self.regions[0].len() + self.regions[1].len()
    }

    /// Adds the solution of a disjoint subgame.
    pub fn merge(&mut self, other: PartialSolution) {
        let [r0, r1] = other.regions;
        debug_assert!(r0.iter().chain(&r1).all(|v| !self.contains(*v)), "overlapping solutions");

        self.regions[0].extend(r0);
        self.regions[1].extend(r1);
        self.strategy.extend(other.strategy);
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.regions[0].contains(&v) || self.regions[1].contains(&v)
    }

    /// Turns a solution covering every vertex of `arena` into a [`Solution`].
    pub fn into_solution(self, arena: &Arena) -> Solution {
        debug_assert_eq!(self.len(), arena.vertex_count(), "solution doesn't cover the arena");

        let mut winners = IndexedVec::from_elem(Player::P0, arena.vertex_count());
        for &v in self.region(Player::P1) {
            winners[v] = Player::P1;
        }

        let strategy = self
            .strategy
            .into_iter()
            .filter(|&(v, _)| arena.player_of(v) == winners[v])
            .collect();

        Solution { winners, regions: self.regions, strategy }
    }
}

/// The solution of a whole arena: who wins from each vertex and a positional
/// winning strategy for each player on its own region.
#[derive(Debug)]
pub struct Solution {
    winners: IndexedVec<VertexId, Player>,
    regions: [Set<VertexId>; 2],
    strategy: Map<VertexId, VertexId>,
}

impl Solution {
    pub fn winner(&self, v: VertexId) -> Player {
        self.winners[v]
    }

    pub fn winning_region(&self, player: Player) -> &Set<VertexId> {
        &self.regions[player.index()]
    }

    pub fn strategy(&self) -> &Map<VertexId, VertexId> {
        &self.strategy
    }

    pub fn strategy_of(&self, v: VertexId) -> Option<VertexId> {
        self.strategy.get(&v).copied()
    }

    /// Moves left from `v` once the winners commit to their strategies.
    pub fn moves_from<'a>(
        &'a self,
        arena: &'a Arena,
        v: VertexId,
    ) -> impl Iterator<Item = VertexId> + 'a {
        match self.strategy_of(v) {
            Some(w) => Either::Left(std::iter::once(w)),
            None => Either::Right(arena.successors_of(v)),
        }
    }

    /// Checks that the regions partition the arena and that the strategy
    /// keeps every player inside its own region.
    pub fn check(&self, arena: &Arena) -> Result<(), String> {
        if self.winners.len() != arena.vertex_count() {
            return Err(format!(
                "solution has {} vertices, arena has {}",
                self.winners.len(),
                arena.vertex_count()
            ));
        }

        for v in arena.vertices() {
            let winner = self.winners[v];
            if !self.regions[winner.index()].contains(&v) {
                return Err(format!("{v:?} is won by {winner:?} but not in its region"));
            }
            if self.regions[winner.opponent().index()].contains(&v) {
                return Err(format!("{v:?} is in both winning regions"));
            }

            let choice = self.strategy.get(&v);
            if arena.player_of(v) != winner {
                if let Some(w) = choice {
                    return Err(format!("{v:?} is lost by its owner but has strategy {w:?}"));
                }
                continue;
            }

            let Some(&w) = choice else {
                return Err(format!("{v:?} is won by its owner {winner:?} but has no strategy"));
            };
            if !arena.successors_of(v).any(|s| s == w) {
                return Err(format!("strategy of {v:?} points to {w:?}, which is not a successor"));
            }
            if self.winners[w] != winner {
                return Err(format!("strategy of {v:?} leaves the region of {winner:?}"));
            }
        }

        let covered = self.regions[0].len() + self.regions[1].len();
        if covered != arena.vertex_count() {
            return Err(format!("regions cover {covered} vertices out of {}", arena.vertex_count()));
        }

        Ok(())
    }
}
