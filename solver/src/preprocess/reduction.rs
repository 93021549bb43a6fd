use crate::error::SolveError;
use crate::game::{Arena, Player, Vertex, VertexId};
use crate::index::IndexedVec;
use crate::solution::PartialSolution;
use crate::{Map, Set};

use super::bimap::BiMap;

/// Which original vertices each compressed vertex stands for.
///
/// A compressed vertex is a chain of original vertices where each one has the
/// next as its only successor. It is named after the last vertex of the
/// chain, which is the only one that may have a choice.
pub struct Chains {
    members: IndexedVec<VertexId, Vec<VertexId>>,
}

impl Chains {
    fn new(count: usize) -> Self {
        Self { members: (0..count).map(|v| vec![VertexId(v)]).collect() }
    }

    /// The original vertices of compressed vertex `c`, in play order.
    pub fn members(&self, c: VertexId) -> &[VertexId] {
        &self.members[c]
    }

    pub fn head(&self, c: VertexId) -> VertexId {
        self.members[c][0]
    }

    /// Puts the chain of `u` in front of the chain of `w`.
    fn merge(&mut self, u: VertexId, w: VertexId) {
        let mut chain = std::mem::take(&mut self.members[u]);
        chain.append(&mut self.members[w]);
        self.members[w] = chain;
    }
}

/// A shrinking copy of an arena, addressed by compressed vertices.
pub struct Reduction<'a> {
    arena: &'a Arena,
    priorities: IndexedVec<VertexId, usize>,
    succs: IndexedVec<VertexId, Set<VertexId>>,
    preds: IndexedVec<VertexId, Set<VertexId>>,
    alive: Set<VertexId>,
    pub chains: Chains,
}

impl<'a> Reduction<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        let priorities = arena.vertices().map(|v| arena.priority_of(v)).collect();
        let succs = arena.vertices().map(|v| arena.successors_of(v).collect()).collect();

        let mut preds = IndexedVec::from_elem(Set::default(), arena.vertex_count());
        for v in arena.vertices() {
            for w in arena.successors_of(v) {
                preds[w].insert(v);
            }
        }

        Self {
            arena,
            priorities,
            succs,
            preds,
            alive: arena.full_subgame(),
            chains: Chains::new(arena.vertex_count()),
        }
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Builds an arena out of the vertices still alive, along with the
    /// mapping between compressed vertices and the new arena's vertices.
    pub fn snapshot(&self) -> Result<(Arena, BiMap<VertexId, VertexId>), SolveError> {
        let mut ids = BiMap::new();
        for (i, &c) in self.alive.iter().enumerate() {
            ids.insert(c, VertexId(i));
        }

        let vertices = self
            .alive
            .iter()
            .map(|&c| Vertex {
                player: self.arena.player_of(c),
                priority: self.priorities[c],
                successors: self.succs[c].iter().filter_map(|&d| ids.right(d)).collect(),
            })
            .collect();

        Ok((Arena::new(vertices)?, ids))
    }

    /// Removes vertices with a self-loop that the player favoured by their
    /// priority can take forever, together with their attractors. Returns the
    /// number of compressed vertices removed.
    pub fn remove_self_loops(&mut self, resolved: &mut PartialSolution) -> usize {
        let mut removed = 0;

        for player in [Player::P0, Player::P1] {
            let targets =
                self.alive.iter().copied().filter(|&c| self.loop_winner(c) == Some(player)).collect::<Vec<_>>();
            if targets.is_empty() {
                continue;
            }

            for &c in targets.iter().filter(|&&c| self.arena.player_of(c) == player) {
                resolved.strategy.insert(c, c);
            }

            let attracted = self.attract(targets, player, &mut resolved.strategy);
            for &c in &attracted {
                resolved.region_mut(player).insert(c);
                self.remove(c);
            }

            removed += attracted.len();
        }

        removed
    }

    /// The player winning at `c` by looping on it, if its owner wants to loop
    /// or has no other choice.
    fn loop_winner(&self, c: VertexId) -> Option<Player> {
        if !self.succs[c].contains(&c) {
            return None;
        }

        let favoured = Player::of_priority(self.priorities[c]);
        let forced = self.succs[c].len() == 1;

        (self.arena.player_of(c) == favoured || forced).then_some(favoured)
    }

    /// Attractor of `targets` for `player` on the vertices still alive. The
    /// choices of `player` outside the targets go into `strategy`.
    fn attract(
        &self,
        targets: Vec<VertexId>,
        player: Player,
        strategy: &mut Map<VertexId, VertexId>,
    ) -> Set<VertexId> {
        let mut set = targets.iter().copied().collect::<Set<_>>();
        // Successors of opponent vertices not attracted yet.
        let mut escapes = Map::default();
        let mut stack = targets;

        while let Some(w) = stack.pop() {
            for &u in &self.preds[w] {
                if set.contains(&u) {
                    continue;
                }

                if self.arena.player_of(u) == player {
                    strategy.insert(u, w);
                } else {
                    let left = escapes.entry(u).or_insert(self.succs[u].len());
                    *left -= 1;
                    if *left > 0 {
                        continue;
                    }
                }

                set.insert(u);
                stack.push(u);
            }
        }

        set
    }

    /// Merges every vertex with a single successor into that successor, if it
    /// is its only predecessor. Returns the number of merges.
    pub fn compress_chains(&mut self) -> usize {
        let mut merged = 0;

        for u in self.alive.iter().copied().collect::<Vec<_>>() {
            if !self.alive.contains(&u) || self.succs[u].len() != 1 {
                continue;
            }

            let w = self.succs[u][0];
            if w != u && self.preds[w].len() == 1 {
                self.merge(u, w);
                merged += 1;
            }
        }

        merged
    }

    fn merge(&mut self, u: VertexId, w: VertexId) {
        debug_assert_eq!(self.preds[w].iter().copied().collect::<Vec<_>>(), [u]);

        self.priorities[w] = self.priorities[u].max(self.priorities[w]);

        let preds_u = std::mem::take(&mut self.preds[u]);
        self.succs[u].clear();
        self.preds[w].clear();
        for p in preds_u {
            self.succs[p].swap_remove(&u);
            self.succs[p].insert(w);
            self.preds[w].insert(p);
        }

        self.alive.swap_remove(&u);
        self.chains.merge(u, w);
    }

    fn remove(&mut self, c: VertexId) {
        for p in std::mem::take(&mut self.preds[c]) {
            self.succs[p].swap_remove(&c);
        }
        for s in std::mem::take(&mut self.succs[c]) {
            self.preds[s].swap_remove(&c);
        }
        self.alive.swap_remove(&c);
    }

    /// Translates a solution on compressed vertices back to the original arena.
    pub fn expand(&self, resolved: &PartialSolution) -> PartialSolution {
        let mut solution = PartialSolution::default();

        for player in [Player::P0, Player::P1] {
            for &c in resolved.region(player) {
                let members = self.chains.members(c);
                solution.region_mut(player).extend(members.iter().copied());

                for (i, &v) in members.iter().enumerate() {
                    if self.arena.player_of(v) != player {
                        continue;
                    }

                    let next = match members.get(i + 1) {
                        Some(&next) => next,
                        None => match resolved.strategy.get(&c) {
                            Some(&d) => self.chains.head(d),
                            None => unreachable!("{c:?} is won by its owner without a strategy"),
                        },
                    };
                    solution.strategy.insert(v, next);
                }
            }
        }

        solution
    }
}
