use crate::game::{Arena, Player, Predecessors, VertexId};
use crate::liftable::{Liftable, Revisit, Worklist};
use crate::{Map, Set};

/// Vertices from which `player` can force the play into a target set.
pub struct Attractor {
    pub set: Set<VertexId>,
    /// Choices of `player` on its own vertices of `set` outside the target.
    pub strategy: Map<VertexId, VertexId>,
}

/// Computes the attractor of `target` for `player` inside `subgame`.
///
/// A vertex of `player` joins as soon as one of its successors in the
/// subgame is attracted, and that successor becomes its strategy. A vertex of
/// the opponent joins once all its successors in the subgame are attracted.
pub fn attractor<W: Worklist>(
    arena: &Arena,
    preds: &Predecessors,
    subgame: &Set<VertexId>,
    target: impl IntoIterator<Item = VertexId>,
    player: Player,
) -> Attractor {
    let mut set = target.into_iter().collect::<Set<_>>();
    let mut strategy = Map::default();

    debug_assert!(set.iter().all(|v| subgame.contains(v)), "target is not inside the subgame");

    let seeds = subgame.iter().copied().filter(|v| !set.contains(v)).collect::<Vec<_>>();
    let liftable = Liftable::<W>::new(subgame, seeds, preds, Revisit::Once);

    liftable.run(|v| {
        if set.contains(&v) {
            return false;
        }

        if arena.player_of(v) == player {
            let Some(w) = arena.successors_in(v, subgame).find(|w| set.contains(w)) else {
                return false;
            };
            strategy.insert(v, w);
        } else if !arena.successors_in(v, subgame).all(|w| set.contains(&w)) {
            return false;
        }

        set.insert(v);
        true
    });

    Attractor { set, strategy }
}
