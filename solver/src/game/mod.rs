mod predecessors;


pub use predecessors::Predecessors;

use crate::error::SolveError;
use crate::index::{AsIndex, IndexedVec};
use crate::Set;

crate::new_index!(pub index VertexId);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    P0,
    P1,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::P0 => Player::P1,
            Player::P1 => Player::P0,
        }
    }

    /// The player winning a play whose highest recurring priority is `priority`.
    pub fn of_priority(priority: usize) -> Player {
        match priority % 2 {
            0 => Player::P0,
            _ => Player::P1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::P0 => 0,
            Player::P1 => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub player: Player,
    pub priority: usize,
    pub successors: Vec<VertexId>,
}

/// A total game graph. Every vertex has at least one successor, which
/// `Arena::new` checks before anything else can look at it.
#[derive(Clone, Debug)]
pub struct Arena {
    vertices: IndexedVec<VertexId, Vertex>,
    max_priority: usize,
}

impl Arena {
    pub fn new(vertices: Vec<Vertex>) -> Result<Self, SolveError> {
        let mut vertices = IndexedVec::<VertexId, _>::from(vertices);
        let count = vertices.len();

        for (v, vertex) in vertices.enumerate_mut() {
            if vertex.successors.is_empty() {
                return Err(SolveError::NoSuccessors { vertex: v });
            }

            if let Some(&w) = vertex.successors.iter().find(|w| w.to_usize() >= count) {
                return Err(SolveError::UnknownSuccessor { vertex: v, successor: w });
            }

            // Duplicate edges carry no information.
            let mut seen = Set::default();
            vertex.successors.retain(|&w| seen.insert(w));
        }

        let max_priority = vertices.iter().map(|v| v.priority).max().unwrap_or(0);

        Ok(Self { vertices, max_priority })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + DoubleEndedIterator + ExactSizeIterator {
        self.vertices.indexes()
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v]
    }

    pub fn player_of(&self, v: VertexId) -> Player {
        self.vertices[v].player
    }

    pub fn priority_of(&self, v: VertexId) -> usize {
        self.vertices[v].priority
    }

    pub fn successors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices[v].successors.iter().copied()
    }

    /// Successors of `v` that are still part of `subgame`.
    pub fn successors_in<'a>(
        &'a self,
        v: VertexId,
        subgame: &'a Set<VertexId>,
    ) -> impl Iterator<Item = VertexId> + 'a {
        self.successors_of(v).filter(move |w| subgame.contains(w))
    }

    pub fn max_priority(&self) -> usize {
        self.max_priority
    }

    /// Highest priority inside `subgame`, `None` when it is empty.
    pub fn max_priority_in(&self, subgame: &Set<VertexId>) -> Option<usize> {
        subgame.iter().map(|&v| self.priority_of(v)).max()
    }

    /// Number of distinct priorities used inside `subgame`.
    pub fn priority_count_in(&self, subgame: &Set<VertexId>) -> usize {
        subgame.iter().map(|&v| self.priority_of(v)).collect::<Set<_>>().len()
    }

    /// All the vertices of the arena, as a subgame.
    pub fn full_subgame(&self) -> Set<VertexId> {
        self.vertices().collect()
    }
}
