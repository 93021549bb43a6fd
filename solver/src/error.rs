use thiserror::Error;

use crate::game::VertexId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The arena is not total: a play reaching `vertex` could not continue.
    #[error("vertex {vertex:?} has no successors")]
    NoSuccessors { vertex: VertexId },
    #[error("vertex {vertex:?} has an edge to {successor:?}, which is not a vertex of the arena")]
    UnknownSuccessor { vertex: VertexId, successor: VertexId },
    /// The progress measures of a subgame don't fit the counter width or the address space.
    #[error("arena with {vertices} vertices and {priorities} priorities is too large")]
    ArenaTooLarge { vertices: usize, priorities: usize },
}
