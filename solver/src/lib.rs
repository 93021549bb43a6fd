pub mod attractor;
pub mod error;
pub mod game;
pub mod index;
pub mod liftable;
pub mod preprocess;
pub mod solution;
pub mod spm;
pub mod zielonka;

#[cfg(test)]
mod test;

pub use error::SolveError;
pub use game::{Arena, Player, Vertex, VertexId};
pub use preprocess::Preprocessed;
pub use solution::Solution;
pub use spm::SmallProgressMeasures;
pub use zielonka::Zielonka;

pub type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
pub type Map<K, V> = rustc_hash::FxHashMap<K, V>;

/// Something that can tell who wins a parity game, and how.
pub trait Solver {
    fn solve(&self, arena: &Arena) -> Result<Solution, SolveError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, arena: &Arena) -> Result<Solution, SolveError> {
        (**self).solve(arena)
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&self, arena: &Arena) -> Result<Solution, SolveError> {
        (**self).solve(arena)
    }
}
