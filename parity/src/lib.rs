mod conv;
mod parser;

#[cfg(test)]
mod test;

pub use conv::{load_arena, parity_game_to_arena};
pub use parser::{parse_parity_game, parse_parity_sol};
use solver::Player;

#[derive(Debug)]
pub struct Node {
    pub id: usize,
    pub priority: usize,
    pub player: Player,
    pub successors: Vec<usize>,
}

#[derive(Debug)]
pub struct ParityGame {
    pub nodes: Vec<Node>,
}

/// One row of a `.sol` file: who wins from `id` and, optionally, the move
/// the winner makes there.
#[derive(Debug)]
pub struct SolRow {
    pub id: usize,
    pub winner: Player,
    pub strategy: Option<usize>,
}
