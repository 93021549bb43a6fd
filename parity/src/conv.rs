use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use solver::{Arena, Vertex, VertexId};

use crate::{parse_parity_game, ParityGame};

/// Builds the arena of a parsed game. File ids can be sparse, so vertices
/// are numbered in file order and the returned map translates ids.
pub fn parity_game_to_arena(pg: &ParityGame) -> Result<(Arena, HashMap<usize, VertexId>)> {
    let mut ids = HashMap::with_capacity(pg.nodes.len());
    for (i, node) in pg.nodes.iter().enumerate() {
        if ids.insert(node.id, VertexId(i)).is_some() {
            bail!("Node {} is declared twice", node.id);
        }
    }

    let vertices = pg
        .nodes
        .iter()
        .map(|node| {
            let successors = node
                .successors
                .iter()
                .map(|s| ids.get(s).copied().with_context(|| format!("Node {} has unknown successor {s}", node.id)))
                .collect::<Result<Vec<_>>>()?;

            Ok(Vertex { player: node.player, priority: node.priority, successors })
        })
        .collect::<Result<Vec<_>>>()?;

    let arena = Arena::new(vertices).context("Invalid arena")?;

    Ok((arena, ids))
}

pub fn load_arena(path: &str) -> Result<(Arena, HashMap<usize, VertexId>)> {
    let source = std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let game = parse_parity_game(&source).map_err(|errs| anyhow!("Failed to parse {path}: {errs:?}"))?;

    parity_game_to_arena(&game).with_context(|| format!("Failed to convert {path}"))
}
