//! Heuristic opponent
//!
//! Priority order:
//! 1. **Directional extension**: an empty neighbour of the last move lying on
//!    the dominant chain's axis, once the last move sits in 3+ chains
//! 2. **Own-chain advancement** (last move fully surrounded): an open end of
//!    the automated player's longest chain, else the first transitive
//!    directional candidate found through occupied neighbours
//! 3. **Random fallback** near the last move

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::{random_nearby, MoveGenerator};
use crate::board::{Board, Coord, Mark};
use crate::error::GameError;
use crate::rules::{Chain, MAX_CHAIN_DEPTH};

/// Chains through the last move needed before directional extension kicks in
pub const MIN_CHAINS_FOR_EXTENSION: usize = 3;

pub struct HeuristicAdvisor {
    rng: StdRng,
    max_depth: u32,
}

impl HeuristicAdvisor {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            max_depth: MAX_CHAIN_DEPTH,
        }
    }

    pub fn with_depth(rng: StdRng, max_depth: u32) -> Self {
        Self { rng, max_depth }
    }

    /// Open end of the longest chain owned by `own`, picked at random when
    /// both ends are free.
    fn advance_own_chain(&mut self, board: &Board, chains: &[Chain], own: Mark) -> Option<Coord> {
        for chain in chains.iter().filter(|c| c.mark == own) {
            let Some(ends) = chain.extension_cells() else {
                continue;
            };
            let open: Vec<Coord> = ends.into_iter().filter(|&c| board.is_open(c)).collect();
            if let Some(&pick) = open.choose(&mut self.rng) {
                debug!(%pick, len = chain.len(), "advancing own chain");
                return Some(pick);
            }
        }
        None
    }
}

/// Directional extension from `origin`.
///
/// With free neighbours, returns the first one on the dominant chain's axis
/// (only when `through_last` holds enough chains). With none free, recurses
/// into the occupied neighbours while `depth` allows.
fn extend_along_dominant(
    board: &Board,
    through_last: &[&Chain],
    origin: Coord,
    depth: u32,
    visited: &mut HashSet<Coord>,
) -> Option<Coord> {
    if !visited.insert(origin) {
        return None;
    }
    let neighbors = board.neighbors(origin);

    if neighbors.iter().any(|n| n.is_empty()) {
        if through_last.len() < MIN_CHAINS_FOR_EXTENSION {
            return None;
        }
        let dir = through_last[0].direction;
        return neighbors
            .iter()
            .filter(|n| n.is_empty() && n.coord.in_bounds())
            .find(|n| n.direction == dir || n.direction == dir.opposite())
            .map(|n| n.coord);
    }

    if depth == 0 {
        return None;
    }
    neighbors
        .iter()
        .find_map(|n| extend_along_dominant(board, through_last, n.coord, depth - 1, visited))
}

impl MoveGenerator for HeuristicAdvisor {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    #[instrument(skip(self, board, chains), fields(chain_count = chains.len()))]
    fn suggest(
        &mut self,
        board: &Board,
        chains: &[Chain],
        last: Coord,
        own: Mark,
    ) -> Result<Coord, GameError> {
        let through_last: Vec<&Chain> = chains.iter().filter(|c| c.contains(last)).collect();
        let mut visited = HashSet::new();
        let surrounded = board.neighbors(last).iter().all(|n| !n.is_empty());

        let candidate = if surrounded {
            let transitive =
                extend_along_dominant(board, &through_last, last, self.max_depth, &mut visited);
            self.advance_own_chain(board, chains, own).or(transitive)
        } else {
            extend_along_dominant(board, &through_last, last, self.max_depth, &mut visited)
        };

        match candidate {
            Some(at) => {
                debug!(%at, "next move");
                Ok(at)
            }
            None => random_nearby(board, last, &mut self.rng),
        }
    }
}
