//! Chain discovery along the 8 compass directions
//!
//! Every cell with a same-mark neighbour starts a fresh chain in that
//! neighbour's direction, which is then walked until the mark changes or the
//! depth cap is hit. A physical run of N marks is therefore found once per
//! interior starting cell and once per direction; the scanner keeps all of
//! them and only ever picks the longest.

use tracing::instrument;

use crate::board::{Board, Coord, Direction, Mark};

/// Length that wins the game
pub const WIN_LENGTH: usize = 5;

/// Extension steps followed past the first pair of a chain
pub const MAX_CHAIN_DEPTH: u32 = 10;

/// Same-mark cells connected along one direction, in walking order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub direction: Direction,
    pub mark: Mark,
    pub cells: Vec<Coord>,
}

impl Chain {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    #[inline]
    pub fn first(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    #[inline]
    pub fn is_winning(&self) -> bool {
        self.len() >= WIN_LENGTH
    }

    /// Cells one step before the first and one step after the last cell
    pub fn extension_cells(&self) -> Option<[Coord; 2]> {
        let first = self.first()?;
        let last = self.last()?;
        Some([
            first.step(self.direction.opposite()),
            last.step(self.direction),
        ])
    }
}

/// Collect every chain on the board, longest first.
///
/// Cells are visited in row-major order and directions in enumeration order;
/// the sort is stable, so equally long chains keep that discovery order.
#[instrument(skip_all, fields(cells = board.len()))]
pub fn scan_chains(board: &Board, max_depth: u32) -> Vec<Chain> {
    let mut chains = Vec::new();

    for cell in board.cells() {
        for n in board.occupied_neighbors(cell.coord()) {
            let Some(next) = n.cell else { continue };
            if next.mark != cell.mark {
                continue;
            }
            let mut chain = Chain {
                direction: n.direction,
                mark: cell.mark,
                cells: vec![cell.coord(), next.coord()],
            };
            if max_depth > 0 {
                extend_chain(board, &mut chain, max_depth - 1);
            }
            chains.push(chain);
        }
    }

    chains.sort_by(|a, b| b.len().cmp(&a.len()));
    chains
}

/// Append the next same-mark cell along the chain direction, then recurse
/// while `remaining` allows.
fn extend_chain(board: &Board, chain: &mut Chain, remaining: u32) {
    let Some(end) = chain.last() else { return };
    let at = end.step(chain.direction);
    match board.get_at(at) {
        Some(cell) if cell.mark == chain.mark => {
            chain.cells.push(at);
            if remaining > 0 {
                extend_chain(board, chain, remaining - 1);
            }
        }
        _ => {}
    }
}
