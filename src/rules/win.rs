//! Win detection on top of the chain scan

use tracing::{info, instrument};

use super::chain::{scan_chains, Chain, MAX_CHAIN_DEPTH};
use crate::board::Board;

/// Keeps the latest full chain list for the move advisor.
#[derive(Debug, Clone)]
pub struct ChainScanner {
    max_depth: u32,
    chains: Vec<Chain>,
}

impl Default for ChainScanner {
    fn default() -> Self {
        Self::new(MAX_CHAIN_DEPTH)
    }
}

impl ChainScanner {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            chains: Vec::new(),
        }
    }

    /// Chains from the last scan, longest first
    #[inline]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Rescan the board.
    ///
    /// When the longest chain reaches the win length its cells are flagged on
    /// the board and the chain is returned. Repeated calls on a won board keep
    /// returning it; deduplicating the game-over transition is up to the caller.
    #[instrument(skip_all)]
    pub fn evaluate(&mut self, board: &mut Board) -> Option<Chain> {
        self.chains = scan_chains(board, self.max_depth);
        let longest = self.chains.first().filter(|c| c.is_winning())?.clone();
        board.mark_winning(&longest.cells, longest.direction);
        info!(
            mark = %longest.mark,
            len = longest.len(),
            direction = ?longest.direction,
            "winning chain"
        );
        Some(longest)
    }

    pub fn clear(&mut self) {
        self.chains.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Direction, Mark};
    use crate::storage::{self, MemoryStore};

    fn empty_board() -> Board {
        Board::new(storage::shared(MemoryStore::new()))
    }

    fn place_line(board: &mut Board, start: Coord, dir: Direction, count: i32, mark: Mark) {
        let mut at = start;
        for _ in 0..count {
            board.place(at.x, at.y, mark).unwrap();
            at = at.step(dir);
        }
    }

    #[test]
    fn test_five_in_each_orientation_wins() {
        let cases = [
            (Coord::new(2, 2), Direction::Right),
            (Coord::new(2, 2), Direction::Down),
            (Coord::new(2, 2), Direction::DownRight),
            (Coord::new(8, 2), Direction::DownLeft),
        ];
        for (start, dir) in cases {
            let mut board = empty_board();
            place_line(&mut board, start, dir, 5, Mark::O);
            let mut scanner = ChainScanner::default();
            let win = scanner.evaluate(&mut board).expect("five should win");
            assert_eq!(win.len(), 5);
            assert_eq!(win.mark, Mark::O);
            assert_eq!(win.direction.axis(), dir.axis());
        }
    }

    #[test]
    fn test_four_does_not_win() {
        let mut board = empty_board();
        place_line(&mut board, Coord::new(0, 0), Direction::Right, 4, Mark::X);
        let mut scanner = ChainScanner::default();
        assert!(scanner.evaluate(&mut board).is_none());
        assert!(board.cells().all(|c| !c.is_winning()));
        assert!(!scanner.chains().is_empty());
    }

    #[test]
    fn test_horizontal_scenario_completes_on_fifth() {
        let mut board = empty_board();
        for x in 0..4 {
            board.place(x, 0, Mark::X).unwrap();
        }
        board.place(10, 10, Mark::O).unwrap();
        let mut scanner = ChainScanner::default();
        assert!(scanner.evaluate(&mut board).is_none());

        board.place(4, 0, Mark::X).unwrap();
        let win = scanner.evaluate(&mut board).unwrap();
        assert_eq!(win.direction.axis(), crate::board::Axis::Horizontal);
        for x in 0..5 {
            assert!(win.contains(Coord::new(x, 0)));
            let cell = board.get(x, 0).unwrap();
            assert_eq!(cell.win_direction, Some(win.direction));
        }
        assert!(!board.get(10, 10).unwrap().is_winning());
    }

    #[test]
    fn test_win_chain_is_well_formed() {
        let mut board = empty_board();
        place_line(&mut board, Coord::new(3, 9), Direction::UpRight, 6, Mark::X);
        let mut scanner = ChainScanner::default();
        let win = scanner.evaluate(&mut board).unwrap();
        assert_eq!(win.len(), 6);
        for pair in win.cells.windows(2) {
            assert_eq!(pair[0].step(win.direction), pair[1]);
        }
    }

    #[test]
    fn test_evaluate_keeps_all_chains() {
        let mut board = empty_board();
        place_line(&mut board, Coord::new(0, 0), Direction::Right, 5, Mark::X);
        board.place(0, 5, Mark::O).unwrap();
        board.place(0, 6, Mark::O).unwrap();
        let mut scanner = ChainScanner::default();
        scanner.evaluate(&mut board);
        assert!(scanner.chains().iter().any(|c| c.mark == Mark::O));
        assert!(scanner.chains().len() > 2);
    }
}
