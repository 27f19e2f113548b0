//! Turn loop tying the board, the chain scanner and the move generators
//!
//! One call to [`GameState::play`] runs a full turn:
//!
//! 1. the human mark is placed and the chains are rescanned
//! 2. if that did not end the game and the opponent is automated, the selected
//!    generator proposes a cell, which is placed and rescanned in turn
//!
//! Once a winning chain appears the game is blocked: further `play` calls are
//! no-ops until [`GameState::reset`]. The win is announced through a one-shot
//! notice that becomes available [`WIN_NOTICE_DELAY`] after detection.
//!
//! # Example
//!
//! ```
//! use gomoku::{storage, GameState, Mark, Settings};
//!
//! let store = storage::shared(storage::MemoryStore::new());
//! let mut game = GameState::new(&Settings::default(), store);
//! for x in 0..4 {
//!     game.play(x, 0).unwrap();
//!     game.play(x, 1).unwrap();
//! }
//! game.play(4, 0).unwrap();
//! assert_eq!(game.winner(), Some(Mark::X));
//! ```

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, instrument};

use crate::advisor::{HeuristicAdvisor, MoveGenerator, NetworkAdvisor};
use crate::board::{Board, Coord, Mark};
use crate::config::Settings;
use crate::error::GameError;
use crate::rules::{Chain, ChainScanner};
use crate::storage::{self, SharedStore, AUTOMATED_KEY, NETWORK_KEY};

/// Delay between win detection and the win notice
pub const WIN_NOTICE_DELAY: Duration = Duration::from_millis(0xff);

/// Result of [`GameState::play`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game is over; nothing was placed
    Ignored,
    Played {
        human: Coord,
        /// Counter-move of the automated opponent, if one was made
        reply: Option<Coord>,
        winner: Option<Mark>,
    },
}

#[derive(Debug, Clone, Copy)]
struct PendingNotice {
    winner: Mark,
    raised_at: Instant,
}

/// Main game state
pub struct GameState {
    board: Board,
    scanner: ChainScanner,
    store: SharedStore,
    current_turn: Mark,
    blocked: bool,
    winner: Option<Mark>,
    last_move: Option<Coord>,
    automated: bool,
    use_network: bool,
    heuristic: HeuristicAdvisor,
    network: NetworkAdvisor,
    notice: Option<PendingNotice>,
}

impl GameState {
    /// Restore the board and opponent flags from `store`, then scan once so a
    /// persisted winning position comes back blocked.
    pub fn new(settings: &Settings, store: SharedStore) -> Self {
        let board = Board::with_size(settings.board.width, settings.board.height, store.clone());
        let (automated, use_network) = {
            let store = store.borrow();
            (
                storage::read_flag(&*store, AUTOMATED_KEY),
                storage::read_flag(&*store, NETWORK_KEY),
            )
        };

        let max_depth = settings.advisor.max_depth;
        let (heuristic_rng, network_rng) = match settings.advisor.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let mut state = Self {
            current_turn: next_to_move(&board),
            board,
            scanner: ChainScanner::new(max_depth),
            store,
            blocked: false,
            winner: None,
            last_move: None,
            automated,
            use_network,
            heuristic: HeuristicAdvisor::with_depth(heuristic_rng, max_depth),
            network: NetworkAdvisor::new(network_rng),
            notice: None,
        };
        state.rescan();
        info!(
            cells = state.board.len(),
            automated, use_network, "game ready"
        );
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Chains from the last scan, longest first
    pub fn chains(&self) -> &[Chain] {
        self.scanner.chains()
    }

    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    pub fn is_automated(&self) -> bool {
        self.automated
    }

    pub fn uses_network(&self) -> bool {
        self.use_network
    }

    /// Name of the generator answering human moves
    pub fn generator_name(&self) -> &'static str {
        if self.use_network {
            self.network.name()
        } else {
            self.heuristic.name()
        }
    }

    /// Play one full turn at (x, y).
    ///
    /// Occupied cells are rejected before anything changes. A generator
    /// failure is returned as is after the human move has been kept.
    #[instrument(skip(self))]
    pub fn play(&mut self, x: i32, y: i32) -> Result<TurnOutcome, GameError> {
        if self.blocked {
            return Ok(TurnOutcome::Ignored);
        }

        let human = self.place_current(x, y)?;
        let mut reply = None;

        if self.automated && !self.blocked {
            let own = self.current_turn;
            let generator: &mut dyn MoveGenerator = if self.use_network {
                &mut self.network
            } else {
                &mut self.heuristic
            };
            let at = generator
                .suggest(&self.board, self.scanner.chains(), human, own)
                .inspect_err(|e| error!(error = %e, "automated opponent produced no move"))?;
            self.place_current(at.x, at.y)?;
            reply = Some(at);
        }

        Ok(TurnOutcome::Played {
            human,
            reply,
            winner: self.winner,
        })
    }

    fn place_current(&mut self, x: i32, y: i32) -> Result<Coord, GameError> {
        let coord = self.board.place(x, y, self.current_turn)?.coord();
        self.current_turn = self.current_turn.other();
        self.last_move = Some(coord);
        self.rescan();
        Ok(coord)
    }

    /// Recompute chains and enter the blocked state on the first win.
    ///
    /// Safe to call repeatedly; the win notice is raised only once.
    pub fn rescan(&mut self) -> Option<Mark> {
        let win = self.scanner.evaluate(&mut self.board)?;
        if !self.blocked {
            self.blocked = true;
            self.winner = Some(win.mark);
            self.notice = Some(PendingNotice {
                winner: win.mark,
                raised_at: Instant::now(),
            });
            info!(winner = %win.mark, "game over");
        }
        Some(win.mark)
    }

    /// Winner to announce, once, after [`WIN_NOTICE_DELAY`] has passed.
    pub fn poll_win_notice(&mut self, now: Instant) -> Option<Mark> {
        let pending = self.notice?;
        if now.saturating_duration_since(pending.raised_at) < WIN_NOTICE_DELAY {
            return None;
        }
        self.notice = None;
        Some(pending.winner)
    }

    /// Whether a win notice is still waiting to be delivered
    pub fn has_pending_notice(&self) -> bool {
        self.notice.is_some()
    }

    /// Clear the board and start over with `X`.
    pub fn reset(&mut self) {
        self.board.clear();
        self.scanner.clear();
        self.current_turn = Mark::X;
        self.blocked = false;
        self.winner = None;
        self.last_move = None;
        self.notice = None;
        info!("game reset");
    }

    /// Flip the automated opponent, persist the flag and start a new game.
    pub fn toggle_automated(&mut self) {
        self.automated = !self.automated;
        storage::write_flag(&mut *self.store.borrow_mut(), AUTOMATED_KEY, self.automated);
        self.reset();
    }

    /// Switch between the heuristic and the network generator and persist the flag.
    pub fn toggle_network(&mut self) {
        self.use_network = !self.use_network;
        storage::write_flag(&mut *self.store.borrow_mut(), NETWORK_KEY, self.use_network);
        info!(generator = self.generator_name(), "generator switched");
    }
}

/// `X` moves first; a restored board resumes with whichever mark is behind.
fn next_to_move(board: &Board) -> Mark {
    let x_count = board.cells().filter(|c| c.mark == Mark::X).count();
    if x_count > board.len() - x_count {
        Mark::O
    } else {
        Mark::X
    }
}
