//! Five-in-a-row with a chain scanner and a heuristic opponent
//!
//! Marks are placed on an unbounded sparse board. After every placement the
//! chain scanner collects every same-mark run along the 8 compass directions;
//! a run of 5 or more ends the game. An optional automated opponent answers
//! each human move.
//!
//! # Architecture
//!
//! - [`board`]: sparse board, directions and the persistence hook
//! - [`rules`]: chain discovery and win detection
//! - [`advisor`]: move generators for the automated opponent
//! - [`game`]: turn loop, blocked state and win notice
//! - [`storage`]: key-value persistence port
//! - [`config`]: TOML settings
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{storage, GameState, Settings, TurnOutcome};
//!
//! let store = storage::shared(storage::MemoryStore::new());
//! let mut game = GameState::new(&Settings::default(), store);
//!
//! if let Ok(TurnOutcome::Played { human, reply, .. }) = game.play(3, 3) {
//!     println!("X at {human}, reply {reply:?}");
//! }
//! ```
//!
//! # Opponent Priority
//!
//! 1. Extend or block the dominant line through the last move
//! 2. Advance the opponent's own longest open chain (last move surrounded)
//! 3. Random empty cell near the last move

pub mod advisor;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod storage;
pub mod ui;

// Re-export commonly used types for convenience
pub use advisor::{HeuristicAdvisor, MoveGenerator, NetworkAdvisor};
pub use board::{Board, Cell, Coord, Direction, Mark};
pub use config::Settings;
pub use error::{ConfigError, GameError};
pub use game::{GameState, TurnOutcome};
pub use rules::{Chain, ChainScanner};
