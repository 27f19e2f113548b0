//! Game rules for five-in-a-row
//!
//! - Chain discovery along 8 directions
//! - Win detection (five or more in a row)

pub mod chain;
pub mod win;

// Re-exports for convenient access
pub use chain::{scan_chains, Chain, MAX_CHAIN_DEPTH, WIN_LENGTH};
pub use win::ChainScanner;
