//! Move generators for the automated opponent
//!
//! - [`HeuristicAdvisor`]: directional extension, own-chain advancement, random fallback
//! - [`NetworkAdvisor`]: randomly weighted placeholder network
//!
//! Both end in [`random_nearby`], which samples offsets of 0..=4 on each axis
//! from the last move and only gives up once the whole 5x5 window is full.

pub mod heuristic;
pub mod network;

use rand::Rng;
use tracing::debug;

use crate::board::{Board, Coord, Mark};
use crate::error::GameError;
use crate::rules::Chain;

pub use heuristic::HeuristicAdvisor;
pub use network::NetworkAdvisor;

/// Largest offset sampled by the random fallback, per axis
pub const RANDOM_SPAN: i32 = 4;

/// Samples drawn before sweeping the window in order
const RANDOM_ATTEMPTS: usize = 256;

/// Proposes the automated player's next cell.
pub trait MoveGenerator {
    /// Short label for logs and the UI
    fn name(&self) -> &'static str;

    /// Pick an empty cell in answer to `last`, playing as `own`.
    ///
    /// `chains` is the scanner's full list, longest first.
    fn suggest(
        &mut self,
        board: &Board,
        chains: &[Chain],
        last: Coord,
        own: Mark,
    ) -> Result<Coord, GameError>;
}

/// Random empty cell at offsets 0..=RANDOM_SPAN from `origin` on both axes.
pub fn random_nearby<R: Rng + ?Sized>(
    board: &Board,
    origin: Coord,
    rng: &mut R,
) -> Result<Coord, GameError> {
    for _ in 0..RANDOM_ATTEMPTS {
        let at = Coord::new(
            origin.x + rng.gen_range(0..=RANDOM_SPAN),
            origin.y + rng.gen_range(0..=RANDOM_SPAN),
        );
        if board.is_open(at) {
            debug!(%at, "random move");
            return Ok(at);
        }
    }

    (0..=RANDOM_SPAN)
        .flat_map(|dy| (0..=RANDOM_SPAN).map(move |dx| Coord::new(origin.x + dx, origin.y + dy)))
        .find(|&at| board.is_open(at))
        .ok_or(GameError::AdvisorExhausted {
            x: origin.x,
            y: origin.y,
        })
}
