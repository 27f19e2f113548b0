//! Network-shaped placeholder opponent
//!
//! A 25-16-25 dense network over the 5x5 window centred on the last move.
//! Weights are drawn once at construction and never trained, so the output is
//! effectively a fixed random preference over window cells.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, instrument};

use super::{random_nearby, MoveGenerator};
use crate::board::{Board, Coord, Mark};
use crate::error::GameError;
use crate::rules::Chain;

const RADIUS: i32 = 2;
const SIDE: usize = (2 * RADIUS + 1) as usize;
const INPUTS: usize = SIDE * SIDE;
const HIDDEN: usize = 16;

pub struct NetworkAdvisor {
    hidden_weights: [[f32; INPUTS]; HIDDEN],
    hidden_bias: [f32; HIDDEN],
    output_weights: [[f32; HIDDEN]; INPUTS],
    output_bias: [f32; INPUTS],
    rng: StdRng,
}

impl NetworkAdvisor {
    pub fn new(mut rng: StdRng) -> Self {
        let hidden_weights: [[f32; INPUTS]; HIDDEN] =
            std::array::from_fn(|_| std::array::from_fn(|_| rng.gen_range(-1.0..1.0)));
        let hidden_bias: [f32; HIDDEN] = std::array::from_fn(|_| rng.gen_range(-0.5..0.5));
        let output_weights: [[f32; HIDDEN]; INPUTS] =
            std::array::from_fn(|_| std::array::from_fn(|_| rng.gen_range(-1.0..1.0)));
        let output_bias: [f32; INPUTS] = std::array::from_fn(|_| rng.gen_range(-0.5..0.5));
        Self {
            hidden_weights,
            hidden_bias,
            output_weights,
            output_bias,
            rng,
        }
    }

    /// Window cell `i` in row-major order
    #[inline]
    fn window_coord(center: Coord, i: usize) -> Coord {
        let dx = (i % SIDE) as i32 - RADIUS;
        let dy = (i / SIDE) as i32 - RADIUS;
        Coord::new(center.x + dx, center.y + dy)
    }

    /// own = 1, opponent = -1, empty = 0
    fn encode(board: &Board, center: Coord, own: Mark) -> [f32; INPUTS] {
        std::array::from_fn(|i| match board.get_at(Self::window_coord(center, i)) {
            Some(cell) if cell.mark == own => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        })
    }

    fn forward(&self, input: &[f32; INPUTS]) -> [f32; INPUTS] {
        let hidden: [f32; HIDDEN] = std::array::from_fn(|h| {
            let sum: f32 = self.hidden_weights[h]
                .iter()
                .zip(input)
                .map(|(w, x)| w * x)
                .sum();
            (sum + self.hidden_bias[h]).tanh()
        });
        std::array::from_fn(|o| {
            let sum: f32 = self.output_weights[o]
                .iter()
                .zip(&hidden)
                .map(|(w, x)| w * x)
                .sum();
            sum + self.output_bias[o]
        })
    }
}

impl MoveGenerator for NetworkAdvisor {
    fn name(&self) -> &'static str {
        "network"
    }

    #[instrument(skip(self, board, _chains))]
    fn suggest(
        &mut self,
        board: &Board,
        _chains: &[Chain],
        last: Coord,
        own: Mark,
    ) -> Result<Coord, GameError> {
        let input = Self::encode(board, last, own);
        let scores = self.forward(&input);

        let best = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| (Self::window_coord(last, i), score))
            .filter(|&(at, _)| board.is_open(at))
            .fold(None, |best: Option<(Coord, f32)>, (at, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((at, score)),
            });

        match best {
            Some((at, score)) => {
                debug!(%at, score, "network move");
                Ok(at)
            }
            None => random_nearby(board, last, &mut self.rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{self, MemoryStore};
    use rand::SeedableRng;

    fn board_with(marks: &[(i32, i32, Mark)]) -> Board {
        let mut board = Board::new(storage::shared(MemoryStore::new()));
        for &(x, y, mark) in marks {
            board.place(x, y, mark).unwrap();
        }
        board
    }

    #[test]
    fn test_window_coord_covers_square() {
        let center = Coord::new(10, 10);
        assert_eq!(NetworkAdvisor::window_coord(center, 0), Coord::new(8, 8));
        assert_eq!(NetworkAdvisor::window_coord(center, INPUTS / 2), center);
        assert_eq!(NetworkAdvisor::window_coord(center, INPUTS - 1), Coord::new(12, 12));
    }

    #[test]
    fn test_encode_signs() {
        let board = board_with(&[(0, 0, Mark::O), (1, 0, Mark::X)]);
        let input = NetworkAdvisor::encode(&board, Coord::new(0, 0), Mark::O);
        assert_eq!(input[INPUTS / 2], 1.0);
        assert_eq!(input[INPUTS / 2 + 1], -1.0);
        assert_eq!(input.iter().filter(|&&v| v == 0.0).count(), INPUTS - 2);
    }

    #[test]
    fn test_suggests_empty_cell_in_window() {
        let board = board_with(&[(3, 3, Mark::X), (4, 3, Mark::O), (3, 4, Mark::O)]);
        for seed in 0..10 {
            let mut advisor = NetworkAdvisor::new(StdRng::seed_from_u64(seed));
            let at = advisor.suggest(&board, &[], Coord::new(3, 3), Mark::O).unwrap();
            assert!(board.is_empty_at(at));
            assert!((at.x - 3).abs() <= RADIUS && (at.y - 3).abs() <= RADIUS);
        }
    }

    #[test]
    fn test_same_seed_same_move() {
        let board = board_with(&[(0, 0, Mark::X)]);
        let mut a = NetworkAdvisor::new(StdRng::seed_from_u64(42));
        let mut b = NetworkAdvisor::new(StdRng::seed_from_u64(42));
        let last = Coord::new(0, 0);
        assert_eq!(
            a.suggest(&board, &[], last, Mark::O).unwrap(),
            b.suggest(&board, &[], last, Mark::O).unwrap()
        );
    }

    #[test]
    fn test_full_window_falls_back_to_random() {
        let mut marks = Vec::new();
        for y in -RADIUS..=RADIUS {
            for x in -RADIUS..=RADIUS {
                marks.push((x, y, Mark::X));
            }
        }
        let board = board_with(&marks);
        let mut advisor = NetworkAdvisor::new(StdRng::seed_from_u64(9));
        let at = advisor.suggest(&board, &[], Coord::new(0, 0), Mark::O).unwrap();
        assert!(board.is_empty_at(at));
        assert!((0..=4).contains(&at.x) && (0..=4).contains(&at.y));
    }
}
