//! Board representation for five-in-a-row

pub mod board;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

// Re-exports
pub use board::{Board, Cell, Neighbor};

/// Default logical board width (rendering bounds only)
pub const BOARD_WIDTH: i32 = 20;
/// Default logical board height (rendering bounds only)
pub const BOARD_HEIGHT: i32 = 15;

/// Player symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get opponent mark
    #[inline]
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Largest coordinate magnitude a mark may be placed at. Neighbour steps and
/// the advisor windows stay well inside `i32` from here.
pub const COORD_LIMIT: i32 = 1 << 24;

/// Cell coordinates. The board is unbounded, so both axes may go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both axes lie within [`COORD_LIMIT`]
    #[inline]
    pub fn in_bounds(self) -> bool {
        let range = -COORD_LIMIT..=COORD_LIMIT;
        range.contains(&self.x) && range.contains(&self.y)
    }

    /// One step along `dir`
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Storage key in the `"x-y"` form
    pub fn key(self) -> String {
        format!("{}-{}", self.x, self.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Row-major: y first, then x.
impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

/// The 8 compass offsets, in the fixed order used by neighbour lookups,
/// opposite-direction pairing and the win-line overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    UpLeft,
    Left,
    DownLeft,
    Up,
    Down,
    UpRight,
    Right,
    DownRight,
}

/// Line orientation shared by a direction and its opposite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Up,
        Direction::Down,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
    ];

    /// (dx, dy) with y growing downwards
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::DownLeft => (-1, 1),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::UpRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::UpLeft => Direction::DownRight,
            Direction::Left => Direction::Right,
            Direction::DownLeft => Direction::UpRight,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::UpRight => Direction::DownLeft,
            Direction::Right => Direction::Left,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    /// Position in [`Direction::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::UpLeft | Direction::DownRight => Axis::Diagonal,
            Direction::DownLeft | Direction::UpRight => Axis::AntiDiagonal,
        }
    }
}
