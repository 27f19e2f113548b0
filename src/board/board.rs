//! Sparse board backed by the persistence port

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Coord, Direction, Mark, BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::GameError;
use crate::storage::{SharedStore, ITEMS_KEY};

/// A placed mark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub mark: Mark,
    /// Set when the cell belongs to the winning chain; carries that chain's direction
    pub win_direction: Option<Direction>,
}

impl Cell {
    fn new(coord: Coord, mark: Mark) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
            mark,
            win_direction: None,
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    #[inline]
    pub fn is_winning(&self) -> bool {
        self.win_direction.is_some()
    }
}

/// One of the 8 entries returned by [`Board::neighbors`]
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub direction: Direction,
    pub coord: Coord,
    pub cell: Option<&'a Cell>,
}

impl Neighbor<'_> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell.is_none()
    }
}

/// Persisted form of a cell: `{"x":0,"y":0,"v":"X"}`
#[derive(Debug, Serialize, Deserialize)]
struct CellRecord {
    x: i32,
    y: i32,
    v: Mark,
}

/// Game board: one cell per coordinate, persisted after every placement
pub struct Board {
    cells: BTreeMap<Coord, Cell>,
    width: i32,
    height: i32,
    store: SharedStore,
}

impl Board {
    /// Board with the default rendering bounds, restored from `store`.
    pub fn new(store: SharedStore) -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT, store)
    }

    /// Board restored from `store`.
    ///
    /// A snapshot that cannot be decoded is logged, removed from the store and
    /// replaced by an empty board.
    pub fn with_size(width: i32, height: i32, store: SharedStore) -> Self {
        let mut board = Self {
            cells: BTreeMap::new(),
            width,
            height,
            store,
        };
        if let Err(e) = board.restore() {
            warn!(error = %e, "discarding persisted board");
            board.store.borrow_mut().remove(ITEMS_KEY);
        }
        board
    }

    fn restore(&mut self) -> Result<(), GameError> {
        let Some(snapshot) = self.store.borrow().get(ITEMS_KEY) else {
            return Ok(());
        };
        let records: BTreeMap<String, CellRecord> = serde_json::from_str(&snapshot)?;
        for record in records.into_values() {
            let coord = Coord::new(record.x, record.y);
            if !coord.in_bounds() {
                return Err(GameError::OutOfBounds {
                    x: record.x,
                    y: record.y,
                });
            }
            self.cells.insert(coord, Cell::new(coord, record.v));
        }
        debug!(cells = self.cells.len(), "restored board");
        Ok(())
    }

    fn persist(&self) -> Result<(), GameError> {
        let records: BTreeMap<String, CellRecord> = self
            .cells
            .values()
            .map(|c| {
                let record = CellRecord {
                    x: c.x,
                    y: c.y,
                    v: c.mark,
                };
                (c.coord().key(), record)
            })
            .collect();
        let json = serde_json::to_string(&records)?;
        self.store.borrow_mut().set(ITEMS_KEY, json);
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get the cell at (x, y)
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cells.get(&Coord::new(x, y))
    }

    #[inline]
    pub fn get_at(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    #[inline]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        !self.cells.contains_key(&coord)
    }

    /// Empty and within the placement bounds
    #[inline]
    pub fn is_open(&self, coord: Coord) -> bool {
        coord.in_bounds() && self.is_empty_at(coord)
    }

    /// Place a mark and persist the board.
    ///
    /// Fails without touching the board when the cell is taken
    /// ([`GameError::Occupied`]) or lies beyond [`COORD_LIMIT`](super::COORD_LIMIT)
    /// ([`GameError::OutOfBounds`]).
    pub fn place(&mut self, x: i32, y: i32, mark: Mark) -> Result<&Cell, GameError> {
        let coord = Coord::new(x, y);
        if !coord.in_bounds() {
            return Err(GameError::OutOfBounds { x, y });
        }
        if self.cells.contains_key(&coord) {
            return Err(GameError::Occupied { x, y });
        }
        self.cells.insert(coord, Cell::new(coord, mark));
        self.persist()?;
        debug!(%coord, %mark, "placed");
        Ok(&self.cells[&coord])
    }

    /// All 8 neighbours of `coord` in [`Direction::ALL`] order.
    pub fn neighbors(&self, coord: Coord) -> [Neighbor<'_>; 8] {
        Direction::ALL.map(|direction| {
            let at = coord.step(direction);
            Neighbor {
                direction,
                coord: at,
                cell: self.cells.get(&at),
            }
        })
    }

    /// Neighbours that hold a cell, in direction order.
    pub fn occupied_neighbors(&self, coord: Coord) -> Vec<Neighbor<'_>> {
        self.neighbors(coord)
            .into_iter()
            .filter(|n| n.cell.is_some())
            .collect()
    }

    /// Flag every listed cell as winning along `direction`.
    pub fn mark_winning(&mut self, coords: &[Coord], direction: Direction) {
        for coord in coords {
            if let Some(cell) = self.cells.get_mut(coord) {
                cell.win_direction = Some(direction);
            }
        }
    }

    /// Remove every cell and the persisted snapshot.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.store.borrow_mut().remove(ITEMS_KEY);
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Number of placed marks
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
