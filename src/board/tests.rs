use std::collections::HashSet;

use super::*;
use crate::error::GameError;
use crate::storage::{self, KeyValueStore, MemoryStore, SharedStore, ITEMS_KEY};

fn empty_board() -> (Board, SharedStore) {
    let store = storage::shared(MemoryStore::new());
    (Board::new(store.clone()), store)
}

#[test]
fn test_mark_other() {
    assert_eq!(Mark::X.other(), Mark::O);
    assert_eq!(Mark::O.other(), Mark::X);
}

#[test]
fn test_opposite_is_involutive() {
    for dir in Direction::ALL {
        assert_ne!(dir.opposite(), dir);
        assert_eq!(dir.opposite().opposite(), dir);
        let (dx, dy) = dir.offset();
        assert_eq!(dir.opposite().offset(), (-dx, -dy));
        assert_eq!(dir.opposite().axis(), dir.axis());
    }
}

#[test]
fn test_direction_order_matches_index() {
    for (i, dir) in Direction::ALL.iter().enumerate() {
        assert_eq!(dir.index(), i);
    }
    assert_eq!(Direction::ALL[0].opposite(), Direction::ALL[7]);
    assert_eq!(Direction::ALL[1].opposite(), Direction::ALL[6]);
    assert_eq!(Direction::ALL[2].opposite(), Direction::ALL[5]);
    assert_eq!(Direction::ALL[3].opposite(), Direction::ALL[4]);
}

#[test]
fn test_coord_ordering_is_row_major() {
    assert!(Coord::new(5, 0) < Coord::new(0, 1));
    assert!(Coord::new(0, 0) < Coord::new(1, 0));
    assert!(Coord::new(-3, -3) < Coord::new(0, 0));
}

#[test]
fn test_coord_key() {
    assert_eq!(Coord::new(4, 0).key(), "4-0");
    assert_eq!(Coord::new(-1, 12).key(), "-1-12");
}

#[test]
fn test_neighbors_are_eight_distinct_directions() {
    let (mut board, _) = empty_board();
    board.place(3, 3, Mark::X).unwrap();
    board.place(4, 4, Mark::O).unwrap();

    let ns = board.neighbors(Coord::new(3, 3));
    assert_eq!(ns.len(), 8);
    let dirs: HashSet<_> = ns.iter().map(|n| n.direction).collect();
    assert_eq!(dirs.len(), 8);
    for (n, dir) in ns.iter().zip(Direction::ALL) {
        assert_eq!(n.direction, dir);
        assert_eq!(n.coord, Coord::new(3, 3).step(dir));
    }
}

#[test]
fn test_occupied_neighbors_filters_empty() {
    let (mut board, _) = empty_board();
    board.place(3, 3, Mark::X).unwrap();
    board.place(4, 4, Mark::O).unwrap();
    board.place(2, 3, Mark::X).unwrap();

    let occupied = board.occupied_neighbors(Coord::new(3, 3));
    let dirs: Vec<_> = occupied.iter().map(|n| n.direction).collect();
    assert_eq!(dirs, vec![Direction::Left, Direction::DownRight]);
    assert!(occupied.iter().all(|n| !n.is_empty()));
}

#[test]
fn test_place_occupied_is_rejected() {
    let (mut board, store) = empty_board();
    board.place(1, 1, Mark::X).unwrap();
    let snapshot = store.borrow().get(ITEMS_KEY);

    let err = board.place(1, 1, Mark::O).unwrap_err();
    assert!(matches!(err, GameError::Occupied { x: 1, y: 1 }));
    assert_eq!(board.len(), 1);
    assert_eq!(board.get(1, 1).unwrap().mark, Mark::X);
    assert_eq!(store.borrow().get(ITEMS_KEY), snapshot);
}

#[test]
fn test_place_outside_render_area() {
    let (mut board, _) = empty_board();
    board.place(-2, 40, Mark::O).unwrap();
    assert_eq!(board.get(-2, 40).unwrap().mark, Mark::O);
}

#[test]
fn test_place_persists_snapshot() {
    let (mut board, store) = empty_board();
    board.place(0, 0, Mark::X).unwrap();
    board.place(2, 1, Mark::O).unwrap();

    let json = store.borrow().get(ITEMS_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["0-0"]["x"], 0);
    assert_eq!(value["0-0"]["v"], "X");
    assert_eq!(value["2-1"]["y"], 1);
    assert_eq!(value["2-1"]["v"], "O");
}

#[test]
fn test_board_restores_from_store() {
    let (mut board, store) = empty_board();
    board.place(0, 0, Mark::X).unwrap();
    board.place(7, 3, Mark::O).unwrap();

    let restored = Board::new(store);
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.get(7, 3).unwrap().mark, Mark::O);
    assert!(!restored.get(0, 0).unwrap().is_winning());
}

#[test]
fn test_place_out_of_bounds_is_rejected() {
    let (mut board, store) = empty_board();
    for (x, y) in [(i32::MAX, 0), (0, i32::MIN), (COORD_LIMIT + 1, 0), (0, -COORD_LIMIT - 1)] {
        let err = board.place(x, y, Mark::X).unwrap_err();
        assert!(matches!(err, GameError::OutOfBounds { .. }), "({x}, {y}) accepted");
    }
    assert!(board.is_empty());
    assert!(store.borrow().get(ITEMS_KEY).is_none());
}

#[test]
fn test_place_at_limit_has_neighbors() {
    let (mut board, _) = empty_board();
    board.place(COORD_LIMIT, -COORD_LIMIT, Mark::O).unwrap();
    let neighbors = board.neighbors(Coord::new(COORD_LIMIT, -COORD_LIMIT));
    assert!(neighbors.iter().all(|n| n.is_empty()));
    assert!(!Coord::new(COORD_LIMIT, -COORD_LIMIT).step(Direction::Right).in_bounds());
}

#[test]
fn test_out_of_bounds_snapshot_is_discarded() {
    let mut raw = MemoryStore::new();
    raw.set(
        ITEMS_KEY,
        format!("{{\"{0}-0\": {{\"x\": {0}, \"y\": 0, \"v\": \"X\"}}}}", i32::MAX),
    );
    let store = storage::shared(raw);

    let board = Board::new(store.clone());
    assert!(board.is_empty());
    assert!(store.borrow().get(ITEMS_KEY).is_none());
}

#[test]
fn test_corrupt_snapshot_is_discarded() {
    let mut raw = MemoryStore::new();
    raw.set(ITEMS_KEY, "{\"0-0\": 12}".to_string());
    let store = storage::shared(raw);

    let board = Board::new(store.clone());
    assert!(board.is_empty());
    assert!(store.borrow().get(ITEMS_KEY).is_none());
}

#[test]
fn test_clear_removes_cells_and_snapshot() {
    let (mut board, store) = empty_board();
    board.place(0, 0, Mark::X).unwrap();
    board.clear();
    assert!(board.is_empty());
    assert!(store.borrow().get(ITEMS_KEY).is_none());
}

#[test]
fn test_mark_winning_sets_direction() {
    let (mut board, _) = empty_board();
    board.place(0, 0, Mark::X).unwrap();
    board.place(1, 0, Mark::X).unwrap();
    board.mark_winning(&[Coord::new(0, 0), Coord::new(1, 0)], Direction::Right);
    assert_eq!(board.get(1, 0).unwrap().win_direction, Some(Direction::Right));
    assert!(board.get(0, 0).unwrap().is_winning());
}

#[test]
fn test_cells_iterate_row_major() {
    let (mut board, _) = empty_board();
    board.place(3, 1, Mark::X).unwrap();
    board.place(0, 2, Mark::O).unwrap();
    board.place(5, 0, Mark::X).unwrap();
    let order: Vec<_> = board.cells().map(|c| c.coord()).collect();
    assert_eq!(order, vec![Coord::new(5, 0), Coord::new(3, 1), Coord::new(0, 2)]);
}
