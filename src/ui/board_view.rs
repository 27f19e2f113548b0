//! Board rendering for the Gomoku GUI

use egui::{Align2, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Axis, Board, Cell, Coord, Mark};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Pixel size of one cell; clicks map to cells by integer division
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl BoardView {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            board_rect: Rect::NOTHING,
        }
    }

    /// Render the board and return the clicked cell if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        current_turn: Mark,
        last_move: Option<Coord>,
        game_over: bool,
    ) -> Option<Coord> {
        let size = Vec2::new(
            board.width() as f32 * self.cell_size,
            board.height() as f32 * self.cell_size,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(2), BOARD_BG);
        self.draw_grid(&painter, board);

        for cell in board.cells() {
            self.draw_mark(&painter, cell);
            if cell.is_winning() {
                self.draw_win_stroke(&painter, cell);
            }
        }

        if let Some(coord) = last_move {
            self.draw_last_move_marker(&painter, coord);
        }

        if game_over {
            return None;
        }

        let mut clicked = None;
        if let Some(pointer) = response.hover_pos() {
            let coord = self.screen_to_board(pointer);
            let is_valid = board.is_empty_at(coord);
            self.draw_hover_preview(&painter, coord, current_turn, is_valid);

            if response.clicked() && is_valid {
                clicked = Some(coord);
            }
        }
        clicked
    }

    fn draw_grid(&self, painter: &Painter, board: &Board) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let min = self.board_rect.min;
        let w = board.width() as f32 * self.cell_size;
        let h = board.height() as f32 * self.cell_size;

        for col in 0..=board.width() {
            let x = col as f32 * self.cell_size;
            painter.line_segment([min + Vec2::new(x, 0.0), min + Vec2::new(x, h)], stroke);
        }
        for row in 0..=board.height() {
            let y = row as f32 * self.cell_size;
            painter.line_segment([min + Vec2::new(0.0, y), min + Vec2::new(w, y)], stroke);
        }
    }

    fn draw_mark(&self, painter: &Painter, cell: &Cell) {
        let color = match cell.mark {
            Mark::X => MARK_X,
            Mark::O => MARK_O,
        };
        painter.text(
            self.cell_center(cell.coord()),
            Align2::CENTER_CENTER,
            cell.mark.to_string(),
            FontId::monospace(self.cell_size * MARK_FONT_RATIO),
            color,
        );
    }

    /// Stroke across the cell along its winning axis
    fn draw_win_stroke(&self, painter: &Painter, cell: &Cell) {
        let Some(dir) = cell.win_direction else { return };
        // Endpoints as fractions of the cell
        let ((mx, my), (lx, ly)) = match dir.axis() {
            Axis::Diagonal => ((0.0, 0.0), (1.0, 1.0)),
            Axis::AntiDiagonal => ((1.0, 0.0), (0.0, 1.0)),
            Axis::Vertical => ((0.5, 0.0), (0.5, 1.0)),
            Axis::Horizontal => ((0.0, 0.5), (1.0, 0.5)),
        };
        let origin = self.cell_origin(cell.coord());
        let s = self.cell_size;
        painter.line_segment(
            [
                origin + Vec2::new(mx * s, my * s),
                origin + Vec2::new(lx * s, ly * s),
            ],
            Stroke::new(WIN_LINE_WIDTH, WIN_LINE),
        );
    }

    fn draw_last_move_marker(&self, painter: &Painter, coord: Coord) {
        let corner = self.cell_origin(coord) + Vec2::splat(LAST_MOVE_MARKER_RADIUS + 2.0);
        painter.circle_filled(corner, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn draw_hover_preview(&self, painter: &Painter, coord: Coord, turn: Mark, is_valid: bool) {
        let rect = Rect::from_min_size(self.cell_origin(coord), Vec2::splat(self.cell_size));
        if is_valid {
            painter.rect_filled(rect, CornerRadius::ZERO, hover_valid());
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                turn.to_string(),
                FontId::monospace(self.cell_size * MARK_FONT_RATIO),
                hover_valid(),
            );
        } else {
            painter.rect_filled(rect, CornerRadius::ZERO, hover_invalid());
        }
    }

    /// Convert screen coordinates to a cell by integer division
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Coord {
        let relative = screen_pos - self.board_rect.min;
        Coord::new(
            (relative.x / self.cell_size).floor() as i32,
            (relative.y / self.cell_size).floor() as i32,
        )
    }

    /// Top-left corner of a cell on screen
    pub fn cell_origin(&self, coord: Coord) -> Pos2 {
        self.board_rect.min
            + Vec2::new(
                coord.x as f32 * self.cell_size,
                coord.y as f32 * self.cell_size,
            )
    }

    fn cell_center(&self, coord: Coord) -> Pos2 {
        self.cell_origin(coord) + Vec2::splat(self.cell_size * 0.5)
    }
}
