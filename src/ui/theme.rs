//! Theme constants for the Gomoku GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(250, 250, 252);
pub const GRID_LINE: Color32 = Color32::from_rgb(170, 187, 204);

// Marks
pub const MARK_X: Color32 = Color32::from_rgb(255, 153, 0);
pub const MARK_O: Color32 = Color32::from_rgb(40, 120, 220);
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const WIN_LINE: Color32 = Color32::from_rgb(0, 0, 0);

// Functions for colors that can't be const
pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 80)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_PLAYING: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_OVER: Color32 = Color32::from_rgb(50, 220, 50);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(80, 60, 30);

// Sizes
pub const MARK_FONT_RATIO: f32 = 0.8;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const WIN_LINE_WIDTH: f32 = 2.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 3.0;
