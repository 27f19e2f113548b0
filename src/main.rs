//! Five-in-a-row GUI
//!
//! Usage: `gomoku [CONFIG]` (defaults to `gomoku.toml` in the working directory).

use std::path::PathBuf;

use gomoku::config::CONFIG_PATH;
use gomoku::ui::GomokuApp;
use gomoku::Settings;
use tracing::error;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_PATH));
    let settings = Settings::load_or_default(&path).unwrap_or_else(|e| {
        error!(error = %e, "invalid settings, using defaults");
        Settings::default()
    });

    let board_w = settings.board.width as f32 * settings.board.cell_size;
    let board_h = settings.board.height as f32 * settings.board.cell_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([board_w + 300.0, board_h.max(420.0) + 60.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Five in a Row"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc, settings)))),
    )
}
