//! Main application for the Gomoku GUI

use std::time::Instant;

use eframe::egui;
use egui::{Align2, CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel};
use tracing::warn;

use super::board_view::BoardView;
use super::theme::*;
use crate::board::Mark;
use crate::config::Settings;
use crate::game::{GameState, WIN_NOTICE_DELAY};
use crate::storage::{self, JsonFileStore};

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    /// Winner announced by the deferred notice, shown until dismissed
    announcement: Option<Mark>,
    message: Option<String>,
}

impl GomokuApp {
    /// Open the file-backed store and restore the last game
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let store = storage::shared(JsonFileStore::open(&settings.storage_path));
        Self {
            state: GameState::new(&settings, store),
            board_view: BoardView::new(settings.board.cell_size),
            announcement: None,
            message: None,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.new_game();
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = if self.state.is_automated() {
                        format!("vs {} opponent", self.state.generator_name())
                    } else {
                        "Hotseat".to_string()
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("FIVE IN A ROW").size(20.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_opponent_card(ui);
                ui.add_space(10.0);

                self.render_chains_card(ui);

                if let Some(msg) = self.message.clone() {
                    ui.add_space(10.0);
                    self.render_message_card(ui, &msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TURN").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            let (text, color) = match self.state.winner() {
                Some(winner) => (format!("Player {winner} won"), STATUS_OVER),
                None => (format!("Player {}", self.state.current_turn()), STATUS_PLAYING),
            };
            ui.label(RichText::new(text).size(18.0).strong().color(color));
            ui.label(
                RichText::new(format!("{} marks placed", self.state.board().len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_opponent_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("OPPONENT").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let mut automated = self.state.is_automated();
            if ui.checkbox(&mut automated, "Automated O").changed() {
                self.state.toggle_automated();
                self.announcement = None;
                self.message = None;
            }

            let mut network = self.state.uses_network();
            if ui.checkbox(&mut network, "Network generator").changed() {
                self.state.toggle_network();
            }
        });
    }

    fn render_chains_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("LONGEST CHAINS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            let chains = self.state.chains();
            if chains.is_empty() {
                ui.label(RichText::new("none yet").size(11.0).color(TEXT_SECONDARY));
                return;
            }
            ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                for chain in chains.iter().take(8) {
                    let (first, last) = match (chain.first(), chain.last()) {
                        (Some(f), Some(l)) => (f, l),
                        _ => continue,
                    };
                    ui.label(
                        RichText::new(format!(
                            "{} x{} {:?} {first} -> {last}",
                            chain.mark,
                            chain.len(),
                            chain.direction
                        ))
                        .size(11.0)
                        .color(TEXT_SECONDARY),
                    );
                }
            });
        });
    }

    fn render_message_card(&self, ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(STATUS_ERROR)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the board and apply a click
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let clicked = self.board_view.show(
                ui,
                self.state.board(),
                self.state.current_turn(),
                self.state.last_move(),
                self.state.is_blocked(),
            );

            if let Some(coord) = clicked {
                match self.state.play(coord.x, coord.y) {
                    Ok(_) => self.message = None,
                    Err(e) => {
                        warn!(error = %e, "move failed");
                        self.message = Some(e.to_string());
                    }
                }
            }
        });
    }

    fn render_announcement(&mut self, ctx: &Context) {
        let Some(winner) = self.announcement else { return };
        let mut open = true;
        egui::Window::new("Game over")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(RichText::new(format!("Player {winner} is win!")).size(18.0).strong());
                ui.add_space(8.0);
                if ui.button("New Game").clicked() {
                    self.new_game();
                }
            });
        if !open {
            self.announcement = None;
        }
    }

    fn new_game(&mut self) {
        self.state.reset();
        self.announcement = None;
        self.message = None;
    }

    fn handle_input(&mut self, ctx: &Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::N)) {
            self.new_game();
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        if let Some(winner) = self.state.poll_win_notice(Instant::now()) {
            self.announcement = Some(winner);
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
        self.render_announcement(ctx);

        if self.state.has_pending_notice() {
            ctx.request_repaint_after(WIN_NOTICE_DELAY);
        }
    }
}
