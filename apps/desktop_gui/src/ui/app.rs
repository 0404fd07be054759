//! Primary egui application state and frame update loop.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender};
use game_core::{apply_effects, scoring, Effect, RoundController, RoundInput, TimerQueue};
use shared::domain::{LabelField, TileFace};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{
    dispatch_backend_command, note_backend_error, settle_loaded_best, BackendScoreSink,
    StoredBestState,
};
use crate::ui::board::BoardView;
use crate::ui::faces::{kind_color, FaceTextures, BACK_FILL, CARD_HEIGHT, CARD_WIDTH};

/// Upper bound on how long the window sleeps between frames, so backend
/// events are picked up even when no timer is due.
const MAX_IDLE_REPAINT: Duration = Duration::from_millis(250);

pub struct DesktopGuiApp {
    controller: RoundController,
    view: BoardView,
    timers: TimerQueue,
    clock: Instant,
    faces: FaceTextures,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    status_banner: Option<UiError>,
    best_state: StoredBestState,
}

impl DesktopGuiApp {
    pub fn new(
        ctx: &egui::Context,
        controller: RoundController,
        assets_dir: &Path,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let (faces, problems) = FaceTextures::load(ctx, assets_dir, &controller.config().kinds);
        let mut app = Self {
            view: BoardView::new(controller.config().tile_count()),
            controller,
            timers: TimerQueue::new(),
            clock: Instant::now(),
            faces,
            cmd_tx,
            ui_rx,
            status: String::new(),
            status_banner: None,
            best_state: StoredBestState::Loading { deferred: None },
        };

        if !problems.is_empty() {
            for problem in &problems {
                tracing::warn!("card face unavailable: {problem}");
            }
            app.status_banner = Some(UiError::from_message(
                UiErrorContext::Assets,
                format!(
                    "{} image(s) missing from {}, drawing plain cards instead",
                    problems.len(),
                    assets_dir.display()
                ),
            ));
        }

        let effects = app.controller.start();
        app.apply(effects);
        app
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        let mut sink = BackendScoreSink {
            cmd_tx: &self.cmd_tx,
            status: &mut self.status,
            best_state: &mut self.best_state,
        };
        apply_effects(effects, &mut self.view, &mut self.timers, &mut sink);
    }

    fn handle(&mut self, input: RoundInput) {
        let effects = self.controller.handle(input);
        self.apply(effects);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BestLoaded(best) => {
                    tracing::debug!(?best, "best score loaded");
                    let best = settle_loaded_best(
                        &mut self.best_state,
                        best,
                        &self.cmd_tx,
                        &mut self.status,
                    );
                    let effects = self.controller.restore_best(best);
                    self.apply(effects);
                }
                UiEvent::BestSaved(score) => {
                    self.status = format!(
                        "Best score saved: {} errors, {}",
                        score.errors,
                        scoring::format_time(score.seconds)
                    );
                }
                UiEvent::BestCleared => {
                    self.status = "Best score reset".to_string();
                }
                UiEvent::Error(err) => {
                    note_backend_error(&mut self.best_state, &err);
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn fire_due_timers(&mut self) {
        for timer in self.timers.advance_to(self.clock.elapsed()) {
            self.handle(RoundInput::TimerFired { timer });
        }
    }

    fn reset_best(&mut self) {
        tracing::info!("resetting best score");
        dispatch_backend_command(&self.cmd_tx, BackendCommand::ClearBest, &mut self.status);
        let effects = self.controller.restore_best(None);
        self.apply(effects);
    }

    fn tile(&self, ui: &mut egui::Ui, face: TileFace) -> egui::Response {
        let size = egui::vec2(CARD_WIDTH as f32, CARD_HEIGHT as f32);
        let texture = match face {
            TileFace::Back => self.faces.back(),
            TileFace::Front(kind) => self.faces.front(kind),
        };
        if let Some(texture) = texture {
            return ui.add(
                egui::Button::image(egui::Image::new(texture).fit_to_exact_size(size)).frame(false),
            );
        }

        let (text, fill) = match face {
            TileFace::Back => (egui::RichText::new("?").size(36.0), BACK_FILL),
            TileFace::Front(kind) => (
                egui::RichText::new(kind.name()).size(18.0).strong(),
                kind_color(kind),
            ),
        };
        ui.add_sized(
            size,
            egui::Button::new(text.color(egui::Color32::WHITE)).fill(fill),
        )
    }

    fn show_front_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.view.front_notice() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new(("notice", notice.id)))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(notice.body.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.view.dismiss_notice();
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        let now = self.clock.elapsed();
        let wait = self
            .timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
            .unwrap_or(MAX_IDLE_REPAINT)
            .min(MAX_IDLE_REPAINT);
        ctx.request_repaint_after(wait);
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.fire_due_timers();

        // Result messages block the board until dismissed.
        let modal = self.view.front_notice().is_some();
        let restart_enabled = self.view.restart_enabled() && !modal;
        let mut clicked = None;
        let mut restart = false;
        let mut reset_best = false;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("Game", |ui| {
                    if ui
                        .add_enabled(restart_enabled, egui::Button::new("Restart"))
                        .clicked()
                    {
                        restart = true;
                        ui.close();
                    }
                    if ui
                        .add_enabled(
                            self.best_state == StoredBestState::Loaded,
                            egui::Button::new("Reset best score"),
                        )
                        .clicked()
                    {
                        reset_best = true;
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::TopBottomPanel::top("score_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(self.view.label(LabelField::Errors)).size(16.0));
                ui.separator();
                ui.label(egui::RichText::new(self.view.label(LabelField::Time)).size(16.0));
                ui.separator();
                ui.label(egui::RichText::new(self.view.label(LabelField::Best)).size(16.0));
                if let Some(report) = self.view.last_report() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(format!("Round {}: {}", report.round, report.tier.label()));
                    });
                }
            });
        });

        egui::TopBottomPanel::bottom("restart_bar").show(ctx, |ui| {
            if let Some(banner) = &self.status_banner {
                let mut close_banner = false;
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(220, 90, 80), banner.banner_text());
                    if ui.small_button("x").clicked() {
                        close_banner = true;
                    }
                });
                if close_banner {
                    self.status_banner = None;
                }
            }
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(restart_enabled, egui::Button::new("Restart"))
                    .clicked()
                {
                    restart = true;
                }
                if !self.status.is_empty() {
                    ui.label(egui::RichText::new(&self.status).small());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let columns = self.controller.config().columns.max(1);
            egui::Grid::new("board")
                .spacing([6.0, 6.0])
                .show(ui, |ui| {
                    for (index, &face) in self.view.tiles().iter().enumerate() {
                        if self.tile(ui, face).clicked() {
                            clicked = Some(index);
                        }
                        if (index + 1) % columns == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

        self.show_front_notice(ctx);

        if !modal {
            if let Some(index) = clicked {
                self.handle(RoundInput::TileClicked { index });
            }
        }
        if restart && restart_enabled {
            tracing::info!(round = self.controller.round(), "restart requested");
            self.handle(RoundInput::RestartRequested);
        }
        if reset_best {
            self.reset_best();
        }

        self.schedule_repaint(ctx);
    }
}
