//! App shell for the hope wall: counter header, whisper cards, help beacon.

use std::time::{Duration, Instant};

use client_core::{wall::EMPTY_WALL_MESSAGE, CounterView, WallView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::WhisperId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);

pub struct WallApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    counter: CounterView,
    wall: WallView,
    beacon_open: bool,
    beacon_just_opened: bool,
    status: String,
    submit_error: Option<String>,
}

impl WallApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            counter: CounterView::new(),
            wall: WallView::new(),
            beacon_open: false,
            beacon_just_opened: false,
            status: "Starting...".to_string(),
            submit_error: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    tracing::error!("ui: {}", err.message());
                    self.status = err.message().to_string();
                }
                UiEvent::CounterFetched(count) => {
                    self.counter.set_count(count, Instant::now());
                }
                UiEvent::WallFetched(whispers) => self.wall.render(&whispers),
                UiEvent::ReplyPosted {
                    whisper_id,
                    text,
                    updated_counter,
                } => {
                    self.wall.complete_submit(&whisper_id, &text);
                    self.counter.set_count(updated_counter, Instant::now());
                }
                UiEvent::ReplyFailed {
                    whisper_id,
                    message,
                } => {
                    self.wall.fail_submit(&whisper_id);
                    self.submit_error = Some(format!("Failed to plant support: {message}"));
                }
            }
        }
    }

    fn show_counter_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("hope_header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("🏮").size(22.0));
                let mut count_text = egui::RichText::new(self.counter.display_text())
                    .strong()
                    .size(22.0);
                if self.counter.is_highlighted(Instant::now()) {
                    count_text = count_text.color(HIGHLIGHT_COLOR);
                }
                ui.label(count_text);
                ui.label("hopes kindled");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Beacon").clicked() {
                        self.beacon_open = true;
                        self.beacon_just_opened = true;
                    }
                    ui.small(egui::RichText::new(&self.status).weak());
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_wall(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.wall.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.label(egui::RichText::new(EMPTY_WALL_MESSAGE).weak().italics());
                });
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("wall_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for index in 0..self.wall.cards().len() {
                        self.render_whisper_card(ui, index);
                        ui.add_space(8.0);
                    }
                });
        });
    }

    fn render_whisper_card(&mut self, ui: &mut egui::Ui, index: usize) {
        let card = self.wall.cards()[index].clone();
        egui::Frame::new()
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(card.glyph).size(18.0));
                    ui.label(egui::RichText::new(&card.tag).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("💬 {}", card.reply_count())).weak(),
                        );
                    });
                });
                ui.label(&card.content);
                ui.add_space(4.0);

                if ui.button(self.wall.thread_label(&card.id)).clicked() {
                    self.wall.toggle_thread(&card.id);
                }

                if self.wall.is_expanded(&card.id) {
                    ui.separator();
                    for comment in &card.comments {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(egui::RichText::new(&comment.author).strong());
                            ui.label(&comment.text);
                            if !comment.time_label.is_empty() {
                                ui.small(egui::RichText::new(&comment.time_label).weak());
                            }
                        });
                    }
                    ui.add_space(4.0);
                    self.render_reply_composer(ui, &card.id);
                }
            });
    }

    fn render_reply_composer(&mut self, ui: &mut egui::Ui, id: &WhisperId) {
        let in_flight = self.wall.is_in_flight(id);
        ui.horizontal(|ui| {
            let input_width = (ui.available_width() - 64.0).max(120.0);
            ui.add_enabled(
                !in_flight,
                egui::TextEdit::singleline(self.wall.draft_mut(id))
                    .hint_text("leave some support")
                    .desired_width(input_width),
            );

            let send_label = if in_flight { "..." } else { "send" };
            if ui
                .add_enabled(!in_flight, egui::Button::new(send_label))
                .clicked()
            {
                if let Some(text) = self.wall.begin_submit(id) {
                    let queued = dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::SubmitReply {
                            whisper_id: id.clone(),
                            text,
                        },
                        &mut self.status,
                    );
                    if !queued {
                        // Nothing is in flight for this card after a drop.
                        self.wall.fail_submit(id);
                    }
                }
            }
        });
    }

    fn show_beacon_modal(&mut self, ctx: &egui::Context) {
        if !self.beacon_open {
            return;
        }

        let mut open = true;
        let response = egui::Window::new("Beacon")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("You are not alone. If the wall feels heavy tonight, reach out.");
                ui.add_space(4.0);
                ui.label("Campus counseling answers around the clock at extension 4357.");
            });
        if !open {
            self.beacon_open = false;
        }

        // A click anywhere outside the window also dismisses it, except on
        // the frame the opening click itself landed.
        if self.beacon_just_opened {
            self.beacon_just_opened = false;
            return;
        }
        if let Some(shown) = response {
            let clicked_outside = ctx.input(|input| {
                input.pointer.any_pressed()
                    && input
                        .pointer
                        .interact_pos()
                        .is_some_and(|pos| !shown.response.rect.contains(pos))
            });
            if clicked_outside {
                self.beacon_open = false;
            }
        }
    }

    fn show_submit_error(&mut self, ctx: &egui::Context) {
        let Some(message) = self.submit_error.clone() else {
            return;
        };
        egui::Window::new("Send failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.submit_error = None;
                }
            });
    }
}

impl eframe::App for WallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_counter_header(ctx);
        self.show_wall(ctx);
        self.show_beacon_modal(ctx);
        self.show_submit_error(ctx);

        if self.counter.is_highlighted(Instant::now()) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::wall::REPLY_DISPLAY_AUTHOR;
    use crossbeam_channel::bounded;
    use shared::protocol::WhisperPayload;

    use super::*;

    fn whisper(id: &str) -> WhisperPayload {
        WhisperPayload {
            id: WhisperId::new(id),
            light: Some(4),
            tag: "hope".to_string(),
            content: format!("whisper {id}"),
            comments: Vec::new(),
        }
    }

    fn app_with_queues() -> (
        WallApp,
        crossbeam_channel::Sender<UiEvent>,
        crossbeam_channel::Receiver<BackendCommand>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (WallApp::new(cmd_tx, ui_rx), ui_tx, cmd_rx)
    }

    #[test]
    fn fetch_events_update_the_view_models() {
        let (mut app, ui_tx, _cmd_rx) = app_with_queues();
        ui_tx
            .send(UiEvent::CounterFetched(12))
            .expect("queue counter");
        ui_tx
            .send(UiEvent::WallFetched(vec![whisper("w-1"), whisper("w-2")]))
            .expect("queue wall");

        app.process_ui_events();

        assert_eq!(app.counter.value(), Some(12));
        assert_eq!(app.wall.cards().len(), 2);
    }

    #[test]
    fn reply_posted_appends_locally_and_propagates_the_counter() {
        let (mut app, ui_tx, _cmd_rx) = app_with_queues();
        ui_tx
            .send(UiEvent::WallFetched(vec![whisper("w-1")]))
            .expect("queue wall");
        app.process_ui_events();

        *app.wall.draft_mut(&WhisperId::new("w-1")) = "you matter".to_string();
        let text = app
            .wall
            .begin_submit(&WhisperId::new("w-1"))
            .expect("claimed");

        ui_tx
            .send(UiEvent::ReplyPosted {
                whisper_id: WhisperId::new("w-1"),
                text,
                updated_counter: 7,
            })
            .expect("queue ack");
        app.process_ui_events();

        let card = &app.wall.cards()[0];
        assert_eq!(card.reply_count(), 1);
        assert_eq!(card.comments[0].author, REPLY_DISPLAY_AUTHOR);
        assert_eq!(app.counter.value(), Some(7));
        assert!(!app.wall.is_in_flight(&WhisperId::new("w-1")));
        assert_eq!(app.wall.draft(&WhisperId::new("w-1")), "");
    }

    #[test]
    fn reply_failed_surfaces_a_blocking_error_and_keeps_the_draft() {
        let (mut app, ui_tx, _cmd_rx) = app_with_queues();
        ui_tx
            .send(UiEvent::WallFetched(vec![whisper("w-1")]))
            .expect("queue wall");
        app.process_ui_events();

        *app.wall.draft_mut(&WhisperId::new("w-1")) = "unsent".to_string();
        app.wall
            .begin_submit(&WhisperId::new("w-1"))
            .expect("claimed");

        ui_tx
            .send(UiEvent::ReplyFailed {
                whisper_id: WhisperId::new("w-1"),
                message: "whisper not found".to_string(),
            })
            .expect("queue failure");
        app.process_ui_events();

        assert!(!app.wall.is_in_flight(&WhisperId::new("w-1")));
        assert_eq!(app.wall.draft(&WhisperId::new("w-1")), "unsent");
        assert_eq!(app.wall.cards()[0].reply_count(), 0);
        assert_eq!(
            app.submit_error.as_deref(),
            Some("Failed to plant support: whisper not found")
        );
    }
}
