use egui::{Frame, Margin, RichText, Ui};

use crate::app::PlaygroundApp;
use crate::viz::{CHART_HEIGHT, StageState};

pub fn ui_viz(app: &mut PlaygroundApp, ui: &mut Ui) {
    let theme = app.theme;
    let playing = app.stage.animation().is_playing();
    let can_play = app.stage.can_play();
    let mut toggle = false;

    Frame::default()
        .fill(ui.visuals().window_fill())
        .inner_margin(Margin::symmetric(16, 12))
        .corner_radius(10.0)
        .show(ui, |ui| match app.stage.state_mut() {
            StageState::Empty => {
                ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT / 2.0), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new("🔒 Solve the puzzle to unlock the visualization")
                                .color(theme.fg.gamma_multiply(0.6)),
                        );
                    });
                });
            }
            StageState::Failed(message) => {
                ui.colored_label(theme.bad, message.as_str());
            }
            StageState::Live(viz) => {
                ui.horizontal(|ui| {
                    ui.heading(viz.title());
                    if can_play {
                        let label = if playing { "⏸ Pause" } else { "▶ Play" };
                        toggle = ui.button(label).clicked();
                    }
                });
                ui.horizontal_wrapped(|ui| viz.controls(ui));
                ui.add_space(6.0);
                viz.draw(ui, &theme);
            }
        });

    if toggle {
        app.toggle_play();
        ui.ctx().request_repaint();
    }
}
