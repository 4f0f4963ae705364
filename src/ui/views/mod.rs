pub mod puzzle;
pub mod viz;

use egui::{CentralPanel, Context, ScrollArea};

use crate::app::PlaygroundApp;

const MAX_WIDTH: f32 = 760.0;

/// Puzzle card on top, visualization card below.
pub fn ui_playground(app: &mut PlaygroundApp, ctx: &Context) {
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            let panel_width = (ui.available_width() * 0.97).min(MAX_WIDTH);
            ui.vertical_centered(|ui| {
                ui.set_max_width(panel_width);
                puzzle::ui_puzzle(app, ui, panel_width);
                ui.add_space(12.0);
                viz::ui_viz(app, ui);
            });
        });
    });
}
