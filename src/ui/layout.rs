use egui::{Align, Context, Layout, RichText, TopBottomPanel, Visuals};

use crate::app::PlaygroundApp;

pub fn top_panel(app: &PlaygroundApp, ctx: &Context) {
    TopBottomPanel::top("title_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(RichText::new("Research Playground").color(app.theme.accent));
                ui.label(RichText::new("Fill the blank, unlock the visualization").small());
            });
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let streak = app.session.streak();
                let fire = app.feedback.as_ref().is_some_and(|f| f.celebrate);
                let text = if fire {
                    format!("🔥 Streak: {streak}")
                } else {
                    format!("Streak: {streak}")
                };
                ui.label(RichText::new(text).strong().color(app.theme.amber));
            });
        });
    });
}

pub fn bottom_panel(app: &mut PlaygroundApp, ctx: &Context) {
    TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("◀ Prev").clicked() {
                app.previous();
            }
            ui.label(app.step_label());
            if ui.button("Next ▶").clicked() {
                app.next();
            }

            // ----------- THEME BUTTONS -----------
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("🌙 Dark").clicked() {
                    app.theme.apply(ctx);
                }
                if ui.button("☀ Light").clicked() {
                    ctx.set_visuals(Visuals::light());
                }
            });
        });
    });
}
