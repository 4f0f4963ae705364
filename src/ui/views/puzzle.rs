use egui::{FontId, Frame, Key, Margin, RichText, Stroke, TextEdit, Ui};

use crate::app::PlaygroundApp;
use crate::ui::helpers::{action_row, equation_job, tone_color};

const EQUATION_SIZE: f32 = 26.0;

pub fn ui_puzzle(app: &mut PlaygroundApp, ui: &mut Ui, panel_width: f32) {
    let theme = app.theme;
    Frame::default()
        .fill(ui.visuals().window_fill())
        .inner_margin(Margin::symmetric(20, 16))
        .corner_radius(10.0)
        .show(ui, |ui| {
            ui.set_width(panel_width);
            ui.vertical_centered(|ui| {
                let text_color = ui.visuals().text_color();
                let job = equation_job(
                    &app.prompt_text(),
                    FontId::proportional(EQUATION_SIZE),
                    text_color,
                    &theme,
                );
                ui.label(job);
                ui.add_space(12.0);

                let input = ui.add(
                    TextEdit::singleline(&mut app.input)
                        .hint_text("Type the missing term (LaTeX welcome)")
                        .desired_width(panel_width - 40.0)
                        .font(FontId::monospace(16.0)),
                );
                // Enter submits and keeps the cursor in the field.
                if input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    app.submit();
                    input.request_focus();
                }
                ui.add_space(6.0);

                let (check, hint) = action_row(ui, panel_width - 40.0, &theme, "Check", "💡 Hint");
                if check {
                    app.submit();
                }
                if hint {
                    let now = ui.input(|i| i.time);
                    app.show_hint(now);
                }

                if let Some(fb) = &app.feedback {
                    ui.add_space(6.0);
                    let text = if fb.celebrate {
                        format!("🎉 {}", fb.text)
                    } else {
                        fb.text.clone()
                    };
                    ui.label(RichText::new(text).color(tone_color(&theme, fb.tone)).strong());
                }

                if let Some(bubble) = &app.hint {
                    ui.add_space(6.0);
                    Frame::default()
                        .stroke(Stroke::new(1.0, theme.amber.gamma_multiply(0.4)))
                        .inner_margin(Margin::symmetric(12, 8))
                        .corner_radius(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(&bubble.text).color(theme.amber).small());
                        });
                }

                ui_solution(app, ui);
            });
        });
}

fn ui_solution(app: &mut PlaygroundApp, ui: &mut Ui) {
    let Some(solution) = app.solution_text() else {
        return;
    };
    ui.add_space(10.0);
    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Answer:");
        ui.label(RichText::new(solution).color(app.theme.amber).size(18.0));
    });

    let toggle = if app.show_explanation {
        "▲ Hide Explanation"
    } else {
        "▼ Show Explanation"
    };
    if ui.button(toggle).clicked() {
        app.toggle_explanation();
    }
    if app.show_explanation {
        ui.label(app.explanation_text());
    }
}
