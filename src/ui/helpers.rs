use egui::text::{LayoutJob, TextFormat};
use egui::{Button, Color32, FontId, RichText, Ui};

use crate::app::Tone;
use crate::config::Theme;
use crate::model::BLANK;

const ROW_GAP: f32 = 8.0;
const ROW_HEIGHT: f32 = 34.0;
/// Share of the row given to the primary button.
const PRIMARY_SHARE: f32 = 0.62;

/// Widths of the (primary, secondary) buttons in a row of `width`.
pub fn action_widths(width: f32) -> (f32, f32) {
    let usable = (width - ROW_GAP).max(0.0);
    let primary = usable * PRIMARY_SHARE;
    (primary, usable - primary)
}

/// Submit-style row under the answer field: a wide accent-filled primary
/// button and a plain secondary one, centered in `width`.
/// Returns (primary clicked, secondary clicked).
pub fn action_row(
    ui: &mut Ui,
    width: f32,
    theme: &Theme,
    primary: &str,
    secondary: &str,
) -> (bool, bool) {
    let (primary_w, secondary_w) = action_widths(width);
    let mut clicked = (false, false);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = ROW_GAP;
        ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
        let main = Button::new(RichText::new(primary).strong().color(theme.bg)).fill(theme.accent);
        clicked.0 = ui.add_sized([primary_w, ROW_HEIGHT], main).clicked();
        clicked.1 = ui
            .add_sized([secondary_w, ROW_HEIGHT], Button::new(secondary))
            .clicked();
    });
    clicked
}

pub fn tone_color(theme: &Theme, tone: Tone) -> Color32 {
    match tone {
        Tone::Good => theme.good,
        Tone::Bad => theme.bad,
    }
}

/// Lays out an equation with every blank marker highlighted.
pub fn equation_job(text: &str, font: FontId, color: Color32, theme: &Theme) -> LayoutJob {
    let mut job = LayoutJob::default();
    let plain = TextFormat::simple(font.clone(), color);
    let blank = TextFormat {
        background: theme.amber.gamma_multiply(0.18),
        ..TextFormat::simple(font, theme.amber)
    };
    for (i, part) in text.split(BLANK).enumerate() {
        if i > 0 {
            job.append(BLANK, 0.0, blank.clone());
        }
        if !part.is_empty() {
            job.append(part, 0.0, plain.clone());
        }
    }
    job
}
