//! Grid heatmaps painted directly with the egui painter.

use egui::{Color32, Rect, Sense, Ui, Vec2, pos2, vec2};

/// Piecewise-linear color ramp over `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale(pub &'static [(f32, [u8; 3])]);

pub const SURFACE: ColorScale = ColorScale(&[
    (0.0, [0x0e, 0x1a, 0x22]),
    (0.2, [0x12, 0x32, 0x43]),
    (0.35, [0x14, 0x5b, 0x72]),
    (0.5, [0x1c, 0x8a, 0xa3]),
    (0.65, [0x5c, 0xc7, 0xd9]),
    (0.8, [0x9d, 0xd9, 0xff]),
    (1.0, [0xcb, 0xb6, 0xff]),
]);

pub const POINTS: ColorScale = ColorScale(&[
    (0.0, [0x1a, 0x1e, 0x27]),
    (0.2, [0x2a, 0x38, 0x48]),
    (0.4, [0x2d, 0x6a, 0x73]),
    (0.6, [0x4a, 0xa4, 0xa8]),
    (0.8, [0x8f, 0xd9, 0xe2]),
    (1.0, [0xf2, 0xc6, 0xff]),
]);

pub const ATTENTION: ColorScale = ColorScale(&[
    (0.0, [0x0B, 0x0F, 0x14]),
    (0.25, [0x12, 0x32, 0x43]),
    (0.5, [0x1c, 0x8a, 0xa3]),
    (0.75, [0x6B, 0xEF, 0xA3]),
    (1.0, [0xFF, 0xB8, 0x6B]),
]);

impl ColorScale {
    pub fn sample(&self, t: f32) -> Color32 {
        let stops = self.0;
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let Some(first) = stops.first() else {
            return Color32::BLACK;
        };
        if t <= first.0 {
            return rgb(first.1);
        }
        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
                return Color32::from_rgb(mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2]));
            }
        }
        stops.last().map(|s| rgb(s.1)).unwrap_or(Color32::BLACK)
    }
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Maps `values` linearly onto `[0, 1]`. A flat range maps to 0.5.
pub fn normalized(values: &[f64]) -> Vec<f32> {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    values
        .iter()
        .map(|&v| {
            if !span.is_finite() || span < 1e-12 {
                0.5
            } else {
                ((v - lo) / span) as f32
            }
        })
        .collect()
}

/// Paints a `rows x cols` grid, row 0 at the top. Hovering shows the cell value.
pub fn heatmap(ui: &mut Ui, rows: usize, cols: usize, values: &[f64], scale: ColorScale, height: f32) {
    if rows == 0 || cols == 0 || values.len() < rows * cols {
        ui.label("(no data)");
        return;
    }
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
    let cell = Vec2::new(rect.width() / cols as f32, rect.height() / rows as f32);
    let shades = normalized(&values[..rows * cols]);

    let painter = ui.painter_at(rect);
    for r in 0..rows {
        for c in 0..cols {
            let min = pos2(rect.left() + c as f32 * cell.x, rect.top() + r as f32 * cell.y);
            // Slight overlap hides seams between cells.
            let cell_rect = Rect::from_min_size(min, cell + vec2(0.5, 0.5));
            painter.rect_filled(cell_rect, 0.0, scale.sample(shades[r * cols + c]));
        }
    }

    if let Some(pos) = response.hover_pos() {
        let c = (((pos.x - rect.left()) / cell.x) as usize).min(cols - 1);
        let r = (((pos.y - rect.top()) / cell.y) as usize).min(rows - 1);
        response.on_hover_text_at_pointer(format!("[{r}, {c}] = {:.4}", values[r * cols + c]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_hits_stops_and_clamps() {
        assert_eq!(SURFACE.sample(0.0), Color32::from_rgb(0x0e, 0x1a, 0x22));
        assert_eq!(SURFACE.sample(1.0), Color32::from_rgb(0xcb, 0xb6, 0xff));
        assert_eq!(SURFACE.sample(-3.0), SURFACE.sample(0.0));
        assert_eq!(SURFACE.sample(7.0), SURFACE.sample(1.0));
        assert_eq!(SURFACE.sample(f32::NAN), SURFACE.sample(0.0));
    }

    #[test]
    fn scale_interpolates_between_stops() {
        let mid = ATTENTION.sample(0.125);
        assert_eq!(mid, Color32::from_rgb(0x0f, 0x21, 0x2c));
    }

    #[test]
    fn normalized_spans_unit_interval() {
        let n = normalized(&[2.0, 4.0, 3.0]);
        assert_eq!(n, vec![0.0, 1.0, 0.5]);
        assert_eq!(normalized(&[1.0, 1.0]), vec![0.5, 0.5]);
        assert!(normalized(&[]).is_empty());
    }
}
