//! Noisy swiss roll manifold, shown as a rotatable orthographic projection.

use std::f64::consts::PI;

use egui::{RichText, Ui};
use egui_plot::{Plot, PlotPoints, Points};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::controls::ParamSlider;
use super::heatmap::POINTS;
use super::{CHART_HEIGHT, Visualization, randn};
use crate::config::Theme;
use crate::error::VizError;

/// Points are coloured in this many bands of `t`.
const BANDS: usize = 12;

/// Fixed camera tilt above the roll's axis.
const ELEVATION: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollPoint {
    pub pos: [f64; 3],
    /// Position along the spiral; drives the colour.
    pub t: f64,
}

pub fn sample<R: Rng + ?Sized>(
    n: usize,
    turns: f64,
    noise: f64,
    rng: &mut R,
) -> Result<Vec<RollPoint>, VizError> {
    if n == 0 {
        return Err(VizError::InvalidParameter { name: "samples", value: 0.0 });
    }
    if turns.is_nan() || turns <= 0.0 {
        return Err(VizError::InvalidParameter { name: "turns", value: turns });
    }
    if noise.is_nan() || noise < 0.0 {
        return Err(VizError::InvalidParameter { name: "noise", value: noise });
    }
    Ok((0..n)
        .map(|_| {
            let t = rng.r#gen::<f64>() * turns * 2.0 * PI + 1.5;
            let y = (rng.r#gen::<f64>() - 0.5) * 10.0;
            let pos = [
                t * t.cos() + noise * randn(rng),
                y + noise * randn(rng),
                t * t.sin() + noise * randn(rng),
            ];
            RollPoint { pos, t }
        })
        .collect())
}

/// Rotates about the vertical axis by `azimuth`, tilts by `elevation`, then
/// drops depth.
pub fn project(pos: [f64; 3], azimuth: f64, elevation: f64) -> [f64; 2] {
    let [x, y, z] = pos;
    let (sa, ca) = azimuth.sin_cos();
    let xr = ca * x + sa * z;
    let zr = -sa * x + ca * z;
    let (se, ce) = elevation.sin_cos();
    [xr, ce * y - se * zr]
}

pub struct SwissRollViz {
    rng: StdRng,
    points: Vec<RollPoint>,
    turns: ParamSlider,
    noise: ParamSlider,
    samples: ParamSlider,
    view: ParamSlider,
}

impl SwissRollViz {
    pub fn new(seed: u64) -> Result<Self, VizError> {
        let mut viz = Self {
            rng: StdRng::seed_from_u64(seed),
            points: Vec::new(),
            turns: ParamSlider::new("Turns", 1.5, 0.5, 4.0, 0.1),
            noise: ParamSlider::new("Noise", 0.05, 0.0, 0.3, 0.01),
            samples: ParamSlider::new("Samples", 1200.0, 200.0, 4000.0, 100.0).integer(),
            view: ParamSlider::new("View angle", 30.0, 0.0, 360.0, 1.0),
        };
        viz.regenerate()?;
        Ok(viz)
    }

    pub fn points(&self) -> &[RollPoint] {
        &self.points
    }

    fn regenerate(&mut self) -> Result<(), VizError> {
        self.points = sample(
            self.samples.as_usize(),
            self.turns.value,
            self.noise.value,
            &mut self.rng,
        )?;
        Ok(())
    }

    /// Projected points grouped into colour bands of `t`.
    fn bands(&self) -> Vec<Vec<[f64; 2]>> {
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.t), hi.max(p.t)));
        let span = (hi - lo).max(1e-9);
        let azimuth = self.view.value.to_radians();
        let mut bands = vec![Vec::new(); BANDS];
        for p in &self.points {
            let band = (((p.t - lo) / span) * BANDS as f64) as usize;
            bands[band.min(BANDS - 1)].push(project(p.pos, azimuth, ELEVATION));
        }
        bands
    }
}

impl Visualization for SwissRollViz {
    fn title(&self) -> &'static str {
        "Swiss Roll Manifold"
    }

    fn controls(&mut self, ui: &mut Ui) {
        let mut dirty = self.turns.show(ui);
        dirty |= self.noise.show(ui);
        dirty |= self.samples.show(ui);
        self.view.show(ui);
        if dirty {
            if let Err(e) = self.regenerate() {
                log::warn!("swiss roll not regenerated: {e}");
            }
        }
    }

    fn draw(&self, ui: &mut Ui, theme: &Theme) {
        Plot::new("swiss_roll_plot")
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, band) in self.bands().into_iter().enumerate() {
                    if band.is_empty() {
                        continue;
                    }
                    let shade = (i as f32 + 0.5) / BANDS as f32;
                    plot_ui.points(
                        Points::new(format!("t band {i}"), PlotPoints::from(band))
                            .radius(1.8)
                            .color(POINTS.sample(0.15 + 0.85 * shade)),
                    );
                }
            });
        ui.label(
            RichText::new(format!("{} points", self.points.len()))
                .color(theme.fg.gamma_multiply(0.75))
                .small(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_is_honoured() {
        let mut rng = StdRng::seed_from_u64(5);
        let pts = sample(1300, 1.5, 0.05, &mut rng).expect("sample");
        assert_eq!(pts.len(), 1300);
    }

    #[test]
    fn noiseless_points_lie_on_the_spiral() {
        let mut rng = StdRng::seed_from_u64(5);
        for p in sample(200, 2.0, 0.0, &mut rng).expect("sample") {
            let r = p.pos[0].hypot(p.pos[2]);
            assert!((r - p.t).abs() < 1e-9);
            assert!(p.t >= 1.5 && p.t <= 1.5 + 4.0 * PI);
            assert!(p.pos[1].abs() <= 5.0);
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sample(0, 1.5, 0.0, &mut rng).is_err());
        assert!(sample(10, 0.0, 0.0, &mut rng).is_err());
        assert!(sample(10, 1.0, -0.1, &mut rng).is_err());
        assert!(sample(10, f64::NAN, 0.0, &mut rng).is_err());
    }

    #[test]
    fn projection_keeps_height_at_zero_elevation() {
        let [u, v] = project([1.0, 2.0, 0.0], PI / 2.0, 0.0);
        assert!(u.abs() < 1e-12);
        assert_eq!(v, 2.0);
        let [u, _] = project([1.0, 2.0, 3.0], 0.0, 0.0);
        assert_eq!(u, 1.0);
    }

    #[test]
    fn viz_regenerates_from_sliders() {
        let mut viz = SwissRollViz::new(1).expect("viz");
        assert_eq!(viz.points().len(), 1200);
        viz.samples.set(400.0);
        viz.regenerate().expect("regenerate");
        assert_eq!(viz.points().len(), 400);
        let total: usize = viz.bands().iter().map(Vec::len).sum();
        assert_eq!(total, 400);
    }
}
