//! KL divergence between two 2D Gaussians with diagonal covariance.

use std::f64::consts::PI;

use egui::{Color32, RichText, Ui};
use egui_plot::{Arrows, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use super::controls::ParamSlider;
use super::{CHART_HEIGHT, Visualization};
use crate::config::Theme;
use crate::error::VizError;

const ELLIPSE_SEGMENTS: usize = 96;
/// Samples per axis of the shaded density grid over [-4, 4]².
const DENSITY_GRID: usize = 60;
const DENSITY_BANDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagGaussian {
    pub mean: [f64; 2],
    pub sigma: [f64; 2],
}

impl DiagGaussian {
    pub fn new(mean: [f64; 2], sigma: [f64; 2]) -> Result<Self, VizError> {
        for s in sigma {
            if s.is_nan() || s <= 0.0 {
                return Err(VizError::InvalidParameter { name: "sigma", value: s });
            }
        }
        Ok(Self { mean, sigma })
    }

    pub fn density(&self, x: f64, y: f64) -> f64 {
        let nx = (x - self.mean[0]) / self.sigma[0];
        let ny = (y - self.mean[1]) / self.sigma[1];
        (-0.5 * (nx * nx + ny * ny)).exp() / (2.0 * PI * self.sigma[0] * self.sigma[1])
    }

    /// Grid points over [-4, 4]² grouped by density relative to the peak.
    /// Band `i` holds points in `[(i + 1) / bands, (i + 2) / bands)` and the
    /// top band also takes the peak. The faintest slice is left out.
    pub fn density_bands(&self, grid: usize, bands: usize) -> Vec<Vec<[f64; 2]>> {
        let mut out = vec![Vec::new(); bands.saturating_sub(1)];
        if grid < 2 || out.is_empty() {
            return out;
        }
        let peak = self.density(self.mean[0], self.mean[1]);
        let step = 8.0 / (grid - 1) as f64;
        for i in 0..grid {
            for j in 0..grid {
                let (x, y) = (-4.0 + i as f64 * step, -4.0 + j as f64 * step);
                let level = (self.density(x, y) / peak * bands as f64).floor() as usize;
                if level >= 1 {
                    out[level.min(bands - 1) - 1].push([x, y]);
                }
            }
        }
        out
    }

    /// Closed contour at `k` standard deviations.
    pub fn ellipse(&self, k: f64) -> Vec<[f64; 2]> {
        (0..=ELLIPSE_SEGMENTS)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / ELLIPSE_SEGMENTS as f64;
                [
                    self.mean[0] + k * self.sigma[0] * a.cos(),
                    self.mean[1] + k * self.sigma[1] * a.sin(),
                ]
            })
            .collect()
    }
}

/// KL(P‖Q) in closed form for d = 2.
pub fn kl_divergence(p: &DiagGaussian, q: &DiagGaussian) -> f64 {
    let mut trace = 0.0;
    let mut quad = 0.0;
    for i in 0..2 {
        trace += (p.sigma[i] / q.sigma[i]).powi(2);
        quad += ((q.mean[i] - p.mean[i]) / q.sigma[i]).powi(2);
    }
    let log_det = ((q.sigma[0] * q.sigma[1]) / (p.sigma[0] * p.sigma[1])).ln();
    0.5 * (trace + quad - 2.0 + 2.0 * log_det)
}

pub struct KlViz {
    mu_qx: ParamSlider,
    mu_qy: ParamSlider,
    sigma_px: ParamSlider,
    sigma_py: ParamSlider,
    sigma_qx: ParamSlider,
    sigma_qy: ParamSlider,
}

impl KlViz {
    pub fn new() -> Result<Self, VizError> {
        let viz = Self {
            mu_qx: ParamSlider::new("μ_Qx", 1.0, -3.0, 3.0, 0.1),
            mu_qy: ParamSlider::new("μ_Qy", 0.0, -3.0, 3.0, 0.1),
            sigma_px: ParamSlider::new("σ_Px", 1.0, 0.3, 2.5, 0.1),
            sigma_py: ParamSlider::new("σ_Py", 1.0, 0.3, 2.5, 0.1),
            sigma_qx: ParamSlider::new("σ_Qx", 1.4, 0.3, 2.5, 0.1),
            sigma_qy: ParamSlider::new("σ_Qy", 0.8, 0.3, 2.5, 0.1),
        };
        viz.distributions()?;
        Ok(viz)
    }

    /// P is centred at the origin; Q follows the sliders.
    pub fn distributions(&self) -> Result<(DiagGaussian, DiagGaussian), VizError> {
        let p = DiagGaussian::new([0.0, 0.0], [self.sigma_px.value, self.sigma_py.value])?;
        let q = DiagGaussian::new(
            [self.mu_qx.value, self.mu_qy.value],
            [self.sigma_qx.value, self.sigma_qy.value],
        )?;
        Ok((p, q))
    }

    fn shading(plot_ui: &mut egui_plot::PlotUi, name: &str, g: &DiagGaussian, color: Color32) {
        let bands = g.density_bands(DENSITY_GRID, DENSITY_BANDS);
        let n = bands.len() as f32;
        for (i, pts) in bands.into_iter().enumerate() {
            if pts.is_empty() {
                continue;
            }
            plot_ui.points(
                Points::new(name, PlotPoints::from(pts))
                    .radius(2.5)
                    .color(color.gamma_multiply(0.06 + 0.3 * (i as f32 + 1.0) / n)),
            );
        }
    }

    fn contours(plot_ui: &mut egui_plot::PlotUi, name: &str, g: &DiagGaussian, color: Color32) {
        plot_ui.line(Line::new(name, PlotPoints::from(g.ellipse(1.0))).color(color).width(2.0));
        plot_ui.line(
            Line::new(name, PlotPoints::from(g.ellipse(2.0)))
                .color(color.gamma_multiply(0.45))
                .width(1.0),
        );
    }
}

impl Visualization for KlViz {
    fn title(&self) -> &'static str {
        "KL Divergence"
    }

    // Everything is recomputed from the sliders on draw.
    fn controls(&mut self, ui: &mut Ui) {
        for s in [
            &mut self.mu_qx,
            &mut self.mu_qy,
            &mut self.sigma_px,
            &mut self.sigma_py,
            &mut self.sigma_qx,
            &mut self.sigma_qy,
        ] {
            s.show(ui);
        }
    }

    fn draw(&self, ui: &mut Ui, theme: &Theme) {
        let (p, q) = match self.distributions() {
            Ok(pq) => pq,
            Err(e) => {
                ui.colored_label(theme.bad, e.to_string());
                return;
            }
        };
        let kl = kl_divergence(&p, &q);
        let distance = (q.mean[0] - p.mean[0]).hypot(q.mean[1] - p.mean[1]);

        ui.label(RichText::new(format!("KL(P‖Q) ≈ {kl:.3}")).color(theme.fg).strong());
        Plot::new("kl_plot")
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_x(-4.0)
            .include_x(4.0)
            .include_y(-4.0)
            .include_y(4.0)
            .show(ui, |plot_ui| {
                Self::shading(plot_ui, "P", &p, theme.accent);
                Self::shading(plot_ui, "Q", &q, theme.accent2);
                Self::contours(plot_ui, "P", &p, theme.accent);
                Self::contours(plot_ui, "Q", &q, theme.accent2);
                plot_ui.points(
                    Points::new("means", PlotPoints::from(vec![p.mean, q.mean]))
                        .radius(4.0)
                        .color(theme.fg),
                );
                if distance > 1e-9 {
                    plot_ui.arrows(
                        Arrows::new(
                            "distance",
                            PlotPoints::from(vec![p.mean]),
                            PlotPoints::from(vec![q.mean]),
                        )
                        .color(theme.amber),
                    );
                }
                let mid = PlotPoint::new(
                    (p.mean[0] + q.mean[0]) / 2.0,
                    (p.mean[1] + q.mean[1]) / 2.0 + 0.25,
                );
                plot_ui.text(
                    Text::new("distance label", mid, RichText::new(format!("{distance:.2}")).small())
                        .color(theme.amber),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(mean: [f64; 2], sigma: [f64; 2]) -> DiagGaussian {
        DiagGaussian::new(mean, sigma).expect("gaussian")
    }

    #[test]
    fn identical_distributions_have_zero_divergence() {
        let p = g([0.3, -1.0], [1.2, 0.7]);
        assert!(kl_divergence(&p, &p).abs() < 1e-12);
    }

    #[test]
    fn pure_shift_matches_half_squared_mahalanobis() {
        let p = g([0.0, 0.0], [1.0, 1.0]);
        let q = g([1.0, 0.0], [1.0, 1.0]);
        assert!((kl_divergence(&p, &q) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn divergence_is_asymmetric_and_non_negative() {
        let p = g([0.0, 0.0], [1.0, 1.0]);
        let q = g([1.0, 0.0], [1.4, 0.8]);
        let pq = kl_divergence(&p, &q);
        let qp = kl_divergence(&q, &p);
        assert!(pq > 0.0 && qp > 0.0);
        assert!((pq - qp).abs() > 1e-3);
    }

    #[test]
    fn density_peaks_at_the_mean() {
        let p = g([1.0, 2.0], [1.0, 1.0]);
        let peak = p.density(1.0, 2.0);
        assert!((peak - 1.0 / (2.0 * PI)).abs() < 1e-12);
        assert!(p.density(2.0, 2.0) < peak);
    }

    #[test]
    fn density_bands_rise_towards_the_mean() {
        let p = g([0.0, 0.0], [1.0, 1.0]);
        let bands = p.density_bands(61, 6);
        assert_eq!(bands.len(), 5);
        assert!(bands[4].iter().any(|[x, y]| x.abs() < 1e-9 && y.abs() < 1e-9));
        let peak = p.density(0.0, 0.0);
        for (i, band) in bands.iter().enumerate() {
            for &[x, y] in band {
                assert!(p.density(x, y) / peak >= (i + 1) as f64 / 6.0 - 1e-12);
            }
        }
        // Far corners are too faint to shade.
        assert!(bands.iter().flatten().all(|[x, y]| x.hypot(*y) < 4.0));
        assert!(p.density_bands(1, 6).iter().all(Vec::is_empty));
    }

    #[test]
    fn ellipse_is_closed_and_on_the_contour() {
        let p = g([1.0, -1.0], [2.0, 0.5]);
        let pts = p.ellipse(1.0);
        let (first, last) = (pts[0], pts[pts.len() - 1]);
        assert!((first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9);
        for [x, y] in pts {
            let r = ((x - 1.0) / 2.0).powi(2) + ((y + 1.0) / 0.5).powi(2);
            assert!((r - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn non_positive_sigma_is_rejected() {
        assert!(DiagGaussian::new([0.0, 0.0], [0.0, 1.0]).is_err());
        assert!(DiagGaussian::new([0.0, 0.0], [1.0, -2.0]).is_err());
    }

    #[test]
    fn default_sliders_give_a_positive_divergence() {
        let viz = KlViz::new().expect("viz");
        let (p, q) = viz.distributions().expect("distributions");
        assert_eq!(q.mean, [1.0, 0.0]);
        assert!(kl_divergence(&p, &q) > 0.0);
    }
}
