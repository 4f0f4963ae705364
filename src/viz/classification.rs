//! Logistic regression on two Gaussian blobs, trained one gradient step per frame.

use egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;

use super::controls::ParamSlider;
use super::{CHART_HEIGHT, Visualization, randn};
use crate::config::Theme;
use crate::error::VizError;

pub const SAMPLES: usize = 220;

/// Boundary is drawn over this x range.
const X_RANGE: [f64; 2] = [-4.0, 4.0];

#[derive(Debug, Clone)]
pub struct Blobs {
    pub points: Vec<[f64; 2]>,
    pub labels: Vec<u8>,
}

/// First half class 0 around (-1.2, -1), second half class 1 around (1.2, 1).
pub fn make_blobs<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Blobs, VizError> {
    if n < 2 {
        return Err(VizError::InvalidParameter {
            name: "samples",
            value: n as f64,
        });
    }
    let mut points = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let class = u8::from(i >= n / 2);
        let (cx, cy) = if class == 1 { (1.2, 1.0) } else { (-1.2, -1.0) };
        points.push([cx + 0.9 * randn(rng), cy + 0.7 * randn(rng)]);
        labels.push(class);
    }
    Ok(Blobs { points, labels })
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Logistic {
    pub w: [f64; 2],
    pub b: f64,
}

impl Logistic {
    pub fn predict(&self, p: [f64; 2]) -> f64 {
        sigmoid(self.w[0] * p[0] + self.w[1] * p[1] + self.b)
    }

    /// One batch gradient step on mean NLL + (λ/2)|w|².
    pub fn step(&mut self, data: &Blobs, lr: f64, lambda: f64) {
        let n = data.points.len() as f64;
        let (mut dw, mut db) = ([0.0; 2], 0.0);
        for (p, &y) in data.points.iter().zip(&data.labels) {
            let e = self.predict(*p) - f64::from(y);
            dw[0] += e * p[0];
            dw[1] += e * p[1];
            db += e;
        }
        self.w[0] -= lr * (dw[0] / n + lambda * self.w[0]);
        self.w[1] -= lr * (dw[1] / n + lambda * self.w[1]);
        self.b -= lr * (db / n);
    }

    /// Mean negative log-likelihood.
    pub fn loss(&self, data: &Blobs) -> f64 {
        let n = data.points.len() as f64;
        data.points
            .iter()
            .zip(&data.labels)
            .map(|(p, &y)| {
                let q = self.predict(*p).clamp(1e-12, 1.0 - 1e-12);
                if y == 1 { -q.ln() } else { -(1.0 - q).ln() }
            })
            .sum::<f64>()
            / n
    }

    pub fn accuracy(&self, data: &Blobs) -> f64 {
        let hits = data
            .points
            .iter()
            .zip(&data.labels)
            .filter(|&(p, &y)| u8::from(self.predict(*p) >= 0.5) == y)
            .count();
        hits as f64 / data.points.len() as f64
    }

    /// Endpoints of the decision boundary; flat at y = 0 while w₁ is ~0.
    pub fn boundary(&self) -> [[f64; 2]; 2] {
        if self.w[1].abs() < 1e-6 {
            return [[X_RANGE[0], 0.0], [X_RANGE[1], 0.0]];
        }
        X_RANGE.map(|x| [x, -(self.w[0] / self.w[1]) * x - self.b / self.w[1]])
    }
}

pub struct ClassificationViz {
    data: Blobs,
    model: Logistic,
    steps: u64,
    lr: ParamSlider,
    lambda: ParamSlider,
}

impl ClassificationViz {
    pub fn new(seed: u64) -> Result<Self, VizError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(Self {
            data: make_blobs(SAMPLES, &mut rng)?,
            model: Logistic::default(),
            steps: 0,
            lr: ParamSlider::new("Learning rate η", 0.3, 0.05, 1.0, 0.05),
            lambda: ParamSlider::new("L2 λ", 0.0, 0.0, 1.0, 0.05),
        })
    }

    pub fn model(&self) -> &Logistic {
        &self.model
    }

    fn class_points(&self, class: u8) -> Vec<[f64; 2]> {
        self.data
            .points
            .iter()
            .zip(&self.data.labels)
            .filter(|&(_, &y)| y == class)
            .map(|(p, _)| *p)
            .collect()
    }
}

impl Visualization for ClassificationViz {
    fn title(&self) -> &'static str {
        "Logistic Regression"
    }

    fn controls(&mut self, ui: &mut Ui) {
        self.lr.show(ui);
        self.lambda.show(ui);
    }

    fn animated(&self) -> bool {
        true
    }

    fn step(&mut self) {
        self.model.step(&self.data, self.lr.value, self.lambda.value);
        self.steps += 1;
    }

    fn draw(&self, ui: &mut Ui, theme: &Theme) {
        let [a, b] = self.model.boundary();
        Plot::new("classification_plot")
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_x(-4.0)
            .include_x(4.0)
            .include_y(-4.0)
            .include_y(4.0)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new("class 0", PlotPoints::from(self.class_points(0)))
                        .radius(3.0)
                        .color(theme.accent),
                );
                plot_ui.points(
                    Points::new("class 1", PlotPoints::from(self.class_points(1)))
                        .radius(3.0)
                        .color(theme.accent2),
                );
                plot_ui.line(
                    Line::new("boundary", PlotPoints::from(vec![a, b]))
                        .color(theme.amber)
                        .width(3.0),
                );
            });
        ui.label(
            RichText::new(format!(
                "step {}   loss {:.4}   accuracy {:.1}%",
                self.steps,
                self.model.loss(&self.data),
                100.0 * self.model.accuracy(&self.data)
            ))
            .color(theme.fg.gamma_multiply(0.75))
            .small(),
        );
    }
}
