//! Scaled dot-product attention weights for random queries and keys.

use egui::{RichText, Ui};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::controls::ParamSlider;
use super::heatmap::{self, ATTENTION};
use super::{CHART_HEIGHT, Visualization, randn};
use crate::config::Theme;
use crate::error::VizError;

pub const TOKENS: usize = 8;

/// Lowest temperature used in the scale.
const MIN_TEMPERATURE: f64 = 0.25;

pub type Matrix = Vec<Vec<f64>>;

pub fn rand_matrix<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    (0..rows)
        .map(|_| (0..cols).map(|_| randn(rng)).collect())
        .collect()
}

/// Row-wise softmax with the row maximum subtracted first.
pub fn softmax_rows(scores: &mut Matrix) {
    for row in scores.iter_mut() {
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut sum = 0.0;
        for v in row.iter_mut() {
            *v = (*v - max).exp();
            sum += *v;
        }
        for v in row.iter_mut() {
            *v /= sum;
        }
    }
}

/// softmax(Q Kᵀ / (√d_k · max(0.25, τ))), one row per query.
pub fn attention_weights(q: &Matrix, k: &Matrix, temperature: f64) -> Result<Matrix, VizError> {
    let d = q.first().map_or(0, Vec::len);
    if q.is_empty() || k.is_empty() || d == 0 {
        return Err(VizError::Degenerate("attention needs at least one query, key and dimension".into()));
    }
    if q.iter().chain(k).any(|row| row.len() != d) {
        return Err(VizError::Degenerate(format!("query and key widths differ from d_k = {d}")));
    }
    let scale = 1.0 / (d as f64).sqrt() / temperature.max(MIN_TEMPERATURE);
    let mut scores: Matrix = q
        .iter()
        .map(|qi| {
            k.iter()
                .map(|kj| qi.iter().zip(kj).map(|(a, b)| a * b).sum::<f64>() * scale)
                .collect()
        })
        .collect();
    softmax_rows(&mut scores);
    Ok(scores)
}

pub struct AttentionViz {
    rng: StdRng,
    q: Matrix,
    k: Matrix,
    weights: Matrix,
    d_k: ParamSlider,
    temperature: ParamSlider,
}

impl AttentionViz {
    pub fn new(seed: u64) -> Result<Self, VizError> {
        let mut viz = Self {
            rng: StdRng::seed_from_u64(seed),
            q: Vec::new(),
            k: Vec::new(),
            weights: Vec::new(),
            d_k: ParamSlider::new("d_k", 16.0, 2.0, 128.0, 1.0).integer(),
            temperature: ParamSlider::new("Temperature τ", 1.0, 0.5, 2.0, 0.05),
        };
        viz.resample()?;
        Ok(viz)
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Fresh Q and K at the current width.
    fn resample(&mut self) -> Result<(), VizError> {
        let d = self.d_k.as_usize();
        self.q = rand_matrix(TOKENS, d, &mut self.rng);
        self.k = rand_matrix(TOKENS, d, &mut self.rng);
        self.recompute()
    }

    fn recompute(&mut self) -> Result<(), VizError> {
        self.weights = attention_weights(&self.q, &self.k, self.temperature.value)?;
        Ok(())
    }
}

impl Visualization for AttentionViz {
    fn title(&self) -> &'static str {
        "Attention Weights"
    }

    fn controls(&mut self, ui: &mut Ui) {
        let resized = self.d_k.show(ui);
        let cooled = self.temperature.show(ui);
        let result = if resized {
            self.resample()
        } else if cooled {
            self.recompute()
        } else {
            Ok(())
        };
        if let Err(e) = result {
            log::warn!("attention weights not updated: {e}");
        }
    }

    fn draw(&self, ui: &mut Ui, theme: &Theme) {
        let flat: Vec<f64> = self.weights.iter().flatten().copied().collect();
        heatmap::heatmap(ui, self.weights.len(), TOKENS, &flat, ATTENTION, CHART_HEIGHT);
        ui.label(
            RichText::new("rows: queries · columns: keys · each row sums to 1")
                .color(theme.fg.gamma_multiply(0.75))
                .small(),
        );
    }
}
