//! Value iteration on a grid world.

use egui::{RichText, Ui};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::controls::ParamSlider;
use super::heatmap::{self, SURFACE};
use super::{CHART_HEIGHT, Visualization};
use crate::config::Theme;
use crate::error::VizError;

pub const GRID: usize = 26;

const MOVES: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Rewards and current value estimate, row-major.
#[derive(Debug, Clone)]
pub struct ValueGrid {
    width: usize,
    height: usize,
    reward: Vec<f64>,
    value: Vec<f64>,
    sweeps: u64,
}

impl ValueGrid {
    /// Gentle reward hill peaking at the centre, plus a little noise.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self, VizError> {
        if width == 0 || height == 0 {
            return Err(VizError::InvalidParameter {
                name: "grid size",
                value: (width.min(height)) as f64,
            });
        }
        let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
        let mut reward = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let (dx, dy) = (x as f64 - cx, y as f64 - cy);
                let r2 = dx * dx + dy * dy;
                reward.push(2.0 * (-r2 / 100.0).exp() + 0.1 * (rng.r#gen::<f64>() - 0.5));
            }
        }
        Ok(Self {
            width,
            height,
            reward,
            value: vec![0.0; width * height],
            sweeps: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    #[cfg(test)]
    pub(crate) fn reward(&self) -> &[f64] {
        &self.reward
    }

    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    fn neighbour(&self, x: usize, y: usize, (dx, dy): (isize, isize)) -> f64 {
        let nx = x.saturating_add_signed(dx).min(self.width - 1);
        let ny = y.saturating_add_signed(dy).min(self.height - 1);
        self.value[ny * self.width + nx]
    }

    /// One synchronous Bellman backup. With probability `noise` the move
    /// goes to a uniformly random neighbour instead of the intended one.
    pub fn sweep(&mut self, gamma: f64, noise: f64) {
        let mut next = vec![0.0; self.value.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let slip: f64 = MOVES
                    .iter()
                    .map(|&m| self.neighbour(x, y, m))
                    .sum::<f64>()
                    * noise
                    / MOVES.len() as f64;
                let best = MOVES
                    .iter()
                    .map(|&m| (1.0 - noise) * self.neighbour(x, y, m) + slip)
                    .fold(f64::NEG_INFINITY, f64::max);
                let i = y * self.width + x;
                next[i] = self.reward[i] + gamma * best;
            }
        }
        self.value = next;
        self.sweeps += 1;
    }

    pub fn max_value(&self) -> f64 {
        self.value.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

pub struct BellmanViz {
    grid: ValueGrid,
    gamma: ParamSlider,
    noise: ParamSlider,
}

impl BellmanViz {
    pub fn new(seed: u64) -> Result<Self, VizError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(Self {
            grid: ValueGrid::new(GRID, GRID, &mut rng)?,
            gamma: ParamSlider::new("Discount γ", 0.90, 0.5, 0.99, 0.01),
            noise: ParamSlider::new("Transition noise", 0.10, 0.0, 0.4, 0.01),
        })
    }

    pub fn grid(&self) -> &ValueGrid {
        &self.grid
    }
}

impl Visualization for BellmanViz {
    fn title(&self) -> &'static str {
        "Value Function Surface"
    }

    // Both sliders are read on every step; nothing to rebuild.
    fn controls(&mut self, ui: &mut Ui) {
        self.gamma.show(ui);
        self.noise.show(ui);
    }

    fn animated(&self) -> bool {
        true
    }

    fn step(&mut self) {
        self.grid.sweep(self.gamma.value, self.noise.value);
    }

    fn draw(&self, ui: &mut Ui, theme: &Theme) {
        heatmap::heatmap(
            ui,
            self.grid.height(),
            self.grid.width(),
            self.grid.value(),
            SURFACE,
            CHART_HEIGHT,
        );
        ui.label(
            RichText::new(format!(
                "sweeps: {}   max V: {:.3}",
                self.grid.sweeps(),
                self.grid.max_value()
            ))
            .color(theme.fg.gamma_multiply(0.75))
            .small(),
        );
    }
}
