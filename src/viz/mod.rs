//! Visualizations revealed after a puzzle is solved.
//!
//! Each puzzle binds a [`VizKind`]; [`build`] turns it into a live
//! [`Visualization`] that owns its dataset, its sliders and its random
//! source. Factories only see the kind and a seed, so they cannot reach
//! session state.

pub mod attention;
pub mod bellman;
pub mod classification;
pub mod controls;
pub mod heatmap;
pub mod kl;
pub mod stage;
pub mod swiss_roll;

use std::f64::consts::PI;

use egui::Ui;
use rand::Rng;

use crate::config::Theme;
use crate::error::VizError;
use crate::model::VizKind;

pub use stage::{AnimationHandle, Stage, StageState};

pub trait Visualization {
    fn title(&self) -> &'static str;

    /// Draws the sliders and reacts to their changes.
    fn controls(&mut self, ui: &mut Ui);

    /// Whether [`Visualization::step`] does anything (enables Play/Pause).
    fn animated(&self) -> bool {
        false
    }

    /// One simulation step per animation frame.
    fn step(&mut self) {}

    fn draw(&self, ui: &mut Ui, theme: &Theme);
}

pub fn build(kind: VizKind, seed: u64) -> Result<Box<dyn Visualization>, VizError> {
    log::debug!("building {kind:?} visualization (seed {seed})");
    Ok(match kind {
        VizKind::Bellman => Box::new(bellman::BellmanViz::new(seed)?),
        VizKind::Classification => Box::new(classification::ClassificationViz::new(seed)?),
        VizKind::SwissRoll => Box::new(swiss_roll::SwissRollViz::new(seed)?),
        VizKind::Attention => Box::new(attention::AttentionViz::new(seed)?),
        VizKind::Kl => Box::new(kl::KlViz::new()?),
    })
}

/// Standard normal sample (Box-Muller).
pub fn randn<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = 1.0 - rng.r#gen::<f64>();
    let v: f64 = rng.r#gen();
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Height used by every chart.
pub const CHART_HEIGHT: f32 = 360.0;
