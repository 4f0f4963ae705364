use crate::config::{PlaygroundOptions, Theme};
use crate::data::{Catalog, read_puzzles_embedded};
use crate::error::PlaygroundError;
use crate::session::Session;
use crate::tex::{self, MathRenderer};
use crate::viz::Stage;
use rand::SeedableRng;
use rand::rngs::StdRng;

// Submodules
pub mod actions;
pub mod navigation;
pub mod queries;

/// Seconds a hint bubble stays on screen.
pub const HINT_VISIBLE_SECS: f64 = 2.8;

/// Streak from which correct answers are celebrated.
pub const CELEBRATE_STREAK: u32 = 3;

pub const CORRECT_TEXT: &str = "Correct! Visualization unlocked.";
pub const INCORRECT_TEXT: &str = "Not quite. Try again or hit Hint.";
pub const NO_EXPLANATION_TEXT: &str = "No explanation available for this puzzle.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub tone: Tone,
    pub celebrate: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HintBubble {
    pub text: String,
    /// `egui` input time (seconds) when the bubble appeared.
    pub shown_at: f64,
}

/// Everything the widget shows: the session, the chart stage and the
/// transient bits of UI state around them.
pub struct PlaygroundApp {
    pub session: Session,
    pub stage: Stage,
    pub theme: Theme,
    pub math: Box<dyn MathRenderer>,
    pub input: String,
    pub feedback: Option<Feedback>,
    pub hint: Option<HintBubble>,
    pub show_explanation: bool,
    rng: StdRng,
}

impl PlaygroundApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        options: PlaygroundOptions,
    ) -> Result<Self, PlaygroundError> {
        let catalog = read_puzzles_embedded()?;
        let app = Self::with_catalog(catalog, &options);
        app.theme.apply(&cc.egui_ctx);
        log::info!(
            "research playground ready with {} puzzles",
            app.session.catalog().len()
        );
        Ok(app)
    }

    /// Builds the app without touching any egui context.
    pub fn with_catalog(catalog: Catalog, options: &PlaygroundOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            session: Session::new(catalog),
            stage: Stage::default(),
            theme: Theme::from_overrides(&options.theme),
            math: tex::renderer(options.typeset),
            input: String::new(),
            feedback: None,
            hint: None,
            show_explanation: false,
            rng,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn app() -> PlaygroundApp {
        let catalog = read_puzzles_embedded().expect("embedded catalog");
        let options = PlaygroundOptions {
            seed: Some(7),
            ..PlaygroundOptions::default()
        };
        PlaygroundApp::with_catalog(catalog, &options)
    }
}
