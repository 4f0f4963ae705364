use super::*;
use crate::session::Submission;
use rand::RngCore;

impl PlaygroundApp {
    /// Checks the typed answer. A correct one mounts the puzzle's visualization.
    pub fn submit(&mut self) {
        match self.session.submit_answer(&self.input) {
            Submission::Ignored => {}
            Submission::Correct { streak } => {
                self.feedback = Some(Feedback {
                    text: CORRECT_TEXT.into(),
                    tone: Tone::Good,
                    celebrate: streak >= CELEBRATE_STREAK,
                });
                let kind = self.session.current().viz;
                let seed = self.rng.next_u64();
                self.stage.mount(kind, seed);
            }
            Submission::Incorrect => {
                self.feedback = Some(Feedback {
                    text: INCORRECT_TEXT.into(),
                    tone: Tone::Bad,
                    celebrate: false,
                });
            }
        }
    }

    /// Shows the next hint and clears the feedback line. Puzzles without
    /// hints leave everything as it is.
    pub fn show_hint(&mut self, now: f64) {
        let Some(text) = self.session.request_hint() else {
            return;
        };
        self.hint = Some(HintBubble {
            text: format!("Hint: {text}"),
            shown_at: now,
        });
        self.feedback = None;
    }

    /// Drops the hint bubble once it has been visible long enough.
    /// Returns the seconds left otherwise.
    pub fn expire_hint(&mut self, now: f64) -> Option<f64> {
        let shown_at = self.hint.as_ref()?.shown_at;
        let left = HINT_VISIBLE_SECS - (now - shown_at);
        if left <= 0.0 {
            self.hint = None;
            None
        } else {
            Some(left)
        }
    }

    pub fn toggle_explanation(&mut self) {
        self.show_explanation = !self.show_explanation;
    }

    pub fn toggle_play(&mut self) -> bool {
        let playing = self.stage.toggle_play();
        log::debug!("animation {}", if playing { "playing" } else { "paused" });
        playing
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::app;
    use super::*;
    use crate::viz::StageState;

    #[test]
    fn correct_answer_unlocks_and_mounts() {
        let mut app = app();
        app.input = " Gamma ".into();
        app.submit();
        assert!(app.session.is_unlocked());
        assert!(matches!(app.stage.state(), StageState::Live(_)));
        assert_eq!(app.stage.mounts(), 1);
        let fb = app.feedback.clone().expect("feedback");
        assert_eq!(fb.text, CORRECT_TEXT);
        assert_eq!(fb.tone, Tone::Good);
        assert!(!fb.celebrate);
    }

    #[test]
    fn resubmitting_does_not_remount() {
        let mut app = app();
        app.input = "\\gamma".into();
        app.submit();
        app.submit();
        app.input = "wrong".into();
        app.submit();
        assert_eq!(app.stage.mounts(), 1);
        assert_eq!(app.session.streak(), 1);
        assert_eq!(app.feedback.as_ref().map(|f| f.tone), Some(Tone::Good));
    }

    #[test]
    fn wrong_answer_keeps_stage_empty() {
        let mut app = app();
        app.input = "beta".into();
        app.submit();
        assert!(app.stage.is_empty());
        assert_eq!(app.feedback.as_ref().map(|f| f.text.as_str()), Some(INCORRECT_TEXT));
    }

    #[test]
    fn third_straight_solve_celebrates() {
        let mut app = app();
        for answer in ["gamma", "\\log \\hat{y}_i", "t\\sin t"] {
            app.input = answer.into();
            app.submit();
            assert!(app.session.is_unlocked(), "{answer} rejected");
            app.next();
        }
        assert_eq!(app.session.streak(), 3);
        app.previous();
        app.input = "t \\sin t".into();
        app.submit();
        assert!(app.feedback.as_ref().is_some_and(|f| f.celebrate));
    }

    #[test]
    fn hint_clears_feedback_and_expires() {
        let mut app = app();
        app.input = "nope".into();
        app.submit();
        app.show_hint(10.0);
        assert!(app.feedback.is_none());
        assert_eq!(
            app.hint.as_ref().map(|h| h.text.as_str()),
            Some("Hint: Discount factor symbol")
        );
        assert!(app.expire_hint(11.0).is_some());
        assert!(app.hint.is_some());
        assert_eq!(app.expire_hint(12.9), None);
        assert!(app.hint.is_none());
    }

    #[test]
    fn hints_clamp_to_the_last_one() {
        let mut app = app();
        for now in [0.0, 1.0, 2.0] {
            app.show_hint(now);
        }
        assert_eq!(
            app.hint.map(|h| h.text),
            Some("Hint: Greek letter, lower-case gamma".to_string())
        );
        assert_eq!(app.session.hints_used(), 3);
    }

    #[test]
    fn play_only_toggles_animated_visualizations() {
        let mut app = app();
        assert!(!app.toggle_play());
        app.input = "gamma".into();
        app.submit();
        assert!(app.toggle_play());
        assert!(app.stage.tick());
        assert!(!app.toggle_play());
    }
}
