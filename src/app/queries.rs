use super::*;
use crate::model::Puzzle;

impl PlaygroundApp {
    pub fn puzzle(&self) -> &Puzzle {
        self.session.current()
    }

    pub fn step_label(&self) -> String {
        format!(
            "Puzzle {} / {}",
            self.session.current_index() + 1,
            self.session.catalog().len()
        )
    }

    /// Prompt as shown: typeset when possible, raw TeX otherwise.
    pub fn prompt_text(&self) -> String {
        tex::display(self.math.as_ref(), &self.puzzle().prompt)
    }

    /// Canonical answer, only once the puzzle is solved.
    pub fn solution_text(&self) -> Option<String> {
        self.session
            .is_unlocked()
            .then(|| tex::display(self.math.as_ref(), self.puzzle().canonical_answer()))
    }

    pub fn explanation_text(&self) -> &str {
        self.puzzle()
            .explanation
            .as_deref()
            .unwrap_or(NO_EXPLANATION_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::app;
    use super::*;
    use crate::model::BLANK;

    #[test]
    fn step_label_counts_from_one() {
        let mut app = app();
        assert_eq!(app.step_label(), "Puzzle 1 / 5");
        app.previous();
        assert_eq!(app.step_label(), "Puzzle 5 / 5");
    }

    #[test]
    fn prompt_keeps_the_blank() {
        let app = app();
        let shown = app.prompt_text();
        assert_eq!(shown.matches(BLANK).count(), 1);
        assert!(!shown.contains("\\max"));
    }

    #[test]
    fn raw_markup_when_typesetting_is_off() {
        let catalog = read_puzzles_embedded().expect("catalog");
        let options = PlaygroundOptions {
            typeset: false,
            seed: Some(1),
            ..PlaygroundOptions::default()
        };
        let app = PlaygroundApp::with_catalog(catalog, &options);
        assert_eq!(app.prompt_text(), app.puzzle().prompt);
    }

    #[test]
    fn solution_appears_after_unlock() {
        let mut app = app();
        assert_eq!(app.solution_text(), None);
        app.input = "discount".into();
        app.submit();
        assert_eq!(app.solution_text().as_deref(), Some("γ"));
        assert!(app.explanation_text().starts_with("The Bellman equation"));
    }

    #[test]
    fn operator_words_are_spaced_in_prompt_and_solution() {
        let mut app = app();
        app.next();
        app.next();
        assert_eq!(app.puzzle().key, "swiss");
        assert!(app.prompt_text().contains("t cos t"));
        app.input = "t\\sin t".into();
        app.submit();
        assert_eq!(app.solution_text().as_deref(), Some("t sin t"));
    }
}
