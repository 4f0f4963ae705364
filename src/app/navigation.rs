use super::*;
use crate::session::PuzzleChanged;

impl PlaygroundApp {
    pub fn next(&mut self) {
        let changed = self.session.go_to_next();
        self.on_puzzle_changed(changed);
    }

    pub fn previous(&mut self) {
        let changed = self.session.go_to_previous();
        self.on_puzzle_changed(changed);
    }

    /// The old visualization goes first so its loop cannot run another frame.
    fn on_puzzle_changed(&mut self, changed: PuzzleChanged) {
        self.stage.clear();
        self.input.clear();
        self.feedback = None;
        self.hint = None;
        self.show_explanation = false;
        log::debug!(
            "showing puzzle {} ({})",
            changed.index + 1,
            self.session.current().key
        );
    }
}
