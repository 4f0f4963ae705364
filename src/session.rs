//! Puzzle session state machine.
//!
//! The session owns the catalog and four transitions: submit, hint, next and
//! previous. None of them can fail. Rendering reacts to the values they
//! return and never writes session fields directly.

use crate::answer;
use crate::data::Catalog;
use crate::model::{LockState, Puzzle};

/// Result of [`Session::submit_answer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The puzzle was already unlocked; nothing changed.
    Ignored,
    /// Unlocked now. Build the visualization exactly once for this.
    Correct { streak: u32 },
    Incorrect,
}

/// Returned by navigation. The new puzzle is locked with no hints used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleChanged {
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    current_index: usize,
    streak: u32,
    lock: LockState,
    hints_used: usize,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            current_index: 0,
            streak: 0,
            lock: LockState::Locked,
            hints_used: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current(&self) -> &Puzzle {
        // Catalog is never empty and the index is always reduced modulo its length.
        &self.catalog.as_slice()[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_unlocked(&self) -> bool {
        self.lock == LockState::Unlocked
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub fn submit_answer(&mut self, text: &str) -> Submission {
        if self.is_unlocked() {
            return Submission::Ignored;
        }

        if answer::matches(text, &self.current().accept) {
            self.streak += 1;
            self.lock = LockState::Unlocked;
            log::info!(
                "puzzle {} solved, streak {}",
                self.current().key,
                self.streak
            );
            Submission::Correct {
                streak: self.streak,
            }
        } else {
            self.streak = 0;
            log::debug!("wrong answer for {}: {text:?}", self.current().key);
            Submission::Incorrect
        }
    }

    /// Next hint for the active puzzle; the last one repeats once exhausted.
    pub fn request_hint(&mut self) -> Option<&str> {
        let hints = &self.catalog.as_slice()[self.current_index].hints;
        let last = hints.len().checked_sub(1)?;
        let at = self.hints_used.min(last);
        self.hints_used += 1;
        Some(hints[at].as_str())
    }

    pub fn go_to_next(&mut self) -> PuzzleChanged {
        let n = self.catalog.len();
        self.activate((self.current_index + 1) % n)
    }

    pub fn go_to_previous(&mut self) -> PuzzleChanged {
        let n = self.catalog.len();
        self.activate((self.current_index + n - 1) % n)
    }

    fn activate(&mut self, index: usize) -> PuzzleChanged {
        self.current_index = index;
        self.lock = LockState::Locked;
        self.hints_used = 0;
        log::debug!("puzzle changed to {index}");
        PuzzleChanged { index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_puzzles_embedded;
    use crate::model::VizKind;

    fn session() -> Session {
        Session::new(read_puzzles_embedded().expect("catalog"))
    }

    fn single(hints: &[&str]) -> Session {
        let puzzle = Puzzle {
            key: "only".into(),
            prompt: "x = ___".into(),
            accept: vec!["1".into()],
            hints: hints.iter().map(|s| s.to_string()).collect(),
            explanation: None,
            viz: VizKind::Kl,
        };
        Session::new(Catalog::new(vec![puzzle]).expect("catalog"))
    }

    #[test]
    fn starts_locked_at_first_puzzle() {
        let s = session();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.streak(), 0);
        assert!(!s.is_unlocked());
        assert_eq!(s.hints_used(), 0);
        assert_eq!(s.current().key, "bellman");
    }

    #[test]
    fn every_accepted_answer_unlocks_and_counts_once() {
        let catalog = read_puzzles_embedded().expect("catalog");
        for (i, p) in catalog.iter().enumerate() {
            for a in &p.accept {
                let mut s = Session::new(catalog.clone());
                for _ in 0..i {
                    s.go_to_next();
                }
                assert_eq!(s.submit_answer(a), Submission::Correct { streak: 1 });
                assert!(s.is_unlocked());
            }
        }
    }

    #[test]
    fn wrong_answer_resets_streak_and_stays_locked() {
        let mut s = session();
        assert_eq!(s.submit_answer("gamma"), Submission::Correct { streak: 1 });
        s.go_to_next();
        assert_eq!(s.submit_answer("nope"), Submission::Incorrect);
        assert_eq!(s.streak(), 0);
        assert!(!s.is_unlocked());
    }

    #[test]
    fn submissions_after_unlock_are_ignored() {
        let mut s = session();
        let mut unlocks = 0;
        for text in ["gamma", "gamma", "wrong", "\\gamma", ""] {
            if let Submission::Correct { .. } = s.submit_answer(text) {
                unlocks += 1;
            }
        }
        assert_eq!(unlocks, 1);
        assert_eq!(s.streak(), 1);
        assert!(s.is_unlocked());
        assert_eq!(s.submit_answer("wrong"), Submission::Ignored);
    }

    #[test]
    fn streak_spans_puzzles_and_breaks_on_any_miss() {
        let mut s = session();
        assert_eq!(s.submit_answer(" Gamma "), Submission::Correct { streak: 1 });
        s.go_to_next();
        assert_eq!(s.submit_answer("\\log \\hat y_i"), Submission::Correct { streak: 2 });
        s.go_to_next();
        assert_eq!(s.submit_answer("t sin t"), Submission::Correct { streak: 3 });
        assert_eq!(s.streak(), 3);
        s.go_to_next();
        assert_eq!(s.submit_answer("sqrt(d)"), Submission::Incorrect);
        assert_eq!(s.streak(), 0);
    }

    #[test]
    fn streak_survives_navigation() {
        let mut s = session();
        s.submit_answer("gamma");
        s.go_to_next();
        s.go_to_previous();
        assert_eq!(s.streak(), 1);
        assert!(!s.is_unlocked());
    }

    #[test]
    fn hints_clamp_to_last_entry() {
        let mut s = single(&["first", "second", "third"]);
        let got: Vec<String> = (0..5)
            .filter_map(|_| s.request_hint().map(str::to_owned))
            .collect();
        assert_eq!(got, ["first", "second", "third", "third", "third"]);
        assert_eq!(s.hints_used(), 5);
    }

    #[test]
    fn empty_hint_list_is_a_no_op() {
        let mut s = single(&[]);
        assert_eq!(s.request_hint(), None);
        assert_eq!(s.hints_used(), 0);
    }

    #[test]
    fn hints_do_not_touch_streak_or_lock() {
        let mut s = session();
        s.submit_answer("gamma");
        assert_eq!(s.request_hint(), Some("Discount factor symbol"));
        assert_eq!(s.streak(), 1);
        assert!(s.is_unlocked());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut s = session();
        assert_eq!(s.go_to_previous(), PuzzleChanged { index: 4 });
        assert_eq!(s.go_to_next(), PuzzleChanged { index: 0 });
        for _ in 0..5 {
            s.go_to_next();
        }
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn next_then_previous_returns_and_resets() {
        for start in 0..5 {
            let mut s = session();
            for _ in 0..start {
                s.go_to_next();
            }
            let answer = s.current().accept[0].clone();
            s.submit_answer(&answer);
            s.request_hint();
            s.request_hint();

            s.go_to_next();
            s.go_to_previous();
            assert_eq!(s.current_index(), start);
            assert!(!s.is_unlocked());
            assert_eq!(s.hints_used(), 0);
        }
    }

    #[test]
    fn single_puzzle_catalog_navigates_to_itself() {
        let mut s = single(&["h"]);
        s.submit_answer("1");
        assert_eq!(s.go_to_next(), PuzzleChanged { index: 0 });
        assert!(!s.is_unlocked());
        assert_eq!(s.submit_answer("1"), Submission::Correct { streak: 2 });
    }
}
