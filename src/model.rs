use serde::{Deserialize, Serialize};

/// Marker the catalog uses for the missing part of a formula.
pub const BLANK: &str = "___";

/// Which toy model a puzzle reveals once solved.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VizKind {
    Bellman,
    Classification,
    SwissRoll,
    Attention,
    Kl,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Puzzle {
    pub key: String,
    pub prompt: String, // TeX with a single `___`
    pub accept: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    pub viz: VizKind,
}

impl Puzzle {
    /// First accepted entry, shown as the solution after unlock.
    pub fn canonical_answer(&self) -> &str {
        self.accept.first().map(String::as_str).unwrap_or_default()
    }

    pub fn blank_count(&self) -> usize {
        self.prompt.matches(BLANK).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
}
