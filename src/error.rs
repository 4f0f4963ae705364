//! Error types for the playground.
//!
//! Only initialization and the visualization boundary can fail. Session
//! transitions have no error path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("mount target not found: {0}")]
    MissingMount(String),

    #[error("puzzle catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("options parse error: {0}")]
    Options(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("catalog has no puzzles")]
    Empty,

    #[error("duplicate puzzle key: {0}")]
    DuplicateKey(String),

    #[error("puzzle {key}: prompt must contain exactly one blank, found {found}")]
    BlankCount { key: String, found: usize },

    #[error("puzzle {0}: accepted answer list is empty")]
    NoAcceptedAnswers(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum VizError {
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("degenerate dataset: {0}")]
    Degenerate(String),
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
