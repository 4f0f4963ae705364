// src/data.rs

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::model::Puzzle;

/// Ordered, validated and immutable list of puzzles. Never empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    puzzles: Vec<Puzzle>,
}

impl Catalog {
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self, CatalogError> {
        if puzzles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut keys = HashSet::new();
        for p in &puzzles {
            if !keys.insert(p.key.as_str()) {
                return Err(CatalogError::DuplicateKey(p.key.clone()));
            }
            let found = p.blank_count();
            if found != 1 {
                return Err(CatalogError::BlankCount {
                    key: p.key.clone(),
                    found,
                });
            }
            if p.accept.iter().all(|a| a.trim().is_empty()) {
                return Err(CatalogError::NoAcceptedAnswers(p.key.clone()));
            }
        }

        Ok(Self { puzzles })
    }

    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let puzzles: Vec<Puzzle> = serde_yaml::from_str(content)?;
        Self::new(puzzles)
    }

    /// Never zero for a validated catalog.
    pub(crate) fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn as_slice(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.iter()
    }

    #[cfg(test)]
    pub(crate) fn find(&self, key: &str) -> Option<&Puzzle> {
        self.puzzles.iter().find(|p| p.key == key)
    }
}

/// Loads the built-in puzzles from the embedded YAML.
pub fn read_puzzles_embedded() -> Result<Catalog, CatalogError> {
    let file_content = include_str!("data/puzzles.yaml");
    let catalog = Catalog::from_yaml(file_content)?;
    log::debug!("loaded {} puzzles", catalog.len());
    Ok(catalog)
}
