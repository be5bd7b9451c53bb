//! Named decks and a file-backed deck store
//!
//! A deck wraps the question list a spin produced. The store is a single
//! JSON array, newest first. An absent or unreadable store reads as empty.

use crate::corpus::{Occasion, ProcessedQuestion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DeckResult<T> = Result<T, DeckError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub occasion: Occasion,
    pub questions: Vec<ProcessedQuestion>,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(
        name: impl Into<String>,
        occasion: Occasion,
        questions: Vec<ProcessedQuestion>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            occasion,
            questions,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All decks, newest first
    pub fn list(&self) -> Vec<Deck> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(decks) => decks,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "deck store unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Deck> {
        self.list().into_iter().find(|d| d.id == id)
    }

    pub fn save(&self, deck: Deck) -> DeckResult<()> {
        let mut decks = self.list();
        decks.insert(0, deck);
        self.write(&decks)
    }

    /// Remove a deck by id; returns whether one was removed
    pub fn delete(&self, id: &str) -> DeckResult<bool> {
        let mut decks = self.list();
        let before = decks.len();
        decks.retain(|d| d.id != id);
        if decks.len() == before {
            return Ok(false);
        }
        self.write(&decks)?;
        Ok(true)
    }

    fn write(&self, decks: &[Deck]) -> DeckResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(decks)?)?;
        Ok(())
    }
}
