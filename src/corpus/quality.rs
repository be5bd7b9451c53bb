//! Quality filter: drops records that don't work as conversation prompts

use super::types::{QuestionSignals, FORMAT_TRIVIA, GAME_TRUTH_OR_DARE};
use crate::config::QualityConfig;

/// Why a record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Trivia,
    TooShort,
    NotAQuestion,
    Dare,
}

/// Pure predicate over raw records
#[derive(Debug, Clone, Default)]
pub struct QualityFilter {
    config: QualityConfig,
}

impl QualityFilter {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// First reason the record fails, if any.
    ///
    /// Length and suffix checks run on the trimmed text.
    pub fn check<Q: QuestionSignals>(&self, question: &Q) -> Result<(), Rejection> {
        if question.format() == FORMAT_TRIVIA {
            return Err(Rejection::Trivia);
        }

        let text = question.text().trim();
        if text.chars().count() < self.config.min_text_len {
            return Err(Rejection::TooShort);
        }
        if question.game_type() == Some(GAME_TRUTH_OR_DARE) && !text.contains('?') {
            return Err(Rejection::Dare);
        }
        if !text.ends_with('?') {
            return Err(Rejection::NotAQuestion);
        }

        Ok(())
    }

    pub fn is_acceptable<Q: QuestionSignals>(&self, question: &Q) -> bool {
        self.check(question).is_ok()
    }
}
