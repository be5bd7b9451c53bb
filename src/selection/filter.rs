//! Occasion filtering over a slice of the index
//!
//! Exclusion is a hard rule; audience preference is a soft one that only
//! narrows the pool when the preferred subset is large enough.

use super::index::QuestionIndex;
use crate::config::SelectionConfig;
use crate::corpus::{Occasion, ProcessedQuestion, QuestionSignals};

#[derive(Debug, Clone, Copy, Default)]
pub struct OccasionFilter {
    config: SelectionConfig,
}

impl OccasionFilter {
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    pub fn prefer_floor(&self) -> usize {
        self.config.prefer_floor
    }

    /// Filter a pool for an occasion. The input is left untouched.
    pub fn apply<'a>(
        &self,
        questions: &[&'a ProcessedQuestion],
        occasion: Occasion,
    ) -> Vec<&'a ProcessedQuestion> {
        if occasion == Occasion::All {
            return questions.to_vec();
        }

        let excluded = occasion.exclude_tones();
        let pool: Vec<&'a ProcessedQuestion> = questions
            .iter()
            .copied()
            .filter(|q| !q.has_any_tone(excluded))
            .collect();

        let preferred_audiences = occasion.prefer_audiences();
        if preferred_audiences.is_empty() {
            return pool;
        }

        let preferred: Vec<&'a ProcessedQuestion> = pool
            .iter()
            .copied()
            .filter(|q| q.audiences.is_empty() || q.has_any_audience(preferred_audiences))
            .collect();

        if preferred.len() >= self.config.prefer_floor {
            preferred
        } else {
            pool
        }
    }
}

/// Read access for listing pages: occasion filter over the whole dataset,
/// then an optional single tone, then an optional cap.
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    pub occasion: Occasion,
    pub tone: Option<String>,
    pub limit: Option<usize>,
}

impl QuestionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occasion(mut self, occasion: Occasion) -> Self {
        self.occasion = occasion;
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute against the index, preserving dataset order
    pub fn execute<'a>(
        &self,
        index: &'a QuestionIndex,
        filter: &OccasionFilter,
    ) -> Vec<&'a ProcessedQuestion> {
        let all: Vec<&'a ProcessedQuestion> = index.all().iter().collect();
        let mut pool = filter.apply(&all, self.occasion);

        if let Some(ref tone) = self.tone {
            pool.retain(|q| q.has_tone(tone));
        }

        if let Some(limit) = self.limit {
            pool.truncate(limit);
        }

        pool
    }
}
