//! In-memory question index, built once from the curated dataset

use crate::corpus::{ArcStage, ProcessedQuestion};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while loading the curated dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error reading dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Read-only lookup structure over the curated dataset.
///
/// Nothing mutates the index after construction, so a shared reference can
/// serve any number of concurrent selection requests.
#[derive(Debug, Clone, Default)]
pub struct QuestionIndex {
    questions: Vec<ProcessedQuestion>,
    by_id: HashMap<String, usize>,
    /// Indices into `questions`, one bucket per arc stage, in dataset order
    by_arc: [Vec<usize>; 6],
}

impl QuestionIndex {
    pub fn new(questions: Vec<ProcessedQuestion>) -> Self {
        let mut by_id = HashMap::with_capacity(questions.len());
        let mut by_arc: [Vec<usize>; 6] = Default::default();

        for (i, q) in questions.iter().enumerate() {
            if by_id.insert(q.id.clone(), i).is_some() {
                warn!(id = %q.id, "duplicate question id, later record wins lookup");
            }
            by_arc[q.arc_position.position() as usize - 1].push(i);
        }

        Self {
            questions,
            by_id,
            by_arc,
        }
    }

    /// Load a curated dataset file written by the pipeline
    pub fn load(path: &Path) -> DatasetResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let questions: Vec<ProcessedQuestion> = serde_json::from_str(&content)?;
        info!(count = questions.len(), path = %path.display(), "loaded question index");
        Ok(Self::new(questions))
    }

    /// Every question, in dataset order
    pub fn all(&self) -> &[ProcessedQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProcessedQuestion> {
        self.by_id.get(id).map(|&i| &self.questions[i])
    }

    /// Questions in one arc, in dataset order
    pub fn by_arc(&self, stage: ArcStage) -> Vec<&ProcessedQuestion> {
        self.by_arc[stage.position() as usize - 1]
            .iter()
            .map(|&i| &self.questions[i])
            .collect()
    }

    /// Like [`by_arc`](Self::by_arc) but keyed by raw position; unknown
    /// positions yield an empty list
    pub fn by_arc_position(&self, position: u8) -> Vec<&ProcessedQuestion> {
        ArcStage::from_position(position)
            .map(|stage| self.by_arc(stage))
            .unwrap_or_default()
    }
}

impl From<Vec<ProcessedQuestion>> for QuestionIndex {
    fn from(questions: Vec<ProcessedQuestion>) -> Self {
        Self::new(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::test_support::question;

    fn index() -> QuestionIndex {
        QuestionIndex::new(vec![
            question("a", ArcStage::GoDeeper),
            question("b", ArcStage::BreakTheIce),
            question("c", ArcStage::GoDeeper),
        ])
    }

    #[test]
    fn lookup_by_id() {
        let index = index();
        assert_eq!(index.get("b").unwrap().arc_position, ArcStage::BreakTheIce);
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn arc_buckets_preserve_dataset_order() {
        let index = index();
        let ids: Vec<_> = index.by_arc(ArcStage::GoDeeper).iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn unknown_or_empty_arcs_are_empty_lists() {
        let index = index();
        assert!(index.by_arc(ArcStage::PlayARound).is_empty());
        assert!(index.by_arc_position(0).is_empty());
        assert!(index.by_arc_position(42).is_empty());
        assert_eq!(index.by_arc_position(2).len(), 0);
        assert_eq!(index.by_arc_position(3).len(), 2);
    }

    #[test]
    fn all_keeps_order() {
        let index = index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.all()[1].id, "b");
    }
}
