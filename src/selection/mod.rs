//! Runtime selection over the curated dataset
//!
//! The index is loaded once and shared read-only. Each request composes the
//! occasion filter with the spin engine and is independent of every other.

mod filter;
mod index;
pub mod pages;
mod spin;

pub use filter::{OccasionFilter, QuestionQuery};
pub use index::{DatasetError, DatasetResult, QuestionIndex};
pub use pages::{occasion_page, OccasionPage, OCCASION_PAGES};
pub use spin::{LockMap, SpinEngine, SpinResponse, SpinResult};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::corpus::{ArcStage, ProcessedQuestion};

    pub fn question(id: &str, stage: ArcStage) -> ProcessedQuestion {
        tagged(id, stage, &[], &[])
    }

    pub fn tagged(
        id: &str,
        stage: ArcStage,
        tones: &[&str],
        audiences: &[&str],
    ) -> ProcessedQuestion {
        ProcessedQuestion {
            id: id.to_string(),
            text: format!("Question {}?", id),
            slug: id.to_string(),
            option_a: None,
            option_b: None,
            format: "open_ended".to_string(),
            arc_position: stage,
            arc_label: stage.label().to_string(),
            tones: tones.iter().map(|t| t.to_string()).collect(),
            audiences: audiences.iter().map(|a| a.to_string()).collect(),
            category: String::new(),
            occasions: Vec::new(),
        }
    }
}
