//! Offline corpus classification pipeline
//!
//! Turns raw, heterogeneous question records into the curated dataset the
//! runtime index loads: quality filter, dedup, arc classification, and
//! occasion tagging.

pub mod arc;
mod builder;
mod dedup;
pub mod occasion;
mod quality;
mod types;

pub use arc::{arc_slots, classify, ArcSlot, ArcStage, ARC_SLOTS};
pub use builder::{
    load_corpus, write_dataset, BuildReport, CuratedDataset, DatasetBuilder, PipelineError,
    PipelineResult,
};
pub use dedup::{dedup, normalize_text};
pub use occasion::{derive_occasions, Occasion};
pub use quality::{QualityFilter, Rejection};
pub use types::{
    ProcessedQuestion, QuestionSignals, RawQuestion, FORMAT_BINARY, FORMAT_TRIVIA,
    GAME_TRUTH_OR_DARE,
};
