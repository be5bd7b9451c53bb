//! Icebreaker Deck: conversation-arc question curation and selection
//!
//! Two coupled halves share one vocabulary of arc stages and occasions.
//!
//! # Core Concepts
//!
//! - **Corpus pipeline**: an offline pass that filters, deduplicates, and
//!   classifies raw question records into a curated dataset
//! - **Arc stages**: six ordered slots a conversation moves through, from
//!   breaking the ice to ending on a high
//! - **Occasions**: contexts that exclude some tones and prefer some
//!   audiences at selection time
//! - **Spin**: one randomized draw per arc slot, keeping caller-locked slots
//!
//! # Example
//!
//! ```
//! use icebreaker_deck::{
//!     DatasetBuilder, LockMap, Occasion, OccasionFilter, QuestionIndex, RawQuestion, SpinEngine,
//! };
//!
//! let dataset = DatasetBuilder::default().build(vec![
//!     RawQuestion::new("q-1", "What's the silliest thing you believed as a kid?"),
//! ]);
//! let index = QuestionIndex::new(dataset.questions);
//! let engine = SpinEngine::new(&index, OccasionFilter::default());
//! let result = engine.spin(&LockMap::new(), Occasion::All);
//! assert_eq!(result.len(), 1);
//! ```

pub mod config;
pub mod corpus;
pub mod deck;
pub mod selection;

pub use config::{Config, ConfigError, QualityConfig, SelectionConfig};
pub use corpus::{
    arc_slots, classify, derive_occasions, ArcSlot, ArcStage, BuildReport, CuratedDataset,
    DatasetBuilder, Occasion, PipelineError, PipelineResult, ProcessedQuestion, QualityFilter,
    QuestionSignals, RawQuestion,
};
pub use deck::{Deck, DeckError, DeckStore};
pub use selection::{
    DatasetError, LockMap, OccasionFilter, QuestionIndex, QuestionQuery, SpinEngine, SpinResponse,
    SpinResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
