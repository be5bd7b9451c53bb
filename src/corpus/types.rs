//! Question record types for the raw corpus and the curated dataset

use super::arc::ArcStage;
use super::occasion::Occasion;
use serde::{Deserialize, Serialize};

/// Format tag for binary-choice ("would you rather", this-or-that) records
pub const FORMAT_BINARY: &str = "binary";

/// Format tag for trivia records (not conversational)
pub const FORMAT_TRIVIA: &str = "trivia";

/// Game type tag for truth-or-dare records
pub const GAME_TRUTH_OR_DARE: &str = "truth_or_dare";

/// A record from the external corpus, read-only to this crate.
///
/// Provenance fields are carried through deserialization but play no part
/// in classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub option_a: Option<String>,
    #[serde(default)]
    pub option_b: Option<String>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub audiences: Vec<String>,
    #[serde(default)]
    pub tones: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub source_section: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RawQuestion {
    /// Create a bare record with the given id and text
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_options(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.option_a = Some(a.into());
        self.option_b = Some(b.into());
        self
    }

    pub fn with_game_type(mut self, game_type: impl Into<String>) -> Self {
        self.game_type = Some(game_type.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tones(mut self, tones: &[&str]) -> Self {
        self.tones = tones.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_audiences(mut self, audiences: &[&str]) -> Self {
        self.audiences = audiences.iter().map(|a| a.to_string()).collect();
        self
    }
}

/// A curated record, produced once by the dataset builder and immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedQuestion {
    pub id: String,
    pub text: String,
    pub slug: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub format: String,
    pub arc_position: ArcStage,
    pub arc_label: String,
    pub tones: Vec<String>,
    pub audiences: Vec<String>,
    pub category: String,
    /// Derived occasion labels. Empty means "general": still eligible
    /// everywhere the occasion filter does not exclude it.
    pub occasions: Vec<Occasion>,
}

/// Read access to the fields classification depends on.
///
/// Implemented by both record types so a curated question can be fed back
/// through the classifiers and must land where it was stored.
pub trait QuestionSignals {
    fn text(&self) -> &str;
    fn format(&self) -> &str;
    fn option_a(&self) -> Option<&str>;
    fn option_b(&self) -> Option<&str>;
    fn game_type(&self) -> Option<&str>;
    fn category(&self) -> &str;
    fn tones(&self) -> &[String];
    fn audiences(&self) -> &[String];

    fn has_tone(&self, tone: &str) -> bool {
        self.tones().iter().any(|t| t == tone)
    }

    fn has_any_tone(&self, tones: &[&str]) -> bool {
        self.tones().iter().any(|t| tones.contains(&t.as_str()))
    }

    fn has_any_audience(&self, audiences: &[&str]) -> bool {
        self.audiences().iter().any(|a| audiences.contains(&a.as_str()))
    }

    /// Binary format with both options present
    fn is_binary_choice(&self) -> bool {
        self.format() == FORMAT_BINARY && self.option_a().is_some() && self.option_b().is_some()
    }
}

impl QuestionSignals for RawQuestion {
    fn text(&self) -> &str {
        &self.text
    }
    fn format(&self) -> &str {
        &self.format
    }
    fn option_a(&self) -> Option<&str> {
        self.option_a.as_deref().filter(|s| !s.is_empty())
    }
    fn option_b(&self) -> Option<&str> {
        self.option_b.as_deref().filter(|s| !s.is_empty())
    }
    fn game_type(&self) -> Option<&str> {
        self.game_type.as_deref()
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn tones(&self) -> &[String] {
        &self.tones
    }
    fn audiences(&self) -> &[String] {
        &self.audiences
    }
}

impl QuestionSignals for ProcessedQuestion {
    fn text(&self) -> &str {
        &self.text
    }
    fn format(&self) -> &str {
        &self.format
    }
    fn option_a(&self) -> Option<&str> {
        self.option_a.as_deref().filter(|s| !s.is_empty())
    }
    fn option_b(&self) -> Option<&str> {
        self.option_b.as_deref().filter(|s| !s.is_empty())
    }
    fn game_type(&self) -> Option<&str> {
        None
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn tones(&self) -> &[String] {
        &self.tones
    }
    fn audiences(&self) -> &[String] {
        &self.audiences
    }
}
