//! Shared fixtures for integration tests
//!
//! Builds a small but varied raw corpus that touches every arc rule and
//! every occasion tag, plus helpers for writing it to disk.

#![allow(dead_code)]

use icebreaker_deck::corpus::FORMAT_BINARY;
use icebreaker_deck::RawQuestion;
use std::path::{Path, PathBuf};

/// A corpus with at least one record landing in each arc stage, a few
/// records the quality filter drops, and a near-duplicate pair.
pub fn sample_corpus() -> Vec<RawQuestion> {
    vec![
        RawQuestion::new("ice-1", "What's the silliest thing you believed as a kid?")
            .with_tones(&["funny"])
            .with_audiences(&["family", "kids"]),
        RawQuestion::new("ice-2", "Which superpower would be the most useless?")
            .with_audiences(&["friends"]),
        RawQuestion::new("curious-1", "Where did you grow up, and what was it like?")
            .with_category("get_to_know")
            .with_audiences(&["adults"]),
        RawQuestion::new("curious-2", "How do you usually spend a Sunday morning?"),
        RawQuestion::new("deep-1", "What belief of yours has changed the most?")
            .with_tones(&["deep"])
            .with_audiences(&["couples"]),
        RawQuestion::new("deep-2", "If you could relive any moment, which would it be?")
            .with_category("hypothetical"),
        RawQuestion::new("heat-1", "What's the boldest thing you've done on a date?")
            .with_tones(&["spicy", "flirty"])
            .with_audiences(&["dating"]),
        RawQuestion::new("heat-2", "Which popular opinion do you think is wrong?")
            .with_tones(&["controversial"])
            .with_audiences(&["friends"]),
        RawQuestion::new("round-1", "Would you rather explore space or the deep sea?")
            .with_format(FORMAT_BINARY)
            .with_options("Space", "The deep sea")
            .with_tones(&["spicy", "controversial"]),
        RawQuestion::new("high-1", "What's a dream you haven't told anyone about?")
            .with_audiences(&["couples", "married"]),
        RawQuestion::new("high-2", "Who are you most grateful for this year?")
            .with_audiences(&["family"]),
        // Dropped: trivia, too short, statement, dare, near-duplicate
        RawQuestion::new("drop-trivia", "Which planet has the most moons?").with_format("trivia"),
        RawQuestion::new("drop-short", "Why so?"),
        RawQuestion::new("drop-statement", "Describe your perfect weekend in detail.   "),
        RawQuestion::new("drop-dare", "Do your best impression of a celebrity")
            .with_game_type("truth_or_dare"),
        RawQuestion::new("drop-dup", "what's the SILLIEST thing you believed as a kid??")
            .with_tones(&["deep"]),
    ]
}

/// Number of records in `sample_corpus` that survive filtering and dedup
pub const SAMPLE_SURVIVORS: usize = 11;

/// Write a corpus as JSON into `dir`, returning its path
pub fn write_corpus(dir: &Path, corpus: &[RawQuestion]) -> PathBuf {
    let path = dir.join("unified_questions.json");
    let json = serde_json::to_string_pretty(corpus).expect("corpus serializes");
    std::fs::write(&path, json).expect("corpus written");
    path
}
