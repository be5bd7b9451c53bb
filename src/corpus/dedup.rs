//! Near-duplicate removal by normalized text

use super::types::QuestionSignals;
use std::collections::HashSet;

/// Lowercased text with everything outside `[a-z0-9]` stripped
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Keep the first record for each normalized text, preserving input order
pub fn dedup<Q: QuestionSignals>(questions: Vec<Q>) -> Vec<Q> {
    let mut seen = HashSet::new();
    questions
        .into_iter()
        .filter(|q| seen.insert(normalize_text(q.text())))
        .collect()
}
