//! Landing-page catalog for occasion and occasion+tone listing pages
//!
//! Pages only compose the occasion filter with a tone and a cap. A tone page
//! with too few questions is treated as thin and not listed.

use super::filter::{OccasionFilter, QuestionQuery};
use super::index::QuestionIndex;
use crate::corpus::{Occasion, ProcessedQuestion};
use serde::Serialize;

/// Questions listed on an occasion or tone page
pub const TONE_PAGE_LIMIT: usize = 30;

/// Below this many questions a tone page is not rendered
pub const THIN_PAGE_MIN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccasionPage {
    pub slug: &'static str,
    pub occasion: Occasion,
    pub label: &'static str,
    pub tones: &'static [&'static str],
}

pub static OCCASION_PAGES: [OccasionPage; 5] = [
    OccasionPage {
        slug: "conversation-starters",
        occasion: Occasion::All,
        label: "Conversation Starters",
        tones: &["deep", "funny", "spicy", "random", "challenging", "weird"],
    },
    OccasionPage {
        slug: "date-night-questions",
        occasion: Occasion::DateNight,
        label: "Date Night Questions",
        tones: &["deep", "funny", "spicy", "flirty"],
    },
    OccasionPage {
        slug: "team-icebreakers",
        occasion: Occasion::Team,
        label: "Team Icebreakers",
        tones: &["funny", "deep", "random"],
    },
    OccasionPage {
        slug: "family-dinner-questions",
        occasion: Occasion::Family,
        label: "Family Dinner Questions",
        tones: &["funny", "deep", "random"],
    },
    OccasionPage {
        slug: "party-questions",
        occasion: Occasion::Party,
        label: "Party Questions",
        tones: &["funny", "spicy", "random", "weird"],
    },
];

pub fn occasion_page(slug: &str) -> Option<&'static OccasionPage> {
    OCCASION_PAGES.iter().find(|p| p.slug == slug)
}

impl OccasionPage {
    /// Heading for a tone page, e.g. "Funny Party Questions"
    pub fn tone_title(&self, tone: &str) -> String {
        let mut chars = tone.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{} {}", capitalized, self.label)
    }

    /// Questions listed on the occasion landing page
    pub fn questions<'a>(
        &self,
        index: &'a QuestionIndex,
        filter: &OccasionFilter,
    ) -> Vec<&'a ProcessedQuestion> {
        QuestionQuery::new()
            .with_occasion(self.occasion)
            .limit(TONE_PAGE_LIMIT)
            .execute(index, filter)
    }

    /// Questions for one tone page, or `None` when the tone isn't offered
    /// for this occasion or the page would be thin
    pub fn tone_questions<'a>(
        &self,
        tone: &str,
        index: &'a QuestionIndex,
        filter: &OccasionFilter,
    ) -> Option<Vec<&'a ProcessedQuestion>> {
        if !self.tones.contains(&tone) {
            return None;
        }
        let questions = QuestionQuery::new()
            .with_occasion(self.occasion)
            .with_tone(tone)
            .limit(TONE_PAGE_LIMIT)
            .execute(index, filter);
        (questions.len() >= THIN_PAGE_MIN).then_some(questions)
    }
}
