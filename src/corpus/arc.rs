//! Conversation arc stages and the arc classifier
//!
//! Six ordered stages model a conversation moving from light to deep to
//! closing. The classifier is an ordered rule table: the first rule whose
//! predicate matches decides the stage, and the last rule always matches.

use super::types::QuestionSignals;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// One of the six arc stages, serialized as its position 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ArcStage {
    BreakTheIce = 1,
    GetCurious = 2,
    GoDeeper = 3,
    TurnUpTheHeat = 4,
    PlayARound = 5,
    EndOnAHigh = 6,
}

impl ArcStage {
    /// All stages in position order
    pub const ALL: [ArcStage; 6] = [
        ArcStage::BreakTheIce,
        ArcStage::GetCurious,
        ArcStage::GoDeeper,
        ArcStage::TurnUpTheHeat,
        ArcStage::PlayARound,
        ArcStage::EndOnAHigh,
    ];

    pub fn position(self) -> u8 {
        self as u8
    }

    pub fn from_position(position: u8) -> Option<Self> {
        match position {
            1 => Some(ArcStage::BreakTheIce),
            2 => Some(ArcStage::GetCurious),
            3 => Some(ArcStage::GoDeeper),
            4 => Some(ArcStage::TurnUpTheHeat),
            5 => Some(ArcStage::PlayARound),
            6 => Some(ArcStage::EndOnAHigh),
            _ => None,
        }
    }

    /// Parse a slot key such as `"3"`
    pub fn from_key(key: &str) -> Option<Self> {
        key.trim().parse::<u8>().ok().and_then(Self::from_position)
    }

    pub fn label(self) -> &'static str {
        self.slot().label
    }

    pub fn slot(self) -> &'static ArcSlot {
        &ARC_SLOTS[self as usize - 1]
    }
}

impl From<ArcStage> for u8 {
    fn from(stage: ArcStage) -> u8 {
        stage.position()
    }
}

impl TryFrom<u8> for ArcStage {
    type Error = String;

    fn try_from(position: u8) -> Result<Self, Self::Error> {
        ArcStage::from_position(position)
            .ok_or_else(|| format!("arc position out of range: {} (expected 1-6)", position))
    }
}

impl fmt::Display for ArcStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}

/// Static display metadata for one arc slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArcSlot {
    pub position: u8,
    pub label: &'static str,
    pub color: &'static str,
}

/// The fixed slot catalog shared by the classifier and runtime selection
pub static ARC_SLOTS: [ArcSlot; 6] = [
    ArcSlot {
        position: 1,
        label: "Break the Ice",
        color: "var(--arc-1)",
    },
    ArcSlot {
        position: 2,
        label: "Get Curious",
        color: "var(--arc-2)",
    },
    ArcSlot {
        position: 3,
        label: "Go Deeper",
        color: "var(--arc-3)",
    },
    ArcSlot {
        position: 4,
        label: "Turn Up the Heat",
        color: "var(--arc-4)",
    },
    ArcSlot {
        position: 5,
        label: "Play a Round",
        color: "var(--arc-5)",
    },
    ArcSlot {
        position: 6,
        label: "End on a High",
        color: "var(--arc-6)",
    },
];

pub fn arc_slots() -> &'static [ArcSlot] {
    &ARC_SLOTS
}

// ---------------------------------------------------------------------------
// Keyword patterns
// ---------------------------------------------------------------------------

static HOPE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(dream|hope|future|aspir\w*|wish|bucket list|someday|imagine|legacy|one day|10 years|five years|retire|goal|inspire|grateful|thankful|appreciate|best thing|proud|accomplish|achieve)\b",
    )
    .expect("hope keyword pattern is valid")
});

static FUN_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(embarrass\w*|awkward|guilty pleasure|pet peeve|superpower|zombie|alien|funniest|weirdest|craziest|strangest|silliest|worst|dumbest)\b",
    )
    .expect("fun keyword pattern is valid")
});

/// Text reads as hopeful or future-oriented
pub fn is_hopeful_text(text: &str) -> bool {
    HOPE_KEYWORDS.is_match(text)
}

/// Text reads as light or playful
pub fn is_light_text(text: &str) -> bool {
    FUN_KEYWORDS.is_match(text)
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// One row of the classifier's decision table
pub struct ArcRule {
    pub name: &'static str,
    pub stage: ArcStage,
    pub matches: fn(&dyn QuestionSignals) -> bool,
}

impl fmt::Debug for ArcRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcRule")
            .field("name", &self.name)
            .field("stage", &self.stage)
            .finish()
    }
}

const HEAT_TONES: &[&str] = &["spicy", "controversial"];
const LIGHT_TONES: &[&str] = &["funny", "random", "weird"];
const DEEP_CATEGORIES: &[&str] = &["self_reflection", "hypothetical"];
const CURIOUS_CATEGORIES: &[&str] = &["get_to_know", "conversation_starters", "icebreakers"];

/// Classifier rules in precedence order
pub static ARC_RULES: &[ArcRule] = &[
    ArcRule {
        name: "binary_choice",
        stage: ArcStage::PlayARound,
        matches: |q| q.is_binary_choice(),
    },
    ArcRule {
        name: "hopeful_text",
        stage: ArcStage::EndOnAHigh,
        matches: |q| is_hopeful_text(q.text()) && !q.has_any_tone(HEAT_TONES),
    },
    ArcRule {
        name: "heated_tone",
        stage: ArcStage::TurnUpTheHeat,
        matches: |q| q.has_any_tone(HEAT_TONES),
    },
    ArcRule {
        name: "challenging_not_funny",
        stage: ArcStage::TurnUpTheHeat,
        matches: |q| q.has_tone("challenging") && !q.has_tone("funny"),
    },
    ArcRule {
        name: "deep",
        stage: ArcStage::GoDeeper,
        matches: |q| q.has_tone("deep") || DEEP_CATEGORIES.contains(&q.category()),
    },
    ArcRule {
        name: "light",
        stage: ArcStage::BreakTheIce,
        matches: |q| q.has_any_tone(LIGHT_TONES) || is_light_text(q.text()),
    },
    ArcRule {
        name: "get_to_know",
        stage: ArcStage::GetCurious,
        matches: |q| CURIOUS_CATEGORIES.contains(&q.category()),
    },
    ArcRule {
        name: "default",
        stage: ArcStage::GetCurious,
        matches: |_| true,
    },
];

/// The first rule matching the question
pub fn matching_rule<Q: QuestionSignals>(question: &Q) -> &'static ArcRule {
    let signals: &dyn QuestionSignals = question;
    ARC_RULES
        .iter()
        .find(|rule| (rule.matches)(signals))
        .unwrap_or(&ARC_RULES[ARC_RULES.len() - 1])
}

/// Assign exactly one arc stage. Total and deterministic.
pub fn classify<Q: QuestionSignals>(question: &Q) -> ArcStage {
    matching_rule(question).stage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::types::{RawQuestion, FORMAT_BINARY};

    fn q(text: &str) -> RawQuestion {
        RawQuestion::new("q", text)
    }

    #[test]
    fn slot_catalog_is_ordered() {
        for (i, stage) in ArcStage::ALL.iter().enumerate() {
            assert_eq!(stage.position() as usize, i + 1);
            assert_eq!(stage.slot().position, stage.position());
        }
        assert_eq!(ArcStage::TurnUpTheHeat.label(), "Turn Up the Heat");
    }

    #[test]
    fn stage_rejects_out_of_range_positions() {
        assert!(ArcStage::try_from(0u8).is_err());
        assert!(ArcStage::try_from(7u8).is_err());
        assert_eq!(ArcStage::from_key(" 4 "), Some(ArcStage::TurnUpTheHeat));
        assert_eq!(ArcStage::from_key("four"), None);
        assert!(serde_json::from_str::<ArcStage>("9").is_err());
    }

    #[test]
    fn binary_choice_wins_over_every_tone() {
        let question = q("Would you rather lie or be lied to?")
            .with_format(FORMAT_BINARY)
            .with_options("Lie", "Be lied to")
            .with_tones(&["spicy", "controversial", "deep"]);
        assert_eq!(classify(&question), ArcStage::PlayARound);
    }

    #[test]
    fn binary_without_both_options_falls_through() {
        let question = q("Would you rather fly or swim?").with_format(FORMAT_BINARY);
        assert_eq!(matching_rule(&question).name, "default");
    }

    #[test]
    fn hopeful_text_lands_at_end_on_a_high() {
        assert_eq!(classify(&q("What is on your bucket list?")), ArcStage::EndOnAHigh);
        assert_eq!(classify(&q("What are you most grateful for?")), ArcStage::EndOnAHigh);
        assert_eq!(
            classify(&q("What is your biggest aspiration?")),
            ArcStage::EndOnAHigh
        );
    }

    #[test]
    fn spicy_future_question_is_not_uplifting() {
        let question = q("What do you hope happens tonight?").with_tones(&["spicy"]);
        assert_eq!(classify(&question), ArcStage::TurnUpTheHeat);
    }

    #[test]
    fn challenging_depends_on_funny() {
        let hard = q("Defend your least popular opinion?").with_tones(&["challenging"]);
        assert_eq!(classify(&hard), ArcStage::TurnUpTheHeat);

        let playful = q("Defend your least popular opinion?").with_tones(&["challenging", "funny"]);
        assert_eq!(classify(&playful), ArcStage::BreakTheIce);
    }

    #[test]
    fn deep_tone_or_reflective_category_goes_deeper() {
        assert_eq!(
            classify(&q("What shaped you most?").with_tones(&["deep"])),
            ArcStage::GoDeeper
        );
        assert_eq!(
            classify(&q("What would you change about yourself?").with_category("self_reflection")),
            ArcStage::GoDeeper
        );
        assert_eq!(
            classify(&q("What if gravity stopped for a minute?").with_category("hypothetical")),
            ArcStage::GoDeeper
        );
    }

    #[test]
    fn light_signals_break_the_ice() {
        assert_eq!(
            classify(&q("What's your go-to snack?").with_tones(&["random"])),
            ArcStage::BreakTheIce
        );
        assert_eq!(
            classify(&q("What is your most embarrassing moment?")),
            ArcStage::BreakTheIce
        );
        assert_eq!(
            classify(&q("Which superpower would you pick?")),
            ArcStage::BreakTheIce
        );
    }

    #[test]
    fn unmatched_questions_default_to_get_curious() {
        let categorized = q("Where did you grow up?").with_category("get_to_know");
        assert_eq!(matching_rule(&categorized).name, "get_to_know");
        assert_eq!(classify(&categorized), ArcStage::GetCurious);

        let plain = q("Where did you grow up?");
        assert_eq!(matching_rule(&plain).name, "default");
        assert_eq!(classify(&plain), ArcStage::GetCurious);
    }

    #[test]
    fn keywords_respect_word_boundaries() {
        // "goalkeeper" must not trigger the "goal" keyword
        assert!(!is_hopeful_text("Were you ever a goalkeeper?"));
        assert!(is_hopeful_text("What's a goal you set this year?"));
        assert!(!is_light_text("Do you like working in the worsted wool trade?"));
        assert!(is_light_text("What was the worst date you've been on?"));
    }

    #[test]
    fn plural_keywords_do_not_match() {
        assert_eq!(classify(&q("What are your biggest dreams?")), ArcStage::GetCurious);
        assert_eq!(classify(&q("What goals did you set?")), ArcStage::GetCurious);
        assert_eq!(classify(&q("What hopes do you have?")), ArcStage::GetCurious);
        assert!(!is_light_text("Do you believe in aliens?"));
        assert!(is_light_text("What's your biggest pet peeve?"));
    }

    #[test]
    fn last_rule_always_matches() {
        let last = ARC_RULES.last().unwrap();
        assert!((last.matches)(&q("")));
    }
}
