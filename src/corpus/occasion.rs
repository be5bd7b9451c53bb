//! Occasions and occasion tagging
//!
//! Each occasion carries two independent rule sets used at query time: tones
//! that exclude a question, and audiences that are preferred when there are
//! enough of them. Tagging at build time is a separate, looser signal: an
//! untagged question is general, never excluded.

use super::types::QuestionSignals;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Context a deck is being drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    #[default]
    All,
    DateNight,
    Team,
    Family,
    Party,
}

impl Occasion {
    pub const ALL_VALUES: [Occasion; 5] = [
        Occasion::All,
        Occasion::DateNight,
        Occasion::Team,
        Occasion::Family,
        Occasion::Party,
    ];

    /// Labels a question can be tagged with (`all` is implicit)
    pub const TAGGABLE: [Occasion; 4] = [
        Occasion::DateNight,
        Occasion::Team,
        Occasion::Family,
        Occasion::Party,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Occasion::All => "all",
            Occasion::DateNight => "date_night",
            Occasion::Team => "team",
            Occasion::Family => "family",
            Occasion::Party => "party",
        }
    }

    /// Parse a request value, treating anything unrecognized as `all`
    pub fn parse_or_all(value: &str) -> Occasion {
        value.parse().unwrap_or(Occasion::All)
    }

    /// Tones that disqualify a question for this occasion
    pub fn exclude_tones(self) -> &'static [&'static str] {
        match self {
            Occasion::Team | Occasion::Family => &["spicy", "flirty", "controversial"],
            Occasion::All | Occasion::DateNight | Occasion::Party => &[],
        }
    }

    /// Audiences prioritized for this occasion when enough exist
    pub fn prefer_audiences(self) -> &'static [&'static str] {
        match self {
            Occasion::DateNight => &["couples", "dating", "married"],
            Occasion::Team => &["friends", "adults"],
            Occasion::Family => &["family", "kids"],
            Occasion::All | Occasion::Party => &[],
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Occasion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Occasion::ALL_VALUES
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("unknown occasion: {}", s))
    }
}

const UNSAFE_TONES: &[&str] = &["spicy", "flirty", "controversial"];

fn fits_date_night(q: &dyn QuestionSignals) -> bool {
    q.has_any_audience(&["couples", "dating", "married"]) || q.has_tone("flirty")
}

fn fits_team(q: &dyn QuestionSignals) -> bool {
    q.has_any_audience(&["friends", "adults"]) && !q.has_any_tone(UNSAFE_TONES)
}

fn fits_family(q: &dyn QuestionSignals) -> bool {
    q.has_any_audience(&["family", "kids"]) && !q.has_any_tone(UNSAFE_TONES)
}

fn fits_party(q: &dyn QuestionSignals) -> bool {
    q.has_any_tone(&["funny", "random", "weird"]) || (q.has_tone("spicy") && q.has_tone("funny"))
}

/// Derive the occasion labels a question carries, in a fixed order.
///
/// Never returns `Occasion::All`; an empty result means "general".
pub fn derive_occasions<Q: QuestionSignals>(question: &Q) -> Vec<Occasion> {
    let signals: &dyn QuestionSignals = question;
    Occasion::TAGGABLE
        .into_iter()
        .filter(|occasion| match occasion {
            Occasion::DateNight => fits_date_night(signals),
            Occasion::Team => fits_team(signals),
            Occasion::Family => fits_family(signals),
            Occasion::Party => fits_party(signals),
            Occasion::All => false,
        })
        .collect()
}
