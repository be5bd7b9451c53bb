//! Spin engine: one question per arc slot, honoring caller-held locks
//!
//! The engine keeps no state between calls. Continuity lives in the lock
//! map the caller passes in: a locked slot resolves to its pinned question
//! regardless of occasion, every other slot is filtered and drawn fresh.

use super::filter::OccasionFilter;
use super::index::QuestionIndex;
use crate::corpus::{arc_slots, ArcSlot, ArcStage, Occasion, ProcessedQuestion};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Caller-held pins from arc slot to question id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockMap {
    locks: BTreeMap<ArcStage, String>,
}

impl LockMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(mut self, stage: ArcStage, id: impl Into<String>) -> Self {
        self.locks.insert(stage, id.into());
        self
    }

    /// Insert using a slot key such as `"3"`. Keys that are not positions
    /// 1..=6 are ignored; returns whether the lock was recorded.
    pub fn insert_key(&mut self, key: &str, id: impl Into<String>) -> bool {
        let id = id.into();
        match ArcStage::from_key(key) {
            Some(stage) if !id.is_empty() => {
                self.locks.insert(stage, id);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, stage: ArcStage) -> Option<&str> {
        self.locks.get(&stage).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Wire form: `1:abc123,3:def456`
    pub fn to_param(&self) -> String {
        self.locks
            .iter()
            .map(|(stage, id)| format!("{}:{}", stage, id))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for LockMap {
    type Err = std::convert::Infallible;

    /// Parse the wire form. Malformed pairs are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut map = LockMap::new();
        for pair in s.split(',') {
            let mut parts = pair.split(':');
            if let (Some(key), Some(id)) = (parts.next(), parts.next()) {
                if !map.insert_key(key, id.trim()) {
                    debug!(pair, "ignoring malformed lock");
                }
            }
        }
        Ok(map)
    }
}

impl FromIterator<(ArcStage, String)> for LockMap {
    fn from_iter<I: IntoIterator<Item = (ArcStage, String)>>(iter: I) -> Self {
        Self {
            locks: iter.into_iter().collect(),
        }
    }
}

/// One chosen question per populated slot. Slots whose pool was empty are
/// absent, so a result may hold fewer than six entries.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SpinResult<'a> {
    slots: BTreeMap<ArcStage, &'a ProcessedQuestion>,
}

impl<'a> SpinResult<'a> {
    pub fn get(&self, stage: ArcStage) -> Option<&'a ProcessedQuestion> {
        self.slots.get(&stage).copied()
    }

    pub fn contains(&self, stage: ArcStage) -> bool {
        self.slots.contains_key(&stage)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Populated slots in position order
    pub fn iter(&self) -> impl Iterator<Item = (ArcStage, &'a ProcessedQuestion)> + '_ {
        self.slots.iter().map(|(stage, q)| (*stage, *q))
    }

    /// Questions in position order, as a deck would hold them
    pub fn questions(&self) -> Vec<ProcessedQuestion> {
        self.slots.values().map(|q| (*q).clone()).collect()
    }

    /// Lock every populated slot to its current question
    pub fn to_locks(&self) -> LockMap {
        self.iter().map(|(stage, q)| (stage, q.id.clone())).collect()
    }
}

/// What a selection request returns: the draw plus the slot catalog, so a
/// caller can render empty slots without a second lookup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse<'a> {
    pub questions: SpinResult<'a>,
    pub arc_slots: &'static [ArcSlot],
}

/// Stateless selection over a shared index
#[derive(Debug, Clone, Copy)]
pub struct SpinEngine<'a> {
    index: &'a QuestionIndex,
    filter: OccasionFilter,
}

impl<'a> SpinEngine<'a> {
    pub fn new(index: &'a QuestionIndex, filter: OccasionFilter) -> Self {
        Self { index, filter }
    }

    /// Occasion-filtered pool for one arc
    pub fn pool(&self, stage: ArcStage, occasion: Occasion) -> Vec<&'a ProcessedQuestion> {
        self.filter.apply(&self.index.by_arc(stage), occasion)
    }

    /// Draw one question uniformly from an arc's filtered pool, skipping
    /// `exclude_ids`
    pub fn random_question<R: Rng + ?Sized>(
        &self,
        stage: ArcStage,
        occasion: Occasion,
        exclude_ids: &[&str],
        rng: &mut R,
    ) -> Option<&'a ProcessedQuestion> {
        let available: Vec<&'a ProcessedQuestion> = self
            .pool(stage, occasion)
            .into_iter()
            .filter(|q| !exclude_ids.contains(&q.id.as_str()))
            .collect();
        available.choose(rng).copied()
    }

    pub fn spin(&self, locks: &LockMap, occasion: Occasion) -> SpinResult<'a> {
        self.spin_with_rng(locks, occasion, &mut rand::thread_rng())
    }

    pub fn spin_with_rng<R: Rng + ?Sized>(
        &self,
        locks: &LockMap,
        occasion: Occasion,
        rng: &mut R,
    ) -> SpinResult<'a> {
        let mut result = SpinResult::default();

        for stage in ArcStage::ALL {
            if let Some(id) = locks.get(stage) {
                match self.index.get(id) {
                    Some(question) => {
                        result.slots.insert(stage, question);
                        continue;
                    }
                    None => debug!(
                        slot = stage.position(),
                        id,
                        "locked id not in index, drawing fresh"
                    ),
                }
            }

            match self.random_question(stage, occasion, &[], rng) {
                Some(question) => {
                    result.slots.insert(stage, question);
                }
                None => debug!(
                    slot = stage.position(),
                    occasion = %occasion,
                    "empty pool, slot omitted"
                ),
            }
        }

        result
    }

    /// Spin and pair the result with the slot catalog
    pub fn respond(&self, locks: &LockMap, occasion: Occasion) -> SpinResponse<'a> {
        SpinResponse {
            questions: self.spin(locks, occasion),
            arc_slots: arc_slots(),
        }
    }
}
