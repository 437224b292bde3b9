use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lowest canonical Likert answer ("never" / "strongly disagree").
pub const LIKERT_MIN: i32 = 0;
/// Highest canonical Likert answer ("always" / "strongly agree").
pub const LIKERT_MAX: i32 = 4;

/// Answers keyed by question id, in the canonical 0–4 encoding.
///
/// Values are stored as given; range checking happens when the set is
/// validated against an instrument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ResponseSet(BTreeMap<String, i32>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the previous value for that question.
    pub fn insert(&mut self, question_id: impl Into<String>, value: i32) -> Option<i32> {
        self.0.insert(question_id.into(), value)
    }

    pub fn get(&self, question_id: &str) -> Option<i32> {
        self.0.get(question_id).copied()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Overlay `other` on top of this set; answers in `other` win.
    pub fn merge(&mut self, other: &ResponseSet) {
        for (id, value) in other.iter() {
            self.0.insert(id.to_string(), value);
        }
    }
}

impl From<BTreeMap<String, i32>> for ResponseSet {
    fn from(map: BTreeMap<String, i32>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
