use serde::{Deserialize, Serialize};
use ts_rs::TS;

use triagem_core::models::severity::Severity;

/// How an instrument turns answers into scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AlgorithmKind {
    /// Plain sum of (possibly reversed) answers. Weights must be 1.
    Sum,
    /// Sum of (possibly reversed) answers multiplied by per-question weights.
    Weighted,
    /// Declared by some drafts but never specified. Not scorable.
    Complex,
}

/// Declared score bounds of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringAlgorithm {
    pub kind: AlgorithmKind,
    pub min_score: u32,
    pub max_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub category: String,
    #[serde(default)]
    pub subscale: Option<String>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub reverse_scored: bool,
}

impl Question {
    pub fn new(id: impl Into<String>, category: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            category: category.into(),
            subscale: None,
            weight: None,
            reverse_scored: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse_scored = true;
        self
    }

    pub fn weighted(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Multiplier applied under weighted scoring.
    pub fn effective_weight(&self) -> u32 {
        self.weight.unwrap_or(1)
    }
}

/// An inclusive score range within a subscale and its interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    pub min_score: u32,
    pub max_score: u32,
    pub level: Severity,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl Band {
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min_score && score <= self.max_score
    }

    /// Distance from `score` to the closest edge of this band, 0 if inside.
    pub fn distance(&self, score: u32) -> u32 {
        if score < self.min_score {
            self.min_score - score
        } else {
            score.saturating_sub(self.max_score)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscale {
    pub id: String,
    pub name: String,
    pub description: String,
    pub question_ids: Vec<String>,
    pub bands: Vec<Band>,
}

/// One complete screening questionnaire. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub description: String,
    pub scientific_basis: String,
    pub estimated_minutes: u32,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub subscales: Vec<Subscale>,
    pub algorithm: ScoringAlgorithm,
}

impl Instrument {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn subscale(&self, id: &str) -> Option<&Subscale> {
        self.subscales.iter().find(|s| s.id == id)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

/// Discovery view of an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstrumentSummary {
    pub id: String,
    pub name: String,
    pub total_questions: usize,
    pub estimated_minutes: u32,
    pub scientific_basis: String,
}

impl From<&Instrument> for InstrumentSummary {
    fn from(instrument: &Instrument) -> Self {
        Self {
            id: instrument.id.clone(),
            name: instrument.name.clone(),
            total_questions: instrument.total_questions(),
            estimated_minutes: instrument.estimated_minutes,
            scientific_basis: instrument.scientific_basis.clone(),
        }
    }
}

/// Shorthand for building a [`Band`] from string slices.
pub fn band(
    min_score: u32,
    max_score: u32,
    level: Severity,
    description: &str,
    recommendations: &[&str],
) -> Band {
    Band {
        min_score,
        max_score,
        level,
        description: description.to_string(),
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}
