use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::risk::RiskLevel;
use super::severity::Severity;
use crate::session_id::SessionId;

/// Interpretation of a single subscale score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleAnalysis {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub level: Severity,
    pub description: String,
    pub recommendations: Vec<String>,
    /// Set when no band covered the score and the nearest band was used.
    #[serde(default)]
    pub approximate: bool,
}

/// The terminal artifact of a finalized screening session.
///
/// Computed once and handed to the persistence collaborator as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub session_id: SessionId,
    pub instrument_id: String,
    pub instrument_name: String,
    pub total_score: u32,
    pub max_score: u32,
    /// Total as a percentage of `max_score`, unrounded.
    pub percentage: f64,
    pub subscale_scores: BTreeMap<String, u32>,
    pub risk_level: RiskLevel,
    pub interpretation: String,
    pub recommendations: Vec<String>,
    pub detailed_analysis: BTreeMap<String, SubscaleAnalysis>,
    pub scientific_basis: String,
    pub elapsed_seconds: u64,
    pub timestamp: jiff::Timestamp,
}

impl ScoreResult {
    /// Percentage rounded to the nearest whole number, as shown to subjects.
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round().clamp(0.0, 100.0) as u32
    }
}
