//! Score interpretation: risk level for the total, severity bands for
//! subscales.

use std::collections::BTreeMap;

use triagem_core::models::result::SubscaleAnalysis;
use triagem_core::models::risk::RiskLevel;

use crate::aggregate;
use crate::error::{NoMatchingBand, ScoringError};
use crate::scoring::{Band, Instrument, Subscale};

/// One step of a [`RiskLadder`]. Applies to percentages strictly below
/// `below`, or to everything left over when `below` is `None`.
#[derive(Debug, Clone, Copy)]
pub struct Rung {
    pub below: Option<f64>,
    pub risk_level: RiskLevel,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

/// Ascending percentage thresholds mapping a total score to a risk level.
#[derive(Debug, Clone, Copy)]
pub struct RiskLadder {
    rungs: &'static [Rung],
}

/// Quartile ladder applied to every instrument: <25 low, <50 mild,
/// <75 moderate, otherwise high.
pub const CANONICAL_LADDER: RiskLadder = RiskLadder {
    rungs: &[
        Rung {
            below: Some(25.0),
            risk_level: RiskLevel::Low,
            description: "Minimal or absent symptoms",
            recommendations: &[
                "Keep up healthy lifestyle habits",
                "Maintain preventive mental well-being practices",
                "Check in with yourself occasionally",
            ],
        },
        Rung {
            below: Some(50.0),
            risk_level: RiskLevel::Mild,
            description: "Mild symptoms present",
            recommendations: &[
                "Use self-management and coping techniques",
                "Exercise regularly and practise relaxation",
                "Consider seeking guidance if symptoms persist",
            ],
        },
        Rung {
            below: Some(75.0),
            risk_level: RiskLevel::Moderate,
            description: "Moderate symptoms that may affect daily functioning",
            recommendations: &[
                "An assessment with a mental health professional is recommended",
                "Consider psychotherapy or counselling",
                "Put structured coping strategies in place",
            ],
        },
        Rung {
            below: None,
            risk_level: RiskLevel::High,
            description: "Severe symptoms that call for professional attention",
            recommendations: &[
                "Seek a professional assessment urgently",
                "Specialised treatment is recommended",
                "Pharmacological intervention may be needed",
            ],
        },
    ],
};

impl RiskLadder {
    pub fn rungs(&self) -> &'static [Rung] {
        self.rungs
    }

    /// The first rung whose threshold lies above `percentage`.
    pub fn classify(&self, percentage: f64) -> &'static Rung {
        let rungs = self.rungs;
        rungs
            .iter()
            .find(|r| r.below.is_none_or(|limit| percentage < limit))
            .unwrap_or(&rungs[rungs.len() - 1])
    }
}

impl Default for RiskLadder {
    fn default() -> Self {
        CANONICAL_LADDER
    }
}

/// Risk classification of an instrument total.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalClassification {
    pub risk_level: RiskLevel,
    pub percentage: f64,
    pub description: String,
    pub recommendations: Vec<String>,
}

/// Total as a percentage of the instrument's declared maximum.
pub fn percentage_of(score: u32, max_score: u32) -> f64 {
    if max_score == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(max_score) * 100.0
}

/// Classify `total` with the canonical ladder.
pub fn classify_total(total: u32, instrument: &Instrument) -> TotalClassification {
    classify_total_with(&CANONICAL_LADDER, total, instrument)
}

pub fn classify_total_with(
    ladder: &RiskLadder,
    total: u32,
    instrument: &Instrument,
) -> TotalClassification {
    let percentage = percentage_of(total, instrument.algorithm.max_score);
    let rung = ladder.classify(percentage);

    TotalClassification {
        risk_level: rung.risk_level,
        percentage,
        description: rung.description.to_string(),
        recommendations: rung.recommendations.iter().map(|r| r.to_string()).collect(),
    }
}

/// The band whose inclusive range contains `score`.
pub fn classify_subscale(score: u32, subscale: &Subscale) -> Result<&Band, NoMatchingBand> {
    subscale
        .bands
        .iter()
        .find(|b| b.contains(score))
        .ok_or_else(|| NoMatchingBand {
            subscale_id: subscale.id.clone(),
            score,
        })
}

/// Like [`classify_subscale`], but falls back to the nearest band when none
/// covers the score. The flag is `true` when the fallback was used.
///
/// Returns `None` only for a subscale with no bands at all.
pub fn classify_subscale_or_nearest(score: u32, subscale: &Subscale) -> Option<(&Band, bool)> {
    match classify_subscale(score, subscale) {
        Ok(band) => Some((band, false)),
        Err(err) => {
            let nearest = subscale.bands.iter().min_by_key(|b| b.distance(score))?;
            tracing::warn!(
                subscale_id = %err.subscale_id,
                score = err.score,
                fallback_min = nearest.min_score,
                fallback_max = nearest.max_score,
                "{err}; using nearest band"
            );
            Some((nearest, true))
        }
    }
}

/// Interpret every subscale of `instrument` that has a score.
pub fn build_detailed_analysis(
    subscale_scores: &BTreeMap<String, u32>,
    instrument: &Instrument,
) -> Result<BTreeMap<String, SubscaleAnalysis>, ScoringError> {
    let mut analysis = BTreeMap::new();

    for subscale in &instrument.subscales {
        let Some(&score) = subscale_scores.get(&subscale.id) else {
            continue;
        };

        let Some((band, approximate)) = classify_subscale_or_nearest(score, subscale) else {
            tracing::error!(subscale_id = %subscale.id, "subscale has no bands; skipping");
            continue;
        };

        let max_score = aggregate::subscale_max(instrument, subscale)?;
        analysis.insert(
            subscale.id.clone(),
            SubscaleAnalysis {
                name: subscale.name.clone(),
                score,
                max_score,
                percentage: percentage_of(score, max_score),
                level: band.level,
                description: band.description.clone(),
                recommendations: band.recommendations.clone(),
                approximate,
            },
        );
    }

    Ok(analysis)
}
