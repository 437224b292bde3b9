//! Subscale aggregation: turns validated answers into per-question
//! contributions, subscale sums and the instrument total.

use std::collections::BTreeMap;

use triagem_core::models::response::LIKERT_MAX;

use crate::error::ScoringError;
use crate::scoring::{AlgorithmKind, Instrument, Question, Subscale};
use crate::validate::ValidatedResponses;

const TOP: u8 = LIKERT_MAX as u8;

/// Maps one validated answer to its score contribution. `None` when the
/// contribution does not fit in a `u32`.
pub trait ScoringStrategy: Send + Sync {
    fn contribution(&self, question: &Question, value: u8) -> Option<u32>;

    /// The largest contribution `question` can make: the top answer, or the
    /// bottom answer for reverse-scored questions.
    fn max_contribution(&self, question: &Question) -> Option<u32> {
        let best = if question.reverse_scored { 0 } else { TOP };
        self.contribution(question, best)
    }
}

/// Plain sum. Weights are ignored; the catalog guarantees they are 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumStrategy;

/// Answers multiplied by the question's weight (default 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedStrategy;

fn directed(question: &Question, value: u8) -> u32 {
    let value = value.min(TOP);
    if question.reverse_scored {
        u32::from(TOP - value)
    } else {
        u32::from(value)
    }
}

impl ScoringStrategy for SumStrategy {
    fn contribution(&self, question: &Question, value: u8) -> Option<u32> {
        Some(directed(question, value))
    }
}

impl ScoringStrategy for WeightedStrategy {
    fn contribution(&self, question: &Question, value: u8) -> Option<u32> {
        directed(question, value).checked_mul(question.effective_weight())
    }
}

/// Select the strategy declared by `instrument`.
pub fn strategy_for(instrument: &Instrument) -> Result<&'static dyn ScoringStrategy, ScoringError> {
    match instrument.algorithm.kind {
        AlgorithmKind::Sum => Ok(&SumStrategy),
        AlgorithmKind::Weighted => Ok(&WeightedStrategy),
        AlgorithmKind::Complex => Err(ScoringError::UnsupportedAlgorithm {
            instrument_id: instrument.id.clone(),
            kind: AlgorithmKind::Complex,
        }),
    }
}

fn overflow(instrument: &Instrument) -> ScoringError {
    ScoringError::Overflow {
        instrument_id: instrument.id.clone(),
    }
}

/// Sum of the best-case contributions of `questions`.
fn best_case<'q>(
    instrument: &Instrument,
    questions: impl Iterator<Item = &'q Question>,
) -> Result<u32, ScoringError> {
    let strategy = strategy_for(instrument)?;
    let mut sum: u32 = 0;
    for question in questions {
        sum = strategy
            .max_contribution(question)
            .and_then(|points| sum.checked_add(points))
            .ok_or_else(|| overflow(instrument))?;
    }
    Ok(sum)
}

/// Scores computed from one validated response set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub total: u32,
    /// Every subscale of the instrument, including ones with no answers.
    pub subscales: BTreeMap<String, u32>,
    pub contributions: BTreeMap<String, u32>,
}

/// Compute the total and per-subscale scores.
///
/// Every question contributes to the total; subscale membership is an extra
/// grouping on top of it.
pub fn aggregate(responses: &ValidatedResponses<'_>) -> Result<Aggregate, ScoringError> {
    let instrument = responses.instrument();
    let strategy = strategy_for(instrument)?;

    let mut subscales: BTreeMap<String, u32> = instrument
        .subscales
        .iter()
        .map(|s| (s.id.clone(), 0))
        .collect();
    let mut contributions = BTreeMap::new();
    let mut total: u32 = 0;

    for (question, value) in responses.iter() {
        let points = strategy
            .contribution(question, value)
            .ok_or_else(|| overflow(instrument))?;
        total = total.checked_add(points).ok_or_else(|| overflow(instrument))?;
        contributions.insert(question.id.clone(), points);

        if let Some(subscale_id) = &question.subscale
            && let Some(score) = subscales.get_mut(subscale_id)
        {
            *score = score.checked_add(points).ok_or_else(|| overflow(instrument))?;
        }
    }

    Ok(Aggregate {
        total,
        subscales,
        contributions,
    })
}

/// Best-case total of `instrument`.
pub fn max_score(instrument: &Instrument) -> Result<u32, ScoringError> {
    best_case(instrument, instrument.questions.iter())
}

/// Best-case score of one subscale of `instrument`.
pub fn subscale_max(instrument: &Instrument, subscale: &Subscale) -> Result<u32, ScoringError> {
    best_case(
        instrument,
        instrument
            .questions
            .iter()
            .filter(|q| q.subscale.as_deref() == Some(subscale.id.as_str())),
    )
}
