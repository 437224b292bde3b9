use triagem_core::models::response::{ResponseSet, LIKERT_MAX, LIKERT_MIN};

use crate::error::{OutOfRangeResponse, ValidationError};
use crate::scoring::{Instrument, Question};

/// A response set that has been checked against an instrument: every
/// question answered, every answer within the Likert range.
///
/// Answers are held in the instrument's question order.
#[derive(Debug, Clone)]
pub struct ValidatedResponses<'a> {
    instrument: &'a Instrument,
    values: Vec<u8>,
}

impl<'a> ValidatedResponses<'a> {
    pub fn instrument(&self) -> &'a Instrument {
        self.instrument
    }

    /// Each question paired with its validated answer.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Question, u8)> + '_ {
        self.instrument
            .questions
            .iter()
            .zip(self.values.iter().copied())
    }
}

/// Check that `responses` can be submitted for `instrument`.
///
/// Completeness is checked first: if any question is unanswered the error
/// lists every missing id in question order. Otherwise every answer outside
/// `[0, 4]` is reported. Answers to ids the instrument does not define are
/// ignored.
pub fn validate<'a>(
    instrument: &'a Instrument,
    responses: &ResponseSet,
) -> Result<ValidatedResponses<'a>, ValidationError> {
    let missing: Vec<String> = instrument
        .questions
        .iter()
        .filter(|q| !responses.contains(&q.id))
        .map(|q| q.id.clone())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingResponses {
            question_ids: missing,
        });
    }

    let mut values = Vec::with_capacity(instrument.questions.len());
    let mut out_of_range = Vec::new();

    for question in &instrument.questions {
        let value = responses.get(&question.id).unwrap_or_default();
        if (LIKERT_MIN..=LIKERT_MAX).contains(&value) {
            values.push(value as u8);
        } else {
            out_of_range.push(OutOfRangeResponse {
                question_id: question.id.clone(),
                value,
            });
        }
    }

    if !out_of_range.is_empty() {
        return Err(ValidationError::OutOfRange {
            responses: out_of_range,
        });
    }

    let extra = responses
        .iter()
        .filter(|(id, _)| instrument.question(id).is_none())
        .count();
    if extra > 0 {
        tracing::debug!(
            instrument_id = %instrument.id,
            extra,
            "ignoring answers to questions the instrument does not define"
        );
    }

    Ok(ValidatedResponses { instrument, values })
}
