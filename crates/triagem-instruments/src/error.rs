use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::catalog::IntegrityProblem;
use crate::scoring::AlgorithmKind;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

/// A single answer outside the canonical Likert range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OutOfRangeResponse {
    pub question_id: String,
    pub value: i32,
}

/// Why a response set cannot be submitted. Recoverable: the subject may
/// fix the answers and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationError {
    #[error("missing responses for questions: {}", .question_ids.join(", "))]
    MissingResponses { question_ids: Vec<String> },

    #[error("responses out of range [0, 4]: {}", format_out_of_range(.responses))]
    OutOfRange { responses: Vec<OutOfRangeResponse> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("instrument '{instrument_id}' declares the {kind:?} algorithm, which is not supported")]
    UnsupportedAlgorithm {
        instrument_id: String,
        kind: AlgorithmKind,
    },

    #[error("scores of instrument '{instrument_id}' do not fit in 32 bits")]
    Overflow { instrument_id: String },
}

/// No band of a subscale covers a score. Indicates a catalog bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no band of subscale '{subscale_id}' covers score {score}")]
pub struct NoMatchingBand {
    pub subscale_id: String,
    pub score: u32,
}

/// Catalog load failures. Fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("instrument '{instrument_id}' failed integrity checks: {}", format_problems(.problems))]
    Integrity {
        instrument_id: String,
        problems: Vec<IntegrityProblem>,
    },

    #[error("duplicate instrument id: {0}")]
    DuplicateInstrument(String),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

fn format_out_of_range(responses: &[OutOfRangeResponse]) -> String {
    responses
        .iter()
        .map(|r| format!("{}={}", r.question_id, r.value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_problems(problems: &[IntegrityProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
