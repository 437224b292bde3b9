//! Legacy answer encodings.
//!
//! Older clients sent Portuguese or English Likert labels instead of the
//! canonical 0-4 integers. Those are mapped here, before anything reaches the
//! session manager. Numbers pass through unchanged so the validator can
//! report out-of-range values itself.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use triagem_core::models::response::ResponseSet;

#[derive(Debug, Error)]
pub enum LikertError {
    #[error("unrecognised answer label: '{0}'")]
    UnknownLabel(String),

    #[error("invalid responses file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single answer as it appears in a responses file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LikertAnswer {
    Value(i32),
    Label(String),
}

impl LikertAnswer {
    pub fn to_value(&self) -> Result<i32, LikertError> {
        match self {
            Self::Value(v) => Ok(*v),
            Self::Label(label) => parse_answer(label),
        }
    }
}

const LABELS: &[(&str, i32)] = &[
    ("nunca", 0),
    ("never", 0),
    ("raramente", 1),
    ("rarely", 1),
    ("às vezes", 2),
    ("as vezes", 2),
    ("sometimes", 2),
    ("frequentemente", 3),
    ("often", 3),
    ("sempre", 4),
    ("always", 4),
    ("discordo totalmente", 0),
    ("discordo", 1),
    ("neutro", 2),
    ("concordo", 3),
    ("concordo totalmente", 4),
    ("não", 0),
    ("nao", 0),
    ("no", 0),
    ("talvez", 2),
    ("maybe", 2),
    ("sim", 4),
    ("yes", 4),
];

/// Map a label to its canonical value. Case-insensitive, surrounding
/// whitespace ignored.
pub fn label_value(label: &str) -> Result<i32, LikertError> {
    let normalized = label.trim().to_lowercase();
    LABELS
        .iter()
        .find(|(l, _)| *l == normalized)
        .map(|&(_, v)| v)
        .ok_or_else(|| LikertError::UnknownLabel(label.trim().to_string()))
}

/// Parse typed input: an integer or a known label.
pub fn parse_answer(input: &str) -> Result<i32, LikertError> {
    match input.trim().parse::<i32>() {
        Ok(v) => Ok(v),
        Err(_) => label_value(input),
    }
}

/// Read a JSON object of `question_id -> number | label` into canonical
/// responses.
pub fn responses_from_json(json: &str) -> Result<ResponseSet, LikertError> {
    let raw: BTreeMap<String, LikertAnswer> = serde_json::from_str(json)?;
    let mut responses = ResponseSet::new();
    for (question_id, answer) in raw {
        responses.insert(question_id, answer.to_value()?);
    }
    Ok(responses)
}
