//! The question catalog: lookup, discovery and load-time integrity checks.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::aggregate;
use crate::error::{CatalogError, InstrumentError, ScoringError};
use crate::scoring::{AlgorithmKind, Instrument, InstrumentSummary};

/// Minimum number of questions a catalog instrument must carry.
pub const DEFAULT_MIN_QUESTIONS: usize = 10;

/// Knobs for [`check_instrument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPolicy {
    pub min_questions: usize,
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self {
            min_questions: DEFAULT_MIN_QUESTIONS,
        }
    }
}

/// A single integrity violation found in an instrument definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityProblem {
    #[error("has {found} questions, at least {minimum} required")]
    TooFewQuestions { found: usize, minimum: usize },

    #[error("scientific basis is empty")]
    MissingScientificBasis,

    #[error("declared max score {max} is not greater than min score {min}")]
    EmptyScoreRange { min: u32, max: u32 },

    #[error("declared min score is {0}, expected 0")]
    NonZeroMinimum(u32),

    #[error("declared max score {declared} differs from computed {computed}")]
    MaxScoreMismatch { declared: u32, computed: u32 },

    #[error("the {0:?} algorithm is not supported")]
    UnsupportedAlgorithm(AlgorithmKind),

    #[error("question weights push the best-case score past u32::MAX")]
    ScoreOverflow,

    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(String),

    #[error("duplicate subscale id '{0}'")]
    DuplicateSubscale(String),

    #[error("question '{0}' has weight 0")]
    ZeroWeight(String),

    #[error("question '{0}' carries a weight but the instrument uses plain sum scoring")]
    WeightOnSumInstrument(String),

    #[error("subscale '{subscale_id}' references unknown question '{question_id}'")]
    DanglingQuestion {
        subscale_id: String,
        question_id: String,
    },

    #[error("question '{question_id}' names unknown subscale '{subscale_id}'")]
    UnknownSubscale {
        question_id: String,
        subscale_id: String,
    },

    #[error("question '{question_id}' and subscale '{subscale_id}' disagree on membership")]
    MembershipMismatch {
        question_id: String,
        subscale_id: String,
    },

    #[error("subscale '{0}' has no interpretation bands")]
    NoBands(String),

    #[error("subscale '{subscale_id}' has a band with min {min} above max {max}")]
    InvertedBand {
        subscale_id: String,
        min: u32,
        max: u32,
    },

    #[error("subscale '{subscale_id}' bands should continue at {expected}, found {found}")]
    BandDiscontinuity {
        subscale_id: String,
        expected: u32,
        found: u32,
    },

    #[error("subscale '{subscale_id}' bands end at {found}, subscale max is {expected}")]
    BandCoverage {
        subscale_id: String,
        expected: u32,
        found: u32,
    },

    #[error("subscale '{0}' band severities decrease as the score rises")]
    SeverityOrder(String),
}

/// Run every integrity check against `instrument` and collect the problems.
pub fn check_instrument(instrument: &Instrument, policy: &CatalogPolicy) -> Vec<IntegrityProblem> {
    let mut problems = Vec::new();
    let algorithm = &instrument.algorithm;

    if instrument.questions.len() < policy.min_questions {
        problems.push(IntegrityProblem::TooFewQuestions {
            found: instrument.questions.len(),
            minimum: policy.min_questions,
        });
    }

    if instrument.scientific_basis.trim().is_empty() {
        problems.push(IntegrityProblem::MissingScientificBasis);
    }

    if algorithm.max_score <= algorithm.min_score {
        problems.push(IntegrityProblem::EmptyScoreRange {
            min: algorithm.min_score,
            max: algorithm.max_score,
        });
    }

    if algorithm.min_score != 0 {
        problems.push(IntegrityProblem::NonZeroMinimum(algorithm.min_score));
    }

    check_questions(instrument, &mut problems);
    check_subscales(instrument, &mut problems);

    match aggregate::max_score(instrument) {
        Ok(computed) if computed != algorithm.max_score => {
            problems.push(IntegrityProblem::MaxScoreMismatch {
                declared: algorithm.max_score,
                computed,
            });
        }
        Ok(_) => {}
        Err(ScoringError::Overflow { .. }) => problems.push(IntegrityProblem::ScoreOverflow),
        Err(ScoringError::UnsupportedAlgorithm { .. }) => {
            problems.push(IntegrityProblem::UnsupportedAlgorithm(algorithm.kind));
        }
    }

    problems
}

/// `true` when `instrument` passes every integrity check.
pub fn validate_instrument(instrument: &Instrument, policy: &CatalogPolicy) -> bool {
    check_instrument(instrument, policy).is_empty()
}

fn check_questions(instrument: &Instrument, problems: &mut Vec<IntegrityProblem>) {
    let mut seen = HashSet::new();

    for question in &instrument.questions {
        if !seen.insert(question.id.as_str()) {
            problems.push(IntegrityProblem::DuplicateQuestion(question.id.clone()));
        }

        match question.weight {
            Some(0) => problems.push(IntegrityProblem::ZeroWeight(question.id.clone())),
            Some(w) if w != 1 && instrument.algorithm.kind == AlgorithmKind::Sum => {
                problems.push(IntegrityProblem::WeightOnSumInstrument(question.id.clone()));
            }
            _ => {}
        }

        if let Some(subscale_id) = &question.subscale {
            match instrument.subscale(subscale_id) {
                None => problems.push(IntegrityProblem::UnknownSubscale {
                    question_id: question.id.clone(),
                    subscale_id: subscale_id.clone(),
                }),
                Some(subscale) if !subscale.question_ids.contains(&question.id) => {
                    problems.push(IntegrityProblem::MembershipMismatch {
                        question_id: question.id.clone(),
                        subscale_id: subscale_id.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }
}

fn check_subscales(instrument: &Instrument, problems: &mut Vec<IntegrityProblem>) {
    let mut seen = HashSet::new();

    for subscale in &instrument.subscales {
        if !seen.insert(subscale.id.as_str()) {
            problems.push(IntegrityProblem::DuplicateSubscale(subscale.id.clone()));
        }

        for question_id in &subscale.question_ids {
            match instrument.question(question_id) {
                None => problems.push(IntegrityProblem::DanglingQuestion {
                    subscale_id: subscale.id.clone(),
                    question_id: question_id.clone(),
                }),
                Some(q) if q.subscale.as_deref() != Some(subscale.id.as_str()) => {
                    problems.push(IntegrityProblem::MembershipMismatch {
                        question_id: question_id.clone(),
                        subscale_id: subscale.id.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if subscale.bands.is_empty() {
            problems.push(IntegrityProblem::NoBands(subscale.id.clone()));
            continue;
        }

        // Bands must tile [0, subscale max] in ascending order.
        let mut expected_min = 0;
        for band in &subscale.bands {
            if band.min_score > band.max_score {
                problems.push(IntegrityProblem::InvertedBand {
                    subscale_id: subscale.id.clone(),
                    min: band.min_score,
                    max: band.max_score,
                });
            }
            if band.min_score != expected_min {
                problems.push(IntegrityProblem::BandDiscontinuity {
                    subscale_id: subscale.id.clone(),
                    expected: expected_min,
                    found: band.min_score,
                });
            }
            expected_min = band.max_score.saturating_add(1);
        }

        if subscale
            .bands
            .windows(2)
            .any(|pair| pair[1].level < pair[0].level)
        {
            problems.push(IntegrityProblem::SeverityOrder(subscale.id.clone()));
        }

        if let Ok(subscale_max) = aggregate::subscale_max(instrument, subscale)
            && let Some(last) = subscale.bands.last()
            && last.max_score != subscale_max
        {
            problems.push(IntegrityProblem::BandCoverage {
                subscale_id: subscale.id.clone(),
                expected: subscale_max,
                found: last.max_score,
            });
        }
    }
}

/// The validated set of instruments available to a running service.
#[derive(Debug, Clone)]
pub struct Catalog {
    instruments: Vec<Arc<Instrument>>,
}

impl Catalog {
    /// Load the built-in instruments, failing fast on the first instrument
    /// that does not pass [`check_instrument`].
    pub fn load(policy: &CatalogPolicy) -> Result<Self, CatalogError> {
        Self::from_instruments(crate::all_instruments().into_iter().cloned(), policy)
    }

    pub fn from_instruments(
        instruments: impl IntoIterator<Item = Instrument>,
        policy: &CatalogPolicy,
    ) -> Result<Self, CatalogError> {
        let mut loaded: Vec<Arc<Instrument>> = Vec::new();

        for instrument in instruments {
            if loaded.iter().any(|i| i.id == instrument.id) {
                return Err(CatalogError::DuplicateInstrument(instrument.id));
            }

            let problems = check_instrument(&instrument, policy);
            if !problems.is_empty() {
                tracing::error!(
                    instrument_id = %instrument.id,
                    problems = problems.len(),
                    "instrument failed integrity checks"
                );
                return Err(CatalogError::Integrity {
                    instrument_id: instrument.id,
                    problems,
                });
            }

            tracing::debug!(
                instrument_id = %instrument.id,
                questions = instrument.questions.len(),
                subscales = instrument.subscales.len(),
                "instrument loaded"
            );
            loaded.push(Arc::new(instrument));
        }

        tracing::info!(instruments = loaded.len(), "catalog loaded");
        Ok(Self { instruments: loaded })
    }

    /// Load a catalog from a JSON array of instruments.
    pub fn from_json_str(json: &str, policy: &CatalogPolicy) -> Result<Self, CatalogError> {
        let instruments: Vec<Instrument> = serde_json::from_str(json)?;
        Self::from_instruments(instruments, policy)
    }

    pub fn from_json_file(path: &Path, policy: &CatalogPolicy) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "loading catalog from file");
        Self::from_json_str(&contents, policy)
    }

    pub fn get(&self, id: &str) -> Result<Arc<Instrument>, InstrumentError> {
        self.instruments
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
    }

    pub fn list(&self) -> Vec<InstrumentSummary> {
        self.instruments
            .iter()
            .map(|i| InstrumentSummary::from(i.as_ref()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
