//! Comparison of a new score against a subject's earlier screenings.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use triagem_storage::results::ResultRecord;

/// Points of difference from the historical mean beyond which a change is
/// significant.
pub const SIGNIFICANT_CHANGE: f64 = 10.0;
/// Points of difference beyond which a change is moderate.
pub const MODERATE_CHANGE: f64 = 5.0;

/// Direction of change. Scores measure symptoms, so a lower score is an
/// improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    FirstAssessment,
    SignificantImprovement,
    ModerateImprovement,
    Stable,
    ModerateWorsening,
    SignificantWorsening,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendReport {
    pub trend: Trend,
    pub historical_mean: Option<f64>,
    /// `current - historical_mean`.
    pub difference: Option<f64>,
}

impl Trend {
    /// Compare `current` with the mean of `history`.
    pub fn compare(current: f64, history: &[f64]) -> TrendReport {
        if history.is_empty() {
            return TrendReport {
                trend: Trend::FirstAssessment,
                historical_mean: None,
                difference: None,
            };
        }

        let mean = history.iter().sum::<f64>() / history.len() as f64;
        let difference = current - mean;

        let trend = if difference < -SIGNIFICANT_CHANGE {
            Trend::SignificantImprovement
        } else if difference < -MODERATE_CHANGE {
            Trend::ModerateImprovement
        } else if difference > SIGNIFICANT_CHANGE {
            Trend::SignificantWorsening
        } else if difference > MODERATE_CHANGE {
            Trend::ModerateWorsening
        } else {
            Trend::Stable
        };

        TrendReport {
            trend,
            historical_mean: Some(mean),
            difference: Some(difference),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::FirstAssessment => "First assessment, no earlier results to compare",
            Trend::SignificantImprovement => "Significant improvement detected",
            Trend::ModerateImprovement => "Moderate improvement",
            Trend::Stable => "Stable",
            Trend::ModerateWorsening => "Moderate worsening",
            Trend::SignificantWorsening => "Significant worsening detected",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compare a result's percentage with earlier results for the same
/// instrument. Records for other instruments, and the record for the
/// current session itself, are ignored.
pub fn compare_with_history(current: &ResultRecord, history: &[ResultRecord]) -> TrendReport {
    let earlier: Vec<f64> = history
        .iter()
        .filter(|r| r.result.instrument_id == current.result.instrument_id)
        .filter(|r| r.result.session_id != current.result.session_id)
        .filter(|r| r.result.timestamp <= current.result.timestamp)
        .map(|r| r.result.percentage)
        .collect();
    Trend::compare(current.result.percentage, &earlier)
}
