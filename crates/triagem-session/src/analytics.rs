//! Aggregate statistics over persisted screenings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use triagem_core::models::risk::RiskLevel;
use triagem_core::session_id::SessionId;
use triagem_storage::results::ResultRecord;

/// How many sessions [`ScreeningStats::recent`] keeps.
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecentSession {
    pub session_id: SessionId,
    pub instrument_id: String,
    pub risk_level: RiskLevel,
    pub percentage: u32,
    pub timestamp: jiff::Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningStats {
    pub total_sessions: usize,
    pub by_instrument: BTreeMap<String, usize>,
    pub by_risk_level: BTreeMap<RiskLevel, usize>,
    /// Mean percentage across all sessions.
    pub average_percentage: Option<f64>,
    /// Mean completion time, rounded to whole seconds.
    pub mean_completion_seconds: Option<u64>,
    /// Most recent first.
    pub recent: Vec<RecentSession>,
}

impl ScreeningStats {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut by_instrument = BTreeMap::new();
        let mut by_risk_level = BTreeMap::new();
        for record in records {
            *by_instrument
                .entry(record.result.instrument_id.clone())
                .or_insert(0) += 1;
            *by_risk_level.entry(record.result.risk_level).or_insert(0) += 1;
        }

        let (average_percentage, mean_completion_seconds) = if records.is_empty() {
            (None, None)
        } else {
            let n = records.len() as f64;
            let percentage = records.iter().map(|r| r.result.percentage).sum::<f64>() / n;
            let seconds = records
                .iter()
                .map(|r| r.result.elapsed_seconds as f64)
                .sum::<f64>()
                / n;
            (Some(percentage), Some(seconds.round() as u64))
        };

        let mut sorted: Vec<&ResultRecord> = records.iter().collect();
        sorted.sort_by(|a, b| b.result.timestamp.cmp(&a.result.timestamp));
        let recent = sorted
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|r| RecentSession {
                session_id: r.result.session_id.clone(),
                instrument_id: r.result.instrument_id.clone(),
                risk_level: r.result.risk_level,
                percentage: r.result.rounded_percentage(),
                timestamp: r.result.timestamp,
            })
            .collect();

        Self {
            total_sessions: records.len(),
            by_instrument,
            by_risk_level,
            average_percentage,
            mean_completion_seconds,
            recent,
        }
    }
}
