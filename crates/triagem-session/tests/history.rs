use std::collections::BTreeMap;

use triagem_core::models::response::ResponseSet;
use triagem_core::models::result::ScoreResult;
use triagem_core::models::risk::RiskLevel;
use triagem_core::session_id::SessionId;
use triagem_session::analytics::{RECENT_LIMIT, ScreeningStats};
use triagem_session::history::{Trend, compare_with_history};
use triagem_storage::results::ResultRecord;

fn ts(secs: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_second(secs).unwrap()
}

fn record(
    instrument_id: &str,
    at: i64,
    percentage: f64,
    risk_level: RiskLevel,
    elapsed: u64,
) -> ResultRecord {
    let session_id = SessionId::generate(instrument_id, ts(at)).unwrap();
    ResultRecord {
        result: ScoreResult {
            session_id,
            instrument_id: instrument_id.to_string(),
            instrument_name: instrument_id.to_string(),
            total_score: percentage as u32,
            max_score: 100,
            percentage,
            subscale_scores: BTreeMap::new(),
            risk_level,
            interpretation: String::new(),
            recommendations: Vec::new(),
            detailed_analysis: BTreeMap::new(),
            scientific_basis: String::new(),
            elapsed_seconds: elapsed,
            timestamp: ts(at),
        },
        responses: ResponseSet::new(),
        started_at: ts(at - elapsed as i64),
    }
}

#[test]
fn empty_history_is_a_first_assessment() {
    let report = Trend::compare(42.0, &[]);
    assert_eq!(report.trend, Trend::FirstAssessment);
    assert_eq!(report.historical_mean, None);
}

#[test]
fn trend_thresholds_follow_the_historical_mean() {
    let history = [40.0, 60.0];
    let cases = [
        (38.0, Trend::SignificantImprovement),
        (40.0, Trend::ModerateImprovement),
        (44.0, Trend::ModerateImprovement),
        (45.0, Trend::Stable),
        (50.0, Trend::Stable),
        (55.0, Trend::Stable),
        (56.0, Trend::ModerateWorsening),
        (60.0, Trend::ModerateWorsening),
        (61.0, Trend::SignificantWorsening),
    ];
    for (current, expected) in cases {
        let report = Trend::compare(current, &history);
        assert_eq!(report.historical_mean, Some(50.0));
        assert_eq!(report.trend, expected, "{current}");
    }
}

#[test]
fn history_only_counts_the_same_instrument() {
    let current = record("anxiety", 2_000, 30.0, RiskLevel::Mild, 100);
    let history = vec![
        record("anxiety", 1_000, 50.0, RiskLevel::Moderate, 100),
        record("depression", 1_500, 90.0, RiskLevel::High, 100),
        current.clone(),
    ];

    let report = compare_with_history(&current, &history);
    assert_eq!(report.historical_mean, Some(50.0));
    assert_eq!(report.trend, Trend::SignificantImprovement);
}

#[test]
fn stats_count_by_instrument_and_risk() {
    let records = vec![
        record("anxiety", 1_000, 20.0, RiskLevel::Low, 100),
        record("anxiety", 2_000, 60.0, RiskLevel::Moderate, 201),
        record("adhd", 3_000, 80.0, RiskLevel::High, 300),
    ];

    let stats = ScreeningStats::from_records(&records);
    assert_eq!(stats.total_sessions, 3);
    assert_eq!(stats.by_instrument["anxiety"], 2);
    assert_eq!(stats.by_instrument["adhd"], 1);
    assert_eq!(stats.by_risk_level[&RiskLevel::High], 1);
    assert!(!stats.by_risk_level.contains_key(&RiskLevel::Mild));
    assert_eq!(stats.mean_completion_seconds, Some(200));
    assert_eq!(stats.recent[0].instrument_id, "adhd");
    assert_eq!(stats.recent[0].percentage, 80);
}

#[test]
fn stats_keep_only_the_most_recent_sessions() {
    let records: Vec<_> = (0..15)
        .map(|i| record("bipolar", 1_000 + i * 10, 50.0, RiskLevel::Moderate, 60))
        .collect();

    let stats = ScreeningStats::from_records(&records);
    assert_eq!(stats.recent.len(), RECENT_LIMIT);
    assert_eq!(stats.recent[0].timestamp, ts(1_140));
    assert!(stats
        .recent
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
}

#[test]
fn empty_stats_have_no_means() {
    let stats = ScreeningStats::from_records(&[]);
    assert_eq!(stats.total_sessions, 0);
    assert_eq!(stats.average_percentage, None);
    assert_eq!(stats.mean_completion_seconds, None);
    assert!(stats.recent.is_empty());
}
