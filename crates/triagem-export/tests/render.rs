use std::collections::BTreeMap;

use triagem_core::models::result::{ScoreResult, SubscaleAnalysis};
use triagem_core::models::risk::RiskLevel;
use triagem_core::models::severity::Severity;
use triagem_core::session_id::SessionId;
use triagem_export::error::ExportError;
use triagem_export::render::{render_analysis, render_template, render_with_template};

fn result() -> ScoreResult {
    let now = jiff::Timestamp::from_second(1_700_000_000).unwrap();
    let mut detailed_analysis = BTreeMap::new();
    detailed_analysis.insert(
        "gad7".to_string(),
        SubscaleAnalysis {
            name: "Generalized Anxiety (GAD-7)".to_string(),
            score: 14,
            max_score: 28,
            percentage: 50.0,
            level: Severity::Moderate,
            description: "Moderate anxiety".to_string(),
            recommendations: vec!["Cognitive behavioural therapy".to_string()],
            approximate: false,
        },
    );

    ScoreResult {
        session_id: SessionId::generate("anxiety", now).unwrap(),
        instrument_id: "anxiety".to_string(),
        instrument_name: "Comprehensive Anxiety Assessment".to_string(),
        total_score: 63,
        max_score: 160,
        percentage: 39.375,
        subscale_scores: BTreeMap::from([("gad7".to_string(), 14)]),
        risk_level: RiskLevel::Mild,
        interpretation: "Mild symptoms present".to_string(),
        recommendations: vec![
            "Use self-management and coping techniques".to_string(),
            "Exercise regularly and practise relaxation".to_string(),
        ],
        detailed_analysis,
        scientific_basis: "GAD-7 + BAI".to_string(),
        elapsed_seconds: 600,
        timestamp: now,
    }
}

#[test]
fn analysis_contains_every_section() {
    let text = render_analysis(&result()).unwrap();

    assert!(text.contains("Total score: 63/160 (39%)"), "{text}");
    assert!(text.contains("Risk level: Mild"), "{text}");
    assert!(text.contains("Description: Mild symptoms present"));
    assert!(text.contains("• Use self-management and coping techniques"));
    assert!(text.contains("Generalized Anxiety (GAD-7): 14/28 - Moderate anxiety"));
    assert!(text.contains("  • Cognitive behavioural therapy"));
    assert!(text.trim_end().ends_with("Scientific basis: GAD-7 + BAI"));
}

#[test]
fn subscale_section_is_omitted_without_subscales() {
    let mut result = result();
    result.detailed_analysis.clear();

    let text = render_analysis(&result).unwrap();
    assert!(!text.contains("Subscale analysis"));
}

#[test]
fn approximate_subscales_are_flagged() {
    let mut result = result();
    if let Some(analysis) = result.detailed_analysis.get_mut("gad7") {
        analysis.approximate = true;
    }

    let text = render_analysis(&result).unwrap();
    assert!(text.contains("Moderate anxiety (approximate)"));
}

#[test]
fn custom_template_sees_derived_fields() {
    let text = render_with_template(
        "short",
        "{{ instrument_id }}={{ percentage_rounded }}% {{ risk_label }}",
        &result(),
    )
    .unwrap();
    assert_eq!(text, "anxiety=39% Mild");
}

#[test]
fn generic_render_uses_serialized_fields() {
    #[derive(serde::Serialize)]
    struct Greeting {
        name: &'static str,
    }

    let text = render_template("hello", "Hello {{ name }}", &Greeting { name: "world" }).unwrap();
    assert_eq!(text, "Hello world");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_with_template("broken", "{% if %}", &result()).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}
