//! Integrity checks on the built-in catalog and on deliberately broken
//! instrument definitions.

use std::io::Write;

use triagem_core::models::severity::Severity;
use triagem_instruments::builder::InstrumentBuilder;
use triagem_instruments::catalog::{
    Catalog, CatalogPolicy, IntegrityProblem, check_instrument, validate_instrument,
};
use triagem_instruments::error::{CatalogError, InstrumentError};
use triagem_instruments::scoring::{AlgorithmKind, Instrument, Question, band};
use triagem_instruments::{all_instruments, get_instrument};

fn anxiety() -> Instrument {
    get_instrument("anxiety").expect("anxiety is built in").clone()
}

/// Ten-question plain-sum instrument with one subscale over the first five.
fn small(id: &str) -> Instrument {
    let grouped = (1..=5).map(|n| Question::new(format!("q{n}"), "core", format!("Item {n}")));
    let rest = (6..=10).map(|n| Question::new(format!("q{n}"), "extra", format!("Item {n}")));
    InstrumentBuilder::new(id, "Small")
        .scientific_basis("Test fixture")
        .algorithm(AlgorithmKind::Sum, 40)
        .subscale(
            "core",
            "Core",
            "First five items",
            grouped.collect(),
            vec![
                band(0, 9, Severity::Minimal, "Low", &["Nothing to do"]),
                band(10, 20, Severity::Moderate, "High", &["Talk to someone"]),
            ],
        )
        .questions(rest)
        .build()
}

#[test]
fn builtin_catalog_passes_every_check() {
    let policy = CatalogPolicy::default();
    for instrument in all_instruments() {
        let problems = check_instrument(instrument, &policy);
        assert!(problems.is_empty(), "{}: {problems:?}", instrument.id);
    }

    let catalog = Catalog::load(&policy).expect("built-in catalog should load");
    assert_eq!(catalog.len(), 6);
}

#[test]
fn builtin_instruments_have_expected_shape() {
    let expected = [
        ("anxiety", 40, 160),
        ("depression", 42, 168),
        ("adhd", 22, 112),
        ("bipolar", 31, 152),
        ("narcissism", 42, 168),
        ("mythomania", 35, 168),
    ];
    for (id, questions, max) in expected {
        let instrument = get_instrument(id).unwrap_or_else(|| panic!("{id} missing"));
        assert_eq!(instrument.total_questions(), questions, "{id}");
        assert_eq!(instrument.algorithm.max_score, max, "{id}");
    }
}

#[test]
fn list_returns_summaries_in_catalog_order() {
    let catalog = Catalog::load(&CatalogPolicy::default()).unwrap();
    let ids: Vec<_> = catalog.list().into_iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        ["anxiety", "depression", "adhd", "bipolar", "narcissism", "mythomania"]
    );

    let adhd = catalog.list().into_iter().find(|s| s.id == "adhd").unwrap();
    assert_eq!(adhd.total_questions, 22);
    assert!(!adhd.scientific_basis.is_empty());
}

#[test]
fn unknown_instrument_is_reported() {
    let catalog = Catalog::load(&CatalogPolicy::default()).unwrap();
    let err = catalog.get("insomnia").unwrap_err();
    assert!(matches!(err, InstrumentError::UnknownInstrument(id) if id == "insomnia"));
}

#[test]
fn subscale_referencing_missing_question_fails_validation() {
    let mut instrument = anxiety();
    instrument.subscales[0].question_ids.push("gad99".to_string());

    let policy = CatalogPolicy::default();
    assert!(!validate_instrument(&instrument, &policy));
    assert!(check_instrument(&instrument, &policy).contains(&IntegrityProblem::DanglingQuestion {
        subscale_id: "gad7".to_string(),
        question_id: "gad99".to_string(),
    }));
}

#[test]
fn catalog_refuses_to_load_a_broken_instrument() {
    let mut broken = small("broken");
    broken.subscales[0].question_ids.push("missing".to_string());

    let err = Catalog::from_instruments([small("fine"), broken], &CatalogPolicy::default())
        .unwrap_err();
    match err {
        CatalogError::Integrity { instrument_id, problems } => {
            assert_eq!(instrument_id, "broken");
            assert!(!problems.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn declared_max_must_match_computed_max() {
    let mut instrument = small("drift");
    instrument.algorithm.max_score = 50;

    let problems = check_instrument(&instrument, &CatalogPolicy::default());
    assert!(problems.contains(&IntegrityProblem::MaxScoreMismatch {
        declared: 50,
        computed: 40,
    }));
}

#[test]
fn too_few_questions_depends_on_policy() {
    let instrument = small("short");
    assert!(validate_instrument(&instrument, &CatalogPolicy::default()));

    let strict = CatalogPolicy { min_questions: 11 };
    assert_eq!(
        check_instrument(&instrument, &strict),
        vec![IntegrityProblem::TooFewQuestions { found: 10, minimum: 11 }]
    );
}

#[test]
fn complex_algorithm_is_rejected() {
    let mut instrument = small("complex");
    instrument.algorithm.kind = AlgorithmKind::Complex;

    let problems = check_instrument(&instrument, &CatalogPolicy::default());
    assert!(problems.contains(&IntegrityProblem::UnsupportedAlgorithm(AlgorithmKind::Complex)));
}

#[test]
fn oversized_weight_is_an_integrity_problem() {
    let mut instrument = small("huge_weight");
    instrument.algorithm.kind = AlgorithmKind::Weighted;
    instrument.questions[7].weight = Some(u32::MAX);
    let json = serde_json::to_string(&vec![instrument]).unwrap();

    let err = Catalog::from_json_str(&json, &CatalogPolicy::default()).unwrap_err();
    match err {
        CatalogError::Integrity {
            instrument_id,
            problems,
        } => {
            assert_eq!(instrument_id, "huge_weight");
            assert!(problems.contains(&IntegrityProblem::ScoreOverflow));
        }
        other => panic!("expected an integrity error, got {other:?}"),
    }
}

#[test]
fn weights_summing_past_u32_are_an_integrity_problem() {
    let mut instrument = small("wide_weights");
    instrument.algorithm.kind = AlgorithmKind::Weighted;
    for question in &mut instrument.questions[5..] {
        question.weight = Some(u32::MAX / 8);
    }

    let problems = check_instrument(&instrument, &CatalogPolicy::default());
    assert!(problems.contains(&IntegrityProblem::ScoreOverflow));
}

#[test]
fn weights_are_rejected_on_sum_instruments() {
    let mut instrument = small("weighted_sum");
    instrument.questions[7].weight = Some(3);

    let problems = check_instrument(&instrument, &CatalogPolicy::default());
    assert!(problems.contains(&IntegrityProblem::WeightOnSumInstrument("q8".to_string())));
}

#[test]
fn band_gaps_and_coverage_are_reported() {
    let mut instrument = small("gappy");
    instrument.subscales[0].bands[1].min_score = 12;
    instrument.subscales[0].bands[1].max_score = 18;

    let problems = check_instrument(&instrument, &CatalogPolicy::default());
    assert!(problems.contains(&IntegrityProblem::BandDiscontinuity {
        subscale_id: "core".to_string(),
        expected: 10,
        found: 12,
    }));
    assert!(problems.contains(&IntegrityProblem::BandCoverage {
        subscale_id: "core".to_string(),
        expected: 20,
        found: 18,
    }));
}

#[test]
fn decreasing_severity_is_reported() {
    let mut instrument = small("inverted");
    instrument.subscales[0].bands[1].level = Severity::Minimal;
    instrument.subscales[0].bands[0].level = Severity::Mild;

    let problems = check_instrument(&instrument, &CatalogPolicy::default());
    assert!(problems.contains(&IntegrityProblem::SeverityOrder("core".to_string())));
}

#[test]
fn duplicate_instrument_ids_are_rejected() {
    let err = Catalog::from_instruments([small("twin"), small("twin")], &CatalogPolicy::default())
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateInstrument(id) if id == "twin"));
}

#[test]
fn catalog_loads_from_json_file() {
    let instruments: Vec<Instrument> = all_instruments().into_iter().cloned().collect();
    let json = serde_json::to_string_pretty(&instruments).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let catalog = Catalog::from_json_file(file.path(), &CatalogPolicy::default())
        .expect("serialized built-ins should load back");
    assert_eq!(catalog.len(), 6);
    assert_eq!(*catalog.get("bipolar").unwrap(), *get_instrument("bipolar").unwrap());
}

#[test]
fn malformed_json_catalog_is_a_parse_error() {
    let err = Catalog::from_json_str("[{\"id\": 3}]", &CatalogPolicy::default()).unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}
