use triagem_cli::likert::{
    LikertAnswer, LikertError, label_value, parse_answer, responses_from_json,
};

#[test]
fn frequency_labels_in_both_languages() {
    for (label, expected) in [
        ("nunca", 0),
        ("Never", 0),
        ("raramente", 1),
        ("às vezes", 2),
        ("as vezes", 2),
        ("SOMETIMES", 2),
        ("frequentemente", 3),
        ("always", 4),
    ] {
        assert_eq!(label_value(label).unwrap(), expected, "{label}");
    }
}

#[test]
fn agreement_and_yes_no_labels() {
    assert_eq!(label_value("discordo totalmente").unwrap(), 0);
    assert_eq!(label_value("discordo").unwrap(), 1);
    assert_eq!(label_value("neutro").unwrap(), 2);
    assert_eq!(label_value("concordo").unwrap(), 3);
    assert_eq!(label_value("Concordo Totalmente").unwrap(), 4);
    assert_eq!(label_value("não").unwrap(), 0);
    assert_eq!(label_value("maybe").unwrap(), 2);
    assert_eq!(label_value("  sim ").unwrap(), 4);
}

#[test]
fn unknown_label_is_an_error() {
    let err = label_value("kinda").unwrap_err();
    assert!(matches!(err, LikertError::UnknownLabel(ref l) if l == "kinda"));
}

#[test]
fn numbers_pass_through_unchecked() {
    assert_eq!(parse_answer(" 3 ").unwrap(), 3);
    assert_eq!(parse_answer("7").unwrap(), 7);
    assert_eq!(parse_answer("-1").unwrap(), -1);
    assert_eq!(parse_answer("often").unwrap(), 3);
}

#[test]
fn answer_enum_accepts_numbers_and_labels() {
    let answers: Vec<LikertAnswer> = serde_json::from_str(r#"[2, "sempre"]"#).unwrap();
    assert_eq!(answers[0], LikertAnswer::Value(2));
    assert_eq!(answers[1].to_value().unwrap(), 4);
}

#[test]
fn responses_file_mixes_encodings() {
    let responses =
        responses_from_json(r#"{ "gad1": 2, "gad2": "frequentemente", "gad3": "never" }"#).unwrap();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses.get("gad1"), Some(2));
    assert_eq!(responses.get("gad2"), Some(3));
    assert_eq!(responses.get("gad3"), Some(0));
}

#[test]
fn responses_file_with_unknown_label_fails() {
    let err = responses_from_json(r#"{ "gad1": "whenever" }"#).unwrap_err();
    assert!(matches!(err, LikertError::UnknownLabel(_)));
}

#[test]
fn responses_file_must_be_an_object() {
    let err = responses_from_json("[1, 2]").unwrap_err();
    assert!(matches!(err, LikertError::Json(_)));
}
