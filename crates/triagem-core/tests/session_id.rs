use std::str::FromStr;

use triagem_core::models::response::ResponseSet;
use triagem_core::session_id::{prefix_for, SessionId};

fn ts(millis: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_millisecond(millis).expect("valid timestamp")
}

#[test]
fn generated_id_has_prefix_timestamp_and_random_segment() {
    let id = SessionId::generate("anxiety", ts(1_760_000_000_000)).unwrap();
    let text = id.as_str();

    assert!(text.starts_with("AN-1760000000000-"), "unexpected id {text}");
    assert_eq!(id.prefix(), "AN");
    assert_eq!(text.rsplit('-').next().unwrap().len(), 5);
}

#[test]
fn generated_ids_parse_back() {
    let id = SessionId::generate("depression", ts(1_700_000_000_123)).unwrap();
    let parsed = SessionId::from_str(id.as_str()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn two_ids_for_the_same_instant_differ() {
    let now = ts(1_700_000_000_000);
    let a = SessionId::generate("adhd", now).unwrap();
    let b = SessionId::generate("adhd", now).unwrap();
    assert_ne!(a, b);
}

#[test]
fn prefix_skips_non_alphanumeric_characters() {
    assert_eq!(prefix_for("-my-thomania").unwrap(), "MY");
    assert!(prefix_for("x").is_err());
    assert!(prefix_for("--").is_err());
}

#[test]
fn malformed_ids_are_rejected() {
    for bad in ["", "AN", "AN-123", "an-123-abcde", "AN-12a-abcde", "AN-123-abc", "ANX-1-abcde"] {
        assert!(SessionId::from_str(bad).is_err(), "{bad} should not parse");
    }
}

#[test]
fn merge_overrides_existing_answers() {
    let mut recorded: ResponseSet = [("q1", 1), ("q2", 2)].into_iter().collect();
    let submitted: ResponseSet = [("q2", 4), ("q3", 0)].into_iter().collect();

    recorded.merge(&submitted);

    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded.get("q1"), Some(1));
    assert_eq!(recorded.get("q2"), Some(4));
    assert_eq!(recorded.get("q3"), Some(0));
}
