use crate::test_helpers::factories::PeerOutcomeFactory;
use serde_json::json;

#[test]
fn builds_success_outcome_with_defaults() {
    let outcome = PeerOutcomeFactory::new().create();

    assert!(outcome.is_success());
    assert_eq!(outcome.peer_id(), "peer_1");
    assert_eq!(outcome.columns(), &["id".to_string()]);
    assert_eq!(outcome.rows(), &[vec![json!(1)]]);
}

#[test]
fn failed_outcome_drops_rows() {
    let outcome = PeerOutcomeFactory::new()
        .with_peer_id("http://localhost:8009")
        .with_rows(vec![vec![json!(1)], vec![json!(2)]])
        .failed("boom")
        .create();

    assert!(!outcome.is_success());
    assert_eq!(outcome.error(), Some("boom"));
    assert_eq!(outcome.row_count(), 0);
}
