//! Replay verification lock tests.
//!
//! Proves:
//! 1. An untampered record replays to `Match`
//! 2. Editing any step yields `Divergence` at that step
//! 3. Editing only the outcome yields `OutcomeDivergence`
//! 4. Structurally broken records are errors, not verdicts

use bisect_search::{
    parse_run, replay_verify, replay_verify_bytes, LogError, ReplayError, ReplayVerdict,
    SearchOutcomeV1,
};
use lock_tests::run_test_helpers::{scenario_run, tampered_record};

#[test]
fn untampered_records_match() {
    for target in [1.0, 3.0, 4.0, 5.0, 7.0, 9.0, 100.0, -1.0] {
        let bytes = scenario_run(target).to_canonical_json_bytes().unwrap();
        assert_eq!(replay_verify_bytes(&bytes).unwrap(), ReplayVerdict::Match, "target {target}");
    }
}

#[test]
fn each_tampered_step_is_located() {
    let run = scenario_run(9.0);
    for index in 0..run.steps().len() {
        let bytes = tampered_record(&run, |v| {
            v["steps"][index]["probe"] = "go_left".into();
        });
        match replay_verify_bytes(&bytes).unwrap() {
            ReplayVerdict::Divergence { step_index, .. } => assert_eq!(step_index, index),
            other => panic!("step {index}: expected Divergence, got {other:?}"),
        }
    }
}

#[test]
fn extra_step_is_a_divergence() {
    let run = scenario_run(5.0);
    let bytes = tampered_record(&run, |v| {
        let extra = v["steps"][1].clone();
        v["steps"].as_array_mut().unwrap().push(extra);
    });
    assert!(matches!(
        replay_verify_bytes(&bytes).unwrap(),
        ReplayVerdict::Divergence { step_index: 2, .. }
    ));
}

#[test]
fn changed_target_diverges() {
    let run = scenario_run(9.0);
    let bytes = tampered_record(&run, |v| v["target"] = "1".into());
    let recorded = parse_run(&bytes).unwrap();
    assert!(matches!(
        replay_verify(&recorded),
        ReplayVerdict::Divergence { step_index: 0, .. }
    ));
}

#[test]
fn outcome_only_tamper_is_reported() {
    let run = scenario_run(5.0);
    let bytes = tampered_record(&run, |v| {
        v["outcome"] = serde_json::json!({"type": "found", "index": 3});
    });
    assert_eq!(
        replay_verify_bytes(&bytes).unwrap(),
        ReplayVerdict::OutcomeDivergence {
            recorded: SearchOutcomeV1::Found { index: 3 },
            replayed: SearchOutcomeV1::NotFound,
        }
    );
}

#[test]
fn broken_records_are_errors() {
    let run = scenario_run(9.0);

    let wrong_schema = tampered_record(&run, |v| v["schema_version"] = "bisect.run.v0".into());
    assert!(matches!(
        replay_verify_bytes(&wrong_schema),
        Err(ReplayError::Malformed(LogError::UnsupportedSchema { .. }))
    ));

    let unsorted = tampered_record(&run, |v| {
        v["sequence"] = serde_json::json!(["9", "1"]);
    });
    assert!(matches!(
        replay_verify_bytes(&unsorted),
        Err(ReplayError::Malformed(LogError::Sequence(_)))
    ));

    assert!(matches!(
        replay_verify_bytes(b"not json"),
        Err(ReplayError::Malformed(LogError::InvalidJson { .. }))
    ));
}
