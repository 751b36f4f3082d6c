//! Scenario locks for the worked example `"3, 7, 1, 9, 4"`.
//!
//! Proves:
//! 1. Preparation sorts the input ascending
//! 2. Target 9 takes exactly three steps with locked windows and is found at index 4
//! 3. Target 5 is not found after two steps
//! 4. Canonical record bytes and digests match golden values
//! 5. Input refusals carry the user-facing messages

use bisect_harness::config::PlaybackSettings;
use bisect_harness::render::banner;
use bisect_harness::runner::run_pipeline;
use bisect_kernel::PrepareError;
use bisect_kernel::prepare;
use bisect_search::{ProbeV1, SearchOutcomeV1};
use lock_tests::run_test_helpers::{scenario_run, scenario_sequence};

const GOLDEN_RECORD: &str = concat!(
    r#"{"outcome":{"index":4,"type":"found"},"schema_version":"bisect.run.v1","#,
    r#""sequence":["1","3","4","7","9"],"steps":["#,
    r#"{"midpoint_offset":2,"probe":"go_right","window_high":4,"window_low":0},"#,
    r#"{"midpoint_offset":0,"probe":"go_right","window_high":4,"window_low":3},"#,
    r#"{"midpoint_offset":0,"probe":"match","window_high":4,"window_low":4}"#,
    r#"],"target":"9"}"#
);
const GOLDEN_RUN_DIGEST: &str =
    "sha256:f8015728f8d060088e6efb725c7161df7b1f782156a32868d4d3756e156d9ed3";
const GOLDEN_STEP_LOG_DIGEST: &str =
    "sha256:c68cf3c9ca389c4b71c050b34b12028cc9322d2285675f53f5490f17c4f1e5ee";
const GOLDEN_SEQUENCE_DIGEST: &str =
    "sha256:705845560b21ab130808a8b4ed8bbb44a9ca1cc21e0ed1a8b8e78961e335681c";

#[test]
fn scenario_prepares_sorted() {
    assert_eq!(scenario_sequence().as_slice(), &[1.0, 3.0, 4.0, 7.0, 9.0]);
}

#[test]
fn scenario_found_steps_are_locked() {
    let run = scenario_run(9.0);
    let windows: Vec<(usize, usize, usize, ProbeV1)> = run
        .steps()
        .iter()
        .map(|s| (s.window_low, s.window_high, s.midpoint_offset, s.probe))
        .collect();
    assert_eq!(
        windows,
        vec![
            (0, 4, 2, ProbeV1::GoRight),
            (3, 4, 0, ProbeV1::GoRight),
            (4, 4, 0, ProbeV1::Match),
        ]
    );
    assert_eq!(run.outcome(), SearchOutcomeV1::Found { index: 4 });
    assert_eq!(run.outcome().position(), Some(5));
    assert_eq!(run.probed_values(), vec![4.0, 7.0, 9.0]);
    assert_eq!(
        banner(&run, 3).as_deref(),
        Some("Element Found at index 4 and position 5.")
    );
}

#[test]
fn scenario_absent_target_is_not_found() {
    let run = scenario_run(5.0);
    assert_eq!(run.outcome(), SearchOutcomeV1::NotFound);
    assert_eq!(run.probed_values(), vec![4.0, 7.0]);
    assert_eq!(banner(&run, 2).as_deref(), Some("Element Not Found!"));
}

#[test]
fn scenario_record_bytes_are_golden() {
    let bytes = scenario_run(9.0).to_canonical_json_bytes().unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), GOLDEN_RECORD);
}

#[test]
fn scenario_digests_are_golden() {
    let report = run_pipeline("3, 7, 1, 9, 4", "9", &PlaybackSettings::default()).unwrap();
    assert_eq!(report.run_digest.as_str(), GOLDEN_RUN_DIGEST);
    assert_eq!(report.step_log_digest.as_str(), GOLDEN_STEP_LOG_DIGEST);
    assert_eq!(report.sequence_digest.as_str(), GOLDEN_SEQUENCE_DIGEST);
}

#[test]
fn refusals_carry_user_messages() {
    assert_eq!(
        prepare("abc, 2"),
        Err(PrepareError::Parse {
            token: "abc".into()
        })
    );
    assert_eq!(
        prepare("abc, 2").unwrap_err().to_string(),
        "\"abc\" is not a valid number"
    );
    assert_eq!(prepare(",  ,"), Err(PrepareError::EmptyInput));
    assert_eq!(
        PrepareError::EmptyInput.to_string(),
        "Please enter at least one number"
    );
}
