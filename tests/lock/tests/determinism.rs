//! In-process determinism: repeated runs produce identical bytes and
//! digests, and input order or spacing never changes the result.

use bisect_harness::config::PlaybackSettings;
use bisect_harness::runner::run_pipeline;
use bisect_kernel::prepare;
use bisect_search::search;

#[test]
fn repeated_runs_are_byte_identical() {
    let settings = PlaybackSettings::default();
    let baseline = run_pipeline("10, -3, 2.5, 8, 8, 0", "8", &settings).unwrap();
    for _ in 0..10 {
        let again = run_pipeline("10, -3, 2.5, 8, 8, 0", "8", &settings).unwrap();
        assert_eq!(again.record_bytes, baseline.record_bytes);
        assert_eq!(again.run_digest, baseline.run_digest);
        assert_eq!(
            again.to_canonical_json_bytes().unwrap(),
            baseline.to_canonical_json_bytes().unwrap()
        );
    }
}

#[test]
fn permuted_input_gives_same_run() {
    let a = search(&prepare("5, 1, 4, 2, 3").unwrap(), 2.0);
    let b = search(&prepare("1,2,3,4,5").unwrap(), 2.0);
    let c = search(&prepare(" 3 , 2 ,, 5, 4, 1 ,").unwrap(), 2.0);
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn equivalent_spellings_share_a_digest() {
    let a = search(&prepare("16, 1").unwrap(), 16.0).digest().unwrap();
    let b = search(&prepare("0x10, 1.0").unwrap(), 16.0).digest().unwrap();
    let c = search(&prepare("1.6e1, 1").unwrap(), 16.0).digest().unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn negative_zero_is_normalized() {
    let a = search(&prepare("-0, 1").unwrap(), 0.0);
    let b = search(&prepare("0, 1").unwrap(), -0.0);
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    assert!(a.outcome().is_found());
}

#[test]
fn different_targets_differ() {
    let sequence = prepare("1, 2, 3").unwrap();
    assert_ne!(
        search(&sequence, 1.0).digest().unwrap(),
        search(&sequence, 3.0).digest().unwrap()
    );
}
