//! Helpers for building scenario runs and tampered run records.
//!
//! Tampering goes through the canonicalizer so that negative tests exercise
//! replay divergence, not a JSON formatting difference.

use bisect_kernel::proof::canon::canonical_json_bytes;
use bisect_kernel::{prepare, SortedSequence};
use bisect_search::{search, SearchRun};

/// The worked example: unsorted input text.
pub const SCENARIO_ARRAY: &str = "3, 7, 1, 9, 4";

/// The prepared worked example.
///
/// # Panics
///
/// Panics if the scenario text stops parsing; test-only invariant.
#[must_use]
pub fn scenario_sequence() -> SortedSequence {
    prepare(SCENARIO_ARRAY).unwrap()
}

/// Search the worked example for `target`.
#[must_use]
pub fn scenario_run(target: f64) -> SearchRun {
    search(&scenario_sequence(), target)
}

/// Canonical record bytes of `run` after `modify` edits its JSON form.
///
/// # Panics
///
/// Panics if the edited value contains non-integer numbers; test-only.
pub fn tampered_record(run: &SearchRun, modify: impl FnOnce(&mut serde_json::Value)) -> Vec<u8> {
    let mut value = run.to_json_value();
    modify(&mut value);
    canonical_json_bytes(&value).unwrap()
}
