//! `replay_verify()`: check a recorded run by re-executing the search.
//!
//! The engine is pure, so re-running it over the recorded sequence and
//! target must reproduce the recorded step log exactly. Any difference is
//! reported as a [`ReplayVerdict::Divergence`] pointing at the first
//! differing step.

use thiserror::Error;

use crate::log::{parse_run, LogError, RecordedRunV1};
use crate::run::{SearchOutcomeV1, SearchRun};
use crate::search::search;

/// Error during replay (distinct from a divergence verdict).
///
/// A `ReplayError` means the record could not be replayed at all.
/// A `ReplayVerdict::Divergence` means it was replayed but did not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("malformed run record: {0}")]
    Malformed(#[from] LogError),
}

/// Result of comparing a recorded run against a fresh execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayVerdict {
    /// Every step and the outcome match.
    Match,
    /// The step logs differ; `step_index` is the first differing position
    /// (equal to the shorter log's length when one is a prefix of the other).
    Divergence { step_index: usize, detail: String },
    /// Step logs match but the outcomes do not.
    OutcomeDivergence {
        recorded: SearchOutcomeV1,
        replayed: SearchOutcomeV1,
    },
}

impl ReplayVerdict {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Re-run the search for a recorded run and compare.
#[must_use]
pub fn replay_verify(recorded: &RecordedRunV1) -> ReplayVerdict {
    let replayed = search(&recorded.sequence, recorded.target);
    compare(recorded, &replayed)
}

/// Parse and replay a run record in one call.
///
/// # Errors
///
/// Returns [`ReplayError::Malformed`] if the bytes are not a valid run record.
pub fn replay_verify_bytes(bytes: &[u8]) -> Result<ReplayVerdict, ReplayError> {
    let recorded = parse_run(bytes)?;
    Ok(replay_verify(&recorded))
}

fn compare(recorded: &RecordedRunV1, replayed: &SearchRun) -> ReplayVerdict {
    let replayed_steps = replayed.steps();
    if let Some(step_index) = recorded
        .steps
        .iter()
        .zip(replayed_steps)
        .position(|(a, b)| a != b)
    {
        return ReplayVerdict::Divergence {
            step_index,
            detail: format!(
                "recorded {:?}, replayed {:?}",
                recorded.steps[step_index], replayed_steps[step_index]
            ),
        };
    }
    if recorded.steps.len() != replayed_steps.len() {
        return ReplayVerdict::Divergence {
            step_index: recorded.steps.len().min(replayed_steps.len()),
            detail: format!(
                "recorded {} steps, replayed {}",
                recorded.steps.len(),
                replayed_steps.len()
            ),
        };
    }
    if recorded.outcome != replayed.outcome() {
        return ReplayVerdict::OutcomeDivergence {
            recorded: recorded.outcome,
            replayed: replayed.outcome(),
        };
    }
    ReplayVerdict::Match
}
