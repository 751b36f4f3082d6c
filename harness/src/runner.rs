//! Harness runner: text in, verified run report out.
//!
//! The runner uses ONLY kernel and search APIs: `prepare`, `search`,
//! `replay_verify`, `canonical_json_bytes`, `canonical_hash`. It does not
//! implement any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! prepare(raw) → search(sequence, target) → to_canonical_json_bytes()
//!   → parse_run() → replay_verify() → digests → RunReportV1
//! ```
//!
//! Every report is replayed before it is returned; a run that does not
//! reproduce itself is an internal error, never a report.

use bisect_kernel::proof::canon::{canonical_json_bytes, CanonError};
use bisect_kernel::proof::hash::{canonical_hash, ContentHash};
use bisect_kernel::proof::hash_domain::HashDomain;
use bisect_kernel::sequence::number::parse_number;
use bisect_kernel::{prepare, PrepareError, SortedSequence};
use bisect_search::{parse_run, replay_verify, LogError, ReplayVerdict, SearchRun};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

use crate::config::PlaybackSettings;

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The array text could not be prepared.
    #[error(transparent)]
    Prepare(#[from] PrepareError),
    /// The target text is not a number.
    #[error("\"{text}\" is not a valid target")]
    InvalidTarget { text: String },
    /// Canonical JSON serialization failed.
    #[error("canonical serialization failed: {0}")]
    Canon(#[from] CanonError),
    /// The freshly written record could not be read back.
    #[error("run record did not read back: {0}")]
    ReadBack(#[from] LogError),
    /// Replay of the freshly written record did not match.
    #[error("run did not replay: {verdict:?}")]
    ReplayDivergence { verdict: ReplayVerdict },
}

impl RunError {
    /// Errors caused by the caller's input rather than by the pipeline.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Prepare(_) | Self::InvalidTarget { .. })
    }
}

/// A finished run with its canonical record and digests.
#[derive(Debug, Clone)]
pub struct RunReportV1 {
    pub run: SearchRun,
    /// Canonical JSON bytes of the run record.
    pub record_bytes: Vec<u8>,
    /// `canonical_hash(Sequence, canonical sequence array)`.
    pub sequence_digest: ContentHash,
    /// `canonical_hash(StepLog, canonical step array)`.
    pub step_log_digest: ContentHash,
    /// `canonical_hash(RunRecord, record_bytes)`.
    pub run_digest: ContentHash,
    /// `canonical_hash(PlaybackConfig, settings snapshot)`.
    pub config_digest: ContentHash,
}

impl RunReportV1 {
    /// The report as a JSON value: the run record plus the digests.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "run": self.run.to_json_value(),
            "digests": {
                "sequence": self.sequence_digest.as_str(),
                "step_log": self.step_log_digest.as_str(),
                "run": self.run_digest.as_str(),
                "playback_config": self.config_digest.as_str(),
            },
        })
    }

    /// Canonical JSON bytes of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }
}

/// Parse a target the same way array tokens are parsed.
///
/// # Errors
///
/// Returns [`RunError::InvalidTarget`] for empty or non-numeric text.
pub fn parse_target(text: &str) -> Result<f64, RunError> {
    parse_number(text.trim()).ok_or_else(|| RunError::InvalidTarget {
        text: text.trim().to_string(),
    })
}

/// Digest of a prepared sequence.
///
/// # Errors
///
/// Returns [`CanonError`] if serialization fails.
pub fn sequence_digest(sequence: &SortedSequence) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(&json!(sequence.to_text_values()))?;
    Ok(canonical_hash(HashDomain::Sequence, &bytes))
}

/// Run the full pipeline from raw text.
///
/// # Errors
///
/// Returns [`RunError`] for bad input or an internal pipeline failure.
pub fn run_pipeline(
    raw_array: &str,
    raw_target: &str,
    settings: &PlaybackSettings,
) -> Result<RunReportV1, RunError> {
    let sequence = prepare(raw_array)?;
    let target = parse_target(raw_target)?;
    run_prepared(&sequence, target, settings)
}

/// Run the pipeline over an already prepared sequence.
///
/// # Errors
///
/// Returns [`RunError`] if serialization or the self-replay check fails.
pub fn run_prepared(
    sequence: &SortedSequence,
    target: f64,
    settings: &PlaybackSettings,
) -> Result<RunReportV1, RunError> {
    let run = bisect_search::search(sequence, target);
    let record_bytes = run.to_canonical_json_bytes()?;

    let verdict = replay_verify(&parse_run(&record_bytes)?);
    if !verdict.is_match() {
        return Err(RunError::ReplayDivergence { verdict });
    }

    let run_digest = canonical_hash(HashDomain::RunRecord, &record_bytes);
    let report = RunReportV1 {
        sequence_digest: sequence_digest(sequence)?,
        step_log_digest: run.step_log_digest()?,
        config_digest: settings.digest()?,
        run_digest,
        record_bytes,
        run,
    };
    info!(
        run_digest = %report.run_digest,
        steps = report.run.steps().len(),
        "run report built"
    );
    Ok(report)
}
