//! Canonical JSON form of a run, its digests, and the reader for it.
//!
//! ```text
//! {
//!   "schema_version": "bisect.run.v1",
//!   "sequence": ["1", "3", ...],          // values as shortest decimal text
//!   "target": "9",
//!   "steps": [{"window_low": 0, "window_high": 4, "midpoint_offset": 2, "probe": "go_right"}, ...],
//!   "outcome": {"type": "found", "index": 4} | {"type": "not_found"}
//! }
//! ```
//!
//! Values travel as strings because the canonicalizer admits integers only.

use bisect_kernel::proof::canon::{canonical_json_bytes, CanonError};
use bisect_kernel::proof::hash::{canonical_hash, ContentHash};
use bisect_kernel::proof::hash_domain::HashDomain;
use bisect_kernel::sequence::number::{format_number, parse_number};
use bisect_kernel::{SequenceError, SortedSequence};
use serde_json::{json, Value};
use thiserror::Error;

use crate::run::{SearchOutcomeV1, SearchRun};
use crate::step::{ProbeV1, SearchStepV1};

/// Schema tag written into every run record.
pub const RUN_SCHEMA_VERSION: &str = "bisect.run.v1";

/// Failure reading a run record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("run record is not valid JSON: {detail}")]
    InvalidJson { detail: String },
    #[error("unsupported run schema: {found}")]
    UnsupportedSchema { found: String },
    #[error("run record is missing field `{field}`")]
    MissingField { field: &'static str },
    #[error("run record field `{field}` is invalid: {detail}")]
    InvalidField { field: &'static str, detail: String },
    #[error("run record sequence is invalid: {0}")]
    Sequence(#[from] SequenceError),
}

/// A run read back from its canonical JSON form.
///
/// Unlike [`SearchRun`] this was not produced by the engine in this process,
/// so its steps and outcome are claims to be checked by
/// [`crate::replay::replay_verify`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRunV1 {
    pub sequence: SortedSequence,
    pub target: f64,
    pub steps: Vec<SearchStepV1>,
    pub outcome: SearchOutcomeV1,
}

fn step_to_json(step: &SearchStepV1) -> Value {
    json!({
        "window_low": step.window_low,
        "window_high": step.window_high,
        "midpoint_offset": step.midpoint_offset,
        "probe": step.probe.as_str(),
    })
}

fn outcome_to_json(outcome: SearchOutcomeV1) -> Value {
    match outcome {
        SearchOutcomeV1::Found { index } => json!({"type": "found", "index": index}),
        SearchOutcomeV1::NotFound => json!({"type": "not_found"}),
    }
}

fn steps_to_json(steps: &[SearchStepV1]) -> Value {
    Value::Array(steps.iter().map(step_to_json).collect())
}

impl SearchRun {
    /// The run as a JSON value (not yet canonical).
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "schema_version": RUN_SCHEMA_VERSION,
            "sequence": self.sequence().to_text_values(),
            "target": format_number(self.target()),
            "steps": steps_to_json(self.steps()),
            "outcome": outcome_to_json(self.outcome()),
        })
    }

    /// Serialize the run to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails; the layout above holds
    /// integers and strings only, so this does not happen in practice.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// `canonical_hash(RunRecord, canonical bytes)`.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from serialization.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::RunRecord, &bytes))
    }

    /// Digest of the step log alone, independent of sequence and target.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from serialization.
    pub fn step_log_digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&steps_to_json(self.steps()))?;
        Ok(canonical_hash(HashDomain::StepLog, &bytes))
    }
}

/// Parse a run record from JSON bytes (canonical or not).
///
/// # Errors
///
/// Returns [`LogError`] on malformed JSON, unknown schema, missing or
/// ill-typed fields, or a sequence that is not sorted and non-empty.
pub fn parse_run(bytes: &[u8]) -> Result<RecordedRunV1, LogError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| LogError::InvalidJson {
        detail: e.to_string(),
    })?;

    let schema = str_field(&value, "schema_version")?;
    if schema != RUN_SCHEMA_VERSION {
        return Err(LogError::UnsupportedSchema {
            found: schema.to_string(),
        });
    }

    let sequence_texts = value
        .get("sequence")
        .ok_or(LogError::MissingField { field: "sequence" })?
        .as_array()
        .ok_or_else(|| invalid("sequence", "expected an array"))?;
    let values = sequence_texts
        .iter()
        .map(|v| {
            v.as_str()
                .and_then(parse_number)
                .ok_or_else(|| invalid("sequence", format!("not a numeric string: {v}")))
        })
        .collect::<Result<Vec<f64>, LogError>>()?;
    let sequence = SortedSequence::from_sorted(values)?;

    let target_text = str_field(&value, "target")?;
    let target = parse_number(target_text)
        .ok_or_else(|| invalid("target", format!("not a numeric string: {target_text}")))?;

    let steps = value
        .get("steps")
        .ok_or(LogError::MissingField { field: "steps" })?
        .as_array()
        .ok_or_else(|| invalid("steps", "expected an array"))?
        .iter()
        .map(parse_step)
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = parse_outcome(
        value
            .get("outcome")
            .ok_or(LogError::MissingField { field: "outcome" })?,
    )?;

    Ok(RecordedRunV1 {
        sequence,
        target,
        steps,
        outcome,
    })
}

fn parse_step(value: &Value) -> Result<SearchStepV1, LogError> {
    let step = SearchStepV1 {
        window_low: index_field(value, "window_low")?,
        window_high: index_field(value, "window_high")?,
        midpoint_offset: index_field(value, "midpoint_offset")?,
        probe: ProbeV1::parse(str_field(value, "probe")?)
            .ok_or_else(|| invalid("probe", "unknown probe"))?,
    };
    if !step.is_well_formed() {
        return Err(invalid("steps", format!("malformed window: {step:?}")));
    }
    Ok(step)
}

fn parse_outcome(value: &Value) -> Result<SearchOutcomeV1, LogError> {
    match str_field(value, "type")? {
        "found" => Ok(SearchOutcomeV1::Found {
            index: index_field(value, "index")?,
        }),
        "not_found" => Ok(SearchOutcomeV1::NotFound),
        other => Err(invalid("type", format!("unknown outcome type: {other}"))),
    }
}

fn str_field<'v>(value: &'v Value, field: &'static str) -> Result<&'v str, LogError> {
    value
        .get(field)
        .ok_or(LogError::MissingField { field })?
        .as_str()
        .ok_or_else(|| invalid(field, "expected a string"))
}

fn index_field(value: &Value, field: &'static str) -> Result<usize, LogError> {
    let raw = value
        .get(field)
        .ok_or(LogError::MissingField { field })?
        .as_u64()
        .ok_or_else(|| invalid(field, "expected a non-negative integer"))?;
    usize::try_from(raw).map_err(|_| invalid(field, "index exceeds platform width"))
}

fn invalid(field: &'static str, detail: impl Into<String>) -> LogError {
    LogError::InvalidField {
        field,
        detail: detail.into(),
    }
}
