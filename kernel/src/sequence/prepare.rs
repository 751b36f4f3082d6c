//! `prepare()`: comma-separated text → [`SortedSequence`].
//!
//! # Pipeline
//!
//! ```text
//! split(',') → trim → drop empty → parse_number → sort ascending
//! ```
//!
//! The first token that fails numeric coercion aborts preparation; tokens
//! are never skipped silently.

use thiserror::Error;

use crate::sequence::number::parse_number;
use crate::sequence::sorted::SortedSequence;

/// Typed failure for input preparation.
///
/// Both variants are user-recoverable: the caller edits the text and
/// resubmits. The `Display` strings are the user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    /// A non-empty token is not numeric.
    #[error("\"{token}\" is not a valid number")]
    Parse { token: String },
    /// No numeric tokens remain after dropping empty ones.
    #[error("Please enter at least one number")]
    EmptyInput,
}

/// Parse comma-separated numbers and return them sorted ascending.
///
/// # Errors
///
/// Returns [`PrepareError::Parse`] naming the first offending token (trimmed),
/// or [`PrepareError::EmptyInput`] if the text holds no tokens at all.
pub fn prepare(raw: &str) -> Result<SortedSequence, PrepareError> {
    let values = parse_tokens(raw)?;
    // parse_number only yields finite values, so Empty is the only reachable refusal.
    SortedSequence::from_unsorted(&values).map_err(|_| PrepareError::EmptyInput)
}

/// Parse tokens in input order without sorting.
///
/// # Errors
///
/// Returns [`PrepareError::Parse`] for the first non-numeric token.
pub fn parse_tokens(raw: &str) -> Result<Vec<f64>, PrepareError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            parse_number(token).ok_or_else(|| PrepareError::Parse {
                token: token.to_string(),
            })
        })
        .collect()
}
