//! `SortedSequence`: the immutable, non-empty, non-decreasing sequence of
//! finite numbers that a search runs over.
//!
//! Construction is checked; there is no way to obtain an empty or unordered
//! `SortedSequence`, so downstream code never re-validates.

use std::cmp::Ordering;

use thiserror::Error;

use crate::sequence::number::{format_number, normalize_zero};

/// Why a vector was refused as a `SortedSequence`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Zero values.
    #[error("sequence is empty")]
    Empty,
    /// A value was `NaN` or infinite.
    #[error("value at index {index} is not finite")]
    NonFinite { index: usize },
    /// `values[index - 1] > values[index]`.
    #[error("value at index {index} is smaller than its predecessor")]
    OutOfOrder { index: usize },
}

/// Ascending sequence of finite `f64` values, length ≥ 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSequence {
    values: Vec<f64>,
}

impl SortedSequence {
    /// Wrap values that are already sorted, verifying every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError`] for empty input, non-finite values, or a
    /// descent anywhere in the sequence.
    pub fn from_sorted(values: Vec<f64>) -> Result<Self, SequenceError> {
        if values.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SequenceError::NonFinite { index });
        }
        if let Some(pair) = values.windows(2).position(|w| w[0] > w[1]) {
            return Err(SequenceError::OutOfOrder { index: pair + 1 });
        }
        Ok(Self {
            values: values.into_iter().map(normalize_zero).collect(),
        })
    }

    /// Sort arbitrary finite values ascending and wrap them.
    ///
    /// The sort is stable and numeric (`f64::total_cmp` after folding
    /// negative zero), never lexicographic.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Empty`] or [`SequenceError::NonFinite`].
    pub fn from_unsorted(values: &[f64]) -> Result<Self, SequenceError> {
        let mut sorted: Vec<f64> = values.iter().copied().map(normalize_zero).collect();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(sorted)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Index of the last element (`len - 1`).
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    /// Numeric comparison of the element at `index` against `target`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn compare_at(&self, index: usize, target: f64) -> Ordering {
        self.values[index].total_cmp(&normalize_zero(target))
    }

    /// Values in their stable textual form, in order.
    #[must_use]
    pub fn to_text_values(&self) -> Vec<String> {
        self.values.iter().copied().map(format_number).collect()
    }
}
