//! `SearchRun`: the complete, immutable result of one search invocation.
//!
//! A run is produced only by the engine in [`crate::search`]. A new search
//! produces a new run; step logs are never merged or extended.

use bisect_kernel::SortedSequence;

use crate::step::SearchStepV1;

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcomeV1 {
    /// `sequence[index] == target`.
    Found { index: usize },
    /// The window emptied without a match.
    NotFound,
}

impl SearchOutcomeV1 {
    /// Matched index, if any.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Found { index } => Some(index),
            Self::NotFound => None,
        }
    }

    /// 1-based display position (`index + 1`), if found.
    #[must_use]
    pub fn position(self) -> Option<usize> {
        self.index().map(|i| i + 1)
    }

    #[must_use]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Lifecycle of a single run.
///
/// `Idle → Running → {Found | NotFound}`; `Running` is re-entered once per
/// emitted step, and both terminal phases are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Found,
    NotFound,
}

impl RunPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::NotFound)
    }
}

impl From<SearchOutcomeV1> for RunPhase {
    fn from(outcome: SearchOutcomeV1) -> Self {
        match outcome {
            SearchOutcomeV1::Found { .. } => Self::Found,
            SearchOutcomeV1::NotFound => Self::NotFound,
        }
    }
}

/// Target, searched sequence, ordered step log, and outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRun {
    target: f64,
    sequence: SortedSequence,
    steps: Vec<SearchStepV1>,
    outcome: SearchOutcomeV1,
}

impl SearchRun {
    pub(crate) fn new(
        target: f64,
        sequence: SortedSequence,
        steps: Vec<SearchStepV1>,
        outcome: SearchOutcomeV1,
    ) -> Self {
        Self {
            target,
            sequence,
            steps,
            outcome,
        }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn sequence(&self) -> &SortedSequence {
        &self.sequence
    }

    /// The step log, in iteration order.
    #[must_use]
    pub fn steps(&self) -> &[SearchStepV1] {
        &self.steps
    }

    #[must_use]
    pub fn outcome(&self) -> SearchOutcomeV1 {
        self.outcome
    }

    /// Always a terminal phase.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.outcome.into()
    }

    #[must_use]
    pub fn final_step(&self) -> Option<&SearchStepV1> {
        self.steps.last()
    }

    /// Probed value at each step, in order.
    #[must_use]
    pub fn probed_values(&self) -> Vec<f64> {
        self.steps
            .iter()
            .filter_map(|s| self.sequence.get(s.midpoint()))
            .collect()
    }
}
