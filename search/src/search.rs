//! Search entry point and the instrumented binary-search loop.
//!
//! ```text
//! low = 0, high = len - 1
//! while low <= high:
//!     mid = floor((low + high) / 2)      emit step {low, high, mid - low}
//!     seq[mid] == target  → Found{mid}
//!     seq[mid] <  target  → low  = mid + 1
//!     seq[mid] >  target  → high = mid - 1
//! → NotFound
//! ```
//!
//! The floor midpoint biases toward the lower index on even-length windows;
//! step logs depend on it and must not change.

use bisect_kernel::SortedSequence;
use tracing::{debug, info};

use crate::run::{RunPhase, SearchOutcomeV1, SearchRun};
use crate::step::{ProbeV1, SearchStepV1};

/// Worst-case step count for a sequence of `len` elements: `⌈log2(len + 1)⌉`.
#[must_use]
pub fn max_steps(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Step-at-a-time driver for one run.
///
/// The window is kept as a half-open range `low..end` so an empty window is
/// representable without signed indices (`high = end - 1`).
#[derive(Debug, Clone)]
pub struct SearchCursor<'a> {
    sequence: &'a SortedSequence,
    target: f64,
    low: usize,
    end: usize,
    phase: RunPhase,
    steps: Vec<SearchStepV1>,
    outcome: Option<SearchOutcomeV1>,
}

impl<'a> SearchCursor<'a> {
    /// A cursor in [`RunPhase::Idle`] over the whole sequence.
    #[must_use]
    pub fn new(sequence: &'a SortedSequence, target: f64) -> Self {
        Self {
            sequence,
            target,
            low: 0,
            end: sequence.len(),
            phase: RunPhase::Idle,
            steps: Vec::with_capacity(max_steps(sequence.len())),
            outcome: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Steps emitted so far.
    #[must_use]
    pub fn steps(&self) -> &[SearchStepV1] {
        &self.steps
    }

    /// `Some` once the phase is terminal.
    #[must_use]
    pub fn outcome(&self) -> Option<SearchOutcomeV1> {
        self.outcome
    }

    /// Run one iteration of the loop body.
    ///
    /// Returns the emitted step, or `None` if the run had already reached a
    /// terminal phase. The phase becomes terminal in the same call that emits
    /// the last step.
    pub fn advance(&mut self) -> Option<SearchStepV1> {
        if self.phase.is_terminal() {
            return None;
        }
        if self.low >= self.end {
            // Only reachable before the first step, and SortedSequence is never empty.
            self.finish_with(SearchOutcomeV1::NotFound);
            return None;
        }
        self.phase = RunPhase::Running;

        let high = self.end - 1;
        let mid = self.low + (high - self.low) / 2;
        let probe = ProbeV1::from_ordering(self.sequence.compare_at(mid, self.target));
        let step = SearchStepV1 {
            window_low: self.low,
            window_high: high,
            midpoint_offset: mid - self.low,
            probe,
        };
        self.steps.push(step);
        debug!(
            step = self.steps.len(),
            window_low = step.window_low,
            window_high = step.window_high,
            mid,
            probe = probe.as_str(),
            "search step"
        );

        match probe {
            ProbeV1::Match => self.finish_with(SearchOutcomeV1::Found { index: mid }),
            ProbeV1::GoRight => self.low = mid + 1,
            ProbeV1::GoLeft => self.end = mid,
        }
        if !self.phase.is_terminal() && self.low >= self.end {
            self.finish_with(SearchOutcomeV1::NotFound);
        }
        Some(step)
    }

    /// Drive the loop to a terminal phase and package the run.
    #[must_use]
    pub fn finish(mut self) -> SearchRun {
        while self.advance().is_some() {}
        let outcome = self.outcome.unwrap_or(SearchOutcomeV1::NotFound);
        SearchRun::new(self.target, self.sequence.clone(), self.steps, outcome)
    }

    fn finish_with(&mut self, outcome: SearchOutcomeV1) {
        self.outcome = Some(outcome);
        self.phase = outcome.into();
    }
}

/// Run binary search for `target` over `sequence`.
///
/// Pure: the result depends only on the arguments, and the sequence is not
/// mutated. Always terminates with `Found` or `NotFound`.
#[must_use]
pub fn search(sequence: &SortedSequence, target: f64) -> SearchRun {
    let run = SearchCursor::new(sequence, target).finish();
    info!(
        len = sequence.len(),
        target,
        steps = run.steps().len(),
        found = run.outcome().is_found(),
        "search finished"
    );
    run
}
