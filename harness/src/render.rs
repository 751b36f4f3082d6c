//! Frame model: what each revealed step looks like, independent of output
//! device.
//!
//! One frame per revealed step. Every frame has one cell per sequence index
//! so rows stay column-aligned; indices outside the step's window are
//! [`CellV1::Hidden`] placeholders.
//!
//! Highlight rules for a visible cell at `index` in frame `k` (of `n`
//! revealed):
//!
//! - `Found` if `k` is the latest frame, the run is complete, the outcome is
//!   `Found { index }`.
//! - `Midpoint` if `index` is the probed index, unless the previous rule
//!   applies to this frame.
//! - `Plain` otherwise.
//!
//! Only the latest frame is undimmed; only its midpoint/found cell is
//! emphasized.

use bisect_search::{SearchOutcomeV1, SearchRun, SearchStepV1};

/// Colour role of a visible cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightV1 {
    Plain,
    Midpoint,
    Found,
}

/// One column of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellV1 {
    /// Outside the window; rendered as blank space of cell width.
    Hidden,
    Visible {
        index: usize,
        value: f64,
        highlight: HighlightV1,
        /// Not the latest revealed step.
        dimmed: bool,
        /// Midpoint or found cell on the latest revealed step.
        emphasized: bool,
    },
}

/// The rendered view of one revealed step.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameV1 {
    /// 0-based position in the step log.
    pub step_index: usize,
    pub step: SearchStepV1,
    pub probed_value: f64,
    pub cells: Vec<CellV1>,
    pub is_latest: bool,
}

impl FrameV1 {
    /// Visible cells only, in index order.
    pub fn visible(&self) -> impl Iterator<Item = &CellV1> {
        self.cells.iter().filter(|c| !matches!(c, CellV1::Hidden))
    }
}

/// Build frames for the first `revealed` steps of `run`.
///
/// `revealed` is clamped to the log length. The run counts as complete (and
/// the found highlight becomes eligible) only when every step is revealed.
#[must_use]
pub fn build_frames(run: &SearchRun, revealed: usize) -> Vec<FrameV1> {
    let revealed = revealed.min(run.steps().len());
    let complete = revealed == run.steps().len();
    let found_index = if complete { run.outcome().index() } else { None };

    run.steps()[..revealed]
        .iter()
        .enumerate()
        .map(|(step_index, step)| {
            let is_latest = step_index + 1 == revealed;
            let latest_found = if is_latest { found_index } else { None };
            let cells = run
                .sequence()
                .as_slice()
                .iter()
                .enumerate()
                .map(|(index, &value)| {
                    if !step.contains(index) {
                        return CellV1::Hidden;
                    }
                    let highlight = match latest_found {
                        Some(found) if found == index => HighlightV1::Found,
                        Some(_) => HighlightV1::Plain,
                        None if index == step.midpoint() => HighlightV1::Midpoint,
                        None => HighlightV1::Plain,
                    };
                    CellV1::Visible {
                        index,
                        value,
                        highlight,
                        dimmed: !is_latest,
                        emphasized: is_latest && highlight != HighlightV1::Plain,
                    }
                })
                .collect();
            FrameV1 {
                step_index,
                step: *step,
                probed_value: run.sequence().as_slice()[step.midpoint()],
                cells,
                is_latest,
            }
        })
        .collect()
}

/// User-facing outcome message.
#[must_use]
pub fn outcome_message(outcome: SearchOutcomeV1) -> String {
    match outcome {
        SearchOutcomeV1::Found { index } => format!(
            "Element Found at index {index} and position {}.",
            index + 1
        ),
        SearchOutcomeV1::NotFound => "Element Not Found!".to_string(),
    }
}

/// The outcome banner, available only once all steps are revealed.
#[must_use]
pub fn banner(run: &SearchRun, revealed: usize) -> Option<String> {
    (revealed >= run.steps().len()).then(|| outcome_message(run.outcome()))
}
