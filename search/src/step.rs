//! `SearchStepV1`: one recorded iteration of the search loop.
//!
//! Window bounds are absolute indices into the searched sequence. The probed
//! element is stored as an offset from `window_low` so a renderer can align
//! it inside the window without further arithmetic.

use std::cmp::Ordering;

/// What the probe at the midpoint decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeV1 {
    /// `sequence[mid] == target`; the run ends here.
    Match,
    /// `sequence[mid] < target`; the window moves to `mid + 1 ..= high`.
    GoRight,
    /// `sequence[mid] > target`; the window moves to `low ..= mid - 1`.
    GoLeft,
}

impl ProbeV1 {
    /// Decision for `probed.cmp(target)`.
    #[must_use]
    pub fn from_ordering(probed_vs_target: Ordering) -> Self {
        match probed_vs_target {
            Ordering::Equal => Self::Match,
            Ordering::Less => Self::GoRight,
            Ordering::Greater => Self::GoLeft,
        }
    }

    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::GoRight => "go_right",
            Self::GoLeft => "go_left",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "match" => Some(Self::Match),
            "go_right" => Some(Self::GoRight),
            "go_left" => Some(Self::GoLeft),
            _ => None,
        }
    }
}

/// One iteration of the search loop.
///
/// Invariant: `window_low <= window_high` and
/// `midpoint_offset <= window_high - window_low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStepV1 {
    /// Inclusive start of the window.
    pub window_low: usize,
    /// Inclusive end of the window.
    pub window_high: usize,
    /// Probed index minus `window_low`.
    pub midpoint_offset: usize,
    /// Comparison result at the probe.
    pub probe: ProbeV1,
}

impl SearchStepV1 {
    /// Absolute index of the probed element.
    #[must_use]
    pub fn midpoint(&self) -> usize {
        self.window_low + self.midpoint_offset
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        (self.window_low..=self.window_high).contains(&index)
    }

    /// Number of elements in the window.
    #[must_use]
    pub fn width(&self) -> usize {
        self.window_high - self.window_low + 1
    }

    /// `window_high - window_low`, the quantity that strictly shrinks
    /// step over step.
    #[must_use]
    pub fn span(&self) -> usize {
        self.window_high - self.window_low
    }

    /// Whether the invariant on bounds and offset holds.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.window_low <= self.window_high
            && self.midpoint_offset <= self.window_high - self.window_low
    }
}
