//! Playback: paced reveal of an already-computed step log.
//!
//! The engine finishes before playback starts. Playback only controls how
//! much of the log is exposed, one step per tick, and never touches engine
//! state. Cancelling (or dropping the [`Playback`]) simply stops revealing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bisect_search::{SearchOutcomeV1, SearchRun, SearchStepV1};
use tracing::debug;

use crate::render::{build_frames, FrameV1};

/// Cursor over a finished run's step log.
#[derive(Debug, Clone)]
pub struct Playback {
    run: SearchRun,
    revealed: usize,
}

impl Playback {
    /// Start with nothing revealed.
    #[must_use]
    pub fn new(run: SearchRun) -> Self {
        Self { run, revealed: 0 }
    }

    #[must_use]
    pub fn run(&self) -> &SearchRun {
        &self.run
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// The exposed prefix of the step log.
    #[must_use]
    pub fn revealed(&self) -> &[SearchStepV1] {
        &self.run.steps()[..self.revealed]
    }

    /// Reveal one more step and return it; `None` once complete.
    pub fn advance(&mut self) -> Option<SearchStepV1> {
        let step = self.run.steps().get(self.revealed).copied()?;
        self.revealed += 1;
        Some(step)
    }

    /// Reveal everything at once.
    pub fn reveal_all(&mut self) {
        self.revealed = self.run.steps().len();
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.revealed == self.run.steps().len()
    }

    /// The outcome, hidden until every step has been revealed.
    #[must_use]
    pub fn outcome(&self) -> Option<SearchOutcomeV1> {
        self.is_complete().then(|| self.run.outcome())
    }

    /// Frames for the revealed prefix.
    #[must_use]
    pub fn frames(&self) -> Vec<FrameV1> {
        build_frames(&self.run, self.revealed)
    }
}

/// Shared stop flag for an in-progress playback.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Source of delay between ticks.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

/// Real time via `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// How a call to [`play`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// Every step was revealed.
    Completed,
    /// The token was cancelled after `revealed` steps were shown.
    Cancelled { revealed: usize },
}

/// Reveal the rest of `playback`, one step per `interval`.
///
/// `on_step` runs after each reveal; the clock sleeps between reveals (not
/// after the last). The token is checked before every reveal.
///
/// # Errors
///
/// Returns the first error from `on_step`; playback stops there.
pub fn play<C, F, E>(
    playback: &mut Playback,
    interval: Duration,
    clock: &C,
    cancel: &CancelToken,
    mut on_step: F,
) -> Result<PlaybackEnd, E>
where
    C: Clock + ?Sized,
    F: FnMut(&Playback) -> Result<(), E>,
{
    while !playback.is_complete() {
        if cancel.is_cancelled() {
            debug!(revealed = playback.revealed_count(), "playback cancelled");
            return Ok(PlaybackEnd::Cancelled {
                revealed: playback.revealed_count(),
            });
        }
        playback.advance();
        on_step(playback)?;
        if !playback.is_complete() {
            clock.sleep(interval);
        }
    }
    Ok(PlaybackEnd::Completed)
}
