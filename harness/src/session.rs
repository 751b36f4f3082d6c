//! Interactive session state: the current sequence, the last run, and the
//! last user-facing error.

use bisect_kernel::{prepare, SortedSequence};
use bisect_search::SearchRun;
use thiserror::Error;
use tracing::debug;

use crate::playback::Playback;
use crate::runner::parse_target;

/// Refusals from [`Session::search`] and [`Session::search_text`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please submit an array first")]
    NoSequence,
    #[error("\"{text}\" is not a valid target")]
    InvalidTarget { text: String },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    sequence: Option<SortedSequence>,
    run: Option<SearchRun>,
    last_error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sequence(&self) -> Option<&SortedSequence> {
        self.sequence.as_ref()
    }

    #[must_use]
    pub fn run(&self) -> Option<&SearchRun> {
        self.run.as_ref()
    }

    /// Message from the most recent failed submission, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Prepare `raw` and make it the current sequence.
    ///
    /// On success the previous run and error are cleared. On failure the
    /// previous sequence stays and the message is kept for display.
    /// Returns whether the submission was accepted.
    pub fn submit_array(&mut self, raw: &str) -> bool {
        match prepare(raw) {
            Ok(sequence) => {
                debug!(len = sequence.len(), "sequence submitted");
                self.sequence = Some(sequence);
                self.run = None;
                self.last_error = None;
                true
            }
            Err(err) => {
                debug!(%err, "sequence rejected");
                self.last_error = Some(err.to_string());
                false
            }
        }
    }

    /// Search the current sequence, replacing any previous run.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSequence`] before the first accepted
    /// submission.
    pub fn search(&mut self, target: f64) -> Result<&SearchRun, SessionError> {
        let sequence = self.sequence.as_ref().ok_or(SessionError::NoSequence)?;
        Ok(self.run.insert(bisect_search::search(sequence, target)))
    }

    /// Parse `raw_target` and search.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTarget`] for non-numeric text, or
    /// [`SessionError::NoSequence`].
    pub fn search_text(&mut self, raw_target: &str) -> Result<&SearchRun, SessionError> {
        let target = parse_target(raw_target).map_err(|_| SessionError::InvalidTarget {
            text: raw_target.trim().to_string(),
        })?;
        self.search(target)
    }

    /// A fresh playback of the current run.
    #[must_use]
    pub fn playback(&self) -> Option<Playback> {
        self.run.clone().map(Playback::new)
    }
}
