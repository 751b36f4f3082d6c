//! Bisect Search: instrumented binary search with a recorded step log.
//!
//! This crate depends only on `bisect_kernel`; rendering and pacing live in
//! `bisect_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! bisect_kernel  ←  bisect_search  ←  bisect_harness
//! (prepare, canon)  (engine, log)      (render, playback, session, CLI)
//! ```
//!
//! # Key types
//!
//! - [`SearchStepV1`]: one iteration (window bounds, midpoint offset and probe decision)
//! - [`SearchOutcomeV1`]: terminal `Found { index }` or `NotFound`
//! - [`SearchRun`]: target, sequence, ordered step log, outcome
//! - [`SearchCursor`]: step-at-a-time driver exposing the run phase
//! - [`RecordedRunV1`]: a run read back from canonical JSON, for replay

#![forbid(unsafe_code)]

pub mod log;
pub mod replay;
pub mod run;
pub mod search;
pub mod step;

pub use log::{parse_run, LogError, RecordedRunV1};
pub use replay::{replay_verify, replay_verify_bytes, ReplayError, ReplayVerdict};
pub use run::{RunPhase, SearchOutcomeV1, SearchRun};
pub use search::{max_steps, search, SearchCursor};
pub use step::{ProbeV1, SearchStepV1};
