//! Bisect Harness: everything between the search engine and a person.
//!
//! The harness drives the kernel and search crates through one pipeline
//! (`prepare` → `search` → canonical record → `replay_verify`), paces the
//! finished step log for display, and renders frames to a terminal.
//!
//! The harness does NOT implement search logic; it delegates to
//! `bisect-search`. Playback only exposes a prefix of a finished log.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod playback;
pub mod render;
pub mod runner;
pub mod session;
pub mod terminal;

pub use cli::run_from_env;
