//! Bisect Kernel: the deterministic core shared by every bisect crate.
//!
//! # API Surface
//!
//! - [`sequence::prepare::prepare`] -- parse comma-separated text into a [`SortedSequence`]
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON serializer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//!
//! # Module Dependency Direction
//!
//! `sequence` ← `proof`
//!
//! One-way only. `sequence` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod sequence;

pub use sequence::prepare::{prepare, PrepareError};
pub use sequence::sorted::{SequenceError, SortedSequence};
