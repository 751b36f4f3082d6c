//! Shared fixtures for the workspace lock tests.

#![forbid(unsafe_code)]

pub mod run_test_helpers;
