//! Shared helpers for bisect benchmark suites.
//!
//! Inputs are generated from a fixed-seed LCG so every run measures the
//! same text. [`input_guard_digest`] fingerprints a regime's input; a
//! changed digest means numbers from different runs are not comparable.

// Generated values stay below 2^41 in magnitude, exact in f64.
#![allow(clippy::cast_precision_loss)]

use bisect_kernel::proof::canon::canonical_json_bytes;
use bisect_kernel::proof::hash::{canonical_hash, ContentHash};
use bisect_kernel::proof::hash_domain::HashDomain;
use bisect_kernel::{prepare, SortedSequence};
use bisect_search::{search, SearchRun};

const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// A named benchmark input: raw text, its prepared form, and search targets.
pub struct Regime {
    pub name: &'static str,
    pub raw_array: String,
    pub sequence: SortedSequence,
    /// Targets cycled through by engine benchmarks.
    pub targets: Vec<f64>,
}

impl Regime {
    fn build(name: &'static str, values: &[i64], targets: Vec<f64>) -> Self {
        let raw_array = array_text(values);
        let sequence = prepare(&raw_array).expect("generated input prepares");
        Self {
            name,
            raw_array,
            sequence,
            targets,
        }
    }

    /// Search every target once.
    #[must_use]
    pub fn run_all(&self) -> Vec<SearchRun> {
        self.targets
            .iter()
            .map(|&t| search(&self.sequence, t))
            .collect()
    }
}

/// Deterministic pseudo-random integers in `[-bound, bound)`.
#[must_use]
pub fn lcg_values(seed: u64, count: usize, bound: i64) -> Vec<i64> {
    let span = u64::try_from(bound * 2).expect("positive bound");
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
            let offset = i64::try_from((state >> 33) % span).expect("offset fits i64");
            offset - bound
        })
        .collect()
}

/// Comma-separated text for `values`, in the given (unsorted) order.
#[must_use]
pub fn array_text(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct values, every target present.
///
/// # Panics
///
/// Panics if generated input fails to prepare; benchmark setup failures are fatal.
#[must_use]
pub fn regime_present(count: usize) -> Regime {
    let values = lcg_values(0x5EED, count, 1 << 40);
    let targets = values.iter().take(16).map(|&v| v as f64).collect();
    Regime::build("present", &values, targets)
}

/// Odd values only, every target even and so absent.
///
/// # Panics
///
/// Panics if generated input fails to prepare.
#[must_use]
pub fn regime_absent(count: usize) -> Regime {
    let values: Vec<i64> = lcg_values(0xAB5E, count, 1 << 40)
        .into_iter()
        .map(|v| v | 1)
        .collect();
    let targets = values.iter().take(16).map(|&v| (v + 1) as f64).collect();
    Regime::build("absent", &values, targets)
}

/// Few distinct values, many repeats.
///
/// # Panics
///
/// Panics if generated input fails to prepare.
#[must_use]
pub fn regime_duplicates(count: usize) -> Regime {
    let values = lcg_values(0xD0B1, count, 8);
    let targets = (-8..8).map(f64::from).collect();
    Regime::build("duplicates", &values, targets)
}

/// All regimes at `count` elements.
#[must_use]
pub fn all_regimes(count: usize) -> Vec<Regime> {
    vec![
        regime_present(count),
        regime_absent(count),
        regime_duplicates(count),
    ]
}

/// Fingerprint of a regime's prepared input and targets.
///
/// # Panics
///
/// Panics if canonical serialization fails.
#[must_use]
pub fn input_guard_digest(regime: &Regime) -> ContentHash {
    let targets: Vec<String> = regime
        .targets
        .iter()
        .map(|&t| bisect_kernel::sequence::number::format_number(t))
        .collect();
    let bytes = canonical_json_bytes(&serde_json::json!({
        "name": regime.name,
        "sequence": regime.sequence.to_text_values(),
        "targets": targets,
    }))
    .expect("canonical input");
    canonical_hash(HashDomain::BenchInput, &bytes)
}
