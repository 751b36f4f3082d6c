//! Playback configuration: how fast steps are revealed and how cells look.
//!
//! Layers, lowest precedence first:
//!
//! ```text
//! defaults ← JSON file (--config) ← environment ← CLI flags
//! ```
//!
//! Every layer is a [`PlaybackConfig`] of optional overrides; [`PlaybackConfig::resolve`]
//! fills the gaps with defaults and validates the result. The resolved
//! settings have a canonical snapshot whose digest is reported next to the
//! run digest.

use std::path::Path;
use std::time::Duration;

use bisect_kernel::proof::canon::{canonical_json_bytes, CanonError};
use bisect_kernel::proof::hash::{canonical_hash, ContentHash};
use bisect_kernel::proof::hash_domain::HashDomain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One step revealed per second.
pub const DEFAULT_STEP_DELAY_MS: u64 = 1000;
/// Minimum cell width in terminal columns.
pub const DEFAULT_CELL_WIDTH: usize = 5;
/// Upper bound on a single delay; longer values are almost certainly typos.
const MAX_STEP_DELAY_MS: u64 = 60_000;

pub const ENV_STEP_DELAY_MS: &str = "BISECT_STEP_DELAY_MS";
pub const ENV_CELL_WIDTH: &str = "BISECT_CELL_WIDTH";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Error loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("{field} out of range: {detail}")]
    OutOfRange { field: &'static str, detail: String },
}

/// Optional overrides for playback settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Delay between revealed steps, in milliseconds. `None` uses the default.
    pub step_delay_ms: Option<u64>,
    /// Styled output. `None` means on.
    pub color: Option<bool>,
    /// Minimum cell width in columns. `None` uses the default.
    pub cell_width: Option<usize>,
}

impl PlaybackConfig {
    /// Read overrides from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Read overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for unparseable numbers.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_pairs(std::env::vars())
    }

    /// Read overrides from `(key, value)` pairs.
    ///
    /// `NO_COLOR` disables colour when set to any non-empty value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for unparseable numbers.
    pub fn from_env_pairs<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_STEP_DELAY_MS => {
                    config.step_delay_ms = Some(parse_env(ENV_STEP_DELAY_MS, value)?);
                }
                ENV_CELL_WIDTH => {
                    config.cell_width = Some(parse_env(ENV_CELL_WIDTH, value)?);
                }
                ENV_NO_COLOR if !value.is_empty() => config.color = Some(false),
                _ => {}
            }
        }
        Ok(config)
    }

    /// Layer `over` on top of `self`; fields set in `over` win.
    #[must_use]
    pub fn merged(self, over: Self) -> Self {
        Self {
            step_delay_ms: over.step_delay_ms.or(self.step_delay_ms),
            color: over.color.or(self.color),
            cell_width: over.cell_width.or(self.cell_width),
        }
    }

    /// Fill defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for a zero cell width or a delay
    /// above one minute.
    pub fn resolve(&self) -> Result<PlaybackSettings, ConfigError> {
        let step_delay_ms = self.step_delay_ms.unwrap_or(DEFAULT_STEP_DELAY_MS);
        if step_delay_ms > MAX_STEP_DELAY_MS {
            return Err(ConfigError::OutOfRange {
                field: "step_delay_ms",
                detail: format!("{step_delay_ms} > {MAX_STEP_DELAY_MS}"),
            });
        }
        let cell_width = self.cell_width.unwrap_or(DEFAULT_CELL_WIDTH);
        if cell_width == 0 {
            return Err(ConfigError::OutOfRange {
                field: "cell_width",
                detail: "must be at least 1".into(),
            });
        }
        Ok(PlaybackSettings {
            step_delay: Duration::from_millis(step_delay_ms),
            color: self.color.unwrap_or(true),
            cell_width,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
    })
}

/// Resolved playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSettings {
    pub step_delay: Duration,
    pub color: bool,
    pub cell_width: usize,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            color: true,
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }
}

impl PlaybackSettings {
    /// Canonical JSON bytes of the settings.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, CanonError> {
        // Durations above u64::MAX ms are unrepresentable here; resolve() caps at one minute.
        let step_delay_ms = u64::try_from(self.step_delay.as_millis()).unwrap_or(u64::MAX);
        canonical_json_bytes(&serde_json::json!({
            "step_delay_ms": step_delay_ms,
            "color": self.color,
            "cell_width": self.cell_width,
        }))
    }

    /// `canonical_hash(PlaybackConfig, snapshot_bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::PlaybackConfig,
            &self.snapshot_bytes()?,
        ))
    }
}
