//! Command-line surface for the `bisect` binary.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use bisect_kernel::proof::canon::CanonError;
use bisect_kernel::proof::hash::ContentHash;
use bisect_search::{parse_run, replay_verify, search, RecordedRunV1, ReplayError, ReplayVerdict};
use serde_json::Value;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, PlaybackConfig, PlaybackSettings};
use crate::playback::{play, CancelToken, Playback, ThreadClock};
use crate::render::banner;
use crate::runner::{run_pipeline, sequence_digest, RunError, RunReportV1};
use crate::terminal::TerminalRenderer;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for bad user input (array, target, config, record).
pub const EXIT_INPUT: i32 = 2;
/// Exit code for a record that does not replay.
pub const EXIT_DIVERGED: i32 = 3;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Run(#[from] RunError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read {path}: {source}")]
    ReadRecord {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Replay(#[from] ReplayError),

    #[error("canonical serialization failed: {0}")]
    Canon(#[from] CanonError),

    #[error("run record does not replay: {verdict:?}")]
    Diverged { verdict: ReplayVerdict },

    #[error("{field} digest does not match the run: report says {claimed:?}, run gives {actual}")]
    DigestMismatch {
        field: &'static str,
        claimed: String,
        actual: ContentHash,
    },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Run(err) if err.is_input_error() => EXIT_INPUT,
            Self::Config(_) | Self::Replay(_) => EXIT_INPUT,
            Self::Diverged { .. } | Self::DigestMismatch { .. } => EXIT_DIVERGED,
            _ => 1,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bisect",
    about = "Step-by-step binary search visualizer",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sort an array, search it, and play back every step.
    Run(RunArgs),

    /// Replay a recorded run (from `run --json`) and check it matches.
    Verify(VerifyArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Comma-separated numbers, e.g. "3, 7, 1, 9, 4".
    #[arg(long, allow_hyphen_values = true)]
    pub array: String,

    /// Value to search for.
    #[arg(long, allow_hyphen_values = true)]
    pub target: String,

    /// Delay between revealed steps in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Plain output without ANSI styling.
    #[arg(long)]
    pub no_color: bool,

    /// Minimum cell width in columns.
    #[arg(long)]
    pub cell_width: Option<usize>,

    /// Print the canonical run report instead of frames.
    #[arg(long)]
    pub json: bool,

    /// JSON file with playback settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    fn overrides(&self) -> PlaybackConfig {
        PlaybackConfig {
            step_delay_ms: self.delay_ms,
            color: self.no_color.then_some(false),
            cell_width: self.cell_width,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Run record or run report JSON file.
    pub path: PathBuf,
}

/// What is known about the stream frames are written to.
///
/// The default describes a pipe or file: no styling, no cursor movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputTarget {
    pub terminal: bool,
    /// Width in columns, when the stream is a terminal of known size.
    pub columns: Option<u16>,
}

impl OutputTarget {
    #[must_use]
    pub fn stdout() -> Self {
        let terminal = io::stdout().is_terminal();
        let columns = if terminal {
            crossterm::terminal::size().ok().map(|(columns, _)| columns)
        } else {
            None
        };
        Self { terminal, columns }
    }
}

/// Layer file, environment, and flag overrides over the defaults.
///
/// Colour is forced off when `target` is not a terminal.
///
/// # Errors
///
/// Returns [`ConfigError`] for an unreadable file, a bad environment value,
/// or out-of-range settings.
pub fn resolve_settings(
    args: &RunArgs,
    env: PlaybackConfig,
    target: OutputTarget,
) -> Result<PlaybackSettings> {
    let file = match &args.config {
        Some(path) => PlaybackConfig::from_json_file(path)?,
        None => PlaybackConfig::default(),
    };
    let mut config = file.merged(env).merged(args.overrides());
    if !target.terminal {
        config.color = Some(false);
    }
    Ok(config.resolve()?)
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let target = OutputTarget::stdout();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock(), target)
}

pub fn run<W: Write>(cli: Cli, out: &mut W, target: OutputTarget) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let settings = resolve_settings(&args, PlaybackConfig::from_env()?, target)?;
            run_search(&args, &settings, target, out)
        }
        Commands::Verify(args) => run_verify(&args, out),
    }
}

/// `bisect run` with already resolved settings.
///
/// # Errors
///
/// Returns [`CliError`] for bad input or a failed write.
pub fn run_search<W: Write>(
    args: &RunArgs,
    settings: &PlaybackSettings,
    target: OutputTarget,
    out: &mut W,
) -> Result<()> {
    let report = run_pipeline(&args.array, &args.target, settings)?;
    if args.json {
        out.write_all(&report.to_canonical_json_bytes()?)?;
        writeln!(out)?;
        return Ok(());
    }
    write_playback(&report, settings, target, out)?;
    Ok(())
}

fn write_playback<W: Write>(
    report: &RunReportV1,
    settings: &PlaybackSettings,
    output: OutputTarget,
    out: &mut W,
) -> io::Result<()> {
    let run = &report.run;
    let target = run.target();
    let renderer = TerminalRenderer::new(settings, run.sequence()).with_columns(output.columns);
    renderer.write_sequence(out, run.sequence())?;
    writeln!(out)?;

    let mut playback = Playback::new(run.clone());
    play(
        &mut playback,
        settings.step_delay,
        &ThreadClock,
        &CancelToken::new(),
        |pb| {
            let frames = pb.frames();
            let Some((latest, older)) = frames.split_last() else {
                return Ok(());
            };
            renderer.write_frame_update(out, older.last(), latest, target)
        },
    )?;

    if let Some(message) = banner(run, playback.revealed_count()) {
        writeln!(out)?;
        renderer.write_banner(out, &message, run.outcome().is_found())?;
    }
    Ok(())
}

/// `bisect verify`: replay a saved record.
///
/// Accepts either a bare run record or the report printed by `run --json`.
/// For a report, the `run` member is replayed and the sequence, step log and
/// run digests are recomputed and compared against `digests`.
///
/// # Errors
///
/// Returns [`CliError::Diverged`] when the record does not replay,
/// [`CliError::DigestMismatch`] when a reported digest is wrong, or a
/// read/parse error.
pub fn run_verify<W: Write>(args: &VerifyArgs, out: &mut W) -> Result<()> {
    let bytes = std::fs::read(&args.path).map_err(|source| CliError::ReadRecord {
        path: args.path.clone(),
        source,
    })?;
    // Unparseable bytes fall through so the record parser reports the JSON error.
    let report = serde_json::from_slice::<Value>(&bytes)
        .ok()
        .filter(|value| value.get("run").is_some());
    let recorded = match &report {
        Some(report) => parse_run(&serde_json::to_vec(&report["run"]).map_err(io::Error::from)?),
        None => parse_run(&bytes),
    }
    .map_err(ReplayError::from)?;

    let verdict = replay_verify(&recorded);
    info!(path = %args.path.display(), ?verdict, "replay finished");
    if !verdict.is_match() {
        return Err(CliError::Diverged { verdict });
    }
    if let Some(report) = &report {
        check_report_digests(&recorded, &report["digests"])?;
    }
    writeln!(out, "match")?;
    Ok(())
}

/// Compare reported digests with ones recomputed from a replayed record.
///
/// A missing digest counts as a mismatch. The playback config digest is not
/// checked: the settings it covers are not part of the report.
fn check_report_digests(recorded: &RecordedRunV1, digests: &Value) -> Result<()> {
    // The record replayed, so a fresh search reproduces it exactly.
    let run = search(&recorded.sequence, recorded.target);
    let recomputed = [
        ("sequence", sequence_digest(&recorded.sequence)?),
        ("step_log", run.step_log_digest()?),
        ("run", run.digest()?),
    ];
    for (field, actual) in recomputed {
        let claimed = digests[field].as_str().unwrap_or_default();
        if claimed != actual.as_str() {
            return Err(CliError::DigestMismatch {
                field,
                claimed: claimed.to_string(),
                actual,
            });
        }
    }
    Ok(())
}
