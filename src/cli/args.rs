//! CLI argument definitions.

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wildlife motion analysis for field cameras.
#[derive(Debug, Parser)]
#[command(name = "wildwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "WILDWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a directory of raw RGBA frames through the analyzer, one cycle per frame.
    Analyze(ReplayArgs),
    /// Replay frames in real time and analyze them on the scheduler's tick.
    Monitor {
        /// Replay settings.
        #[command(flatten)]
        replay: ReplayArgs,

        /// Frames published per second.
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1000))]
        fps: u32,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Frame replay input and report output.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Directory containing `*.rgba` frame dumps.
    pub frames: PathBuf,

    /// Frame width in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Frame height in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also export the detection history as CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Analysis overrides.
    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// Command-line overrides for configuration values.
#[derive(Debug, Default, Args)]
pub struct TuningArgs {
    /// Sampling stride in pixels.
    #[arg(long, env = "WILDWATCH_STRIDE")]
    pub stride: Option<usize>,

    /// Minimum three-channel difference for a sample to count.
    #[arg(long, env = "WILDWATCH_MIN_DIFF")]
    pub min_diff: Option<u32>,

    /// Confidence a detection must exceed to be recorded (0.0-1.0).
    #[arg(long, value_parser = parse_confidence, env = "WILDWATCH_ACCEPTANCE")]
    pub acceptance: Option<f32>,

    /// Number of detections kept in history.
    #[arg(long, env = "WILDWATCH_CAPACITY")]
    pub capacity: Option<usize>,

    /// Scheduler tick period in milliseconds.
    #[arg(long, env = "WILDWATCH_TICK_MS")]
    pub tick_ms: Option<u64>,

    /// Confidence above which a detection is reported as an alert (0.0-1.0).
    #[arg(long, value_parser = parse_confidence, env = "WILDWATCH_ALERT_THRESHOLD")]
    pub alert_threshold: Option<f32>,
}

impl TuningArgs {
    /// Overwrite configuration values that were given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(stride) = self.stride {
            config.analysis.sample_stride = stride;
        }
        if let Some(min_diff) = self.min_diff {
            config.analysis.min_pixel_diff = min_diff;
        }
        if let Some(acceptance) = self.acceptance {
            config.analysis.acceptance_threshold = acceptance;
        }
        if let Some(capacity) = self.capacity {
            config.analysis.history_capacity = capacity;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.scheduler.tick_period_ms = tick_ms;
        }
        if let Some(alert) = self.alert_threshold {
            config.alerts.threshold = alert;
        }
    }
}

/// Parse and validate confidence value.
fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}
