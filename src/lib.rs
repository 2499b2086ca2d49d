//! Wildwatch - wildlife motion analysis for field cameras.
//!
//! This crate compares consecutive camera frames on a sparse pixel grid,
//! scores the change, buckets it into coarse animal-size categories and
//! keeps a bounded history plus running statistics of what it saw.

#![warn(missing_docs)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod motion;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, Command, ReplayArgs};
use config::{
    Config, config_file_path, load_config_file, load_default_config, save_config,
    save_default_config,
};
use frame::{FrameDirectory, SharedFrame};
use output::ActivityReport;
use pipeline::{ActivityGate, AnalysisScheduler, Analyzer, CycleOutcome};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub use error::{Error, Result};

/// Main entry point for the wildwatch CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => load_default_config()?,
    };

    match cli.command {
        Command::Analyze(replay) => {
            let config = resolve_config(config, &replay)?;
            analyze_frames(&replay, &config)
        }
        Command::Monitor { replay, fps } => {
            let config = resolve_config(config, &replay)?;
            monitor_frames(&replay, fps, &config)
        }
        Command::Config { action } => handle_config_command(action, cli.config.as_deref(), &config),
    }
}

/// Apply command-line overrides and validate the result.
fn resolve_config(mut config: Config, replay: &ReplayArgs) -> Result<Config> {
    replay.tuning.apply(&mut config);
    config::validate_config(&config)?;
    Ok(config)
}

/// Feed every frame through one analyzer cycle, in file order.
fn analyze_frames(replay: &ReplayArgs, config: &Config) -> Result<()> {
    let start = Instant::now();
    let frames = FrameDirectory::open(&replay.frames, replay.width, replay.height)?;
    info!("Analyzing {} frame(s)", frames.len());

    let mut analyzer = Analyzer::new(&config.analysis)?;
    let mut analyzed = 0u64;
    let mut discarded = 0u64;

    for frame in frames.frames() {
        let frame = frame?;
        match analyzer.process(&frame) {
            CycleOutcome::Discarded(_) => discarded += 1,
            outcome => debug!("Frame {}: {:?}", analyzed, outcome),
        }
        analyzed += 1;
    }

    let snapshot = analyzer.snapshot();
    info!(
        "Complete: {} frames, {} detections recorded, {} discarded in {:.2}s",
        analyzed,
        snapshot.total_detections,
        discarded,
        start.elapsed().as_secs_f64()
    );

    let report = ActivityReport::new(config, analyzed, analyzer.recent(), snapshot, None);
    emit_report(&report, replay)
}

/// Publish frames at `fps` while the scheduler analyzes them on its own tick.
fn monitor_frames(replay: &ReplayArgs, fps: u32, config: &Config) -> Result<()> {
    let frames = FrameDirectory::open(&replay.frames, replay.width, replay.height)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    let shared = SharedFrame::new();
    let mut scheduler = AnalysisScheduler::new(
        &config.analysis,
        &config.scheduler,
        Arc::new(shared.clone()),
        ActivityGate::default(),
    )?;

    let frame_interval = Duration::from_secs(1) / fps;
    info!(
        "Monitoring {} frame(s) at {} fps, tick {} ms",
        frames.len(),
        fps,
        config.scheduler.tick_period_ms
    );

    scheduler.start()?;
    for frame in frames.frames() {
        if interrupted.load(Ordering::SeqCst) {
            info!("Interrupted, stopping");
            break;
        }
        match frame {
            Ok(frame) => {
                shared.publish(frame);
                debug!("Published frame {}", shared.generation());
            }
            Err(e) => {
                scheduler.stop();
                return Err(e);
            }
        }
        std::thread::sleep(frame_interval);
    }

    // Give the last frame one tick before stopping
    if !interrupted.load(Ordering::SeqCst) {
        std::thread::sleep(scheduler.period());
    }
    // Replay is over: later ticks see no frame
    shared.clear();
    scheduler.stop();

    let stats = scheduler.stats();
    info!(
        "Complete: {} ticks, {} cycles, {} skipped busy, {} deadline misses",
        stats.ticks, stats.cycles, stats.skipped_busy, stats.deadline_misses
    );

    let report = ActivityReport::new(
        config,
        stats.cycles,
        scheduler.recent(),
        scheduler.snapshot(),
        Some(stats),
    );
    emit_report(&report, replay)
}

#[allow(clippy::print_stdout)]
fn emit_report(report: &ActivityReport, replay: &ReplayArgs) -> Result<()> {
    if let Some(path) = &replay.csv {
        output::write_history_file(path, &report.history)?;
        info!("Wrote history: {}", path.display());
    }

    if let Some(path) = &replay.output {
        report.write_file(path)?;
        info!("Wrote report: {}", path.display());
    } else {
        let stdout = std::io::stdout();
        report.write_to(stdout.lock())?;
        println!();
    }
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Reports go to stdout, so logs stay on stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(
    action: cli::ConfigAction,
    explicit_path: Option<&std::path::Path>,
    config: &Config,
) -> Result<()> {
    use cli::ConfigAction;

    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
                return Ok(());
            }
            let written = match explicit_path {
                Some(path) => {
                    save_config(&Config::default(), path)?;
                    path.to_path_buf()
                }
                None => save_default_config(&Config::default())?,
            };
            println!("Created configuration file: {}", written.display());
            Ok(())
        }
        ConfigAction::Show => {
            let contents =
                toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
