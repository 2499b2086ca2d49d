//! Periodic driver for the analyzer.
//!
//! A single worker thread wakes every tick period and runs one cycle against
//! the frame source. Ticks never queue: while a cycle holds the analyzer, any
//! other tick is dropped. `stop` cancels the worker, waits for an in-flight
//! cycle to finish and discards the retained frame so the next `start`
//! begins with a warm-up cycle.

use crate::analytics::AnalyticsSnapshot;
use crate::config::{AnalysisConfig, SchedulerConfig, validate_scheduler};
use crate::error::{Error, Result};
use crate::frame::FrameSource;
use crate::motion::Detection;
use crate::pipeline::{Analyzer, CycleOutcome};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Lifecycle state of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedulerState {
    /// Created, never started.
    Idle,
    /// Timer running.
    Running,
    /// Stopped; may be started again.
    Stopped,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The scheduler is idle or stopped; nothing ran and nothing was counted.
    NotRunning,
    /// The activity gate was closed; nothing ran.
    Inactive,
    /// Another cycle was still in progress; the tick was dropped.
    Busy,
    /// A cycle ran.
    Cycle(CycleOutcome),
}

/// Counters kept across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Ticks fired, including skipped ones.
    pub ticks: u64,
    /// Cycles actually run.
    pub cycles: u64,
    /// Ticks skipped because the system was inactive.
    pub skipped_inactive: u64,
    /// Ticks dropped because a cycle was in progress.
    pub skipped_busy: u64,
    /// Cycles that took longer than the tick period.
    pub deadline_misses: u64,
    /// Longest cycle so far.
    pub worst_cycle: Duration,
}

/// Shared "system active" flag, set by an operator or power controller.
#[derive(Debug, Clone)]
pub struct ActivityGate {
    active: Arc<AtomicBool>,
}

impl ActivityGate {
    /// Create a gate in the given state.
    pub fn new(active: bool) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(active)),
        }
    }

    /// Open or close the gate.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Whether ticks should run.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Default for ActivityGate {
    fn default() -> Self {
        Self::new(true)
    }
}

struct Shared {
    analyzer: Mutex<Analyzer>,
    source: Arc<dyn FrameSource>,
    gate: ActivityGate,
    stats: Mutex<SchedulerStats>,
    in_cycle: AtomicBool,
    period: Duration,
}

impl Shared {
    fn stats(&self) -> MutexGuard<'_, SchedulerStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn analyzer(&self) -> MutexGuard<'_, Analyzer> {
        self.analyzer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick(&self) -> TickOutcome {
        self.stats().ticks += 1;

        if !self.gate.is_active() {
            self.stats().skipped_inactive += 1;
            return TickOutcome::Inactive;
        }

        let mut analyzer = match self.analyzer.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                info!("Cycle still in progress, dropping tick");
                self.stats().skipped_busy += 1;
                return TickOutcome::Busy;
            }
        };

        self.in_cycle.store(true, Ordering::SeqCst);
        let started = Instant::now();

        let outcome = match self.source.current_frame() {
            Some(frame) => analyzer.process(&frame),
            None => CycleOutcome::NoFrame,
        };

        let elapsed = started.elapsed();
        self.in_cycle.store(false, Ordering::SeqCst);
        drop(analyzer);

        let mut stats = self.stats();
        stats.cycles += 1;
        if elapsed > self.period {
            stats.deadline_misses += 1;
        }
        if elapsed > stats.worst_cycle {
            stats.worst_cycle = elapsed;
        }

        TickOutcome::Cycle(outcome)
    }
}

struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Runs the analyzer periodically while started.
pub struct AnalysisScheduler {
    shared: Arc<Shared>,
    state: SchedulerState,
    worker: Option<Worker>,
}

impl AnalysisScheduler {
    /// Build a scheduler reading frames from `source`.
    ///
    /// Invalid analysis or scheduler settings are rejected here, before
    /// anything runs.
    pub fn new(
        analysis: &AnalysisConfig,
        scheduler: &SchedulerConfig,
        source: Arc<dyn FrameSource>,
        gate: ActivityGate,
    ) -> Result<Self> {
        validate_scheduler(scheduler)?;
        let analyzer = Analyzer::new(analysis)?;

        Ok(Self {
            shared: Arc::new(Shared {
                analyzer: Mutex::new(analyzer),
                source,
                gate,
                stats: Mutex::new(SchedulerStats::default()),
                in_cycle: AtomicBool::new(false),
                period: scheduler.tick_period(),
            }),
            state: SchedulerState::Idle,
            worker: None,
        })
    }

    /// Start ticking. Restarting a running scheduler stops it first.
    pub fn start(&mut self) -> Result<()> {
        if self.state == SchedulerState::Running {
            debug!("Scheduler already running, restarting");
            self.stop();
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let shared = Arc::clone(&self.shared);

        let handle = thread::Builder::new()
            .name("wildwatch-analysis".to_string())
            .spawn(move || run_worker(&shared, &stop_rx))
            .map_err(|e| Error::Internal {
                message: format!("failed to spawn analysis thread: {e}"),
            })?;

        self.worker = Some(Worker { stop_tx, handle });
        self.state = SchedulerState::Running;
        info!(
            "Analysis started ({} ms tick)",
            self.shared.period.as_millis()
        );
        Ok(())
    }

    /// Stop ticking and discard the retained frame. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            // The worker also exits when the sender is dropped
            let _ = worker.stop_tx.send(());
            if worker.handle.join().is_err() {
                warn!("Analysis thread panicked");
            }
            info!("Analysis stopped");
        }

        self.shared.analyzer().reset();
        self.shared.in_cycle.store(false, Ordering::SeqCst);
        self.state = SchedulerState::Stopped;
    }

    /// Run one tick now, on the calling thread.
    ///
    /// Outside the `Running` state this does nothing, so a stopped scheduler
    /// keeps no baseline frame and the next `start` warms up.
    pub fn tick(&self) -> TickOutcome {
        if self.state != SchedulerState::Running {
            debug!("Tick ignored while {:?}", self.state);
            return TickOutcome::NotRunning;
        }
        self.shared.tick()
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Whether a cycle is running at this moment.
    pub fn is_cycle_in_progress(&self) -> bool {
        self.shared.in_cycle.load(Ordering::SeqCst)
    }

    /// Handle to the activity gate.
    pub fn gate(&self) -> &ActivityGate {
        &self.shared.gate
    }

    /// Configured tick period.
    pub fn period(&self) -> Duration {
        self.shared.period
    }

    /// Copy of the tick counters.
    pub fn stats(&self) -> SchedulerStats {
        *self.shared.stats()
    }

    /// Recorded detections, most recent last.
    pub fn recent(&self) -> Vec<Detection> {
        self.shared.analyzer().recent()
    }

    /// The most recent recorded detection.
    pub fn latest(&self) -> Option<Detection> {
        self.shared.analyzer().latest()
    }

    /// Copy of the running totals.
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        self.shared.analyzer().snapshot()
    }
}

impl Drop for AnalysisScheduler {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}

fn run_worker(shared: &Shared, stop_rx: &mpsc::Receiver<()>) {
    let mut wait = shared.period;
    loop {
        match stop_rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {
                let started = Instant::now();
                let outcome = shared.tick();
                debug!("Tick: {:?}", outcome);
                wait = shared.period.saturating_sub(started.elapsed());
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
