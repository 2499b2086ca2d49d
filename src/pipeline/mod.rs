//! Analysis pipeline: single cycles and their periodic scheduling.

mod analyzer;
mod scheduler;

pub use analyzer::{Analyzer, CycleOutcome};
pub use scheduler::{
    ActivityGate, AnalysisScheduler, SchedulerState, SchedulerStats, TickOutcome,
};
