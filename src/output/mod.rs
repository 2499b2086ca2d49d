//! Report and export writers.

mod export;
mod report;

pub use export::{write_history, write_history_file};
pub use report::{ActivityReport, ReportSettings, ReportSummary, recent_alerts};
