//! Detection history and aggregate statistics.

mod aggregator;
mod history;

pub use aggregator::{AnalyticsAggregator, AnalyticsSnapshot};
pub use history::DetectionHistory;
