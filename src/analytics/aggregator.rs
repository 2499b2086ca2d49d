//! Running detection statistics.

use crate::constants::HOURS_PER_DAY;
use crate::motion::{Detection, MotionCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals over every detection recorded since start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Number of recorded detections.
    pub total_detections: u64,
    /// Count per category. Categories never seen are absent.
    pub by_category: BTreeMap<MotionCategory, u64>,
    /// Count per local hour of day.
    pub hourly: [u64; HOURS_PER_DAY],
}

impl AnalyticsSnapshot {
    /// Count for one category, zero if never seen.
    pub fn category_count(&self, category: MotionCategory) -> u64 {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    /// The busiest hour, earliest on ties. `None` before the first detection.
    pub fn peak_hour(&self) -> Option<usize> {
        let (hour, count) = self
            .hourly
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, count)| *count)?;
        (*count > 0).then_some(hour)
    }

    /// The most frequent category, the smaller one on ties.
    pub fn dominant_category(&self) -> Option<MotionCategory> {
        self.by_category
            .iter()
            .rev()
            .max_by_key(|&(_, count)| *count)
            .map(|(category, _)| *category)
    }
}

/// Folds accepted detections into an [`AnalyticsSnapshot`].
///
/// Counters only grow; there is no way to remove a detection.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsAggregator {
    snapshot: AnalyticsSnapshot,
}

impl AnalyticsAggregator {
    /// Create an aggregator with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one detection.
    pub fn record(&mut self, detection: &Detection) {
        let snapshot = &mut self.snapshot;
        snapshot.total_detections += 1;
        *snapshot.by_category.entry(detection.category).or_insert(0) += 1;
        snapshot.hourly[detection.hour()] += 1;
    }

    /// Copy of the current totals.
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        self.snapshot.clone()
    }
}
