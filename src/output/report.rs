//! JSON activity report.

use crate::analytics::AnalyticsSnapshot;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::motion::{Detection, MotionCategory};
use crate::pipeline::SchedulerStats;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Detections whose confidence is strictly above `threshold`, most recent last.
pub fn recent_alerts(history: &[Detection], threshold: f32) -> Vec<Detection> {
    history
        .iter()
        .filter(|d| d.confidence > threshold)
        .cloned()
        .collect()
}

/// Settings echoed into the report.
#[derive(Debug, Serialize)]
pub struct ReportSettings {
    /// Sampling stride in pixels.
    pub sample_stride: usize,
    /// Minimum per-sample difference.
    pub min_pixel_diff: u32,
    /// Acceptance confidence threshold.
    pub acceptance_threshold: f32,
    /// Alert confidence threshold.
    pub alert_threshold: f32,
    /// History capacity.
    pub history_capacity: usize,
    /// Scheduler tick period in milliseconds.
    pub tick_period_ms: u64,
}

impl From<&Config> for ReportSettings {
    fn from(config: &Config) -> Self {
        Self {
            sample_stride: config.analysis.sample_stride,
            min_pixel_diff: config.analysis.min_pixel_diff,
            acceptance_threshold: config.analysis.acceptance_threshold,
            alert_threshold: config.alerts.threshold,
            history_capacity: config.analysis.history_capacity,
            tick_period_ms: config.scheduler.tick_period_ms,
        }
    }
}

/// Summary figures derived from the snapshot.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    /// Frames fed through the analyzer.
    pub frames_analyzed: u64,
    /// Detections recorded.
    pub total_detections: u64,
    /// Alerts among the retained history.
    pub alerts: usize,
    /// Busiest hour of day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<usize>,
    /// Most frequent category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_category: Option<MotionCategory>,
}

/// Complete report written at the end of a run.
#[derive(Debug, Serialize)]
pub struct ActivityReport {
    /// When the report was produced.
    pub generated_at: DateTime<Local>,
    /// Settings in effect.
    pub settings: ReportSettings,
    /// Summary figures.
    pub summary: ReportSummary,
    /// Running totals.
    pub analytics: AnalyticsSnapshot,
    /// Retained detections, most recent last.
    pub history: Vec<Detection>,
    /// Detections above the alert threshold.
    pub alerts: Vec<Detection>,
    /// Scheduler counters, for scheduled runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<SchedulerStats>,
}

impl ActivityReport {
    /// Assemble a report from the analyzer's read APIs.
    pub fn new(
        config: &Config,
        frames_analyzed: u64,
        history: Vec<Detection>,
        analytics: AnalyticsSnapshot,
        scheduler: Option<SchedulerStats>,
    ) -> Self {
        let alerts = recent_alerts(&history, config.alerts.threshold);
        Self {
            generated_at: Local::now(),
            settings: ReportSettings::from(config),
            summary: ReportSummary {
                frames_analyzed,
                total_detections: analytics.total_detections,
                alerts: alerts.len(),
                peak_hour: analytics.peak_hour(),
                dominant_category: analytics.dominant_category(),
            },
            analytics,
            history,
            alerts,
            scheduler,
        }
    }

    /// Write pretty-printed JSON.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|e| Error::ReportWrite { source: e })
    }

    /// Write pretty-printed JSON to a file.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
