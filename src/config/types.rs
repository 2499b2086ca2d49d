//! Configuration type definitions.

use crate::constants::{
    DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_ALERT_THRESHOLD, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_MIN_PIXEL_DIFF, DEFAULT_SAMPLE_STRIDE, DEFAULT_TICK_PERIOD_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Motion analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Periodic scheduling settings.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Presentation-side alert settings.
    #[serde(default)]
    pub alerts: AlertConfig,
}

/// Frame differencing, scoring and retention settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pixel stride of the sampled grid on both axes.
    pub sample_stride: usize,

    /// Minimum three-channel difference for a sample to count as motion.
    pub min_pixel_diff: u32,

    /// Confidence a detection must exceed to be recorded.
    pub acceptance_threshold: f32,

    /// Maximum number of detections kept in history.
    pub history_capacity: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            min_pixel_diff: DEFAULT_MIN_PIXEL_DIFF,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Scheduler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Interval between analysis ticks in milliseconds.
    pub tick_period_ms: u64,
}

impl SchedulerConfig {
    /// Tick period as a [`Duration`].
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

/// Alert settings. Not used by the analysis core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Confidence above which a recorded detection is reported as an alert.
    pub threshold: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_default_values() {
        let analysis = AnalysisConfig::default();
        assert_eq!(analysis.sample_stride, 8);
        assert_eq!(analysis.min_pixel_diff, 10);
        assert_eq!(analysis.acceptance_threshold, 0.4);
        assert_eq!(analysis.history_capacity, 50);
    }

    #[test]
    fn test_scheduler_tick_period() {
        let scheduler = SchedulerConfig { tick_period_ms: 50 };
        assert_eq!(scheduler.tick_period(), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[analysis]\nsample_stride = 4\n").unwrap_or_default();
        assert_eq!(config.analysis.sample_stride, 4);
        assert_eq!(config.analysis.history_capacity, 50);
        assert_eq!(config.alerts.threshold, 0.6);
    }
}
