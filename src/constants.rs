//! Application-wide constants.
//!
//! Every tunable default and scoring constant lives here so the analysis
//! code and the configuration layer agree on the same numbers.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "wildwatch";

/// Default sampling stride in pixels, applied on both axes.
pub const DEFAULT_SAMPLE_STRIDE: usize = 8;

/// Default minimum three-channel difference for a sampled pixel to count.
pub const DEFAULT_MIN_PIXEL_DIFF: u32 = 10;

/// Default confidence a detection must exceed to be kept.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f32 = 0.4;

/// Default confidence above which a kept detection is shown as an alert.
pub const DEFAULT_ALERT_THRESHOLD: f32 = 0.6;

/// Default number of detections retained in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default analysis tick period in milliseconds.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 100;

/// Bytes per pixel in a frame buffer (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Number of colour channels compared when differencing.
pub const COMPARED_CHANNELS: usize = 3;

/// Hours in the hourly histogram.
pub const HOURS_PER_DAY: usize = 24;

/// Scoring constants used by the classifier.
pub mod scoring {
    /// Largest possible three-channel difference (255 * 3).
    pub const MAX_PIXEL_DIFF: f64 = 765.0;

    /// Weight of the intensity factor in the confidence score.
    pub const INTENSITY_WEIGHT: f64 = 0.6;

    /// Weight of the coverage factor in the confidence score.
    pub const COVERAGE_WEIGHT: f64 = 0.4;

    /// Multiplier applied to intensity before clamping.
    pub const INTENSITY_GAIN: f64 = 2.0;

    /// Sample count at which coverage saturates.
    pub const COVERAGE_SATURATION: f64 = 1000.0;
}

/// Category thresholds, all strict lower bounds.
pub mod category {
    /// Large animal: minimum intensity.
    pub const LARGE_INTENSITY: f64 = 0.7;
    /// Large animal: minimum sample count.
    pub const LARGE_SAMPLES: u64 = 500;
    /// Medium animal: minimum intensity.
    pub const MEDIUM_INTENSITY: f64 = 0.4;
    /// Medium animal: minimum sample count.
    pub const MEDIUM_SAMPLES: u64 = 200;
    /// Small animal: minimum intensity.
    pub const SMALL_INTENSITY: f64 = 0.2;
    /// Small animal: minimum sample count.
    pub const SMALL_SAMPLES: u64 = 50;
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 4;
}

/// File extension of raw RGBA frame dumps.
pub const FRAME_EXTENSION: &str = "rgba";
