//! Motion scoring and categorisation.
//!
//! The classifier is pure: it turns a [`MotionSignal`] into a [`Detection`]
//! and never decides whether that detection is kept. Acceptance belongs to
//! the analyzer.

use crate::constants::{category, scoring};
use crate::motion::{Detection, MotionCategory, MotionSignal};
use chrono::{DateTime, Local};

/// Maps motion signals to scored detections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    /// Create a classifier.
    pub const fn new() -> Self {
        Self
    }

    /// Classify a signal, stamping the detection with the current local time.
    ///
    /// Returns `None` when no sampled pixel changed.
    pub fn classify(&self, signal: MotionSignal) -> Option<Detection> {
        self.classify_at(signal, Local::now())
    }

    /// Classify a signal with an explicit timestamp.
    #[allow(clippy::cast_possible_truncation)]
    pub fn classify_at(
        &self,
        signal: MotionSignal,
        timestamp: DateTime<Local>,
    ) -> Option<Detection> {
        if signal.is_empty() {
            return None;
        }

        let intensity = intensity(signal);
        Some(Detection {
            timestamp,
            intensity: intensity as f32,
            confidence: confidence(intensity, signal.sample_count) as f32,
            category: categorize(intensity, signal.sample_count),
        })
    }
}

/// Mean per-sample difference normalised to `[0, 1]`.
///
/// Zero samples give zero intensity.
#[allow(clippy::cast_precision_loss)]
pub fn intensity(signal: MotionSignal) -> f64 {
    if signal.sample_count == 0 {
        return 0.0;
    }
    let max_total = signal.sample_count as f64 * scoring::MAX_PIXEL_DIFF;
    (signal.total_magnitude as f64 / max_total).min(1.0)
}

/// Weighted blend of change strength (60%) and change breadth (40%).
#[allow(clippy::cast_precision_loss)]
pub fn confidence(intensity: f64, sample_count: u64) -> f64 {
    let intensity_factor = (intensity * scoring::INTENSITY_GAIN).clamp(0.0, 1.0);
    let coverage_factor = (sample_count as f64 / scoring::COVERAGE_SATURATION).min(1.0);
    intensity_factor.mul_add(
        scoring::INTENSITY_WEIGHT,
        coverage_factor * scoring::COVERAGE_WEIGHT,
    )
}

/// Bucket a signal. Thresholds are strict and checked largest first.
pub fn categorize(intensity: f64, sample_count: u64) -> MotionCategory {
    if intensity > category::LARGE_INTENSITY && sample_count > category::LARGE_SAMPLES {
        MotionCategory::LargeAnimal
    } else if intensity > category::MEDIUM_INTENSITY && sample_count > category::MEDIUM_SAMPLES {
        MotionCategory::MediumAnimal
    } else if intensity > category::SMALL_INTENSITY && sample_count > category::SMALL_SAMPLES {
        MotionCategory::SmallAnimal
    } else {
        MotionCategory::AmbientMotion
    }
}
