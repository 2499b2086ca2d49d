//! One analysis cycle: difference, classify, accept, record.

use crate::analytics::{AnalyticsAggregator, AnalyticsSnapshot, DetectionHistory};
use crate::config::{AnalysisConfig, validate_analysis};
use crate::error::Result;
use crate::frame::Frame;
use crate::motion::{Classifier, Detection, DifferenceEngine};
use chrono::{DateTime, Local};
use tracing::{debug, info};

/// What a single cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// No usable frame (none captured yet, or zero-sized).
    NoFrame,
    /// Frame retained as the comparison baseline; nothing to compare yet.
    WarmingUp,
    /// Frames compared, nothing changed.
    NoMotion,
    /// Motion classified but below the acceptance threshold.
    Discarded(Detection),
    /// Motion recorded in history and analytics.
    Accepted(Detection),
}

impl CycleOutcome {
    /// The recorded detection, if this cycle recorded one.
    pub const fn accepted(&self) -> Option<&Detection> {
        match self {
            Self::Accepted(detection) => Some(detection),
            _ => None,
        }
    }
}

/// Owns the retained frame, history and analytics, and runs cycles over them.
#[derive(Debug)]
pub struct Analyzer {
    engine: DifferenceEngine,
    classifier: Classifier,
    acceptance_threshold: f32,
    history: DetectionHistory,
    aggregator: AnalyticsAggregator,
}

impl Analyzer {
    /// Build an analyzer, rejecting invalid settings.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        validate_analysis(config)?;
        Ok(Self {
            engine: DifferenceEngine::from_config(config)?,
            classifier: Classifier::new(),
            acceptance_threshold: config.acceptance_threshold,
            history: DetectionHistory::new(config.history_capacity)?,
            aggregator: AnalyticsAggregator::new(),
        })
    }

    /// Run one cycle on `frame`, timestamping any detection with the current time.
    pub fn process(&mut self, frame: &Frame) -> CycleOutcome {
        self.process_at(frame, Local::now())
    }

    /// Run one cycle with an explicit detection timestamp.
    pub fn process_at(&mut self, frame: &Frame, timestamp: DateTime<Local>) -> CycleOutcome {
        if frame.is_empty() {
            return CycleOutcome::NoFrame;
        }

        let comparable = self.engine.can_compare(frame);
        let signal = self.engine.compute(frame);
        if !comparable {
            return CycleOutcome::WarmingUp;
        }

        let Some(detection) = self.classifier.classify_at(signal, timestamp) else {
            return CycleOutcome::NoMotion;
        };

        if detection.confidence > self.acceptance_threshold {
            info!(
                "Detected {} (confidence {:.3}, intensity {:.3}, {} samples)",
                detection.category,
                detection.confidence,
                detection.intensity,
                signal.sample_count
            );
            self.aggregator.record(&detection);
            self.history.push(detection.clone());
            CycleOutcome::Accepted(detection)
        } else {
            debug!(
                "Discarded {} at confidence {:.3}",
                detection.category, detection.confidence
            );
            CycleOutcome::Discarded(detection)
        }
    }

    /// Drop the retained frame. History and analytics are kept.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Whether a baseline frame is retained.
    pub const fn is_warm(&self) -> bool {
        self.engine.is_warm()
    }

    /// Recorded detections, most recent last.
    pub fn recent(&self) -> Vec<Detection> {
        self.history.recent()
    }

    /// The most recent recorded detection.
    pub fn latest(&self) -> Option<Detection> {
        self.history.latest()
    }

    /// Copy of the running totals.
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        self.aggregator.snapshot()
    }
}
