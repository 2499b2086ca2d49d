//! Motion signal and detection types.

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Raw output of one frame comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionSignal {
    /// Sum of three-channel differences over the samples that passed the threshold.
    pub total_magnitude: u64,
    /// Number of sampled pixels that passed the threshold.
    pub sample_count: u64,
}

impl MotionSignal {
    /// The signal reported when nothing could be compared.
    pub const EMPTY: Self = Self {
        total_magnitude: 0,
        sample_count: 0,
    };

    /// Whether any sampled pixel changed.
    pub const fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

/// Coarse motion-magnitude bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MotionCategory {
    /// Wind, light changes and other low-energy motion.
    AmbientMotion,
    /// Small, moderately strong change.
    SmallAnimal,
    /// Broad, strong change.
    MediumAnimal,
    /// Very broad, very strong change.
    LargeAnimal,
}

impl MotionCategory {
    /// All categories in ascending size order.
    pub const ALL: [Self; 4] = [
        Self::AmbientMotion,
        Self::SmallAnimal,
        Self::MediumAnimal,
        Self::LargeAnimal,
    ];

    /// Stable lowercase identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AmbientMotion => "ambient_motion",
            Self::SmallAnimal => "small_animal",
            Self::MediumAnimal => "medium_animal",
            Self::LargeAnimal => "large_animal",
        }
    }
}

impl std::fmt::Display for MotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored motion event. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// When the motion was classified.
    pub timestamp: DateTime<Local>,
    /// Mean normalised difference of the changed samples (0.0 - 1.0).
    pub intensity: f32,
    /// Detection confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Motion bucket.
    pub category: MotionCategory,
}

impl Detection {
    /// Local hour of day (0-23) of the timestamp.
    pub fn hour(&self) -> usize {
        self.timestamp.hour() as usize
    }
}
