//! Bounded detection history.

use crate::error::{Error, Result};
use crate::motion::Detection;
use std::collections::VecDeque;

/// The most recent accepted detections, oldest evicted first.
#[derive(Debug, Clone)]
pub struct DetectionHistory {
    capacity: usize,
    entries: VecDeque<Detection>,
}

impl DetectionHistory {
    /// Create an empty history. A zero capacity is rejected.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ConfigValidation {
                message: "history_capacity must be at least 1".to_string(),
            });
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        })
    }

    /// Append a detection, evicting from the front beyond capacity.
    pub fn push(&mut self, detection: Detection) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(detection);
    }

    /// Copy of the retained detections, most recent last.
    pub fn recent(&self) -> Vec<Detection> {
        self.entries.iter().cloned().collect()
    }

    /// The most recent detection.
    pub fn latest(&self) -> Option<Detection> {
        self.entries.back().cloned()
    }

    /// Borrowing iterator, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.entries.iter()
    }

    /// Number of retained detections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
