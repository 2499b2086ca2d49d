//! Frame differencing over a strided sample grid.

use crate::config::AnalysisConfig;
use crate::constants::COMPARED_CHANNELS;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::motion::MotionSignal;
use tracing::{debug, warn};

/// Compares each frame with a private copy of the previous one.
///
/// `compute` takes `&mut self`, so two computations on the same engine can
/// never overlap; callers sharing an engine across threads go through the
/// scheduler, which drops a tick rather than wait for a running cycle.
#[derive(Debug)]
pub struct DifferenceEngine {
    stride: usize,
    min_pixel_diff: u32,
    previous: Option<Frame>,
}

impl DifferenceEngine {
    /// Create an engine. A zero stride is rejected.
    pub fn new(stride: usize, min_pixel_diff: u32) -> Result<Self> {
        if stride == 0 {
            return Err(Error::ConfigValidation {
                message: "sample_stride must be at least 1".to_string(),
            });
        }
        Ok(Self {
            stride,
            min_pixel_diff,
            previous: None,
        })
    }

    /// Create an engine from analysis settings.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(config.sample_stride, config.min_pixel_diff)
    }

    /// Whether a previous frame is retained, i.e. the next call can report motion.
    pub const fn is_warm(&self) -> bool {
        self.previous.is_some()
    }

    /// Whether `frame` would be compared rather than retained as a warm-up frame.
    pub fn can_compare(&self, frame: &Frame) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|previous| previous.same_size(frame))
    }

    /// Forget the retained frame; the next call starts a new warm-up.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Compare `current` with the retained frame, then retain a copy of `current`.
    ///
    /// Returns an empty signal for an empty frame, on the first frame after a
    /// reset, and when the frame size changed since the previous call.
    pub fn compute(&mut self, current: &Frame) -> MotionSignal {
        if current.is_empty() {
            debug!("Skipping empty frame");
            return MotionSignal::EMPTY;
        }

        let Some(previous) = self.previous.as_mut() else {
            debug!(
                "Warm-up: retaining first {}x{} frame",
                current.width(),
                current.height()
            );
            self.previous = Some(current.clone());
            return MotionSignal::EMPTY;
        };

        if !previous.same_size(current) {
            warn!(
                "Frame size changed from {}x{} to {}x{}, restarting warm-up",
                previous.width(),
                previous.height(),
                current.width(),
                current.height()
            );
            previous.copy_from(current);
            return MotionSignal::EMPTY;
        }

        let signal = sample_difference(previous, current, self.stride, self.min_pixel_diff);
        previous.copy_from(current);
        signal
    }
}

/// Sum of absolute R, G and B differences at each grid point above the threshold.
fn sample_difference(
    previous: &Frame,
    current: &Frame,
    stride: usize,
    min_pixel_diff: u32,
) -> MotionSignal {
    let mut signal = MotionSignal::EMPTY;

    for y in (0..current.height() as usize).step_by(stride) {
        for x in (0..current.width() as usize).step_by(stride) {
            let now = current.pixel(x, y);
            let before = previous.pixel(x, y);
            let diff: u32 = now[..COMPARED_CHANNELS]
                .iter()
                .zip(&before[..COMPARED_CHANNELS])
                .map(|(a, b)| u32::from(a.abs_diff(*b)))
                .sum();

            if diff > min_pixel_diff {
                signal.total_magnitude += u64::from(diff);
                signal.sample_count += 1;
            }
        }
    }

    signal
}
