//! Frame differencing and motion classification.

mod classifier;
mod difference;
mod types;

pub use classifier::{Classifier, categorize, confidence, intensity};
pub use difference::DifferenceEngine;
pub use types::{Detection, MotionCategory, MotionSignal};
