//! Frame buffers and frame sources.

mod buffer;
mod source;

pub use buffer::{Frame, SharedFrame};
pub use source::{FrameDirectory, FrameSource};
