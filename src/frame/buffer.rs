//! RGBA frame buffers and the swap-on-write slot shared with the capture side.

use crate::constants::CHANNELS;
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A dense RGBA pixel buffer with fixed geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap an RGBA buffer, checking that it holds exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::InvalidFrame {
                message: format!(
                    "{width}x{height} frame needs {expected} bytes, got {}",
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel has the given RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(pixels * CHANNELS).collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Frame width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `true` when either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether two frames share the same geometry.
    pub const fn same_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The four channel bytes of the pixel at `(x, y)`.
    ///
    /// Callers must stay within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let offset = (y * self.width as usize + x) * CHANNELS;
        &self.data[offset..offset + CHANNELS]
    }

    /// Become a copy of `other`, reusing this frame's allocation where possible.
    pub fn copy_from(&mut self, other: &Self) {
        self.width = other.width;
        self.height = other.height;
        self.data.clone_from(&other.data);
    }

    /// Overwrite a rectangular block with one RGBA value, clipped to the frame.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]) {
        let x_end = x.saturating_add(width).min(self.width) as usize;
        let y_end = y.saturating_add(height).min(self.height) as usize;
        for row in y as usize..y_end {
            for col in x as usize..x_end {
                let offset = (row * self.width as usize + col) * CHANNELS;
                self.data[offset..offset + CHANNELS].copy_from_slice(&rgba);
            }
        }
    }
}

/// Latest-frame slot written by the capture side and read by the analyzer.
///
/// Writers replace the whole `Arc<Frame>`, readers clone it, so a reader
/// sees either the old frame or the new one and never a mix of both.
#[derive(Debug, Clone, Default)]
pub struct SharedFrame {
    inner: Arc<SharedInner>,
}

#[derive(Debug, Default)]
struct SharedInner {
    slot: Mutex<Option<Arc<Frame>>>,
    generation: AtomicU64,
}

impl SharedFrame {
    /// An empty slot; readers get `None` until the first publish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new frame, replacing the previous one.
    pub fn publish(&self, frame: Frame) {
        let frame = Arc::new(frame);
        let mut slot = self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(frame);
        self.inner.generation.fetch_add(1, Ordering::Release);
    }

    /// Snapshot of the most recently published frame.
    pub fn snapshot(&self) -> Option<Arc<Frame>> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of frames published so far.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Drop the current frame, e.g. when the capture device goes away.
    pub fn clear(&self) {
        *self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
