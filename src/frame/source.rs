//! Frame sources: the boundary between capture and analysis.

use crate::constants::{CHANNELS, FRAME_EXTENSION};
use crate::error::{Error, Result};
use crate::frame::{Frame, SharedFrame};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Anything that can lend the analyzer the current frame.
pub trait FrameSource: Send + Sync {
    /// The most recent complete frame, or `None` if nothing has been captured yet.
    fn current_frame(&self) -> Option<Arc<Frame>>;
}

impl FrameSource for SharedFrame {
    fn current_frame(&self) -> Option<Arc<Frame>> {
        self.snapshot()
    }
}

/// A directory of raw RGBA frame dumps replayed in file-name order.
#[derive(Debug)]
pub struct FrameDirectory {
    width: u32,
    height: u32,
    files: Vec<PathBuf>,
}

impl FrameDirectory {
    /// Scan `dir` for `*.rgba` files of the given geometry.
    pub fn open(dir: &Path, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidFrame {
                message: format!("replay geometry must be non-zero, got {width}x{height}"),
            });
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if is_frame_file(&path) {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(Error::NoFrames {
                path: dir.to_path_buf(),
            });
        }

        files.sort();
        debug!("Found {} frame(s) in {}", files.len(), dir.display());

        Ok(Self {
            width,
            height,
            files,
        })
    }

    /// Number of frames in the directory.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the directory holds no frames.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Read one frame file.
    ///
    /// A file whose size does not match the declared geometry is an error.
    pub fn read(&self, path: &Path) -> Result<Frame> {
        let data = std::fs::read(path).map_err(|e| Error::FrameRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let expected = self.width as usize * self.height as usize * CHANNELS;
        if data.len() != expected {
            warn!(
                "Frame {} is {} bytes, expected {}",
                path.display(),
                data.len(),
                expected
            );
        }
        Frame::new(self.width, self.height, data)
    }

    /// Iterate frames lazily, one file read per item.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame>> + '_ {
        self.files.iter().map(|path| self.read(path))
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(FRAME_EXTENSION))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_frame(dir: &Path, name: &str, frame: &Frame) {
        std::fs::write(dir.join(name), frame.data()).unwrap();
    }

    #[test]
    fn test_shared_frame_as_source() {
        let shared = SharedFrame::new();
        let source: &dyn FrameSource = &shared;
        assert!(source.current_frame().is_none());

        shared.publish(Frame::filled(2, 2, [5, 5, 5, 255]));
        assert_eq!(source.current_frame().unwrap().width(), 2);
    }

    #[test]
    fn test_directory_replays_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "0002.rgba", &Frame::filled(2, 2, [2, 2, 2, 255]));
        write_frame(dir.path(), "0001.rgba", &Frame::filled(2, 2, [1, 1, 1, 255]));
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let replay = FrameDirectory::open(dir.path(), 2, 2).unwrap();
        assert_eq!(replay.len(), 2);

        let frames: Vec<Frame> = replay.frames().collect::<Result<_>>().unwrap();
        assert_eq!(frames[0].pixel(0, 0)[0], 1);
        assert_eq!(frames[1].pixel(0, 0)[0], 2);
    }

    #[test]
    fn test_directory_without_frames() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FrameDirectory::open(dir.path(), 2, 2),
            Err(Error::NoFrames { .. })
        ));
    }

    #[test]
    fn test_wrong_sized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0001.rgba"), [0u8; 7]).unwrap();

        let replay = FrameDirectory::open(dir.path(), 2, 2).unwrap();
        assert!(replay.frames().next().unwrap().is_err());
    }
}
