// SPDX-License-Identifier: GPL-3.0-only

//! Raw depth file storage
//!
//! Reading single frames back, recording captured frames into a directory,
//! and preparing that directory.

use crate::constants::capture::FILE_PREFIX;
use crate::depth::raw_format::frame_byte_len;
use crate::depth::{DepthFrame, FilteredFrame, deserialize_frame, serialize_frame};
use crate::errors::{AppError, AppResult, FrameError};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read one raw frame of a known resolution
///
/// A file shorter than a full frame is reported as `FrameError::ShortRead`
/// rather than padded. Bytes past the first frame are ignored.
pub fn read_depth_file(path: &Path, width: u32, height: u32) -> AppResult<DepthFrame> {
    if width == 0 || height == 0 {
        return Err(FrameError::ZeroDimension.into());
    }
    let expected = frame_byte_len(width, height);
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::Storage(format!("{}: {}", path.display(), e)))?;

    // One extra byte tells us whether the file is longer than a frame
    let mut bytes = Vec::with_capacity(expected + 1);
    file.take(expected as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| AppError::Storage(format!("{}: {}", path.display(), e)))?;

    if bytes.len() < expected {
        return Err(FrameError::ShortRead {
            expected,
            actual: bytes.len(),
        }
        .into());
    }
    if bytes.len() > expected {
        debug!(path = %path.display(), expected, "Ignoring trailing bytes after frame");
        bytes.truncate(expected);
    }

    Ok(deserialize_frame(&bytes, width, height)?)
}

/// Create the capture directory (and parents) if needed
pub fn ensure_capture_directory(dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::Storage(format!("cannot create {}: {}", dir.display(), e)))?;
    if !dir.is_dir() {
        return Err(AppError::Storage(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

/// Writes filtered frames as `depth-data-<microseconds>` files
///
/// Timestamps are strictly increasing per recorder, so two frames captured
/// within the same microsecond still get distinct names.
#[derive(Debug)]
pub struct FrameRecorder {
    directory: PathBuf,
    last_timestamp: i64,
    frames_written: u64,
}

impl FrameRecorder {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            last_timestamp: i64::MIN,
            frames_written: 0,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Path for the next frame captured at `timestamp_micros`
    pub fn next_path(&mut self, timestamp_micros: i64) -> PathBuf {
        let timestamp = timestamp_micros.max(self.last_timestamp.saturating_add(1));
        self.last_timestamp = timestamp;
        self.directory.join(format!("{}{}", FILE_PREFIX, timestamp))
    }

    /// Persist one frame, returning the file written
    pub fn record(&mut self, frame: &FilteredFrame) -> AppResult<PathBuf> {
        let path = self.next_path(chrono::Utc::now().timestamp_micros());
        std::fs::write(&path, serialize_frame(frame.samples()))
            .map_err(|e| AppError::Storage(format!("{}: {}", path.display(), e)))?;
        self.frames_written += 1;
        info!(
            path = %path.display(),
            width = frame.width(),
            height = frame.height(),
            "Created depth file"
        );
        Ok(path)
    }
}

/// Raw depth files in a directory, sorted by name
///
/// Recorded files sort chronologically because of their timestamp names.
pub fn list_depth_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| AppError::Storage(format!("{}: {}", dir.display(), e)))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_path_is_strictly_increasing() {
        let mut recorder = FrameRecorder::new("/captures");
        let first = recorder.next_path(1_000);
        let second = recorder.next_path(1_000);
        let third = recorder.next_path(999);
        assert_eq!(first, PathBuf::from("/captures/depth-data-1000"));
        assert_eq!(second, PathBuf::from("/captures/depth-data-1001"));
        assert_eq!(third, PathBuf::from("/captures/depth-data-1002"));
    }

    #[test]
    fn test_zero_dimension_is_rejected_before_io() {
        let err = read_depth_file(Path::new("/nonexistent"), 0, 480).unwrap_err();
        assert_eq!(err, AppError::Frame(FrameError::ZeroDimension));
    }
}
