// SPDX-License-Identifier: GPL-3.0-only

//! Replay source: a virtual sensor fed from recorded raw depth files
//!
//! Plays every file of a directory in name order (recordings are named by
//! timestamp, so this is capture order) and loops. Useful for trying the live
//! view and the capture workflow without hardware.

use super::DepthSource;
use crate::constants::tilt::{MAX_DEGREES, MIN_DEGREES};
use crate::depth::{DepthFrame, VideoFrame};
use crate::errors::{AppError, AppResult};
use crate::storage::{list_depth_files, read_depth_file};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct ReplaySource {
    name: String,
    frames: Vec<DepthFrame>,
    position: usize,
    frame_interval: Duration,
    next_frame_at: Option<Instant>,
    tilt: i8,
}

impl ReplaySource {
    /// Load every readable frame in `dir`
    ///
    /// Files that cannot be read at the given resolution are skipped with a
    /// warning; a directory without any usable frame is an error.
    pub fn open(dir: &Path, width: u32, height: u32, frame_interval: Duration) -> AppResult<Self> {
        let files = list_depth_files(dir)?;
        let frames = load_frames(&files, width, height);

        if frames.is_empty() {
            return Err(AppError::Sensor(format!(
                "no {}x{} depth frames found in {}",
                width,
                height,
                dir.display()
            )));
        }

        info!(
            dir = %dir.display(),
            frames = frames.len(),
            skipped = files.len() - frames.len(),
            "Replay source ready"
        );

        Ok(Self::from_frames(
            format!("replay:{}", dir.display()),
            frames,
            frame_interval,
        ))
    }

    /// Replay in-memory frames
    pub fn from_frames(name: String, frames: Vec<DepthFrame>, frame_interval: Duration) -> Self {
        Self {
            name,
            frames,
            position: 0,
            frame_interval,
            next_frame_at: None,
            tilt: 0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Next frame regardless of pacing
    fn advance(&mut self) -> Option<DepthFrame> {
        let frame = self.frames.get(self.position)?.clone();
        self.position = (self.position + 1) % self.frames.len();
        Some(frame)
    }
}

fn load_frames(files: &[PathBuf], width: u32, height: u32) -> Vec<DepthFrame> {
    files
        .iter()
        .filter_map(|path| match read_depth_file(path, width, height) {
            Ok(frame) => {
                debug!(path = %path.display(), "Loaded replay frame");
                Some(frame)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable depth file");
                None
            }
        })
        .collect()
}

impl DepthSource for ReplaySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn poll_depth(&mut self) -> Option<DepthFrame> {
        let now = Instant::now();
        if let Some(due) = self.next_frame_at
            && now < due
        {
            return None;
        }
        self.next_frame_at = Some(now + self.frame_interval);
        self.advance()
    }

    fn poll_video(&mut self) -> Option<VideoFrame> {
        // Raw dumps carry depth only
        None
    }

    fn tilt(&self) -> AppResult<i8> {
        Ok(self.tilt)
    }

    fn set_tilt(&mut self, degrees: i8) -> AppResult<()> {
        self.tilt = degrees.clamp(MIN_DEGREES, MAX_DEGREES);
        debug!(tilt = self.tilt, "Simulated tilt");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(value: u16) -> DepthFrame {
        DepthFrame::new(2, 2, vec![value; 4]).unwrap()
    }

    #[test]
    fn test_frames_loop_in_order() {
        let mut source =
            ReplaySource::from_frames("test".into(), vec![frame(1), frame(2)], Duration::ZERO);
        let values: Vec<u16> = (0..5)
            .filter_map(|_| source.poll_depth())
            .map(|f| f.samples()[0])
            .collect();
        assert_eq!(values, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_pacing_holds_back_frames() {
        let mut source =
            ReplaySource::from_frames("test".into(), vec![frame(1)], Duration::from_secs(3600));
        assert!(source.poll_depth().is_some());
        assert!(source.poll_depth().is_none());
    }

    #[test]
    fn test_simulated_tilt_is_clamped() {
        let mut source = ReplaySource::from_frames("test".into(), vec![frame(1)], Duration::ZERO);
        source.set_tilt(40).unwrap();
        assert_eq!(source.tilt().unwrap(), MAX_DEGREES);
    }
}
