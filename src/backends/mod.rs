// SPDX-License-Identifier: GPL-3.0-only

//! Depth sensor backends
//!
//! ```text
//! ┌─────────────────────┐
//! │  Event loop (TUI)   │
//! └──────────┬──────────┘
//!            │ poll_depth / poll_video / set_tilt
//!            ▼
//! ┌─────────────────────┐
//! │  DepthSource trait  │
//! └──────────┬──────────┘
//!       ┌────┴─────┐
//!       ▼          ▼
//!   ┌──────┐   ┌────────┐
//!   │Replay│   │ Kinect │  (freedepth feature)
//!   └──────┘   └────────┘
//! ```
//!
//! Sources are polled from the single-threaded event loop; `poll_*` never
//! blocks.

pub mod motor_control;
pub mod replay;

#[cfg(all(target_arch = "x86_64", feature = "freedepth"))]
pub mod kinect;

pub use motor_control::next_tilt;
pub use replay::ReplaySource;

use crate::depth::{DepthFrame, VideoFrame};
use crate::errors::AppResult;

/// A device (or stand-in) that delivers depth and color frames
pub trait DepthSource {
    /// Human readable name for logs and the status bar
    fn name(&self) -> &str;

    /// Next depth frame if one is ready
    fn poll_depth(&mut self) -> Option<DepthFrame>;

    /// Next color frame if one is ready
    fn poll_video(&mut self) -> Option<VideoFrame>;

    /// Current motor tilt in degrees
    fn tilt(&self) -> AppResult<i8>;

    /// Move the motor to an absolute tilt in degrees
    fn set_tilt(&mut self, degrees: i8) -> AppResult<()>;
}

/// Open the first connected Kinect, if built with freedepth support
#[cfg(all(target_arch = "x86_64", feature = "freedepth"))]
pub fn open_sensor(device_index: usize) -> AppResult<Box<dyn DepthSource>> {
    Ok(Box::new(kinect::KinectSource::open(device_index)?))
}

#[cfg(not(all(target_arch = "x86_64", feature = "freedepth")))]
pub fn open_sensor(_device_index: usize) -> AppResult<Box<dyn DepthSource>> {
    Err(crate::errors::AppError::Sensor(
        "no depth sensor backend compiled in (enable the `freedepth` feature or use --replay)"
            .to_string(),
    ))
}
