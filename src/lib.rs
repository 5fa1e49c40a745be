// SPDX-License-Identifier: GPL-3.0-only

//! depthshot - depth camera viewer and recorder
//!
//! This library provides the depth visualization pipeline (thresholding,
//! decimation, grayscale mapping, rotation, raw file format) together with
//! the live viewer state machine used by the `depthshot` binary.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`depth`]: Frame types and the visualization pipeline
//! - [`app`]: Viewer state, capture countdown and event handling
//! - [`backends`]: Depth sensor abstraction (replay, Kinect)
//! - [`storage`]: Raw depth file reading and recording
//! - [`display`]: Display surface abstraction
//! - [`terminal`]: Terminal renderer and event loops
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```
//! use depthshot::depth::{DepthFrame, GrayscaleMapping, ThresholdRange};
//! use depthshot::depth::{filter_by_threshold, to_grayscale};
//! use std::num::NonZeroU32;
//!
//! let frame = DepthFrame::new(2, 1, vec![100, 1000]).unwrap();
//! let filtered = filter_by_threshold(&frame, ThresholdRange::default(), NonZeroU32::MIN);
//! assert_eq!(filtered.samples(), &[0, 1000]);
//!
//! let image = to_grayscale(&filtered, GrayscaleMapping::Binary);
//! assert_eq!(image.pixel(1, 0), Some([0, 0, 0]));
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod depth;
pub mod display;
pub mod errors;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{CaptureState, ViewerHandler, ViewerState};
pub use config::Config;
pub use depth::{DepthFrame, GrayscaleMapping, ThresholdRange};
pub use errors::{AppError, AppResult, FrameError};
