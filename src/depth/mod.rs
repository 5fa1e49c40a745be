// SPDX-License-Identifier: GPL-3.0-only

//! Depth visualization pipeline
//!
//! Converts raw sensor depth samples into a displayable grayscale buffer:
//!
//! ```text
//! DepthFrame ─► [rotate90] ─► filter_by_threshold ─► to_grayscale ─► display
//!                                     │
//!                                     └─► serialize_frame ─► raw file
//! ```
//!
//! Every stage returns a freshly owned buffer, so no intermediate needs to be
//! released by the caller.

pub mod frame;
pub mod raw_format;
pub mod rotation;
pub mod threshold;
pub mod visualization;

pub use frame::{DepthFrame, VideoFrame};
pub use raw_format::{deserialize_frame, serialize_frame};
pub use rotation::rotate90;
pub use threshold::{FilteredFrame, ThresholdRange, filter_by_threshold};
pub use visualization::{GrayscaleImage, GrayscaleMapping, to_grayscale};
