// SPDX-License-Identifier: GPL-3.0-only

//! Raw depth dump format
//!
//! A frame is stored as `width * height` little-endian `u16` samples with no
//! header. The resolution is not recorded and must be known by the reader.

use super::frame::DepthFrame;
use crate::errors::FrameError;

/// Bytes per stored sample
pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<u16>();

/// Size in bytes of one stored frame
pub fn frame_byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_SAMPLE
}

/// Encode samples as a raw little-endian dump
pub fn serialize_frame(samples: &[u16]) -> Vec<u8> {
    let little_endian: Vec<u16> = samples.iter().map(|s| s.to_le()).collect();
    bytemuck::cast_slice(&little_endian).to_vec()
}

/// Decode a raw dump of exactly `width * height` samples
pub fn deserialize_frame(bytes: &[u8], width: u32, height: u32) -> Result<DepthFrame, FrameError> {
    let expected = frame_byte_len(width, height);
    if bytes.len() != expected {
        return Err(FrameError::DimensionMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let mut samples: Vec<u16> = bytemuck::pod_collect_to_vec(bytes);
    for sample in &mut samples {
        *sample = u16::from_le(*sample);
    }
    DepthFrame::new(width, height, samples)
}
