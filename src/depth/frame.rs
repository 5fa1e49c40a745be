// SPDX-License-Identifier: GPL-3.0-only

//! Frame containers for depth and color data

use super::rotation::rotate90;
use crate::errors::FrameError;

/// Bytes per pixel of a color video frame
pub const VIDEO_CHANNELS: u32 = 3;

/// Row-major depth samples in millimeters (0 = no data)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthFrame {
    width: u32,
    height: u32,
    samples: Vec<u16>,
}

impl DepthFrame {
    /// Wrap a sample buffer, checking it matches the resolution
    pub fn new(width: u32, height: u32, samples: Vec<u16>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension);
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(FrameError::DimensionMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }

    /// Sample at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Portrait view of this frame; width and height swap
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            samples: rotate90(&self.samples, self.width, self.height, 1),
        }
    }
}

/// Row-major RGB24 frame from the sensor's color camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl VideoFrame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension);
        }
        let expected = width as usize * height as usize * VIDEO_CHANNELS as usize;
        if data.len() != expected {
            return Err(FrameError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn stride(&self) -> u32 {
        self.width * VIDEO_CHANNELS
    }

    /// Rotated with the same transform as depth frames, keeping both views aligned
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            data: rotate90(&self.data, self.width, self.height, VIDEO_CHANNELS as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_frame_rejects_wrong_length() {
        let err = DepthFrame::new(4, 2, vec![0; 7]).unwrap_err();
        assert_eq!(
            err,
            FrameError::DimensionMismatch {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_depth_frame_rejects_zero_dimension() {
        assert_eq!(
            DepthFrame::new(0, 5, Vec::new()).unwrap_err(),
            FrameError::ZeroDimension
        );
    }

    #[test]
    fn test_get_is_row_major() {
        let frame = DepthFrame::new(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.get(2, 0), Some(3));
        assert_eq!(frame.get(0, 1), Some(4));
        assert_eq!(frame.get(3, 0), None);
    }

    #[test]
    fn test_video_rotation_swaps_dimensions() {
        let frame = VideoFrame::new(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let rotated = frame.rotated();
        assert_eq!((rotated.width(), rotated.height()), (1, 2));
        // Pixels move as whole RGB triplets
        assert_eq!(rotated.data(), &[4, 5, 6, 1, 2, 3]);
    }
}
