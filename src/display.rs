// SPDX-License-Identifier: GPL-3.0-only

//! Display surfaces
//!
//! A surface accepts raw pixel buffers described by width, height, stride and
//! channel count. `Panels` keeps a CPU copy of the latest depth and video
//! upload for the terminal renderer to sample from.

use crate::errors::{AppError, AppResult};

/// Which view an upload replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTarget {
    Depth,
    Video,
}

pub trait DisplaySurface {
    /// Replace the image shown for `target`
    ///
    /// `stride` is the number of bytes per row; `channels` is 1 (gray),
    /// 3 (RGB) or 4 (RGBA).
    fn upload(
        &mut self,
        target: SurfaceTarget,
        data: &[u8],
        width: u32,
        height: u32,
        stride: u32,
        channels: u32,
    ) -> AppResult<()>;

    /// Drop whatever is currently shown
    fn clear(&mut self);
}

/// Owned copy of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub channels: u32,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Validate an upload and copy it
    pub fn from_upload(
        data: &[u8],
        width: u32,
        height: u32,
        stride: u32,
        channels: u32,
    ) -> AppResult<Self> {
        if width == 0 || height == 0 {
            return Err(AppError::Display("empty image".into()));
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(AppError::Display(format!(
                "unsupported channel count {}",
                channels
            )));
        }
        let row_bytes = width as usize * channels as usize;
        if (stride as usize) < row_bytes {
            return Err(AppError::Display(format!(
                "stride {} shorter than row of {} bytes",
                stride, row_bytes
            )));
        }
        let needed = stride as usize * (height as usize - 1) + row_bytes;
        if data.len() < needed {
            return Err(AppError::Display(format!(
                "buffer holds {} bytes, {}x{} image needs {}",
                data.len(),
                width,
                height,
                needed
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            channels,
            data: data[..needed].to_vec(),
        })
    }

    /// RGB at `(x, y)`; coordinates past the edge are clamped
    pub fn sample(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = y * self.stride as usize + x * self.channels as usize;
        match self.channels {
            1 => {
                let v = self.data[idx];
                (v, v, v)
            }
            _ => (self.data[idx], self.data[idx + 1], self.data[idx + 2]),
        }
    }
}

/// Latest depth and video images
#[derive(Debug, Clone, Default)]
pub struct Panels {
    pub depth: Option<RgbBuffer>,
    pub video: Option<RgbBuffer>,
}

impl DisplaySurface for Panels {
    fn upload(
        &mut self,
        target: SurfaceTarget,
        data: &[u8],
        width: u32,
        height: u32,
        stride: u32,
        channels: u32,
    ) -> AppResult<()> {
        let buffer = RgbBuffer::from_upload(data, width, height, stride, channels)?;
        match target {
            SurfaceTarget::Depth => self.depth = Some(buffer),
            SurfaceTarget::Video => self.video = Some(buffer),
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.depth = None;
        self.video = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_rejects_short_buffer() {
        let mut panels = Panels::default();
        let result = panels.upload(SurfaceTarget::Depth, &[0; 11], 2, 2, 6, 3);
        assert!(matches!(result, Err(AppError::Display(_))));
        assert!(panels.depth.is_none());
    }

    #[test]
    fn test_sample_respects_stride_and_clamps() {
        // 2x2 RGB with one padding byte per row
        let data = [1, 1, 1, 2, 2, 2, 0, 3, 3, 3, 4, 4, 4, 0];
        let buffer = RgbBuffer::from_upload(&data, 2, 2, 7, 3).unwrap();
        assert_eq!(buffer.sample(1, 0), (2, 2, 2));
        assert_eq!(buffer.sample(0, 1), (3, 3, 3));
        assert_eq!(buffer.sample(9, 9), (4, 4, 4));
    }

    #[test]
    fn test_gray_upload() {
        let buffer = RgbBuffer::from_upload(&[10, 20], 2, 1, 2, 1).unwrap();
        assert_eq!(buffer.sample(1, 0), (20, 20, 20));
    }
}
