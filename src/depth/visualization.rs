// SPDX-License-Identifier: GPL-3.0-only

//! Grayscale rendering of filtered depth samples
//!
//! Two strategies are available:
//! - Binary: any kept sample is painted black on a white canvas (live view)
//! - Ramp: depth mapped linearly to intensity (static file view)

use super::threshold::FilteredFrame;
use crate::constants::visualization::{BACKGROUND, DEFAULT_RAMP_MAX_DEPTH, FOREGROUND};
use std::str::FromStr;

/// RGB channels per grayscale pixel
pub const GRAYSCALE_CHANNELS: u32 = 3;

/// How a depth sample becomes a pixel intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayscaleMapping {
    /// Non-zero samples paint black
    Binary,
    /// Intensity `round(sample * 256 / max_depth)`, saturated at 255
    Ramp { max_depth: u16 },
}

impl GrayscaleMapping {
    pub const ALL: [&'static str; 2] = ["binary", "ramp"];

    pub fn ramp() -> Self {
        GrayscaleMapping::Ramp {
            max_depth: DEFAULT_RAMP_MAX_DEPTH,
        }
    }

    /// Intensity painted for a non-zero sample
    #[inline]
    pub fn intensity(&self, sample: u16) -> u8 {
        match *self {
            GrayscaleMapping::Binary => FOREGROUND,
            GrayscaleMapping::Ramp { max_depth } => {
                let scaled = (f64::from(sample) * 256.0 / f64::from(max_depth.max(1))).round();
                scaled.min(255.0) as u8
            }
        }
    }
}

impl FromStr for GrayscaleMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(GrayscaleMapping::Binary),
            "ramp" => Ok(GrayscaleMapping::ramp()),
            other => Err(format!(
                "unknown mapping '{}', expected one of: {}",
                other,
                Self::ALL.join(", ")
            )),
        }
    }
}

/// Grayscale image stored as RGB triplets (R = G = B)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayscaleImage {
    /// White canvas
    pub fn blank(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * GRAYSCALE_CHANNELS as usize;
        Self {
            width,
            height,
            data: vec![BACKGROUND; size],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.width * GRAYSCALE_CHANNELS
    }

    pub fn channels(&self) -> u32 {
        GRAYSCALE_CHANNELS
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB triplet at column `x`, row `y`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    #[inline]
    fn set(&mut self, index: usize, value: u8) {
        self.data[index * 3..index * 3 + 3].fill(value);
    }

    /// Convert into an `image` buffer for encoding to PNG/JPEG
    pub fn into_rgb_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data)
    }
}

/// Paint filtered samples onto a white canvas at the source resolution
///
/// A sample at decimated position `(i, j)` lands on pixel `(i * d, j * d)`.
/// Zero samples ("no data") leave the background untouched.
pub fn to_grayscale(filtered: &FilteredFrame, mapping: GrayscaleMapping) -> GrayscaleImage {
    let mut image = GrayscaleImage::blank(filtered.source_width(), filtered.source_height());
    let d = filtered.decimation().get() as usize;
    let reduced_width = filtered.width() as usize;
    let full_width = filtered.source_width() as usize;

    for (n, &sample) in filtered.samples().iter().enumerate() {
        if sample == 0 {
            continue;
        }
        let (i, j) = (n % reduced_width, n / reduced_width);
        image.set(j * d * full_width + i * d, mapping.intensity(sample));
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::{DepthFrame, ThresholdRange, filter_by_threshold};
    use std::num::NonZeroU32;

    #[test]
    fn test_ramp_intensity() {
        let ramp = GrayscaleMapping::ramp();
        assert_eq!(ramp.intensity(1500), 128);
        assert_eq!(ramp.intensity(3000), 255);
        assert_eq!(ramp.intensity(8000), 255);
    }

    #[test]
    fn test_binary_projects_decimated_samples() {
        let mut samples = vec![0u16; 16];
        samples[2 * 4 + 2] = 700;
        let frame = DepthFrame::new(4, 4, samples).unwrap();
        let filtered = filter_by_threshold(
            &frame,
            ThresholdRange::default(),
            NonZeroU32::new(2).unwrap(),
        );
        let image = to_grayscale(&filtered, GrayscaleMapping::Binary);
        assert_eq!((image.width(), image.height()), (4, 4));
        assert_eq!(image.pixel(2, 2), Some([0, 0, 0]));
        assert_eq!(image.pixel(3, 3), Some([255, 255, 255]));
    }

    #[test]
    fn test_mapping_from_str() {
        assert_eq!(
            "Binary".parse::<GrayscaleMapping>(),
            Ok(GrayscaleMapping::Binary)
        );
        assert_eq!("ramp".parse(), Ok(GrayscaleMapping::ramp()));
        assert!("sepia".parse::<GrayscaleMapping>().is_err());
    }
}
