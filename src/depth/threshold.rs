// SPDX-License-Identifier: GPL-3.0-only

//! Depth threshold filtering with optional decimation

use super::frame::DepthFrame;
use crate::constants::threshold::{DEFAULT_BEGIN, DEFAULT_END, MAX_END, MIN_SPAN};
use crate::errors::FrameError;
use std::num::NonZeroU32;

/// Inclusive window of depth values treated as valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRange {
    begin: u16,
    end: u16,
}

impl ThresholdRange {
    pub fn new(begin: u16, end: u16) -> Result<Self, FrameError> {
        if begin >= end {
            return Err(FrameError::InvalidThreshold { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> u16 {
        self.begin
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn contains(&self, sample: u16) -> bool {
        (self.begin..=self.end).contains(&sample)
    }

    /// Move the upper bound by `delta`, clamped to `[begin + 300, 8000]`
    ///
    /// A window whose `begin` leaves no room below 8000 is left untouched.
    /// Returns the new upper bound.
    pub fn adjust_end(&mut self, delta: i32) -> u16 {
        let floor = i32::from(self.begin) + i32::from(MIN_SPAN);
        let ceiling = i32::from(MAX_END);
        if floor > ceiling {
            return self.end;
        }
        // floor > begin, so the range stays ordered
        self.end = (i32::from(self.end) + delta).clamp(floor, ceiling) as u16;
        self.end
    }
}

impl Default for ThresholdRange {
    fn default() -> Self {
        Self {
            begin: DEFAULT_BEGIN,
            end: DEFAULT_END,
        }
    }
}

/// Threshold-filtered, possibly decimated, depth samples
///
/// Keeps the source resolution and decimation factor so the samples can be
/// projected back onto a full-resolution canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredFrame {
    samples: Vec<u16>,
    width: u32,
    height: u32,
    source_width: u32,
    source_height: u32,
    decimation: NonZeroU32,
}

impl FilteredFrame {
    /// Pass a frame through untouched (no threshold, no decimation)
    pub fn unfiltered(frame: DepthFrame) -> Self {
        let (width, height) = (frame.width(), frame.height());
        Self {
            samples: frame.into_samples(),
            width,
            height,
            source_width: width,
            source_height: height,
            decimation: NonZeroU32::MIN,
        }
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Decimated width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Decimated height
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn source_width(&self) -> u32 {
        self.source_width
    }

    pub fn source_height(&self) -> u32 {
        self.source_height
    }

    pub fn decimation(&self) -> NonZeroU32 {
        self.decimation
    }

    /// Number of samples that survived the threshold
    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|&&s| s != 0).count()
    }
}

/// Keep samples inside `range`, zero the rest
///
/// Only every `decimation`-th column and row is sampled; the output is
/// `floor(width / d) x floor(height / d)` and any remainder columns or rows
/// of the source are dropped.
pub fn filter_by_threshold(
    frame: &DepthFrame,
    range: ThresholdRange,
    decimation: NonZeroU32,
) -> FilteredFrame {
    let d = decimation.get();
    let width = frame.width() / d;
    let height = frame.height() / d;
    let source = frame.samples();
    let stride = frame.width() as usize;
    let step = d as usize;

    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for j in 0..height as usize {
        let row = j * step * stride;
        for i in 0..width as usize {
            let value = source[row + i * step];
            samples.push(if range.contains(value) { value } else { 0 });
        }
    }

    FilteredFrame {
        samples,
        width,
        height,
        source_width: frame.width(),
        source_height: frame.height(),
        decimation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, samples: Vec<u16>) -> DepthFrame {
        DepthFrame::new(width, height, samples).unwrap()
    }

    #[test]
    fn test_range_requires_begin_below_end() {
        assert!(ThresholdRange::new(500, 500).is_err());
        assert!(ThresholdRange::new(600, 500).is_err());
        assert!(ThresholdRange::new(0, 1).is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = ThresholdRange::new(500, 1000).unwrap();
        let input = frame(4, 1, vec![499, 500, 1000, 1001]);
        let filtered = filter_by_threshold(&input, range, NonZeroU32::MIN);
        assert_eq!(filtered.samples(), &[0, 500, 1000, 0]);
        assert_eq!(filtered.valid_count(), 2);
    }

    #[test]
    fn test_decimation_truncates_remainder() {
        // 5x3 source with stride 2 keeps columns 0,2 and row 0
        let input = frame(5, 3, (1..=15).collect());
        let range = ThresholdRange::new(0, u16::MAX).unwrap();
        let filtered = filter_by_threshold(&input, range, NonZeroU32::new(2).unwrap());
        assert_eq!((filtered.width(), filtered.height()), (2, 1));
        assert_eq!(filtered.samples(), &[1, 3]);
        assert_eq!(filtered.source_width(), 5);
        assert_eq!(filtered.source_height(), 3);
    }

    #[test]
    fn test_adjust_end_clamps() {
        let mut range = ThresholdRange::default();
        assert_eq!(range.adjust_end(100), 8000);
        for _ in 0..200 {
            range.adjust_end(-100);
        }
        assert_eq!(range.end(), 800);
        assert_eq!(range.adjust_end(100), 900);
    }

    #[test]
    fn test_adjust_end_with_high_begin_is_ignored() {
        let mut range = ThresholdRange::new(7900, 8000).unwrap();
        assert_eq!(range.adjust_end(-100), 8000);
        assert_eq!(range.adjust_end(100), 8000);
        assert_eq!(range.begin(), 7900);
    }
}
