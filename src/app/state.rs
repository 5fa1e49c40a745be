// SPDX-License-Identifier: GPL-3.0-only

//! Mutable live view state
//!
//! Written only by key and tick handlers, read by the next frame.

use super::capture_timer::{CaptureState, CaptureTimer};
use crate::config::Config;
use crate::depth::{GrayscaleMapping, ThresholdRange};
use std::num::NonZeroU32;

#[derive(Debug, Clone)]
pub struct ViewerState {
    /// Valid depth window; samples outside are drawn as background
    pub threshold: ThresholdRange,
    /// Portrait orientation (frames rotated by 90 degrees)
    pub rotated: bool,
    /// Countdown and recording progress
    pub capture: CaptureTimer,
    /// Last tilt angle reported by the sensor
    pub tilt_degrees: Option<i8>,
    /// Pixel decimation stride
    pub decimation: NonZeroU32,
    /// Strategy used to draw the depth view
    pub mapping: GrayscaleMapping,
    /// Threshold change per key press
    pub threshold_step: u16,
    /// Tilt change per key press
    pub tilt_step: i8,
}

impl ViewerState {
    pub fn new(config: &Config, mapping: GrayscaleMapping) -> Self {
        Self {
            threshold: config.threshold_range(),
            rotated: false,
            capture: CaptureTimer::new(config.countdown_seconds, config.record_duration()),
            tilt_degrees: None,
            decimation: config.decimation(),
            mapping,
            threshold_step: config.threshold_step,
            tilt_step: config.tilt_step_degrees,
        }
    }

    /// Status text for the info line
    pub fn status_line(&self) -> String {
        let mut status = format!("Threshold: {}", self.threshold.end());

        match self.capture.state() {
            CaptureState::Idle => {}
            CaptureState::CountingDown(seconds) => {
                status.push_str(&format!(" | Taking video in: {} seconds", seconds));
            }
            CaptureState::Recording { .. } => status.push_str(" | SAVING DEPTH FILES"),
        }

        if let Some(tilt) = self.tilt_degrees {
            status.push_str(&format!(" | Tilt: {}°", tilt));
        }
        status.push_str(if self.rotated {
            " | Portrait"
        } else {
            " | Landscape"
        });
        status
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(&Config::default(), GrayscaleMapping::Binary)
    }
}
