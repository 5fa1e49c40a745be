// SPDX-License-Identifier: GPL-3.0-only

//! Live view event handling
//!
//! The handlers are pure with respect to I/O: they update `ViewerState` and
//! return the outputs the event loop must act on (draw, persist, move the
//! motor). This keeps the whole live pipeline testable without a terminal or
//! a sensor.

use super::keys::KeyAction;
use super::state::ViewerState;
use crate::config::Config;
use crate::depth::{
    DepthFrame, FilteredFrame, GrayscaleImage, GrayscaleMapping, VideoFrame, filter_by_threshold,
    to_grayscale,
};
use std::time::Instant;
use tracing::{debug, info};

/// Input delivered by the event loop
#[derive(Debug, Clone)]
pub enum ViewerEvent {
    Depth(DepthFrame),
    Video(VideoFrame),
    Key(KeyAction),
    /// One second elapsed on the capture ticker
    Tick,
}

/// Work requested from the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerOutput {
    /// Replace the depth view
    ShowDepth(GrayscaleImage),
    /// Replace the color view
    ShowVideo(VideoFrame),
    /// Write this frame to the capture directory
    Persist(FilteredFrame),
    /// Move the motor by this many degrees
    Tilt(i8),
    /// (Re)start the one-second ticker from now
    ArmTicker,
    /// Orientation flipped; display surfaces should resize
    OrientationChanged { rotated: bool },
    Quit,
}

/// Callbacks driven by a sensor/UI event loop
pub trait ViewerHandler {
    fn on_depth_frame(&mut self, frame: DepthFrame, now: Instant) -> Vec<ViewerOutput>;
    fn on_video_frame(&mut self, frame: VideoFrame) -> Vec<ViewerOutput>;
    fn on_key(&mut self, action: KeyAction, now: Instant) -> Vec<ViewerOutput>;
    fn on_tick(&mut self, now: Instant) -> Vec<ViewerOutput>;

    fn handle(&mut self, event: ViewerEvent, now: Instant) -> Vec<ViewerOutput> {
        match event {
            ViewerEvent::Depth(frame) => self.on_depth_frame(frame, now),
            ViewerEvent::Video(frame) => self.on_video_frame(frame),
            ViewerEvent::Key(action) => self.on_key(action, now),
            ViewerEvent::Tick => self.on_tick(now),
        }
    }
}

/// Live depth + video viewer with threshold, orientation and capture control
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    state: ViewerState,
}

impl Viewer {
    pub fn new(config: &Config, mapping: GrayscaleMapping) -> Self {
        Self {
            state: ViewerState::new(config, mapping),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn status_line(&self) -> String {
        self.state.status_line()
    }

    pub fn needs_ticks(&self) -> bool {
        self.state.capture.needs_ticks()
    }

    /// Record the tilt angle the sensor actually reached
    pub fn set_tilt_degrees(&mut self, degrees: i8) {
        self.state.tilt_degrees = Some(degrees);
    }

    /// Threshold (and optionally decimate) a frame in the current orientation
    pub fn process_depth(&self, frame: &DepthFrame) -> FilteredFrame {
        filter_by_threshold(frame, self.state.threshold, self.state.decimation)
    }
}

impl ViewerHandler for Viewer {
    fn on_depth_frame(&mut self, frame: DepthFrame, now: Instant) -> Vec<ViewerOutput> {
        // The rotated copy only exists while portrait mode is on
        let frame = if self.state.rotated {
            frame.rotated()
        } else {
            frame
        };

        let filtered = self.process_depth(&frame);
        let image = to_grayscale(&filtered, self.state.mapping);

        let mut outputs = Vec::with_capacity(2);
        if self.state.capture.is_recording() {
            outputs.push(ViewerOutput::Persist(filtered));
            self.state.capture.frame_recorded(now);
        }
        outputs.push(ViewerOutput::ShowDepth(image));
        outputs
    }

    fn on_video_frame(&mut self, frame: VideoFrame) -> Vec<ViewerOutput> {
        let frame = if self.state.rotated {
            frame.rotated()
        } else {
            frame
        };
        vec![ViewerOutput::ShowVideo(frame)]
    }

    fn on_key(&mut self, action: KeyAction, _now: Instant) -> Vec<ViewerOutput> {
        match action {
            KeyAction::ToggleOrientation => {
                self.state.rotated = !self.state.rotated;
                info!(rotated = self.state.rotated, "Orientation toggled");
                vec![ViewerOutput::OrientationChanged {
                    rotated: self.state.rotated,
                }]
            }
            KeyAction::TakeShot => {
                self.state.capture.take_shot();
                vec![ViewerOutput::ArmTicker]
            }
            KeyAction::ThresholdUp => {
                let end = self
                    .state
                    .threshold
                    .adjust_end(i32::from(self.state.threshold_step));
                debug!(end, "Threshold raised");
                Vec::new()
            }
            KeyAction::ThresholdDown => {
                let end = self
                    .state
                    .threshold
                    .adjust_end(-i32::from(self.state.threshold_step));
                debug!(end, "Threshold lowered");
                Vec::new()
            }
            KeyAction::TiltUp => vec![ViewerOutput::Tilt(self.state.tilt_step)],
            KeyAction::TiltDown => vec![ViewerOutput::Tilt(self.state.tilt_step.saturating_neg())],
            KeyAction::Quit => vec![ViewerOutput::Quit],
        }
    }

    fn on_tick(&mut self, now: Instant) -> Vec<ViewerOutput> {
        self.state.capture.tick(now);
        Vec::new()
    }
}
