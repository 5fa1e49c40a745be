// SPDX-License-Identifier: GPL-3.0-only

//! Live capture session
//!
//! Glue between a `DepthSource`, the `Viewer` and a `DisplaySurface`: polls
//! the source, drives the one-second ticker, and carries out the viewer's
//! outputs (uploads, file writes, motor moves). Failures are logged and the
//! session continues; only `Quit` ends it.

use super::keys::KeyAction;
use super::viewer::{Viewer, ViewerEvent, ViewerHandler, ViewerOutput};
use crate::backends::DepthSource;
use crate::backends::motor_control::apply_tilt;
use crate::constants::capture::TICK_INTERVAL;
use crate::display::{DisplaySurface, SurfaceTarget};
use crate::storage::FrameRecorder;
use std::ops::ControlFlow;
use std::time::Instant;
use tracing::{error, info, warn};

pub struct CaptureSession<S: DisplaySurface> {
    source: Box<dyn DepthSource>,
    viewer: Viewer,
    recorder: FrameRecorder,
    surface: S,
    next_tick: Option<Instant>,
}

impl<S: DisplaySurface> CaptureSession<S> {
    pub fn new(
        mut source: Box<dyn DepthSource>,
        mut viewer: Viewer,
        recorder: FrameRecorder,
        surface: S,
    ) -> Self {
        // Level the sensor like a fresh start of the device
        match source.set_tilt(0).and_then(|_| source.tilt()) {
            Ok(tilt) => viewer.set_tilt_degrees(tilt),
            Err(e) => warn!(source = source.name(), error = %e, "Tilt unavailable"),
        }
        info!(
            source = source.name(),
            dir = %recorder.directory().display(),
            "Capture session started"
        );
        Self {
            source,
            viewer,
            recorder,
            surface,
            next_tick: None,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn recorder(&self) -> &FrameRecorder {
        &self.recorder
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Deliver pending frames and a due tick
    pub fn step(&mut self, now: Instant) -> ControlFlow<()> {
        let mut events = Vec::with_capacity(3);
        if let Some(frame) = self.source.poll_depth() {
            events.push(ViewerEvent::Depth(frame));
        }
        if let Some(frame) = self.source.poll_video() {
            events.push(ViewerEvent::Video(frame));
        }

        if !self.viewer.needs_ticks() {
            self.next_tick = None;
        } else if let Some(due) = self.next_tick
            && now >= due
        {
            events.push(ViewerEvent::Tick);
            self.next_tick = Some(due + TICK_INTERVAL);
        }

        for event in events {
            let outputs = self.viewer.handle(event, now);
            if self.apply(outputs, now).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Handle a key press
    pub fn key(&mut self, action: KeyAction, now: Instant) -> ControlFlow<()> {
        let outputs = self.viewer.handle(ViewerEvent::Key(action), now);
        self.apply(outputs, now)
    }

    fn apply(&mut self, outputs: Vec<ViewerOutput>, now: Instant) -> ControlFlow<()> {
        for output in outputs {
            match output {
                ViewerOutput::ShowDepth(image) => {
                    if let Err(e) = self.surface.upload(
                        SurfaceTarget::Depth,
                        image.data(),
                        image.width(),
                        image.height(),
                        image.stride(),
                        image.channels(),
                    ) {
                        warn!(error = %e, "Dropping depth frame");
                    }
                }
                ViewerOutput::ShowVideo(frame) => {
                    if let Err(e) = self.surface.upload(
                        SurfaceTarget::Video,
                        frame.data(),
                        frame.width(),
                        frame.height(),
                        frame.stride(),
                        crate::depth::frame::VIDEO_CHANNELS,
                    ) {
                        warn!(error = %e, "Dropping video frame");
                    }
                }
                ViewerOutput::Persist(filtered) => {
                    if let Err(e) = self.recorder.record(&filtered) {
                        error!(error = %e, "Failed to write depth file");
                    }
                }
                ViewerOutput::Tilt(delta) => match apply_tilt(&mut *self.source, delta) {
                    Ok(tilt) => self.viewer.set_tilt_degrees(tilt),
                    Err(e) => warn!(error = %e, "Failed to tilt sensor"),
                },
                ViewerOutput::ArmTicker => self.next_tick = Some(now + TICK_INTERVAL),
                ViewerOutput::OrientationChanged { .. } => self.surface.clear(),
                ViewerOutput::Quit => return ControlFlow::Break(()),
            }
        }
        ControlFlow::Continue(())
    }
}
