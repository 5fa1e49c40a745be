// SPDX-License-Identifier: GPL-3.0-only

//! Kinect source via freedepth
//!
//! Streams Bayer video and 11-bit depth directly over USB (the kernel driver
//! is unbound while streaming and rebound on drop). Raw depth is converted to
//! millimeters with the device calibration, so thresholds are in real units.

use super::DepthSource;
use crate::constants::tilt::{MAX_DEGREES, MIN_DEGREES};
use crate::depth::{DepthFrame, VideoFrame};
use crate::errors::{AppError, AppResult};
use freedepth::{DepthFormat, KinectStreamer, Resolution, VideoFormat};
use std::sync::mpsc::{Receiver, TryRecvError};
use tracing::{debug, info, warn};

pub struct KinectSource {
    name: String,
    streamer: KinectStreamer,
    video_rx: Receiver<freedepth::VideoFrame>,
    depth_rx: Receiver<freedepth::DepthFrame>,
    depth_converter: freedepth::DepthToMm,
}

impl KinectSource {
    pub fn open(device_index: usize) -> AppResult<Self> {
        let devices = freedepth::enumerate_devices()
            .map_err(|e| AppError::Sensor(format!("Failed to enumerate depth cameras: {}", e)))?;
        let device = devices.get(device_index).ok_or_else(|| {
            AppError::Sensor(format!(
                "Depth camera {} not found ({} connected)",
                device_index,
                devices.len()
            ))
        })?;
        let name = device.name.clone();
        info!(device = device_index, name = %name, "Opening depth camera");

        let mut streamer = KinectStreamer::new(device_index)
            .map_err(|e| AppError::Sensor(format!("Failed to create streamer: {}", e)))?;
        let (video_rx, depth_rx) = streamer
            .start(VideoFormat::Bayer, Resolution::Medium, DepthFormat::Depth11Bit)
            .map_err(|e| AppError::Sensor(format!("Failed to start streaming: {}", e)))?;

        let registration = streamer.create_depth_registration();
        let depth_converter = registration.depth_to_mm().clone();

        Ok(Self {
            name,
            streamer,
            video_rx,
            depth_rx,
            depth_converter,
        })
    }

    /// Most recent frame in a channel, dropping any backlog
    fn latest<T>(rx: &Receiver<T>, kind: &str) -> Option<T> {
        let mut latest = None;
        loop {
            match rx.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => return latest,
                Err(TryRecvError::Disconnected) => {
                    debug!(kind, "Frame channel disconnected");
                    return latest;
                }
            }
        }
    }
}

impl DepthSource for KinectSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn poll_depth(&mut self) -> Option<DepthFrame> {
        let frame = Self::latest(&self.depth_rx, "depth")?;
        let raw = frame.as_u16()?;
        let mut depth_mm = vec![0u16; raw.len()];
        self.depth_converter.convert_frame(raw, &mut depth_mm);
        DepthFrame::new(frame.width, frame.height, depth_mm)
            .inspect_err(|e| warn!(error = %e, "Dropping malformed depth frame"))
            .ok()
    }

    fn poll_video(&mut self) -> Option<VideoFrame> {
        let frame = Self::latest(&self.video_rx, "video")?;
        let mut rgb = vec![0u8; frame.width as usize * frame.height as usize * 3];
        freedepth::convert_bayer_to_rgb(&frame.data, &mut rgb, frame.width, frame.height);
        VideoFrame::new(frame.width, frame.height, rgb)
            .inspect_err(|e| warn!(error = %e, "Dropping malformed video frame"))
            .ok()
    }

    fn tilt(&self) -> AppResult<i8> {
        self.streamer
            .get_tilt()
            .map_err(|e| AppError::Sensor(format!("Failed to get tilt: {}", e)))
    }

    fn set_tilt(&mut self, degrees: i8) -> AppResult<()> {
        self.streamer
            .set_tilt(degrees.clamp(MIN_DEGREES, MAX_DEGREES))
            .map_err(|e| AppError::Sensor(format!("Failed to set tilt: {}", e)))
    }
}

impl Drop for KinectSource {
    fn drop(&mut self) {
        info!("Stopping depth camera");
        self.streamer.stop();
        if let Err(e) = self.streamer.rebind_driver() {
            warn!("Failed to rebind kernel driver: {}", e);
        }
    }
}
