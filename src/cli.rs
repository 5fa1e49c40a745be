// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Viewing a raw depth file in the terminal
//! - Live capture with countdown recording
//! - Exporting a raw depth file to an image
//! - Printing depth file statistics

use clap::Args;
use depthshot::Config;
use depthshot::app::{CaptureSession, Viewer};
use depthshot::backends::{self, DepthSource, ReplaySource};
use depthshot::depth::{
    DepthFrame, FilteredFrame, GrayscaleImage, GrayscaleMapping, filter_by_threshold, to_grayscale,
};
use depthshot::display::{Panels, RgbBuffer};
use depthshot::storage::{self, FrameRecorder};
use depthshot::terminal;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Frame dimensions of a raw depth file (the format carries none)
#[derive(Args, Debug, Clone, Copy)]
pub struct FrameSize {
    /// Frame width in samples (default from config, 640)
    #[arg(long)]
    pub width: Option<u32>,

    /// Frame height in samples (default from config, 480)
    #[arg(long)]
    pub height: Option<u32>,
}

impl FrameSize {
    pub fn resolve(&self, config: &Config) -> (u32, u32) {
        (
            self.width.unwrap_or(config.frame_width),
            self.height.unwrap_or(config.frame_height),
        )
    }
}

/// Parse a `--mapping` value, using the configured ramp range
fn parse_mapping(name: &str, config: &Config) -> Result<GrayscaleMapping, String> {
    match name.parse::<GrayscaleMapping>()? {
        GrayscaleMapping::Ramp { .. } => Ok(config.ramp_mapping()),
        binary => Ok(binary),
    }
}

/// Flip a shared flag on Ctrl+C so the event loops can exit cleanly
fn install_stop_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_clone = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_clone.store(true, Ordering::SeqCst);
    })?;
    Ok(stop_flag)
}

/// Grayscale rendering of a stored frame
///
/// Binary output only makes sense after thresholding, so the configured
/// window and decimation are applied first; the ramp shows every sample.
fn render(frame: DepthFrame, mapping: GrayscaleMapping, config: &Config) -> GrayscaleImage {
    let filtered = match mapping {
        GrayscaleMapping::Binary => {
            filter_by_threshold(&frame, config.threshold_range(), config.decimation())
        }
        GrayscaleMapping::Ramp { .. } => FilteredFrame::unfiltered(frame),
    };
    to_grayscale(&filtered, mapping)
}

/// Show a raw depth file until the user quits
pub fn view_file(path: &Path, (width, height): (u32, u32), config: &Config) -> CliResult {
    let frame = storage::read_depth_file(path, width, height)?;
    let image = render(frame, config.ramp_mapping(), config);
    let buffer = RgbBuffer::from_upload(
        image.data(),
        image.width(),
        image.height(),
        image.stride(),
        image.channels(),
    )?;

    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let stop_flag = install_stop_handler()?;
    terminal::run_file_viewer(&title, &buffer, stop_flag)
}

/// Live capture into `dir`
pub fn capture(
    dir: &Path,
    replay: Option<&Path>,
    device: usize,
    mapping: &str,
    config: &Config,
) -> CliResult {
    // Nothing is opened before the output location is known to be usable
    storage::ensure_capture_directory(dir)?;
    let mapping = parse_mapping(mapping, config)?;

    let source: Box<dyn DepthSource> = match replay {
        Some(src) => Box::new(ReplaySource::open(
            src,
            config.frame_width,
            config.frame_height,
            config.replay_frame_interval(),
        )?),
        None => backends::open_sensor(device)?,
    };

    let session = CaptureSession::new(
        source,
        Viewer::new(config, mapping),
        FrameRecorder::new(dir),
        Panels::default(),
    );

    let stop_flag = install_stop_handler()?;
    terminal::run_capture(session, stop_flag)
}

/// Render a raw depth file to any image format `image` can write
pub fn export_image(
    path: &Path,
    output: &Path,
    mapping: &str,
    (width, height): (u32, u32),
    config: &Config,
) -> CliResult {
    let mapping = parse_mapping(mapping, config)?;
    let frame = storage::read_depth_file(path, width, height)?;
    let image = render(frame, mapping, config)
        .into_rgb_image()
        .ok_or("Failed to create image buffer")?;

    image.save(output)?;
    info!(output = %output.display(), "Exported depth image");
    println!("Saved: {}", output.display());
    Ok(())
}

/// Summary of a depth frame's non-zero samples
#[derive(Debug, Clone, PartialEq)]
struct DepthStats {
    valid: usize,
    min: u16,
    max: u16,
    mean: f64,
}

fn depth_stats(frame: &DepthFrame) -> Option<DepthStats> {
    let mut valid = 0usize;
    let mut sum = 0u64;
    let mut min = u16::MAX;
    let mut max = 0u16;
    for &sample in frame.samples().iter().filter(|&&s| s != 0) {
        valid += 1;
        sum += u64::from(sample);
        min = min.min(sample);
        max = max.max(sample);
    }
    (valid > 0).then(|| DepthStats {
        valid,
        min,
        max,
        mean: sum as f64 / valid as f64,
    })
}

/// Print resolution and depth statistics of a raw depth file
pub fn print_info(path: &Path, (width, height): (u32, u32)) -> CliResult {
    let frame = storage::read_depth_file(path, width, height)?;
    let total = frame.samples().len();

    println!("File: {}", path.display());
    println!("Resolution: {}x{}", frame.width(), frame.height());
    match depth_stats(&frame) {
        Some(stats) => {
            println!(
                "Valid samples: {} of {} ({:.1}%)",
                stats.valid,
                total,
                stats.valid as f64 * 100.0 / total as f64
            );
            println!("Depth range: {} - {}", stats.min, stats.max);
            println!("Mean depth: {:.1}", stats.mean);
        }
        None => println!("Valid samples: 0 of {}", total),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_stats_ignores_zero_samples() {
        let frame = DepthFrame::new(2, 2, vec![0, 1000, 3000, 0]).unwrap();
        let stats = depth_stats(&frame).unwrap();
        assert_eq!(stats.valid, 2);
        assert_eq!((stats.min, stats.max), (1000, 3000));
        assert!((stats.mean - 2000.0).abs() < f64::EPSILON);

        let empty = DepthFrame::new(1, 1, vec![0]).unwrap();
        assert!(depth_stats(&empty).is_none());
    }

    #[test]
    fn test_ramp_mapping_uses_config_range() {
        let config = Config {
            ramp_max_depth: 1000,
            ..Config::default()
        };
        assert_eq!(
            parse_mapping("ramp", &config),
            Ok(GrayscaleMapping::Ramp { max_depth: 1000 })
        );
        assert_eq!(parse_mapping("binary", &config), Ok(GrayscaleMapping::Binary));
        assert!(parse_mapping("sepia", &config).is_err());
    }

    #[test]
    fn test_binary_render_applies_threshold() {
        let config = Config::default();
        // 100 is below the default window and stays white
        let frame = DepthFrame::new(2, 1, vec![100, 1000]).unwrap();
        let image = render(frame, GrayscaleMapping::Binary, &config);
        assert_eq!(image.pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(image.pixel(1, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_frame_size_falls_back_to_config() {
        let size = FrameSize {
            width: Some(320),
            height: None,
        };
        assert_eq!(size.resolve(&Config::default()), (320, 480));
    }
}
