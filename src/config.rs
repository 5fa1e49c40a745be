// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON in `$XDG_CONFIG_HOME/depthshot/config.json`. Every field has
//! a default, so partial files are accepted and a missing file simply yields
//! `Config::default()`.

use crate::constants::{self, capture, replay, threshold, tilt, visualization};
use crate::depth::{GrayscaleMapping, ThresholdRange};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width of raw depth files and replayed frames
    pub frame_width: u32,
    /// Height of raw depth files and replayed frames
    pub frame_height: u32,
    /// Lower bound of the live threshold window (millimeters)
    pub threshold_begin: u16,
    /// Initial upper bound of the live threshold window (millimeters)
    pub threshold_end: u16,
    /// Amount the upper bound moves per key press
    pub threshold_step: u16,
    /// Countdown length before recording starts
    pub countdown_seconds: u32,
    /// Recording duration
    pub record_seconds: u64,
    /// Pixel decimation stride for the live view (1 = every pixel)
    pub decimation: u32,
    /// Depth mapped to full intensity by the ramp strategy
    pub ramp_max_depth: u16,
    /// Tilt change per key press
    pub tilt_step_degrees: i8,
    /// Delay between frames when replaying a directory
    pub replay_frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_width: constants::DEFAULT_FRAME_WIDTH,
            frame_height: constants::DEFAULT_FRAME_HEIGHT,
            threshold_begin: threshold::DEFAULT_BEGIN,
            threshold_end: threshold::DEFAULT_END,
            threshold_step: threshold::DEFAULT_STEP,
            countdown_seconds: capture::DEFAULT_COUNTDOWN_SECONDS,
            record_seconds: capture::DEFAULT_RECORD_SECONDS,
            decimation: visualization::DEFAULT_DECIMATION,
            ramp_max_depth: visualization::DEFAULT_RAMP_MAX_DEPTH,
            tilt_step_degrees: tilt::DEFAULT_STEP_DEGREES,
            replay_frame_interval_ms: replay::DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path, or from the default location
    ///
    /// A missing file yields defaults. A file that cannot be parsed is
    /// reported and replaced by defaults rather than aborting startup.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            debug!("No config directory available, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => {
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            Ok(None) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                Self::default()
            }
        }
    }

    /// Read a config file, returning `Ok(None)` when it does not exist
    pub fn load_from(path: &Path) -> AppResult<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let config: Self =
            serde_json::from_str(&text).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Write the config as pretty-printed JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text =
            serde_json::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> AppResult<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(AppError::Config("frame dimensions must be non-zero".into()));
        }
        if self.decimation == 0 {
            return Err(AppError::Config("decimation must be at least 1".into()));
        }
        if self.ramp_max_depth == 0 {
            return Err(AppError::Config("ramp_max_depth must be non-zero".into()));
        }
        ThresholdRange::new(self.threshold_begin, self.threshold_end)?;
        if self.threshold_end > threshold::MAX_END
            || u32::from(self.threshold_begin) + u32::from(threshold::MIN_SPAN)
                > u32::from(threshold::MAX_END)
        {
            return Err(AppError::Config(format!(
                "threshold window must leave {} below {}",
                threshold::MIN_SPAN,
                threshold::MAX_END
            )));
        }
        if !(1..=tilt::MAX_DEGREES).contains(&self.tilt_step_degrees) {
            return Err(AppError::Config(format!(
                "tilt_step_degrees must be between 1 and {}",
                tilt::MAX_DEGREES
            )));
        }
        Ok(())
    }

    /// Initial threshold window, falling back to the built-in one if invalid
    pub fn threshold_range(&self) -> ThresholdRange {
        ThresholdRange::new(self.threshold_begin, self.threshold_end).unwrap_or_default()
    }

    pub fn decimation(&self) -> NonZeroU32 {
        NonZeroU32::new(self.decimation).unwrap_or(NonZeroU32::MIN)
    }

    pub fn ramp_mapping(&self) -> GrayscaleMapping {
        GrayscaleMapping::Ramp {
            max_depth: self.ramp_max_depth.max(1),
        }
    }

    pub fn record_duration(&self) -> Duration {
        Duration::from_secs(self.record_seconds)
    }

    pub fn replay_frame_interval(&self) -> Duration {
        Duration::from_millis(self.replay_frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "threshold_end": 4000 }"#).unwrap();
        assert_eq!(config.threshold_end, 4000);
        assert_eq!(config.threshold_begin, threshold::DEFAULT_BEGIN);
        assert_eq!(config.frame_width, constants::DEFAULT_FRAME_WIDTH);
    }

    #[test]
    fn test_validate_rejects_inverted_threshold() {
        let config = Config {
            threshold_begin: 900,
            threshold_end: 800,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        // The live view still gets a usable window
        assert_eq!(config.threshold_range(), ThresholdRange::default());
    }

    #[test]
    fn test_validate_rejects_zero_decimation() {
        let config = Config {
            decimation: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.decimation().get(), 1);
    }

    #[test]
    fn test_validate_rejects_threshold_without_room() {
        let config = Config {
            threshold_begin: 7900,
            threshold_end: 8000,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            threshold_end: 9000,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_tilt_step() {
        for step in [0, -5, i8::MIN, 28] {
            let config = Config {
                tilt_step_degrees: step,
                ..Config::default()
            };
            assert!(config.validate().is_err(), "step {} accepted", step);
        }
    }
}
