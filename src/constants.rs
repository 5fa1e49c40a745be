// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants
//!
//! Single source of truth for sensor geometry, threshold limits and capture
//! timing. `Config` defaults are built from these values.

use std::time::Duration;

/// Kinect v1 depth stream resolution, also assumed for raw depth files
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Depth threshold defaults (millimeters)
pub mod threshold {
    /// Lower bound of the valid depth window
    pub const DEFAULT_BEGIN: u16 = 500;
    /// Upper bound of the valid depth window
    pub const DEFAULT_END: u16 = 8000;
    /// Largest value the upper bound can be raised to
    pub const MAX_END: u16 = 8000;
    /// Smallest distance kept between the lower and upper bound
    pub const MIN_SPAN: u16 = 300;
    /// Amount the upper bound moves per key press
    pub const DEFAULT_STEP: u16 = 100;
}

/// Capture countdown and recording timing
pub mod capture {
    use super::Duration;

    /// Seconds shown before recording starts
    pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 3;
    /// How long depth frames are dumped once recording starts
    pub const DEFAULT_RECORD_SECONDS: u64 = 5;
    /// Countdown tick period
    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
    /// Prefix of every recorded raw depth file
    pub const FILE_PREFIX: &str = "depth-data-";
}

/// Grayscale visualization defaults
pub mod visualization {
    /// Depth mapped to full intensity by the ramp strategy (millimeters)
    pub const DEFAULT_RAMP_MAX_DEPTH: u16 = 3000;
    /// Pixel decimation stride used by the live view
    pub const DEFAULT_DECIMATION: u32 = 1;
    /// Canvas background before any sample is painted
    pub const BACKGROUND: u8 = 255;
    /// Color painted for kept samples by the binary strategy
    pub const FOREGROUND: u8 = 0;
}

/// Motor tilt limits (degrees)
pub mod tilt {
    pub const MIN_DEGREES: i8 = -27;
    pub const MAX_DEGREES: i8 = 27;
    /// Amount the tilt changes per key press
    pub const DEFAULT_STEP_DEGREES: i8 = 5;
}

/// Replay (virtual sensor) timing
pub mod replay {
    /// Delay between replayed frames, roughly 30 fps
    pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
}

/// Terminal event loop timing
pub mod terminal {
    use super::Duration;

    /// Key poll timeout per loop iteration
    pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);
}

/// Application name used for config directories and the CLI
pub const APP_NAME: &str = "depthshot";

/// Version string embedded by the build script
pub fn app_version() -> &'static str {
    env!("GIT_VERSION")
}
