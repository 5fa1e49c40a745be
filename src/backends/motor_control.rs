// SPDX-License-Identifier: GPL-3.0-only

//! Motor tilt control
//!
//! Tilt requests arrive as relative steps from the keyboard and are turned
//! into absolute angles within the motor's range before reaching the source.

use super::DepthSource;
use crate::constants::tilt::{MAX_DEGREES, MIN_DEGREES};
use crate::errors::AppResult;
use tracing::{debug, warn};

/// Absolute tilt after moving `current` by `delta`, clamped to the motor range
pub fn next_tilt(current: i8, delta: i8) -> i8 {
    current.saturating_add(delta).clamp(MIN_DEGREES, MAX_DEGREES)
}

/// Move the source's motor by `delta` degrees, returning the new angle
pub fn apply_tilt(source: &mut dyn DepthSource, delta: i8) -> AppResult<i8> {
    let current = source.tilt().inspect_err(|e| {
        warn!(source = source.name(), error = %e, "Failed to read tilt");
    })?;
    let target = next_tilt(current, delta);
    debug!(current, target, "Setting tilt");
    source.set_tilt(target)?;
    Ok(target)
}
