// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use depthshot::constants::{self, capture, threshold, tilt, visualization};

#[test]
fn test_threshold_defaults_leave_room_to_adjust() {
    // Default window must satisfy the minimum span the adjustment enforces
    assert!(threshold::DEFAULT_BEGIN + threshold::MIN_SPAN <= threshold::DEFAULT_END);
    assert!(threshold::DEFAULT_END <= threshold::MAX_END);
    assert!(threshold::DEFAULT_STEP > 0);
}

#[test]
fn test_tilt_range_is_symmetric() {
    assert_eq!(tilt::MIN_DEGREES, -tilt::MAX_DEGREES);
    assert!(tilt::DEFAULT_STEP_DEGREES > 0);
    assert!(tilt::DEFAULT_STEP_DEGREES <= tilt::MAX_DEGREES);
}

#[test]
fn test_capture_timing() {
    assert_eq!(capture::DEFAULT_COUNTDOWN_SECONDS, 3);
    assert_eq!(capture::DEFAULT_RECORD_SECONDS, 5);
    assert_eq!(capture::TICK_INTERVAL.as_secs(), 1);
}

#[test]
fn test_visualization_colors() {
    assert_eq!(visualization::BACKGROUND, 255, "Unpainted pixels are white");
    assert_eq!(visualization::FOREGROUND, 0, "Binary samples are black");
    assert!(visualization::DEFAULT_RAMP_MAX_DEPTH > 0);
}

#[test]
fn test_app_version_not_empty() {
    assert!(!constants::app_version().is_empty());
    assert_eq!(constants::APP_NAME, "depthshot");
}
