// SPDX-License-Identifier: GPL-3.0-only

//! Live view logic: state, key bindings, capture countdown, event handling
//! and the capture session tying them to a sensor and a display

pub mod capture_timer;
pub mod keys;
pub mod session;
pub mod state;
pub mod viewer;

pub use capture_timer::{CaptureState, CaptureTimer};
pub use keys::KeyAction;
pub use session::CaptureSession;
pub use state::ViewerState;
pub use viewer::{Viewer, ViewerEvent, ViewerHandler, ViewerOutput};
