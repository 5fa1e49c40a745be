// SPDX-License-Identifier: GPL-3.0-only

//! Countdown-to-record state machine
//!
//! ```text
//! Idle ──take_shot──► CountingDown(n) ──tick (n = 0)──► Recording ──elapsed──► Idle
//!                        │    ▲
//!                        └────┘ tick (n > 0): n - 1
//! ```
//!
//! `take_shot` always restarts the countdown from the configured length, so
//! repeated presses never stack timers.

use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    /// Seconds left before recording starts
    CountingDown(u32),
    /// Every depth frame is persisted until `record_duration` has elapsed
    Recording { started: Instant },
}

#[derive(Debug, Clone)]
pub struct CaptureTimer {
    state: CaptureState,
    countdown_seconds: u32,
    record_duration: Duration,
}

impl CaptureTimer {
    pub fn new(countdown_seconds: u32, record_duration: Duration) -> Self {
        Self {
            state: CaptureState::Idle,
            countdown_seconds,
            record_duration,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, CaptureState::Recording { .. })
    }

    /// Whether the one-second ticker must keep running
    pub fn needs_ticks(&self) -> bool {
        self.state != CaptureState::Idle
    }

    pub fn record_duration(&self) -> Duration {
        self.record_duration
    }

    /// Start (or restart) the countdown
    pub fn take_shot(&mut self) {
        match self.state {
            CaptureState::Idle => info!(seconds = self.countdown_seconds, "Capture countdown started"),
            CaptureState::CountingDown(left) => {
                info!(left, "Capture countdown restarted");
            }
            CaptureState::Recording { .. } => {
                info!("Recording interrupted, capture countdown restarted");
            }
        }
        self.state = CaptureState::CountingDown(self.countdown_seconds);
    }

    /// Advance by one second
    pub fn tick(&mut self, now: Instant) -> CaptureState {
        self.state = match self.state {
            CaptureState::Idle => CaptureState::Idle,
            CaptureState::CountingDown(0) => {
                info!(duration = ?self.record_duration, "Recording started");
                CaptureState::Recording { started: now }
            }
            CaptureState::CountingDown(left) => CaptureState::CountingDown(left - 1),
            CaptureState::Recording { started } => self.check_elapsed(started, now),
        };
        self.state
    }

    /// Call after a frame was persisted; stops recording once the duration is reached
    pub fn frame_recorded(&mut self, now: Instant) -> CaptureState {
        if let CaptureState::Recording { started } = self.state {
            self.state = self.check_elapsed(started, now);
        }
        self.state
    }

    fn check_elapsed(&self, started: Instant, now: Instant) -> CaptureState {
        if now.saturating_duration_since(started) >= self.record_duration {
            info!("Recording stopped");
            CaptureState::Idle
        } else {
            CaptureState::Recording { started }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> CaptureTimer {
        CaptureTimer::new(3, Duration::from_secs(5))
    }

    #[test]
    fn test_idle_ignores_ticks() {
        let mut timer = timer();
        assert_eq!(timer.tick(Instant::now()), CaptureState::Idle);
        assert!(!timer.needs_ticks());
    }

    #[test]
    fn test_countdown_reaches_recording_after_four_ticks() {
        let mut timer = timer();
        let start = Instant::now();
        timer.take_shot();
        assert_eq!(timer.state(), CaptureState::CountingDown(3));

        let mut now = start;
        for expected in [2, 1, 0] {
            now += Duration::from_secs(1);
            assert_eq!(timer.tick(now), CaptureState::CountingDown(expected));
        }
        now += Duration::from_secs(1);
        assert_eq!(timer.tick(now), CaptureState::Recording { started: now });
    }

    #[test]
    fn test_frame_recorded_stops_after_duration() {
        let mut timer = CaptureTimer::new(0, Duration::from_secs(5));
        let start = Instant::now();
        timer.take_shot();
        timer.tick(start);
        assert!(timer.is_recording());

        assert!(timer.frame_recorded(start + Duration::from_millis(4999)) != CaptureState::Idle);
        assert_eq!(
            timer.frame_recorded(start + Duration::from_secs(5)),
            CaptureState::Idle
        );
    }

    #[test]
    fn test_take_shot_while_recording_restarts_countdown() {
        let mut timer = timer();
        let start = Instant::now();
        timer.take_shot();
        for _ in 0..4 {
            timer.tick(start);
        }
        assert!(timer.is_recording());

        timer.take_shot();
        assert!(!timer.is_recording());
        assert_eq!(timer.state(), CaptureState::CountingDown(3));
        // Frames arriving now are no longer part of a recording
        assert_eq!(
            timer.frame_recorded(start + Duration::from_secs(1)),
            CaptureState::CountingDown(3)
        );
    }
}
