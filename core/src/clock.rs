//! Frame clock. Owns the frame counter, pause state, and the one
//! sampled time value every system sees for a frame.

use crate::types::{FrameIndex, Seconds};
use serde::{Deserialize, Serialize};

/// Largest step handed to systems; longer gaps (a backgrounded tab,
/// a debugger pause) are treated as this long.
pub const MAX_FRAME_DELTA: Seconds = 0.25;

/// Time for one frame, sampled once and shared by every system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FrameTime {
    pub index: FrameIndex,
    /// Host wall-clock seconds at the start of this frame.
    pub time:  Seconds,
    /// Seconds since the previous frame; 0 on the first frame.
    pub delta: Seconds,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameClock {
    pub current_frame: FrameIndex,
    pub paused:        bool,
    last_time:         Option<Seconds>,
}

impl Default for FrameClock {
    fn default() -> Self { Self::new() }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            paused: false,
            last_time: None,
        }
    }

    /// Advance one frame at host time `now`.
    /// Panics if called while paused; callers must check.
    pub fn advance(&mut self, now: Seconds) -> FrameTime {
        assert!(!self.paused, "advance() called on paused clock");
        let delta = match self.last_time {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_DELTA),
            None => 0.0,
        };
        self.last_time = Some(now);
        self.current_frame += 1;
        FrameTime { index: self.current_frame, time: now, delta }
    }

    pub fn pause(&mut self) { self.paused = true; }

    /// Resume without counting the paused interval as frame delta.
    pub fn resume(&mut self) {
        self.paused = false;
        self.last_time = None;
    }
}
