//! # Countdown
//!
//! A pure one-second countdown. It does not own a clock; something else
//! (see [`super::ticker`]) calls [`Countdown::tick`] once per second.

/// Format seconds as `M:SS` (minutes unpadded), e.g. `5:00`, `0:09`, `40:00`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down.
    Running,
    /// This tick brought the countdown to zero.
    Expired,
    /// Already at zero; nothing changed.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: u64,
    remaining: u64,
}

impl Countdown {
    /// A countdown of `duration` seconds. Zero starts out expired.
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.remaining {
            0 => TickOutcome::Idle,
            1 => {
                self.remaining = 0;
                TickOutcome::Expired
            }
            _ => {
                self.remaining -= 1;
                TickOutcome::Running
            }
        }
    }

    /// Restart from the full duration, discarding any remaining time.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }
}
