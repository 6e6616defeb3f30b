//! Spacing between two Unimed token collections.
//!
//! The window outlives any single attempt: closing and reopening the modal
//! does not allow an early second collection.

use tokio::time::{Duration, Instant};

/// Longest interval honoured; larger configured values are clamped.
const MAX_INTERVAL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionWindow {
    next_allowed: Option<Instant>,
}

impl CollectionWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole seconds (rounded up) until the next collection is allowed, or
    /// `None` when a collection may happen now.
    pub fn remaining(&self) -> Option<u64> {
        let left = self
            .next_allowed?
            .saturating_duration_since(Instant::now());
        if left.is_zero() {
            return None;
        }
        Some(left.as_secs() + u64::from(left.subsec_nanos() > 0))
    }

    /// Record a collection made now.
    pub fn record(&mut self, interval_seconds: u64) {
        let interval = Duration::from_secs(interval_seconds.min(MAX_INTERVAL_SECONDS));
        self.next_allowed = Some(Instant::now() + interval);
    }
}
