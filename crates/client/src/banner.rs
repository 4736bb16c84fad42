//! Transient request-error banner.
//!
//! Expiry is measured with `tokio::time::Instant` so paused-clock tests can step past it.

use std::time::Duration;
use tokio::time::Instant;

/// A transient error message that hides itself after a fixed duration.
#[derive(Clone, Debug)]
pub struct ErrorBanner {
    duration: Duration,
    current: Option<(String, Instant)>,
}

impl ErrorBanner {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    /// Show `message`, replacing any message already shown and restarting the timer.
    pub fn show(&mut self, message: impl Into<String>) {
        self.current = Some((message.into(), Instant::now()));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The message, while it is still within its display window.
    pub fn message(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < self.duration)
            .map(|(message, _)| message.as_str())
    }
}
