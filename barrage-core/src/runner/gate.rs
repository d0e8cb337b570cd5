use std::time::Duration;

use tokio::time::Instant;

/// Decides whether another batch may start.
///
/// The clock starts when the gate is created. The bound is only consulted when asked; work
/// already in flight is never interrupted.
#[derive(Debug)]
pub struct DurationGate {
    duration: Duration,
    started: Instant,
}

impl DurationGate {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn next(&self) -> bool {
        self.elapsed() < self.duration
    }
}
