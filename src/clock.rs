//! Monotonic millisecond clock driving the pipe spawn cadence.

use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    start: Instant,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}
