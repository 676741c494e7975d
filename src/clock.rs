use std::time::{Duration, Instant};

// Coarse frame throttle: a frame runs once `interval` has passed since the
// last one, and gets the whole elapsed time as its dt. Time past the interval
// is not carried over, so late frames lose it instead of catching up.
pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.interval {
            return None;
        }
        self.last = now;
        Some(elapsed.as_secs_f32())
    }

    // how long the loop may block on input before the next frame is due
    pub fn until_next(&self, now: Instant) -> Duration {
        (self.last + self.interval).saturating_duration_since(now)
    }
}
