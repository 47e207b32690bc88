use std::time::{Duration, Instant};

/// Shortest wait the clock ever hands out.
///
/// A zero wait would turn a late frame loop into a busy spin.
pub const MIN_WAIT: Duration = Duration::from_millis(1);

/// Default tick interval, roughly 60 ticks per second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Fixed-interval tick arithmetic.
///
/// `FrameClock` holds no timestamps of its own; every method is a pure function of
/// its inputs and the configured interval, so callers decide where "now" comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameClock {
    tick_interval: Duration,
}

impl FrameClock {
    /// Creates a clock ticking every `tick_interval`.
    ///
    /// Intervals shorter than [`MIN_WAIT`] are raised to it.
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval: tick_interval.max(MIN_WAIT) }
    }

    /// Creates a clock targeting `fps` ticks per second (`0` is treated as `1`).
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Deadline of the tick following `last`.
    #[inline]
    pub fn next_deadline(&self, last: Instant) -> Instant {
        last.checked_add(self.tick_interval).unwrap_or(last)
    }

    /// Time left until `deadline`, never less than [`MIN_WAIT`].
    #[inline]
    pub fn remaining(&self, deadline: Instant, now: Instant) -> Duration {
        deadline.saturating_duration_since(now).max(MIN_WAIT)
    }

    /// Timestamp the tick after `last` is measured from.
    ///
    /// On time, this is the deadline itself (fixed rate, no drift). When `now` is
    /// already past the deadline the baseline moves to `now`, so a slow frame
    /// delays the schedule instead of queueing a burst of overdue ticks.
    #[inline]
    pub fn next_baseline(&self, last: Instant, now: Instant) -> Instant {
        let deadline = self.next_deadline(last);
        if now > deadline { now } else { deadline }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
