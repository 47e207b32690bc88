use std::time::Duration;

use crate::time::{DEFAULT_TICK_INTERVAL, FrameClock};

/// Engine construction parameters. Read-only once the engine exists.
///
/// Target dimensions are not configured here; the scene factory receives them
/// from the render target.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed time between ticks.
    pub tick_interval: Duration,

    /// Degrees every drawable turns per tick.
    pub rotation_step_degrees: f32,

    /// Name given to the frame loop thread.
    pub thread_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            rotation_step_degrees: 15.0,
            thread_name: "vektor-frame-loop".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the interval from a ticks-per-second target.
    pub fn fps(mut self, fps: u32) -> Self {
        self.tick_interval = FrameClock::from_fps(fps).tick_interval();
        self
    }

    pub fn rotation_step(mut self, degrees: f32) -> Self {
        self.rotation_step_degrees = degrees;
        self
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub(crate) fn clock(&self) -> FrameClock {
        FrameClock::new(self.tick_interval)
    }
}
