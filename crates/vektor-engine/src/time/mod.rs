//! Time subsystem.
//!
//! Provides stable, testable tick arithmetic without coupling to the loop.
//! Intended usage:
//! - one `FrameClock` per frame loop
//! - compute `next_deadline` from the last tick and wait `remaining` until it

mod frame_clock;

pub use frame_clock::{DEFAULT_TICK_INTERVAL, FrameClock, MIN_WAIT};
