//! Cross-thread coordination for the frame loop.
//!
//! Lock ordering: the gate lock is a leaf. Nothing calls into a render target
//! (or takes any other lock) while holding it.

mod pause_gate;

pub use pause_gate::{PauseGate, Phase, Wake};
