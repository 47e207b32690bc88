//! Engine-facing contracts and the frame loop.
//!
//! This module separates the tick algorithm ([`FrameLoop`]) from its scheduling
//! ([`Engine`], which owns the loop thread and the lifecycle controls).

mod config;
mod engine;
mod error;
mod frame_loop;

pub use config::EngineConfig;
pub use engine::{Engine, Lifecycle, SceneFactory};
pub use error::EngineError;
pub use frame_loop::{FrameLoop, FrameOutcome, LoopReport};
