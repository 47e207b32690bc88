//! Vektor engine crate.
//!
//! A fixed-rate render loop over a scene of vector shapes: the loop advances the
//! scene, paints it into a double-buffered [`render::RenderTarget`], presents, and
//! waits for the next tick. Callers pause, resume and stop it from any thread.

pub mod core;
pub mod sync;
pub mod time;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;

pub use crate::core::{Engine, EngineConfig, EngineError, Lifecycle, LoopReport};
