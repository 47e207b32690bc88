//! Rendering subsystem.
//!
//! The engine paints through the [`RenderTarget`] / [`DrawContext`] contracts and
//! never owns buffer allocation. A platform-free double-buffered
//! [`SoftwareTarget`] is provided for headless use and tests.
//!
//! Convention:
//! - geometry is in target pixels (top-left origin, +Y down)
//! - a pixel is covered when its center lies inside the polygon

mod error;
mod framebuffer;
pub mod raster;
mod software;
mod target;

pub use error::FrameError;
pub use framebuffer::{Framebuffer, Rgba8};
pub use software::SoftwareTarget;
pub use target::{ContextGuard, DrawContext, RenderTarget};
