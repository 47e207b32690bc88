//! Coordinate types shared by shapes and the rasterizer.
//!
//! Canonical CPU space:
//! - Target pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Positive rotation angles therefore turn clockwise on screen.

mod vec2;

pub use vec2::Vec2;
