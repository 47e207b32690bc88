//! Paint model shared between shapes and render targets.
//!
//! Scope is a single solid fill color per shape. Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
