use crate::coords::Vec2;
use crate::render::{DrawContext, FrameError};

/// A scene entity that can be advanced and painted.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - implement `Drawable` for it
/// - push it into a `Scene` from the engine's scene factory
pub trait Drawable {
    /// Rotates the shape about its own centroid by `delta_degrees`.
    fn update(&mut self, delta_degrees: f32);

    /// Paints the shape into `ctx`.
    fn render(&self, ctx: &mut dyn DrawContext) -> Result<(), FrameError>;

    /// Rotation pivot. Must not change across `update` calls.
    fn centroid(&self) -> Vec2;
}
