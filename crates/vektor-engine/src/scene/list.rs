use crate::paint::Color;
use crate::render::{DrawContext, FrameError};

use super::Drawable;

/// Ordered collection of drawables.
///
/// Paint order is insertion order: later entries draw on top. The scene owns its
/// drawables and is only touched by the frame loop that built it.
pub struct Scene {
    drawables: Vec<Box<dyn Drawable>>,
    background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with a black background.
    pub fn new() -> Self {
        Self { drawables: Vec::new(), background: Color::BLACK }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Appends a drawable on top of everything added so far.
    #[inline]
    pub fn add(&mut self, drawable: impl Drawable + 'static) {
        self.drawables.push(Box::new(drawable));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Drawables in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Drawable> {
        self.drawables.iter().map(|d| d.as_ref())
    }

    /// Rotates every drawable by `delta_degrees`, in paint order.
    pub fn update(&mut self, delta_degrees: f32) {
        for drawable in &mut self.drawables {
            drawable.update(delta_degrees);
        }
    }

    /// Clears `ctx` to the background, then paints every drawable in order.
    ///
    /// Stops at the first failing drawable; the caller decides whether the frame
    /// is lost.
    pub fn render(&self, ctx: &mut dyn DrawContext) -> Result<(), FrameError> {
        ctx.clear(self.background)?;
        for drawable in &self.drawables {
            drawable.render(ctx)?;
        }
        Ok(())
    }
}
