use core::ops::{Deref, DerefMut};

use crate::coords::Vec2;
use crate::paint::Color;

use super::FrameError;

/// Drawing surface for a single frame.
///
/// Obtained from [`RenderTarget::acquire_context`]. `release` must run exactly once
/// per acquisition; wrap contexts in a [`ContextGuard`] rather than calling it by hand.
pub trait DrawContext {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color) -> Result<(), FrameError>;

    /// Fills a closed polygon (even-odd rule).
    fn fill_polygon(&mut self, vertices: &[Vec2], color: Color) -> Result<(), FrameError>;

    /// Returns the context to its target.
    fn release(&mut self);
}

/// Double-buffered surface the engine paints into and presents.
///
/// Implementations synchronize buffer access internally. The engine never holds its
/// own state lock while calling into a target, so a target may block on its lock.
pub trait RenderTarget: Send + Sync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Acquires a drawing context over the back buffer.
    fn acquire_context(&self) -> Result<Box<dyn DrawContext + '_>, FrameError>;

    /// Swaps the back buffer to the front.
    fn present(&self) -> Result<(), FrameError>;

    /// Requests a display sync from the platform after presenting.
    fn sync(&self) -> Result<(), FrameError> {
        Ok(())
    }

    /// Releases the target's resources. Called exactly once by the engine.
    fn dispose(&self) -> anyhow::Result<()>;
}

/// Scoped drawing context: releases on drop, including during unwinding.
pub struct ContextGuard<'a> {
    ctx: Box<dyn DrawContext + 'a>,
}

impl<'a> ContextGuard<'a> {
    /// Acquires a context from `target`. Nothing needs releasing if this fails.
    pub fn acquire<T>(target: &'a T) -> Result<Self, FrameError>
    where
        T: RenderTarget + ?Sized,
    {
        let ctx = target.acquire_context()?;
        Ok(Self { ctx })
    }
}

impl<'a> Deref for ContextGuard<'a> {
    type Target = dyn DrawContext + 'a;

    fn deref(&self) -> &Self::Target {
        self.ctx.as_ref()
    }
}

impl<'a> DerefMut for ContextGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx.as_mut()
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.ctx.release();
    }
}
