use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, MutexGuard};

use crate::coords::Vec2;
use crate::paint::Color;

use super::{DrawContext, FrameError, Framebuffer, RenderTarget, raster};

/// Front/back buffer pair guarded by the target lock.
#[derive(Debug)]
struct Swapchain {
    front: Framebuffer,
    back: Framebuffer,
    disposed: bool,
}

/// Headless double-buffered render target.
///
/// Both buffers live behind a single lock (the target lock). An acquired
/// [`DrawContext`] holds that lock until it is released, so [`present`] and
/// [`front_snapshot`] wait for the frame in progress to finish.
///
/// After [`RenderTarget::dispose`] every acquire/present reports
/// [`FrameError::FatalResourceLoss`].
///
/// [`present`]: RenderTarget::present
/// [`front_snapshot`]: SoftwareTarget::front_snapshot
#[derive(Debug)]
pub struct SoftwareTarget {
    width: u32,
    height: u32,
    chain: Mutex<Swapchain>,
    presents: AtomicU64,
    disposals: AtomicU64,
}

impl SoftwareTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            chain: Mutex::new(Swapchain {
                front: Framebuffer::new(width, height),
                back: Framebuffer::new(width, height),
                disposed: false,
            }),
            presents: AtomicU64::new(0),
            disposals: AtomicU64::new(0),
        }
    }

    /// Copy of the most recently presented frame, or `None` once disposed.
    pub fn front_snapshot(&self) -> Option<Framebuffer> {
        let chain = self.chain.lock();
        (!chain.disposed).then(|| chain.front.clone())
    }

    /// Number of successful buffer swaps.
    pub fn present_count(&self) -> u64 {
        self.presents.load(Ordering::Acquire)
    }

    /// Number of times resources were actually released (0 or 1).
    pub fn disposal_count(&self) -> u64 {
        self.disposals.load(Ordering::Acquire)
    }

    pub fn is_disposed(&self) -> bool {
        self.chain.lock().disposed
    }
}

impl RenderTarget for SoftwareTarget {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn acquire_context(&self) -> Result<Box<dyn DrawContext + '_>, FrameError> {
        let chain = self.chain.lock();
        if chain.disposed {
            return Err(FrameError::fatal("software target disposed"));
        }
        Ok(Box::new(SoftwareContext { chain: Some(chain) }))
    }

    fn present(&self) -> Result<(), FrameError> {
        let mut chain = self.chain.lock();
        if chain.disposed {
            return Err(FrameError::fatal("software target disposed"));
        }
        let chain = &mut *chain;
        std::mem::swap(&mut chain.front, &mut chain.back);
        self.presents.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn dispose(&self) -> anyhow::Result<()> {
        let mut chain = self.chain.lock();
        if chain.disposed {
            return Ok(());
        }
        chain.disposed = true;
        chain.front = Framebuffer::new(0, 0);
        chain.back = Framebuffer::new(0, 0);
        self.disposals.fetch_add(1, Ordering::AcqRel);
        log::debug!("software target {}x{} disposed", self.width, self.height);
        Ok(())
    }
}

/// Drawing context over the back buffer; holds the target lock until released.
struct SoftwareContext<'a> {
    chain: Option<MutexGuard<'a, Swapchain>>,
}

impl SoftwareContext<'_> {
    fn back(&mut self) -> Result<&mut Framebuffer, FrameError> {
        self.chain
            .as_mut()
            .map(|chain| &mut chain.back)
            .ok_or_else(|| FrameError::unavailable("drawing context already released"))
    }
}

impl DrawContext for SoftwareContext<'_> {
    fn clear(&mut self, color: Color) -> Result<(), FrameError> {
        self.back()?.fill(color);
        Ok(())
    }

    fn fill_polygon(&mut self, vertices: &[Vec2], color: Color) -> Result<(), FrameError> {
        raster::fill_polygon(self.back()?, vertices, color);
        Ok(())
    }

    fn release(&mut self) {
        self.chain = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ContextGuard;

    #[test]
    fn nothing_is_visible_until_present() {
        let target = SoftwareTarget::new(4, 4);
        {
            let mut ctx = ContextGuard::acquire(&target).unwrap();
            ctx.clear(Color::WHITE).unwrap();
        }
        assert_eq!(target.front_snapshot().unwrap().count(Color::WHITE), 0);

        target.present().unwrap();
        assert_eq!(target.front_snapshot().unwrap().count(Color::WHITE), 16);
        assert_eq!(target.present_count(), 1);
    }

    #[test]
    fn polygon_lands_in_back_buffer() {
        let target = SoftwareTarget::new(8, 8);
        {
            let mut ctx = ContextGuard::acquire(&target).unwrap();
            ctx.clear(Color::BLACK).unwrap();
            ctx.fill_polygon(
                &[Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(8.0, 4.0), Vec2::new(0.0, 4.0)],
                Color::LIGHT_GRAY,
            )
            .unwrap();
        }
        target.present().unwrap();
        let front = target.front_snapshot().unwrap();
        assert_eq!(front.count(Color::LIGHT_GRAY), 32);
        assert_eq!(front.count(Color::BLACK), 32);
    }

    #[test]
    fn dispose_is_idempotent_and_final() {
        let target = SoftwareTarget::new(2, 2);
        target.dispose().unwrap();
        target.dispose().unwrap();
        assert_eq!(target.disposal_count(), 1);
        assert!(target.is_disposed());
        assert!(target.front_snapshot().is_none());
        assert!(matches!(target.acquire_context(), Err(FrameError::FatalResourceLoss(_))));
        assert!(matches!(target.present(), Err(FrameError::FatalResourceLoss(_))));
    }

    #[test]
    fn released_context_unlocks_target() {
        let target = SoftwareTarget::new(2, 2);
        let mut ctx = target.acquire_context().unwrap();
        ctx.release();
        assert!(ctx.clear(Color::WHITE).is_err());
        // Lock is free again even though the box is still alive.
        target.present().unwrap();
    }
}
