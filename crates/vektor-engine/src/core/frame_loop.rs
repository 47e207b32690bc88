use std::time::Instant;

use crate::render::{ContextGuard, FrameError, RenderTarget};
use crate::scene::Scene;
use crate::sync::{PauseGate, Wake};
use crate::time::FrameClock;

/// What happened to a single frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// A recoverable target error cost this frame.
    Skipped,
}

/// Frame counters returned when a loop exits normally.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LoopReport {
    pub frames_presented: u64,
    pub frames_skipped: u64,
}

impl LoopReport {
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames_presented + self.frames_skipped
    }
}

/// The tick algorithm, independent of how it is scheduled.
///
/// [`run_frame`](Self::run_frame) performs one update/render/present pass and can be
/// driven directly without threads. [`run`](Self::run) repeats it, pacing with a
/// [`FrameClock`] and parking on a [`PauseGate`] between frames.
pub struct FrameLoop<'a> {
    scene: Scene,
    target: &'a dyn RenderTarget,
    rotation_step: f32,
    report: LoopReport,
}

impl<'a> FrameLoop<'a> {
    pub fn new(scene: Scene, target: &'a dyn RenderTarget, rotation_step: f32) -> Self {
        Self { scene, target, rotation_step, report: LoopReport::default() }
    }

    #[inline]
    pub fn report(&self) -> LoopReport {
        self.report
    }

    /// Advances the scene one step, then paints and presents it.
    ///
    /// Recoverable target errors are logged and reported as
    /// [`FrameOutcome::Skipped`]; only [`FrameError::FatalResourceLoss`] is returned.
    pub fn run_frame(&mut self) -> Result<FrameOutcome, FrameError> {
        self.scene.update(self.rotation_step);

        match self.paint_and_present() {
            Ok(()) => {
                self.report.frames_presented += 1;
                Ok(FrameOutcome::Presented)
            }
            Err(err) if err.is_recoverable() => {
                self.report.frames_skipped += 1;
                log::warn!("skipping frame {}: {err}", self.report.frames());
                Ok(FrameOutcome::Skipped)
            }
            Err(err) => Err(err),
        }
    }

    fn paint_and_present(&self) -> Result<(), FrameError> {
        // The context (and with it the target's buffer lock) is released before
        // presenting.
        {
            let mut ctx = ContextGuard::acquire(self.target)?;
            self.scene.render(&mut *ctx)?;
        }
        self.target.present()?;
        self.target.sync()
    }

    /// Runs frames until `gate` is stopped or the target is lost.
    ///
    /// The gate lock is never held while the target is in use. A paused gate
    /// suppresses rendering entirely; after a resume the next frame is one full
    /// interval away.
    pub fn run(mut self, gate: &PauseGate, clock: &FrameClock) -> Result<LoopReport, FrameError> {
        gate.reset_baseline(Instant::now());
        log::debug!(
            "frame loop started: {} drawables, tick {:?}",
            self.scene.len(),
            clock.tick_interval()
        );

        'frames: loop {
            if gate.is_stopped() {
                break;
            }

            if !gate.is_paused() {
                if let Err(err) = self.run_frame() {
                    if gate.is_stopped() {
                        log::debug!("target went away during shutdown: {err}");
                        break;
                    }
                    log::error!("render target lost, stopping frame loop: {err}");
                    return Err(err);
                }
            }

            loop {
                let now = Instant::now();
                let last = gate.last_tick();
                let wait = clock.remaining(clock.next_deadline(last), now);
                log::trace!("next frame in {wait:?}");

                match gate.await_tick(wait, clock.next_baseline(last, now)) {
                    Wake::Elapsed => break,
                    // Baseline was reset by the resume; wait out a fresh interval.
                    Wake::Resumed => continue,
                    Wake::Stopped => break 'frames,
                }
            }
        }

        log::debug!(
            "frame loop exited: {} presented, {} skipped",
            self.report.frames_presented,
            self.report.frames_skipped
        );
        Ok(self.report)
    }
}
