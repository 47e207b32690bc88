use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::render::{FrameError, RenderTarget};
use crate::scene::Scene;
use crate::sync::{PauseGate, Phase};

use super::{EngineConfig, EngineError, FrameLoop, LoopReport};

/// Builds the initial scene on the loop thread from the target's `(width, height)`.
pub type SceneFactory = Box<dyn FnOnce(u32, u32) -> Scene + Send>;

/// Externally visible engine state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Created,
    Running,
    Paused,
    /// Terminal.
    Stopped,
}

/// State shared between the engine handle and its loop thread.
struct Shared {
    gate: PauseGate,
    target: Arc<dyn RenderTarget>,
    disposed: AtomicBool,
}

impl Shared {
    /// The single disposal path. Later calls are no-ops; failures are logged.
    fn dispose_target(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        match self.target.dispose() {
            Ok(()) => log::debug!("render target disposed"),
            Err(err) => log::error!("failed to dispose render target: {err:#}"),
        }
    }
}

/// Dropped last on the loop thread: stops the gate and disposes the target on
/// every exit path, unwinding included.
struct LoopExit<'a>(&'a Shared);

impl Drop for LoopExit<'_> {
    fn drop(&mut self) {
        self.0.gate.stop();
        self.0.dispose_target();
    }
}

enum LoopSlot {
    Idle,
    Running(JoinHandle<Result<LoopReport, FrameError>>),
    Joined,
}

/// Fixed-rate render engine.
///
/// One instance is constructed by the process entry point and shared by reference
/// (or `Arc`) with whoever needs to control it. Every method takes `&self` and is
/// safe to call from any thread.
///
/// There is no implicit shutdown: dropping an engine without calling [`stop`]
/// leaves the loop thread running and the render target undisposed.
///
/// [`stop`]: Engine::stop
pub struct Engine {
    config: EngineConfig,
    shared: Arc<Shared>,
    factory: Mutex<Option<SceneFactory>>,
    slot: Mutex<LoopSlot>,
}

impl Engine {
    pub fn new<F>(config: EngineConfig, target: Arc<dyn RenderTarget>, scene_factory: F) -> Self
    where
        F: FnOnce(u32, u32) -> Scene + Send + 'static,
    {
        log::info!(
            "engine created: {}x{} target, tick {:?}",
            target.width(),
            target.height(),
            config.tick_interval
        );
        Self {
            config,
            shared: Arc::new(Shared {
                gate: PauseGate::new(),
                target,
                disposed: AtomicBool::new(false),
            }),
            factory: Mutex::new(Some(Box::new(scene_factory))),
            slot: Mutex::new(LoopSlot::Idle),
        }
    }

    /// Spawns the frame loop on its own thread and returns immediately.
    pub fn start(&self) -> Result<(), EngineError> {
        // Held across the spawn so `join` never observes a half-started engine.
        let mut slot = self.slot.lock();

        // `thread::Builder::spawn` panics on an interior NUL; reject it while the
        // engine is still `Created` so `stop` can dispose inline.
        if self.config.thread_name.contains('\0') {
            return Err(EngineError::Spawn(io::Error::new(
                io::ErrorKind::InvalidInput,
                "thread name contains a NUL byte",
            )));
        }

        match self.shared.gate.begin() {
            Phase::Idle => {}
            Phase::Running => return Err(EngineError::AlreadyStarted),
            Phase::Stopped => return Err(EngineError::Stopped),
        }

        let Some(factory) = self.factory.lock().take() else {
            return Err(EngineError::AlreadyStarted);
        };

        let shared = Arc::clone(&self.shared);
        let clock = self.config.clock();
        let step = self.config.rotation_step_degrees;

        let spawned = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || {
                let _exit = LoopExit(&shared);
                let target = shared.target.as_ref();
                let scene = factory(target.width(), target.height());
                FrameLoop::new(scene, target, step).run(&shared.gate, &clock)
            });

        match spawned {
            Ok(handle) => {
                *slot = LoopSlot::Running(handle);
                log::info!("engine started");
                Ok(())
            }
            Err(err) => {
                self.shared.gate.stop();
                self.shared.dispose_target();
                Err(EngineError::Spawn(err))
            }
        }
    }

    /// Suspends ticking. No-op when already paused or stopped.
    pub fn pause(&self) {
        if self.shared.gate.pause() {
            log::info!("engine paused");
        }
    }

    /// Resumes ticking; the next tick is a full interval from now.
    pub fn resume(&self) {
        if self.shared.gate.resume() {
            log::info!("engine resumed");
        }
    }

    /// Stops the engine. Idempotent.
    ///
    /// A running loop is woken and disposes the target on its way out; an engine
    /// that was never started disposes it here. Either way disposal happens once.
    /// Use [`join`](Self::join) to wait for the loop to finish.
    pub fn stop(&self) {
        match self.shared.gate.stop() {
            Phase::Idle => {
                log::info!("engine stopped before start");
                self.shared.dispose_target();
            }
            Phase::Running => log::info!("engine stopping"),
            Phase::Stopped => {}
        }
    }

    /// Waits for the loop thread to exit and returns how it ended.
    pub fn join(&self) -> Result<LoopReport, EngineError> {
        let handle = {
            let mut slot = self.slot.lock();
            match std::mem::replace(&mut *slot, LoopSlot::Joined) {
                LoopSlot::Running(handle) => handle,
                LoopSlot::Idle => {
                    *slot = LoopSlot::Idle;
                    return Err(EngineError::NotStarted);
                }
                LoopSlot::Joined => return Err(EngineError::AlreadyJoined),
            }
        };

        match handle.join() {
            Ok(Ok(report)) => Ok(report),
            Ok(Err(err)) => Err(EngineError::Fatal(err)),
            Err(_) => Err(EngineError::LoopPanicked),
        }
    }

    /// `true` from `start` until the loop is stopped or lost, paused or not.
    pub fn is_running(&self) -> bool {
        self.shared.gate.phase() == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.shared.gate.is_paused()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.shared.gate.status() {
            (Phase::Idle, _) => Lifecycle::Created,
            (Phase::Running, false) => Lifecycle::Running,
            (Phase::Running, true) => Lifecycle::Paused,
            (Phase::Stopped, _) => Lifecycle::Stopped,
        }
    }
}
