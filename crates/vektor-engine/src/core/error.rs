use crate::render::FrameError;

/// Lifecycle and terminal errors surfaced by [`Engine`](super::Engine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine already started")]
    AlreadyStarted,

    #[error("engine has been stopped")]
    Stopped,

    #[error("engine was never started")]
    NotStarted,

    #[error("frame loop already joined")]
    AlreadyJoined,

    #[error("failed to spawn frame loop thread")]
    Spawn(#[source] std::io::Error),

    /// The render target became permanently unusable; the loop disposed it and exited.
    #[error("frame loop terminated: {0}")]
    Fatal(#[from] FrameError),

    #[error("frame loop panicked")]
    LoopPanicked,
}
