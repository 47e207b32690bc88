/// Failure reported by a render target while producing one frame.
///
/// The first two variants cost a single frame; the loop logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The target cannot supply a drawing context this frame.
    #[error("render target cannot supply a drawing context: {0}")]
    ResourceUnavailable(String),

    /// Buffer swap or display sync failed.
    #[error("failed to present frame: {0}")]
    PresentFailed(String),

    /// The target is permanently invalid; the loop must stop.
    #[error("render target permanently lost: {0}")]
    FatalResourceLoss(String),
}

impl FrameError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ResourceUnavailable(reason.into())
    }

    pub fn present_failed(reason: impl Into<String>) -> Self {
        Self::PresentFailed(reason.into())
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        Self::FatalResourceLoss(reason.into())
    }

    /// Whether skipping the current frame is enough to recover.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::FatalResourceLoss(_))
    }
}
