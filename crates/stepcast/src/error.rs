/// Convenience result type used across the playback core.
pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// Error taxonomy surfaced by loading and navigation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// The presentation document does not have the expected shape.
    #[error("malformed presentation: {0}")]
    MalformedPresentation(String),

    /// An action names a target or executor the host cannot resolve.
    #[error("unresolved action at slide {slide}, action {action}: {reason}")]
    UnresolvedAction {
        slide: usize,
        action: usize,
        reason: String,
    },

    /// The cursor locator found no action to derive a position from.
    #[error("no cursor history: presentation contains no actions")]
    NoCursorHistory,
}

impl PlaybackError {
    /// Build a [`PlaybackError::MalformedPresentation`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPresentation(msg.into())
    }

    /// Build a [`PlaybackError::UnresolvedAction`] value.
    pub fn unresolved(slide: usize, action: usize, reason: impl Into<String>) -> Self {
        Self::UnresolvedAction {
            slide,
            action,
            reason: reason.into(),
        }
    }

    /// `true` for errors caused by the presentation data itself.
    ///
    /// `NoCursorHistory` is a lazily detected structural defect and counts
    /// as malformed data.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPresentation(_) | Self::NoCursorHistory)
    }
}

/// Refusal reported by an [`AnimationHost`](crate::host::AnimationHost)
/// when it cannot dispatch an animation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("unknown target `{0}`")]
    UnknownTarget(String),

    #[error("unknown executor `{0}`")]
    UnknownExecutor(String),

    #[error("host refused dispatch: {0}")]
    Refused(String),
}
