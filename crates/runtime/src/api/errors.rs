//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejections from the combat engine and the action manager, slot
//! channel failures and serialization so clients can bubble them up with
//! consistent context.
use hexbound_core::{
    ActionError, CombatError, ErrorSeverity, GameError, TransitionPhaseError, UndoError,
};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::events::SlotRequestId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Action(#[from] TransitionPhaseError<ActionError>),

    #[error(transparent)]
    Undo(#[from] UndoError),

    #[error("bestiary has no enemy of kind {0:?}")]
    UnknownEnemyKind(String),

    #[error("{0} is not pending")]
    UnknownSlotRequest(SlotRequestId),

    #[error("slot reply channel closed")]
    SlotChannelClosed(#[source] oneshot::error::RecvError),

    #[error("{0} was dropped before it was answered")]
    SlotRequestDropped(SlotRequestId),

    #[error("roster serialization failed")]
    Serialization(#[from] serde_json::Error),

    /// Content loaders report through `anyhow`; the chain is flattened here.
    #[error("failed to load content: {0}")]
    Content(String),

    #[error("invalid runtime configuration: {0}")]
    InvalidConfig(String),

    #[error("presenter failed: {0}")]
    Presentation(String),

    #[error("presenter did not finish within {0:?}")]
    PresentationTimeout(std::time::Duration),
}

impl RuntimeError {
    pub fn content(error: anyhow::Error) -> Self {
        RuntimeError::Content(format!("{error:#}"))
    }

    /// True when the error is a rejected engine or action call that left all
    /// state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RuntimeError::Combat(_) | RuntimeError::Action(_) | RuntimeError::Undo(_)
        ) && self.severity() != ErrorSeverity::Internal
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Combat(error) => error.severity(),
            RuntimeError::Action(error) => error.severity(),
            RuntimeError::Undo(error) => error.severity(),
            RuntimeError::UnknownEnemyKind(_)
            | RuntimeError::UnknownSlotRequest(_)
            | RuntimeError::InvalidConfig(_) => ErrorSeverity::Validation,
            RuntimeError::SlotRequestDropped(_)
            | RuntimeError::Presentation(_)
            | RuntimeError::PresentationTimeout(_) => ErrorSeverity::Recoverable,
            RuntimeError::SlotChannelClosed(_)
            | RuntimeError::Serialization(_)
            | RuntimeError::Content(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Combat(error) => error.error_code(),
            RuntimeError::Action(error) => error.error_code(),
            RuntimeError::Undo(error) => error.error_code(),
            RuntimeError::UnknownEnemyKind(_) => "RUNTIME_UNKNOWN_ENEMY_KIND",
            RuntimeError::UnknownSlotRequest(_) => "RUNTIME_UNKNOWN_SLOT_REQUEST",
            RuntimeError::SlotChannelClosed(_) => "RUNTIME_SLOT_CHANNEL_CLOSED",
            RuntimeError::SlotRequestDropped(_) => "RUNTIME_SLOT_REQUEST_DROPPED",
            RuntimeError::Serialization(_) => "RUNTIME_SERIALIZATION",
            RuntimeError::Content(_) => "RUNTIME_CONTENT",
            RuntimeError::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            RuntimeError::Presentation(_) => "RUNTIME_PRESENTATION",
            RuntimeError::PresentationTimeout(_) => "RUNTIME_PRESENTATION_TIMEOUT",
        }
    }
}
