use crate::error::{ErrorSeverity, GameError};
use crate::state::{CardId, DieId, HexCoord, ManaColor};

/// Precondition failures of out-of-combat actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("actions are locked while a combat is active")]
    CombatActive,

    #[error("need {required} movement, have {available}")]
    InsufficientMovement { required: u32, available: u32 },

    #[error("hex {0} is unrevealed or impassable")]
    InvalidHex(HexCoord),

    #[error("hex {to} is not adjacent to {from}")]
    HexNotAdjacent { from: HexCoord, to: HexCoord },

    #[error("{0} is not in hand")]
    CardNotInHand(CardId),

    #[error("wound {0} cannot be played")]
    WoundNotPlayable(CardId),

    #[error("no mana token can power a {color:?} card")]
    InsufficientMana { color: Option<ManaColor> },

    #[error("{0} is unknown or already used")]
    DieUnavailable(DieId),

    #[error("already took {limit} dice this turn")]
    DiceLimitReached { limit: u32 },

    #[error("no tiles to explore")]
    NothingToExplore,

    #[error("hex {0} is already revealed")]
    TileAlreadyRevealed(HexCoord),

    #[error("post-condition violated: {0}")]
    PostCondition(&'static str),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            CombatActive | InsufficientMovement { .. } | InsufficientMana { .. } => {
                ErrorSeverity::Recoverable
            }
            DieUnavailable(_) | DiceLimitReached { .. } => ErrorSeverity::Recoverable,
            InvalidHex(_) | HexNotAdjacent { .. } | TileAlreadyRevealed(_) => {
                ErrorSeverity::Validation
            }
            CardNotInHand(_) | WoundNotPlayable(_) | NothingToExplore => ErrorSeverity::Validation,
            PostCondition(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            CombatActive => "ACTION_COMBAT_ACTIVE",
            InsufficientMovement { .. } => "ACTION_INSUFFICIENT_MOVEMENT",
            InvalidHex(_) => "ACTION_INVALID_HEX",
            HexNotAdjacent { .. } => "ACTION_HEX_NOT_ADJACENT",
            CardNotInHand(_) => "ACTION_CARD_NOT_IN_HAND",
            WoundNotPlayable(_) => "ACTION_WOUND_NOT_PLAYABLE",
            InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            DieUnavailable(_) => "ACTION_DIE_UNAVAILABLE",
            DiceLimitReached { .. } => "ACTION_DICE_LIMIT_REACHED",
            NothingToExplore => "ACTION_NOTHING_TO_EXPLORE",
            TileAlreadyRevealed(_) => "ACTION_TILE_ALREADY_REVEALED",
            PostCondition(_) => "ACTION_POST_CONDITION",
        }
    }
}

/// Why an undo request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UndoError {
    #[error("nothing to undo")]
    EmptyHistory,

    /// The request also discarded `cleared` checkpoints.
    #[error("cannot undo during combat ({cleared} checkpoints discarded)")]
    CombatActive { cleared: usize },
}

impl GameError for UndoError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            UndoError::EmptyHistory => "UNDO_EMPTY_HISTORY",
            UndoError::CombatActive { .. } => "UNDO_COMBAT_ACTIVE",
        }
    }
}
