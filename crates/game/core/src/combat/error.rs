use crate::error::{ErrorSeverity, GameError};
use crate::state::{EnemyId, UnitAbility, UnitId};
use crate::status::StatusError;

use super::phase::CombatPhase;

/// Errors returned by [`super::CombatEngine`]. A rejected call never mutates
/// the combat, the hero or any effect set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("{operation} requires the {expected} phase (currently {actual})")]
    InvalidPhase {
        operation: &'static str,
        expected: CombatPhase,
        actual: CombatPhase,
    },

    #[error("no combat is active")]
    NotInCombat,

    #[error("a combat is already active")]
    CombatAlreadyActive,

    #[error("{0} is not in the active enemy set")]
    EnemyNotFound(EnemyId),

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is spent or wounded")]
    UnitNotReady(UnitId),

    #[error("unit {unit} cannot use {ability:?} during the {phase} phase")]
    UnitAbilityNotUsable {
        unit: UnitId,
        ability: UnitAbility,
        phase: CombatPhase,
    },

    #[error("{0} is not cumbersome")]
    NotCumbersome(EnemyId),

    #[error("need {required} movement, have {available}")]
    InsufficientMovement { required: u32, available: u32 },

    #[error("a combat needs at least one enemy")]
    NoEnemies,

    #[error("a combat holds at most {limit} enemies (got {count})")]
    TooManyEnemies { count: usize, limit: usize },

    #[error("{0} appears more than once")]
    DuplicateEnemy(EnemyId),

    #[error(transparent)]
    Status(#[from] StatusError),
}

impl CombatError {
    pub(crate) fn invalid_phase(
        operation: &'static str,
        expected: CombatPhase,
        actual: CombatPhase,
    ) -> Self {
        CombatError::InvalidPhase {
            operation,
            expected,
            actual,
        }
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            InvalidPhase { .. } | NotInCombat | CombatAlreadyActive => ErrorSeverity::Validation,
            EnemyNotFound(_) | UnitNotFound(_) | NoEnemies | TooManyEnemies { .. } => {
                ErrorSeverity::Validation
            }
            DuplicateEnemy(_) => ErrorSeverity::Validation,
            UnitNotReady(_) | UnitAbilityNotUsable { .. } | NotCumbersome(_) => {
                ErrorSeverity::Validation
            }
            InsufficientMovement { .. } => ErrorSeverity::Recoverable,
            Status(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            InvalidPhase { .. } => "COMBAT_INVALID_PHASE",
            NotInCombat => "COMBAT_NOT_IN_COMBAT",
            CombatAlreadyActive => "COMBAT_ALREADY_ACTIVE",
            EnemyNotFound(_) => "COMBAT_ENEMY_NOT_FOUND",
            UnitNotFound(_) => "COMBAT_UNIT_NOT_FOUND",
            UnitNotReady(_) => "COMBAT_UNIT_NOT_READY",
            UnitAbilityNotUsable { .. } => "COMBAT_UNIT_ABILITY_NOT_USABLE",
            NotCumbersome(_) => "COMBAT_NOT_CUMBERSOME",
            InsufficientMovement { .. } => "COMBAT_INSUFFICIENT_MOVEMENT",
            NoEnemies => "COMBAT_NO_ENEMIES",
            TooManyEnemies { .. } => "COMBAT_TOO_MANY_ENEMIES",
            DuplicateEnemy(_) => "COMBAT_DUPLICATE_ENEMY",
            Status(error) => error.error_code(),
        }
    }
}
