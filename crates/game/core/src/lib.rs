//! Deterministic combat and action rules for hexbound.
//!
//! `hexbound-core` defines the canonical rules (combat phases, enemy
//! abilities, status effects, reversible actions) and exposes pure APIs that
//! the runtime and offline tools reuse. Combat state is only mutated through
//! [`combat::CombatEngine`], out-of-combat state through
//! [`action::ActionManager`]; [`session::GameSession`] ties both to one
//! [`state::GameState`].
pub mod abilities;
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod session;
pub mod state;
pub mod status;

pub use abilities::{CombatModifiers, DamageResolution, DamageSideEffect, Defender};
pub use action::{
    ActionCheckpoint, ActionError, ActionKind, ActionManager, ActionResult, ActionTransition,
    Explore, MoveHero, PlayCard, TakeMana, TransitionPhase, TransitionPhaseError, UndoError,
};
pub use combat::{
    AttackResolution, BlockOutcome, BlockStatus, BossTransition, Combat, CombatEngine,
    CombatError, CombatPhase, CombatSummary, CombatTotals, CumbersomeReduction, DamageReport,
    EnemyBookkeeping, EnemyStrike, OutcomePrediction, RangedContribution, SummonReport,
    UnitActivation,
};
pub use config::{AssassinPolicy, CombatRules, GameConfig, PoisonMode, VampiricPolicy};
pub use env::{Bestiary, StaticBestiary};
pub use error::{ErrorSeverity, GameError};
pub use events::{
    EventLog, EventSink, GameEvent, HistoryClearReason, NullSink, UndoRejection,
};
pub use session::GameSession;
pub use state::{
    AttackType, BossAbility, BossProfile, Card, CardEffect, CardId, Combatant, CombatantKind,
    DieId, Enemy, EnemyBlueprint, EnemyId, EnemyRank, EnemySnapshot, EnemyTraits, GameState,
    Hero, HeroPoints, HexCoord, HexGrid, ManaColor, ManaDie, PhaseThreshold, PlayMode,
    Resistances, ResourcePool, SidewaysAs, Terrain, Unit, UnitAbility, UnitId, rehydrate_roster,
};
pub use status::{
    Duration, EffectSet, EffectTarget, Removal, StatusClock, StatusEffect, StatusEffectKind,
    StatusEffectManager, StatusError, StatusOutcome, TickReport,
};
