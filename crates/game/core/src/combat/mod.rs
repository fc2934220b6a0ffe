//! Combat resolution.
//!
//! A combat runs `Ranged → Block → Damage → Attack → Complete` and never
//! goes back. The ranged phase is skipped when the hero has nothing that
//! could reach an enemy at range. See [`CombatEngine`] for the operations
//! allowed in each phase.
mod allocation;
mod engine;
mod error;
mod phase;
mod result;
mod state;

pub use engine::CombatEngine;
pub use error::CombatError;
pub use phase::CombatPhase;
pub use result::{
    AttackResolution, BlockOutcome, BlockStatus, BossTransition, CombatSummary,
    CumbersomeReduction, DamageReport, EnemyStrike, OutcomePrediction, RangedContribution,
    SummonReport, UnitActivation,
};
pub use state::{Combat, CombatTotals, EnemyBookkeeping};
