//! Values returned by combat operations.

use crate::abilities::{DamageSideEffect, Defender};
use crate::state::{BossAbility, CardId, EnemyId, UnitAbility, UnitId};

use super::phase::CombatPhase;

/// Contribution to the ranged phase pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RangedContribution {
    Ranged(u32),
    /// Siege attacks also reach fortified enemies.
    Siege(u32),
}

/// Result of spending a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitActivation {
    pub unit: UnitId,
    pub ability: UnitAbility,
    pub value: u32,
    /// True when the engine added the value to a pool itself. Otherwise the
    /// caller commits it through `block_enemy` or `attack_enemies`.
    pub pooled: bool,
}

/// A boss threshold that fired.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossTransition {
    pub boss: EnemyId,
    pub threshold: u8,
    pub ability: BossAbility,
    /// Enemy called in by a summon ability.
    pub summoned: Option<EnemyId>,
}

/// Result of resolving attack points against the enemy set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResolution {
    pub defeated: Vec<EnemyId>,
    pub fame_gained: u32,
    /// Bosses that took health damage, with the amount.
    pub boss_damage: Vec<(EnemyId, u32)>,
    pub boss_transitions: Vec<BossTransition>,
    /// Points that found no target.
    pub unspent: u32,
    pub phase: CombatPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BlockStatus {
    Blocked,
    Insufficient,
    AlreadyBlocked,
    /// Elusive enemies only accept one block attempt per combat.
    ElusiveAttemptSpent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockOutcome {
    pub enemy: EnemyId,
    /// True only when this call blocked the enemy.
    pub blocked: bool,
    pub status: BlockStatus,
    pub required: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CumbersomeReduction {
    pub enemy: EnemyId,
    /// Movement points actually spent.
    pub spent: u32,
    /// Effective attack after the reduction.
    pub attack: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummonReport {
    pub summoner: EnemyId,
    pub enemy: EnemyId,
}

/// One unblocked enemy striking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStrike {
    pub enemy: EnemyId,
    pub defender: Defender,
    pub attack: u32,
    pub wounds: u32,
    pub side_effects: Vec<DamageSideEffect>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    pub wounds: u32,
    pub strikes: Vec<EnemyStrike>,
    /// Unblocked enemies that could not strike because they are frozen.
    pub frozen: Vec<EnemyId>,
    pub units_wounded: Vec<UnitId>,
    pub discarded: Vec<CardId>,
    pub poison_applied: u8,
}

/// Final result of a combat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSummary {
    /// Every enemy was defeated.
    pub victory: bool,
    pub defeated: Vec<EnemyId>,
    /// Wounds from strikes, burn and end-of-combat poison.
    pub wounds_taken: u32,
    pub fame_gained: u32,
}

/// Preview of the rest of a combat given planned totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomePrediction {
    pub expected_wounds: u32,
    pub would_defeat: Vec<EnemyId>,
    pub would_block: Vec<EnemyId>,
    /// The hero will end the combat poisoned.
    pub poison_warning: bool,
}
