//! Authoritative out-of-combat game state.
//!
//! The hero, the resource pool and the revealed map are mutated by the
//! action manager (reversible actions, exploration) and by the combat engine
//! (wounds, fame, units). Presentation layers only read it.
pub mod types;

pub use types::{
    AttackType, BossAbility, BossProfile, Card, CardEffect, CardId, Combatant, CombatantKind,
    DieId, Enemy, EnemyBlueprint, EnemyId, EnemyRank, EnemySnapshot, EnemyTraits, Hero,
    HeroPoints, HexCoord, HexGrid, ManaColor, ManaDie, PhaseThreshold, PlayMode, Resistances,
    ResourcePool, SidewaysAs, Terrain, Unit, UnitAbility, UnitId, rehydrate_roster,
};

/// Canonical state of one game session outside the combat engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub hero: Hero,
    pub pool: ResourcePool,
    pub map: HexGrid,
}

impl GameState {
    pub fn new(hero: Hero, pool: ResourcePool, map: HexGrid) -> Self {
        Self { hero, pool, map }
    }
}
