pub mod card;
pub mod combatant;
pub mod common;
pub mod enemy;
pub mod hero;
pub mod map;
pub mod pool;

pub use card::{Card, CardEffect, ManaColor, PlayMode, SidewaysAs};
pub use combatant::{Combatant, CombatantKind};
pub use common::{CardId, DieId, EnemyId, HexCoord, UnitId};
pub use enemy::{
    AttackType, BossAbility, BossProfile, Enemy, EnemyBlueprint, EnemyRank, EnemySnapshot,
    EnemyTraits, PhaseThreshold, Resistances, rehydrate_roster,
};
pub use hero::{Hero, HeroPoints, Unit, UnitAbility};
pub use map::{HexGrid, Terrain};
pub use pool::{ManaDie, ResourcePool};
