//! Enemy tokens, boss profiles and the persistence snapshot shape.

use bitflags::bitflags;

use super::common::{EnemyId, HexCoord};

bitflags! {
    /// Special abilities printed on an enemy token.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EnemyTraits: u16 {
        const FORTIFIED  = 1 << 0;
        const SWIFT      = 1 << 1;
        const POISON     = 1 << 2;
        const VAMPIRIC   = 1 << 3;
        const BRUTAL     = 1 << 4;
        const PARALYZE   = 1 << 5;
        const CUMBERSOME = 1 << 6;
        const ASSASSIN   = 1 << 7;
        const SUMMONER   = 1 << 8;
        const ELUSIVE    = 1 << 9;
    }
}

bitflags! {
    /// Attack elements an enemy resists.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Resistances: u8 {
        const PHYSICAL = 1 << 0;
        const FIRE     = 1 << 1;
        const ICE      = 1 << 2;
    }
}

/// Element of an attack, for both enemies and the hero.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackType {
    #[default]
    Physical,
    Fire,
    Ice,
    ColdFire,
}

impl AttackType {
    /// Returns true if an enemy with `resistances` halves this attack.
    ///
    /// Cold fire is only resisted by enemies resisting both fire and ice.
    pub fn is_resisted_by(self, resistances: Resistances) -> bool {
        match self {
            AttackType::Physical => resistances.contains(Resistances::PHYSICAL),
            AttackType::Fire => resistances.contains(Resistances::FIRE),
            AttackType::Ice => resistances.contains(Resistances::ICE),
            AttackType::ColdFire => resistances.contains(Resistances::FIRE | Resistances::ICE),
        }
    }
}

/// Ability a boss executes when its health drops to a threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BossAbility {
    /// Calls a new enemy into the fight.
    Summon(Box<EnemyBlueprint>),
    /// Attack increases for the rest of the combat.
    Enrage { attack_bonus: u32 },
    /// Gains the fortified trait.
    Fortify,
    /// Recovers health, capped at maximum.
    Heal { amount: u32 },
    /// Armor increases for the rest of the combat.
    Harden { armor_bonus: u32 },
}

/// Health-percent boundary that triggers a boss ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseThreshold {
    /// Fires once health is at or below this percentage of maximum.
    pub percent: u8,
    pub ability: BossAbility,
}

/// Health track and phase table of a boss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossProfile {
    pub max_health: u32,
    pub current_health: u32,
    pub thresholds: Vec<PhaseThreshold>,
}

impl BossProfile {
    pub fn new(max_health: u32, mut thresholds: Vec<PhaseThreshold>) -> Self {
        thresholds.sort_by(|a, b| b.percent.cmp(&a.percent));
        Self {
            max_health,
            current_health: max_health,
            thresholds,
        }
    }

    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.current_health * 100 / self.max_health
    }
}

/// Regular enemy or boss.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnemyRank {
    #[default]
    Regular,
    Boss(BossProfile),
}

/// Static definition an enemy is spawned from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyBlueprint {
    pub kind: String,
    pub armor: u32,
    pub attack: u32,
    pub attack_type: AttackType,
    pub fame: u32,
    pub traits: EnemyTraits,
    pub resistances: Resistances,
    pub summons: Option<Box<EnemyBlueprint>>,
    pub rank: EnemyRank,
}

impl EnemyBlueprint {
    pub fn new(kind: impl Into<String>, armor: u32, attack: u32, fame: u32) -> Self {
        Self {
            kind: kind.into(),
            armor,
            attack,
            fame,
            ..Self::default()
        }
    }

    pub fn with_traits(mut self, traits: EnemyTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_attack_type(mut self, attack_type: AttackType) -> Self {
        self.attack_type = attack_type;
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_summons(mut self, summons: EnemyBlueprint) -> Self {
        self.summons = Some(Box::new(summons));
        self
    }

    pub fn with_boss(mut self, profile: BossProfile) -> Self {
        self.rank = EnemyRank::Boss(profile);
        self
    }

    pub fn spawn(&self, id: EnemyId, position: Option<HexCoord>) -> Enemy {
        Enemy {
            id,
            kind: self.kind.clone(),
            position,
            armor: self.armor,
            attack: self.attack,
            attack_type: self.attack_type,
            fame: self.fame,
            traits: self.traits,
            resistances: self.resistances,
            summons: self.summons.clone(),
            rank: self.rank.clone(),
        }
    }
}

impl Default for EnemyBlueprint {
    fn default() -> Self {
        Self {
            kind: String::new(),
            armor: 0,
            attack: 0,
            attack_type: AttackType::Physical,
            fame: 0,
            traits: EnemyTraits::empty(),
            resistances: Resistances::empty(),
            summons: None,
            rank: EnemyRank::Regular,
        }
    }
}

/// An enemy on the map or in combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: String,
    pub position: Option<HexCoord>,
    pub armor: u32,
    pub attack: u32,
    pub attack_type: AttackType,
    pub fame: u32,
    pub traits: EnemyTraits,
    pub resistances: Resistances,
    pub summons: Option<Box<EnemyBlueprint>>,
    pub rank: EnemyRank,
}

impl Enemy {
    pub fn has(&self, trait_flag: EnemyTraits) -> bool {
        self.traits.contains(trait_flag)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.rank, EnemyRank::Boss(_))
    }

    pub fn boss(&self) -> Option<&BossProfile> {
        match &self.rank {
            EnemyRank::Boss(profile) => Some(profile),
            EnemyRank::Regular => None,
        }
    }

    pub fn boss_mut(&mut self) -> Option<&mut BossProfile> {
        match &mut self.rank {
            EnemyRank::Boss(profile) => Some(profile),
            EnemyRank::Regular => None,
        }
    }

    /// Applies non-combat damage (burn). Bosses lose health; regular enemies
    /// lose armor down to a floor of 1.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        match &mut self.rank {
            EnemyRank::Boss(profile) => {
                let dealt = amount.min(profile.current_health);
                profile.current_health -= dealt;
                dealt
            }
            EnemyRank::Regular => {
                let dealt = amount.min(self.armor.saturating_sub(1));
                self.armor -= dealt;
                dealt
            }
        }
    }

    /// Restores boss health. Regular enemies have no health track.
    pub fn heal(&mut self, amount: u32) -> u32 {
        match &mut self.rank {
            EnemyRank::Boss(profile) => {
                let healed = amount.min(profile.max_health.saturating_sub(profile.current_health));
                profile.current_health += healed;
                healed
            }
            EnemyRank::Regular => 0,
        }
    }

    pub fn snapshot(&self, is_alive: bool) -> EnemySnapshot {
        EnemySnapshot {
            kind: self.kind.clone(),
            position: self.position,
            armor: self.armor,
            attack: self.attack,
            fame: self.fame,
            fortified: self.has(EnemyTraits::FORTIFIED),
            is_alive,
        }
    }

    /// Rebuilds an enemy from its persisted shape.
    ///
    /// The snapshot is authoritative for armor, attack, fame, position and
    /// fortification. Everything else comes from the bestiary entry of the
    /// same kind, or physical defaults for unknown kinds.
    pub fn rehydrate(
        id: EnemyId,
        snapshot: &EnemySnapshot,
        bestiary: &(impl crate::env::Bestiary + ?Sized),
    ) -> Enemy {
        let blueprint = bestiary
            .blueprint(&snapshot.kind)
            .unwrap_or_else(|| EnemyBlueprint::new(snapshot.kind.clone(), 0, 0, 0));

        let mut enemy = blueprint.spawn(id, snapshot.position);
        enemy.armor = snapshot.armor;
        enemy.attack = snapshot.attack;
        enemy.fame = snapshot.fame;
        enemy
            .traits
            .set(EnemyTraits::FORTIFIED, snapshot.fortified);
        enemy
    }
}

/// Serializable enemy shape used by save slots.
///
/// Serialized field names are fixed: `type`, `position`, `armor`, `attack`,
/// `fame`, `fortified`, `isAlive`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnemySnapshot {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub position: Option<HexCoord>,
    pub armor: u32,
    pub attack: u32,
    pub fame: u32,
    pub fortified: bool,
    pub is_alive: bool,
}

/// Restores the active enemy set from persisted snapshots.
///
/// Dead entries are skipped; ids are assigned sequentially from `first_id`.
pub fn rehydrate_roster(
    snapshots: &[EnemySnapshot],
    bestiary: &(impl crate::env::Bestiary + ?Sized),
    first_id: EnemyId,
) -> Vec<Enemy> {
    snapshots
        .iter()
        .filter(|snapshot| snapshot.is_alive)
        .enumerate()
        .map(|(offset, snapshot)| {
            Enemy::rehydrate(EnemyId(first_id.0 + offset as u32), snapshot, bestiary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticBestiary;

    #[test]
    fn cold_fire_needs_both_resistances() {
        assert!(!AttackType::ColdFire.is_resisted_by(Resistances::FIRE));
        assert!(AttackType::ColdFire.is_resisted_by(Resistances::FIRE | Resistances::ICE));
        assert!(AttackType::Fire.is_resisted_by(Resistances::FIRE));
        assert!(!AttackType::Physical.is_resisted_by(Resistances::FIRE | Resistances::ICE));
    }

    #[test]
    fn boss_thresholds_sorted_highest_first() {
        let profile = BossProfile::new(
            10,
            vec![
                PhaseThreshold {
                    percent: 25,
                    ability: BossAbility::Fortify,
                },
                PhaseThreshold {
                    percent: 75,
                    ability: BossAbility::Heal { amount: 2 },
                },
            ],
        );
        let percents: Vec<u8> = profile.thresholds.iter().map(|t| t.percent).collect();
        assert_eq!(percents, vec![75, 25]);
    }

    #[test]
    fn regular_enemy_burn_keeps_armor_floor() {
        let mut enemy = EnemyBlueprint::new("orc", 3, 2, 2).spawn(EnemyId(1), None);
        assert_eq!(enemy.take_damage(5), 2);
        assert_eq!(enemy.armor, 1);
    }

    #[test]
    fn rehydrate_prefers_snapshot_stats_and_bestiary_traits() {
        let mut bestiary = StaticBestiary::new();
        bestiary.insert(
            EnemyBlueprint::new("wolf_riders", 4, 3, 3)
                .with_traits(EnemyTraits::SWIFT | EnemyTraits::FORTIFIED),
        );

        let snapshot = EnemySnapshot {
            kind: "wolf_riders".into(),
            position: Some(HexCoord::new(1, 2)),
            armor: 5,
            attack: 3,
            fame: 4,
            fortified: false,
            is_alive: true,
        };
        let enemy = Enemy::rehydrate(EnemyId(7), &snapshot, &bestiary);

        assert_eq!(enemy.armor, 5);
        assert_eq!(enemy.fame, 4);
        assert!(enemy.has(EnemyTraits::SWIFT));
        assert!(!enemy.has(EnemyTraits::FORTIFIED));
        assert_eq!(enemy.snapshot(true), snapshot);
    }

    #[test]
    fn roster_skips_dead_entries() {
        let bestiary = StaticBestiary::new();
        let alive = EnemySnapshot {
            kind: "orc".into(),
            position: None,
            armor: 3,
            attack: 3,
            fame: 2,
            fortified: false,
            is_alive: true,
        };
        let dead = EnemySnapshot {
            is_alive: false,
            ..alive.clone()
        };

        let roster = rehydrate_roster(&[dead, alive.clone(), alive], &bestiary, EnemyId(10));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, EnemyId(10));
        assert_eq!(roster[1].id, EnemyId(11));
    }
}
