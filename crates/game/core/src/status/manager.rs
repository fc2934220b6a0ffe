//! Owner of every effect set in a combat.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Enemy, EnemyId, Hero};

use super::effect::{EffectSet, StatusClock, StatusEffect, StatusEffectKind};

/// Who carries an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectTarget {
    Hero,
    Enemy(EnemyId),
}

impl core::fmt::Display for EffectTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EffectTarget::Hero => f.write_str("hero"),
            EffectTarget::Enemy(id) => write!(f, "{id}"),
        }
    }
}

/// Successful application of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusOutcome {
    /// New effect with one stack.
    Applied,
    /// Existing effect gained a stack; duration refreshed.
    Stacked { stacks: u8 },
}

impl StatusOutcome {
    pub const fn stacks(self) -> u8 {
        match self {
            StatusOutcome::Applied => 1,
            StatusOutcome::Stacked { stacks } => stacks,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusError {
    #[error("{kind} is already at its cap of {max} stacks")]
    AtStackCap { kind: StatusEffectKind, max: u8 },

    #[error("{kind} does not stack")]
    NotStackable { kind: StatusEffectKind },

    #[error("cannot carry more than {limit} effects")]
    EffectLimit { limit: usize },
}

impl GameError for StatusError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            StatusError::AtStackCap { .. } => "STATUS_AT_STACK_CAP",
            StatusError::NotStackable { .. } => "STATUS_NOT_STACKABLE",
            StatusError::EffectLimit { .. } => "STATUS_EFFECT_LIMIT",
        }
    }
}

/// An explicitly removed effect and whatever its removal hook added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Removal {
    pub effect: StatusEffect,
    /// Follow-up effect and its stacks after application. `None` when the
    /// kind has no hook or the follow-up could not be applied.
    pub applied: Option<(StatusEffectKind, u8)>,
}

/// What a tick did to one bearer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub target: Option<EffectTarget>,
    /// Burn damage dealt.
    pub damage: u32,
    /// Wounds the hero took from that damage.
    pub wounds: u32,
    /// Wounds (hero) or health (boss) restored by regeneration.
    pub healed: u32,
    pub expired: Vec<StatusEffectKind>,
    /// Effects added by removal hooks.
    pub applied: Vec<StatusEffectKind>,
}

impl TickReport {
    fn for_target(target: EffectTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }
}

/// Stacking and duration bookkeeping for the hero and every enemy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectManager {
    hero: EffectSet,
    enemies: BTreeMap<EnemyId, EffectSet>,
}

impl StatusEffectManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hero_effects(&self) -> &EffectSet {
        &self.hero
    }

    pub fn enemy_effects(&self, enemy: EnemyId) -> Option<&EffectSet> {
        self.enemies.get(&enemy)
    }

    pub fn hero_stacks(&self, kind: StatusEffectKind) -> u8 {
        self.hero.stacks(kind)
    }

    pub fn enemy_stacks(&self, enemy: EnemyId, kind: StatusEffectKind) -> u8 {
        self.enemies.get(&enemy).map_or(0, |set| set.stacks(kind))
    }

    pub fn apply_to_hero(&mut self, kind: StatusEffectKind) -> Result<StatusOutcome, StatusError> {
        apply(&mut self.hero, kind)
    }

    pub fn apply_to_enemy(
        &mut self,
        enemy: EnemyId,
        kind: StatusEffectKind,
    ) -> Result<StatusOutcome, StatusError> {
        let set = self.enemies.entry(enemy).or_default();
        let outcome = apply(set, kind);
        if set.is_empty() {
            self.enemies.remove(&enemy);
        }
        outcome
    }

    /// Runs burn and regeneration on the hero, then ages its effects.
    ///
    /// Returns `None` when the hero carries no effects.
    pub fn process_hero_phase_start(&mut self, hero: &mut Hero) -> Option<TickReport> {
        if self.hero.is_empty() {
            return None;
        }
        let mut report = TickReport::for_target(EffectTarget::Hero);

        let burn = u32::from(self.hero.stacks(StatusEffectKind::Burn));
        if burn > 0 {
            let wounds = burn.div_ceil(hero.armor.max(1));
            hero.take_wounds(wounds);
            report.damage = burn;
            report.wounds = wounds;
        }

        let regeneration = u32::from(self.hero.stacks(StatusEffectKind::Regeneration));
        if regeneration > 0 {
            report.healed = hero.heal_wounds(regeneration);
        }

        age(&mut self.hero, &mut report);
        Some(report)
    }

    /// Runs burn and regeneration on every enemy carrying effects, then ages
    /// their effects. Enemies without effects produce no report.
    pub fn process_enemy_phase_start(&mut self, enemies: &mut [Enemy]) -> Vec<TickReport> {
        let mut reports = Vec::new();
        for enemy in enemies.iter_mut() {
            let Some(set) = self.enemies.get_mut(&enemy.id) else {
                continue;
            };
            let mut report = TickReport::for_target(EffectTarget::Enemy(enemy.id));

            let burn = u32::from(set.stacks(StatusEffectKind::Burn));
            if burn > 0 {
                report.damage = enemy.take_damage(burn);
            }
            let regeneration = u32::from(set.stacks(StatusEffectKind::Regeneration));
            if regeneration > 0 {
                report.healed = enemy.heal(regeneration);
            }

            age(set, &mut report);
            if set.is_empty() {
                self.enemies.remove(&enemy.id);
            }
            reports.push(report);
        }
        reports
    }

    /// Ages the effects that count down when the damage phase resolves, on
    /// the hero first and then on every enemy. Bearers whose effects did not
    /// change produce no report.
    pub fn process_damage_resolved(&mut self) -> Vec<TickReport> {
        let mut reports = Vec::new();

        let mut report = TickReport::for_target(EffectTarget::Hero);
        age_on(&mut self.hero, StatusClock::DamageResolved, &mut report);
        if !report.expired.is_empty() {
            reports.push(report);
        }

        self.enemies.retain(|id, set| {
            let mut report = TickReport::for_target(EffectTarget::Enemy(*id));
            age_on(set, StatusClock::DamageResolved, &mut report);
            if !report.expired.is_empty() {
                reports.push(report);
            }
            !set.is_empty()
        });
        reports
    }

    /// Converts remaining poison into wounds (one per stack) and drops
    /// combat-scoped hero effects. Removal hooks do not run.
    pub fn process_combat_end(&mut self, hero: &mut Hero) -> u32 {
        let wounds = u32::from(self.hero.stacks(StatusEffectKind::Poison));
        hero.take_wounds(wounds);
        self.hero.clear_combat_scoped();
        wounds
    }

    /// Removes an effect from the hero, running its removal hook.
    pub fn remove_from_hero(&mut self, kind: StatusEffectKind) -> Option<Removal> {
        remove(&mut self.hero, kind)
    }

    /// Removes an effect from an enemy, running its removal hook.
    pub fn remove_from_enemy(&mut self, enemy: EnemyId, kind: StatusEffectKind) -> Option<Removal> {
        let set = self.enemies.get_mut(&enemy)?;
        let removal = remove(set, kind);
        if set.is_empty() {
            self.enemies.remove(&enemy);
        }
        removal
    }

    /// Drops the effect set of an enemy that left the combat.
    pub fn forget_enemy(&mut self, enemy: EnemyId) {
        self.enemies.remove(&enemy);
    }

    /// Wipes the hero and every enemy set. No hooks run.
    pub fn clear(&mut self) {
        self.hero.clear();
        self.enemies.clear();
    }

    /// Wipes every enemy set. No hooks run.
    pub fn clear_enemies(&mut self) {
        self.enemies.clear();
    }
}

fn apply(set: &mut EffectSet, kind: StatusEffectKind) -> Result<StatusOutcome, StatusError> {
    let definition = kind.definition();
    if let Some(existing) = set.get_mut(kind) {
        if !existing.stackable {
            return Err(StatusError::NotStackable { kind });
        }
        if existing.stacks >= definition.max_stacks {
            return Err(StatusError::AtStackCap {
                kind,
                max: definition.max_stacks,
            });
        }
        existing.stacks += 1;
        existing.remaining = definition.duration;
        return Ok(StatusOutcome::Stacked {
            stacks: existing.stacks,
        });
    }

    set.push(StatusEffect::new(kind))
        .map_err(|_| StatusError::EffectLimit {
            limit: GameConfig::MAX_STATUS_EFFECTS,
        })?;
    Ok(StatusOutcome::Applied)
}

fn remove(set: &mut EffectSet, kind: StatusEffectKind) -> Option<Removal> {
    let effect = set.remove(kind)?;
    let applied = kind.on_remove().and_then(|follow_up| {
        apply(set, follow_up)
            .ok()
            .map(|outcome| (follow_up, outcome.stacks()))
    });
    Some(Removal { effect, applied })
}

fn age(set: &mut EffectSet, report: &mut TickReport) {
    age_on(set, StatusClock::PhaseStart, report);
}

fn age_on(set: &mut EffectSet, clock: StatusClock, report: &mut TickReport) {
    for expired in set.tick(clock) {
        report.expired.push(expired.kind);
        let Some(follow_up) = expired.kind.on_remove() else {
            continue;
        };
        if apply(set, follow_up).is_ok() {
            report.applied.push(follow_up);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BossProfile, EnemyBlueprint, HexCoord};
    use crate::status::Duration;

    #[test]
    fn stacking_refreshes_duration_and_stops_at_cap() {
        let mut manager = StatusEffectManager::new();
        let mut hero = Hero::default();

        assert_eq!(
            manager.apply_to_hero(StatusEffectKind::Burn),
            Ok(StatusOutcome::Applied)
        );
        manager.process_hero_phase_start(&mut hero);
        assert_eq!(
            manager.apply_to_hero(StatusEffectKind::Burn),
            Ok(StatusOutcome::Stacked { stacks: 2 })
        );
        let burn = manager.hero_effects().get(StatusEffectKind::Burn).copied();
        assert_eq!(burn.map(|e| e.remaining), Some(Duration::Turns(2)));

        manager.apply_to_hero(StatusEffectKind::Burn).unwrap();
        let before = manager.clone();
        assert_eq!(
            manager.apply_to_hero(StatusEffectKind::Burn),
            Err(StatusError::AtStackCap {
                kind: StatusEffectKind::Burn,
                max: 3
            })
        );
        assert_eq!(manager, before);
    }

    #[test]
    fn non_stackable_rejects_second_application() {
        let mut manager = StatusEffectManager::new();
        manager.apply_to_enemy(EnemyId(1), StatusEffectKind::Frozen).unwrap();
        assert_eq!(
            manager.apply_to_enemy(EnemyId(1), StatusEffectKind::Frozen),
            Err(StatusError::NotStackable {
                kind: StatusEffectKind::Frozen
            })
        );
    }

    #[test]
    fn hero_burn_wounds_against_armor() {
        let mut manager = StatusEffectManager::new();
        let mut hero = Hero::default().with_armor(2);
        for _ in 0..3 {
            manager.apply_to_hero(StatusEffectKind::Burn).unwrap();
        }

        let report = manager.process_hero_phase_start(&mut hero).unwrap();

        assert_eq!(report.damage, 3);
        assert_eq!(report.wounds, 2);
        assert_eq!(hero.wounds, 2);
    }

    #[test]
    fn regeneration_heals_boss_health() {
        let mut manager = StatusEffectManager::new();
        let mut boss = EnemyBlueprint::new("dragon", 4, 5, 8)
            .with_boss(BossProfile::new(10, Vec::new()))
            .spawn(EnemyId(3), Some(HexCoord::ORIGIN));
        boss.take_damage(4);
        manager.apply_to_enemy(boss.id, StatusEffectKind::Regeneration).unwrap();

        let reports = manager.process_enemy_phase_start(std::slice::from_mut(&mut boss));

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].healed, 1);
        assert_eq!(boss.boss().map(|b| b.current_health), Some(7));
    }

    #[test]
    fn enraged_expiry_leaves_weakened() {
        let mut manager = StatusEffectManager::new();
        let mut enemy = EnemyBlueprint::new("orc", 3, 3, 2).spawn(EnemyId(1), None);
        manager.apply_to_enemy(enemy.id, StatusEffectKind::Enraged).unwrap();

        manager.process_enemy_phase_start(std::slice::from_mut(&mut enemy));
        let reports = manager.process_enemy_phase_start(std::slice::from_mut(&mut enemy));

        assert_eq!(reports[0].expired, vec![StatusEffectKind::Enraged]);
        assert_eq!(reports[0].applied, vec![StatusEffectKind::Weakened]);
        assert_eq!(manager.enemy_stacks(enemy.id, StatusEffectKind::Weakened), 1);
    }

    #[test]
    fn explicit_removal_runs_hook_but_clear_does_not() {
        let mut manager = StatusEffectManager::new();
        manager.apply_to_hero(StatusEffectKind::Enraged).unwrap();
        let removal = manager.remove_from_hero(StatusEffectKind::Enraged).unwrap();
        assert_eq!(removal.effect.kind, StatusEffectKind::Enraged);
        assert_eq!(removal.applied, Some((StatusEffectKind::Weakened, 1)));
        assert!(manager.hero_effects().contains(StatusEffectKind::Weakened));

        manager.apply_to_enemy(EnemyId(2), StatusEffectKind::Enraged).unwrap();
        manager.clear();
        assert!(manager.hero_effects().is_empty());
        assert!(manager.enemy_effects(EnemyId(2)).is_none());
    }

    #[test]
    fn removal_reports_stacked_follow_up_and_skips_capped_one() {
        let mut manager = StatusEffectManager::new();
        manager.apply_to_enemy(EnemyId(4), StatusEffectKind::Weakened).unwrap();
        manager.apply_to_enemy(EnemyId(4), StatusEffectKind::Enraged).unwrap();

        let removal = manager
            .remove_from_enemy(EnemyId(4), StatusEffectKind::Enraged)
            .unwrap();
        assert_eq!(removal.applied, Some((StatusEffectKind::Weakened, 2)));

        manager.apply_to_enemy(EnemyId(4), StatusEffectKind::Weakened).unwrap();
        manager.apply_to_enemy(EnemyId(4), StatusEffectKind::Enraged).unwrap();
        let removal = manager
            .remove_from_enemy(EnemyId(4), StatusEffectKind::Enraged)
            .unwrap();
        assert_eq!(removal.applied, None);
        assert_eq!(manager.enemy_stacks(EnemyId(4), StatusEffectKind::Weakened), 3);

        assert!(
            manager
                .remove_from_enemy(EnemyId(4), StatusEffectKind::Sundered)
                .is_none()
        );
    }

    #[test]
    fn damage_resolution_expires_block_protections_only() {
        let mut manager = StatusEffectManager::new();
        let mut hero = Hero::default();
        manager.apply_to_hero(StatusEffectKind::Shielded).unwrap();
        manager.apply_to_enemy(EnemyId(1), StatusEffectKind::Frozen).unwrap();
        manager.apply_to_enemy(EnemyId(2), StatusEffectKind::Frozen).unwrap();
        manager.apply_to_enemy(EnemyId(2), StatusEffectKind::Sundered).unwrap();

        let report = manager.process_hero_phase_start(&mut hero).unwrap();
        assert!(report.expired.is_empty());
        assert!(manager.hero_effects().contains(StatusEffectKind::Shielded));

        let reports = manager.process_damage_resolved();

        let targets: Vec<_> = reports.iter().map(|r| r.target).collect();
        assert_eq!(
            targets,
            vec![
                Some(EffectTarget::Hero),
                Some(EffectTarget::Enemy(EnemyId(1))),
                Some(EffectTarget::Enemy(EnemyId(2))),
            ]
        );
        assert!(manager.hero_effects().is_empty());
        assert!(manager.enemy_effects(EnemyId(1)).is_none());
        assert_eq!(manager.enemy_stacks(EnemyId(2), StatusEffectKind::Sundered), 1);
        assert_eq!(manager.enemy_stacks(EnemyId(2), StatusEffectKind::Frozen), 0);
    }

    #[test]
    fn poison_converts_to_wounds_at_combat_end() {
        let mut manager = StatusEffectManager::new();
        let mut hero = Hero::default();
        manager.apply_to_hero(StatusEffectKind::Poison).unwrap();
        manager.apply_to_hero(StatusEffectKind::Poison).unwrap();
        manager.apply_to_hero(StatusEffectKind::Regeneration).unwrap();

        assert_eq!(manager.process_combat_end(&mut hero), 2);
        assert_eq!(hero.wounds, 2);
        assert!(!manager.hero_effects().contains(StatusEffectKind::Poison));
        assert!(manager.hero_effects().contains(StatusEffectKind::Regeneration));
    }

    #[test]
    fn every_kind_fits_in_one_set() {
        use strum::IntoEnumIterator;

        let mut manager = StatusEffectManager::new();
        for kind in StatusEffectKind::iter() {
            manager.apply_to_hero(kind).unwrap();
        }
        assert_eq!(manager.hero_effects().len(), GameConfig::MAX_STATUS_EFFECTS);
    }
}
