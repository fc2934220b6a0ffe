//! The combat phase state machine.
//!
//! [`CombatEngine`] is the only writer of the active [`Combat`] and of the
//! status effect sets. Every operation checks its phase and inputs before
//! touching anything, so a rejected call is a no-op.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::abilities::{self, DamageSideEffect, Defender};
use crate::config::{CombatRules, GameConfig};
use crate::events::{EventSink, GameEvent, NullSink};
use crate::state::{
    AttackType, BossAbility, Combatant, Enemy, EnemyId, EnemySnapshot, EnemyTraits, Hero,
    UnitAbility, UnitId,
};
use crate::status::{
    EffectTarget, Removal, StatusEffectKind, StatusEffectManager, StatusOutcome, TickReport,
};

use super::allocation::{Hit, Pools, Target, allocate};
use super::error::CombatError;
use super::phase::CombatPhase;
use super::result::{
    AttackResolution, BlockOutcome, BlockStatus, BossTransition, CombatSummary,
    CumbersomeReduction, DamageReport, EnemyStrike, OutcomePrediction, RangedContribution,
    SummonReport, UnitActivation,
};
use super::state::{Combat, CombatTotals};

/// Runs one combat at a time for a game session.
pub struct CombatEngine {
    combat: Combat,
    status: StatusEffectManager,
    rules: CombatRules,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for CombatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEngine")
            .field("combat", &self.combat)
            .field("status", &self.status)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(CombatRules::default(), Arc::new(NullSink))
    }
}

impl CombatEngine {
    pub fn new(rules: CombatRules, events: Arc<dyn EventSink>) -> Self {
        Self {
            combat: Combat::default(),
            status: StatusEffectManager::new(),
            rules,
            events,
        }
    }

    // ===== queries =====

    pub fn phase(&self) -> CombatPhase {
        self.combat.phase()
    }

    pub fn is_active(&self) -> bool {
        self.combat.phase().is_active()
    }

    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    pub fn totals(&self) -> CombatTotals {
        self.combat.totals()
    }

    pub fn is_blocked(&self, enemy: EnemyId) -> bool {
        self.combat.is_blocked(enemy)
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.combat.enemies()
    }

    pub fn defeated(&self) -> &[Enemy] {
        self.combat.defeated()
    }

    pub fn status(&self) -> &StatusEffectManager {
        &self.status
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// Persistence shapes of every enemy in this combat, defeated ones last.
    pub fn enemy_snapshots(&self) -> Vec<EnemySnapshot> {
        self.combat
            .enemies()
            .iter()
            .map(|enemy| enemy.snapshot(true))
            .chain(
                self.combat
                    .defeated()
                    .iter()
                    .map(|enemy| enemy.snapshot(false)),
            )
            .collect()
    }

    /// Attack the enemy would strike with right now.
    pub fn effective_attack(&self, enemy: EnemyId) -> Result<u32, CombatError> {
        let target = self.active_enemy(enemy)?;
        Ok(self.attack_of(target))
    }

    /// Block needed to stop the enemy right now.
    pub fn block_requirement(&self, enemy: EnemyId) -> Result<u32, CombatError> {
        let target = self.active_enemy(enemy)?;
        Ok(abilities::block_requirement(
            self.attack_of(target),
            target,
            &self.rules,
        ))
    }

    // ===== status helpers =====

    pub fn apply_hero_status(
        &mut self,
        kind: StatusEffectKind,
    ) -> Result<StatusOutcome, CombatError> {
        let outcome = self.status.apply_to_hero(kind)?;
        self.emit(GameEvent::StatusApplied {
            target: EffectTarget::Hero,
            kind,
            stacks: outcome.stacks(),
        });
        Ok(outcome)
    }

    pub fn apply_enemy_status(
        &mut self,
        enemy: EnemyId,
        kind: StatusEffectKind,
    ) -> Result<StatusOutcome, CombatError> {
        self.active_enemy(enemy)?;
        let outcome = self.status.apply_to_enemy(enemy, kind)?;
        self.emit(GameEvent::StatusApplied {
            target: EffectTarget::Enemy(enemy),
            kind,
            stacks: outcome.stacks(),
        });
        Ok(outcome)
    }

    pub fn remove_hero_status(&mut self, kind: StatusEffectKind) -> Option<Removal> {
        let removal = self.status.remove_from_hero(kind)?;
        self.emit_removal(EffectTarget::Hero, &removal);
        Some(removal)
    }

    pub fn remove_enemy_status(
        &mut self,
        enemy: EnemyId,
        kind: StatusEffectKind,
    ) -> Option<Removal> {
        let removal = self.status.remove_from_enemy(enemy, kind)?;
        self.emit_removal(EffectTarget::Enemy(enemy), &removal);
        Some(removal)
    }

    // ===== phase operations =====

    /// Starts a combat against `enemies` and returns the entry phase.
    ///
    /// The ranged phase is skipped when no enemy could be hurt by the hero's
    /// ranged and siege sources.
    pub fn initiate_combat(
        &mut self,
        hero: &mut Hero,
        enemies: Vec<Enemy>,
    ) -> Result<CombatPhase, CombatError> {
        if self.combat.phase().is_active() {
            return Err(CombatError::CombatAlreadyActive);
        }
        if enemies.is_empty() {
            return Err(CombatError::NoEnemies);
        }
        if enemies.len() > GameConfig::MAX_ENEMIES {
            return Err(CombatError::TooManyEnemies {
                count: enemies.len(),
                limit: GameConfig::MAX_ENEMIES,
            });
        }
        let mut seen = BTreeSet::new();
        if let Some(duplicate) = enemies.iter().find(|enemy| !seen.insert(enemy.id)) {
            return Err(CombatError::DuplicateEnemy(duplicate.id));
        }

        self.status.clear_enemies();
        self.combat = Combat::start(enemies);

        let has_ranged = hero.has_ranged_source();
        let has_siege = hero.has_siege_source();
        let entry = if self
            .combat
            .enemies()
            .iter()
            .any(|enemy| abilities::is_targetable_at_range(enemy, has_ranged, has_siege))
        {
            CombatPhase::Ranged
        } else {
            CombatPhase::Block
        };

        self.emit(GameEvent::CombatStarted {
            enemies: self.combat.enemies().iter().map(|enemy| enemy.id).collect(),
            phase: entry,
        });
        self.enter_phase(hero, entry);
        Ok(self.combat.phase())
    }

    /// Adds a ranged or siege amount to the phase pools.
    pub fn add_ranged(
        &mut self,
        contribution: RangedContribution,
    ) -> Result<CombatTotals, CombatError> {
        self.expect_phase("add_ranged", CombatPhase::Ranged)?;
        let totals = self.combat.totals_mut();
        match contribution {
            RangedContribution::Ranged(amount) => totals.ranged += amount,
            RangedContribution::Siege(amount) => totals.siege += amount,
        }
        Ok(*totals)
    }

    /// Spends a ready, unwounded unit.
    ///
    /// In the ranged phase its ranged or siege value goes straight into the
    /// pools. In the block and attack phases the value is returned for the
    /// caller to commit.
    pub fn activate_unit(
        &mut self,
        hero: &mut Hero,
        unit: UnitId,
    ) -> Result<UnitActivation, CombatError> {
        let phase = self.combat.phase();
        if !phase.is_active() {
            return Err(CombatError::NotInCombat);
        }
        let candidate = hero.unit(unit).ok_or(CombatError::UnitNotFound(unit))?;
        if !candidate.is_ready() {
            return Err(CombatError::UnitNotReady(unit));
        }
        let ability = candidate.ability;
        let usable = matches!(
            (phase, ability),
            (
                CombatPhase::Ranged,
                UnitAbility::Ranged(_) | UnitAbility::Siege(_)
            ) | (CombatPhase::Block, UnitAbility::Block(_))
                | (
                    CombatPhase::Attack,
                    UnitAbility::Attack(_) | UnitAbility::Ranged(_) | UnitAbility::Siege(_)
                )
        );
        if !usable {
            return Err(CombatError::UnitAbilityNotUsable {
                unit,
                ability,
                phase,
            });
        }

        if let Some(spent) = hero.unit_mut(unit) {
            spent.ready = false;
        }
        let pooled = phase == CombatPhase::Ranged;
        if pooled {
            let totals = self.combat.totals_mut();
            match ability {
                UnitAbility::Siege(value) => totals.siege += value,
                other => totals.ranged += other.value(),
            }
        }
        Ok(UnitActivation {
            unit,
            ability,
            value: ability.value(),
            pooled,
        })
    }

    /// Resolves the ranged and siege pools weakest-first and leaves the
    /// ranged phase.
    pub fn end_ranged_phase(&mut self, hero: &mut Hero) -> Result<AttackResolution, CombatError> {
        self.expect_phase("end_ranged_phase", CombatPhase::Ranged)?;

        let totals = self.combat.totals();
        let targets = self.targets(AttackType::Physical, true);
        let allocation = allocate(
            targets,
            Pools {
                ranged: totals.ranged,
                siege: totals.siege,
            },
        );
        let mut resolution = self.apply_hits(hero, allocation.hits);
        resolution.unspent = allocation.left.total();

        let next = if self.combat.enemies().is_empty() {
            CombatPhase::Complete
        } else {
            CombatPhase::Block
        };
        self.enter_phase(hero, next);
        resolution.phase = self.combat.phase();
        Ok(resolution)
    }

    /// Spends hero movement to lower a cumbersome enemy's attack.
    pub fn reduce_cumbersome(
        &mut self,
        hero: &mut Hero,
        enemy: EnemyId,
        movement: u32,
    ) -> Result<CumbersomeReduction, CombatError> {
        self.expect_phase("reduce_cumbersome", CombatPhase::Block)?;
        let target = self.active_enemy(enemy)?;
        if !target.has(EnemyTraits::CUMBERSOME) {
            return Err(CombatError::NotCumbersome(enemy));
        }
        if hero.points.movement < movement {
            return Err(CombatError::InsufficientMovement {
                required: movement,
                available: hero.points.movement,
            });
        }

        let attack = self.attack_of(target);
        let spent = movement.min(attack);
        hero.points.movement -= spent;
        self.combat
            .bookkeeping_mut(enemy)
            .modifiers
            .cumbersome_reduction += spent;

        Ok(CumbersomeReduction {
            enemy,
            spent,
            attack: attack - spent,
        })
    }

    /// Attempts to block one enemy with `block_value`.
    pub fn block_enemy(
        &mut self,
        enemy: EnemyId,
        block_value: u32,
    ) -> Result<BlockOutcome, CombatError> {
        self.expect_phase("block_enemy", CombatPhase::Block)?;
        let target = self.active_enemy(enemy)?;
        let required = abilities::block_requirement(self.attack_of(target), target, &self.rules);
        let elusive = target.has(EnemyTraits::ELUSIVE);

        let outcome = |blocked, status| BlockOutcome {
            enemy,
            blocked,
            status,
            required,
        };

        if self.combat.is_blocked(enemy) {
            return Ok(outcome(false, BlockStatus::AlreadyBlocked));
        }
        let bookkeeping = self.combat.bookkeeping_mut(enemy);
        if elusive && bookkeeping.block_attempted {
            return Ok(outcome(false, BlockStatus::ElusiveAttemptSpent));
        }
        bookkeeping.block_attempted = true;

        if block_value < required {
            return Ok(outcome(false, BlockStatus::Insufficient));
        }
        self.combat.block(enemy);
        self.combat.totals_mut().block += block_value;
        Ok(outcome(true, BlockStatus::Blocked))
    }

    /// Lets summoners call in their minions and moves on to damage.
    pub fn end_block_phase(&mut self, hero: &mut Hero) -> Result<Vec<SummonReport>, CombatError> {
        self.expect_phase("end_block_phase", CombatPhase::Block)?;

        let summoners: Vec<_> = self
            .combat
            .enemies()
            .iter()
            .filter(|enemy| enemy.has(EnemyTraits::SUMMONER))
            .filter(|enemy| {
                !self
                    .combat
                    .bookkeeping(enemy.id)
                    .is_some_and(|entry| entry.summon_used)
            })
            .filter_map(|enemy| enemy.summons.clone().map(|blueprint| (enemy.id, blueprint)))
            .collect();

        let mut reports = Vec::new();
        for (summoner, blueprint) in summoners {
            self.combat.bookkeeping_mut(summoner).summon_used = true;
            if let Some(summoned) = self.combat.spawn(&blueprint, summoner) {
                self.emit(GameEvent::EnemySummoned {
                    summoner,
                    enemy: summoned,
                });
                reports.push(SummonReport {
                    summoner,
                    enemy: summoned,
                });
            }
        }

        self.enter_phase(hero, CombatPhase::Damage);
        Ok(reports)
    }

    /// Every unblocked, unfrozen enemy strikes.
    pub fn resolve_damage_phase(&mut self, hero: &mut Hero) -> Result<DamageReport, CombatError> {
        self.expect_phase("resolve_damage_phase", CombatPhase::Damage)?;

        let armor = abilities::hero_armor(hero, self.status.hero_effects());
        let attackers: Vec<EnemyId> = self
            .combat
            .enemies()
            .iter()
            .map(|enemy| enemy.id)
            .filter(|id| !self.combat.is_blocked(*id))
            .collect();

        let mut report = DamageReport::default();
        for id in attackers {
            let Some(enemy) = self.combat.enemy(id) else {
                continue;
            };
            if self.status.enemy_stacks(id, StatusEffectKind::Frozen) > 0 {
                report.frozen.push(id);
                continue;
            }
            let attack = self.attack_of(enemy);
            if attack == 0 {
                continue;
            }

            let defender = abilities::select_defender(enemy, hero, armor, &self.rules);
            if let Defender::Unit(unit) = defender {
                if let Some(struck) = hero.unit_mut(unit) {
                    struck.wounded = true;
                }
                report.units_wounded.push(unit);
                report.strikes.push(EnemyStrike {
                    enemy: id,
                    defender,
                    attack,
                    wounds: 0,
                    side_effects: Vec::new(),
                });
                continue;
            }

            let is_boss = enemy.is_boss();
            let hit = abilities::resolve_hit(enemy, attack, armor, &self.rules);
            if hit.wounds > 0 {
                hero.take_wounds(hit.wounds);
                self.combat.record_wounds(hit.wounds);
                report.wounds += hit.wounds;
                self.emit(GameEvent::WoundsTaken {
                    count: hit.wounds,
                    source: Some(id),
                });
            }

            for side_effect in &hit.side_effects {
                match *side_effect {
                    DamageSideEffect::Poison => {
                        if let Ok(outcome) = self.status.apply_to_hero(StatusEffectKind::Poison) {
                            report.poison_applied += 1;
                            self.emit(GameEvent::StatusApplied {
                                target: EffectTarget::Hero,
                                kind: StatusEffectKind::Poison,
                                stacks: outcome.stacks(),
                            });
                        }
                    }
                    DamageSideEffect::Drain { amount } => {
                        if is_boss {
                            if let Some(attacker) = self.combat.enemy_mut(id) {
                                attacker.heal(amount);
                            }
                        } else {
                            self.combat.bookkeeping_mut(id).modifiers.armor_bonus += amount;
                        }
                    }
                    DamageSideEffect::Discard { count } => {
                        report.discarded.extend(hero.discard_non_wounds(count));
                    }
                }
            }

            report.strikes.push(EnemyStrike {
                enemy: id,
                defender,
                attack,
                wounds: hit.wounds,
                side_effects: hit.side_effects,
            });
        }

        for aged in self.status.process_damage_resolved() {
            self.emit_tick(&aged);
        }
        self.enter_phase(hero, CombatPhase::Attack);
        Ok(report)
    }

    /// Distributes the hero's attack weakest-first.
    pub fn attack_enemies(
        &mut self,
        hero: &mut Hero,
        total_attack: u32,
        attack_type: AttackType,
    ) -> Result<AttackResolution, CombatError> {
        self.expect_phase("attack_enemies", CombatPhase::Attack)?;

        self.combat.totals_mut().attack += total_attack;
        let attack = abilities::hero_attack(total_attack, self.status.hero_effects());
        let targets = self.targets(attack_type, false);
        let allocation = allocate(targets, Pools::melee(attack));
        let mut resolution = self.apply_hits(hero, allocation.hits);
        resolution.unspent = allocation.left.total();

        if self.combat.enemies().is_empty() {
            self.enter_phase(hero, CombatPhase::Complete);
        }
        resolution.phase = self.combat.phase();
        Ok(resolution)
    }

    pub fn end_attack_phase(&mut self) -> Result<(), CombatError> {
        self.expect_phase("end_attack_phase", CombatPhase::Attack)?;
        self.transition(CombatPhase::Complete);
        Ok(())
    }

    /// Settles poison, clears enemy effects and leaves combat.
    pub fn end_combat(&mut self, hero: &mut Hero) -> Result<CombatSummary, CombatError> {
        if !self.combat.phase().is_active() {
            return Err(CombatError::NotInCombat);
        }

        let poison_wounds = self.status.process_combat_end(hero);
        if poison_wounds > 0 {
            self.combat.record_wounds(poison_wounds);
            self.emit(GameEvent::WoundsTaken {
                count: poison_wounds,
                source: None,
            });
        }
        self.status.clear_enemies();

        let summary = CombatSummary {
            victory: self.combat.enemies().is_empty(),
            defeated: self.combat.defeated().iter().map(|enemy| enemy.id).collect(),
            wounds_taken: self.combat.wounds_taken(),
            fame_gained: self.combat.fame_gained(),
        };
        self.emit(GameEvent::CombatEnded {
            victory: summary.victory,
            wounds_taken: summary.wounds_taken,
            defeated: summary.defeated.clone(),
        });
        self.transition(CombatPhase::NotInCombat);
        self.combat = Combat::default();
        Ok(summary)
    }

    /// Previews the rest of the combat for planned attack and block totals.
    ///
    /// Blocks are assigned greedily in enemy order; attack uses the same
    /// weakest-first allocation as [`Self::attack_enemies`] with a physical
    /// attack. Nothing is mutated.
    pub fn predict_outcome(
        &self,
        hero: &Hero,
        attack_total: u32,
        block_total: u32,
    ) -> Result<OutcomePrediction, CombatError> {
        if !self.combat.phase().is_active() {
            return Err(CombatError::NotInCombat);
        }

        let mut prediction = OutcomePrediction {
            poison_warning: self.status.hero_stacks(StatusEffectKind::Poison) > 0,
            ..OutcomePrediction::default()
        };
        let armor = abilities::hero_armor(hero, self.status.hero_effects());
        let mut remaining_block = block_total;

        for enemy in self.combat.enemies() {
            if self.combat.is_blocked(enemy.id) {
                prediction.would_block.push(enemy.id);
                continue;
            }
            let attack = self.attack_of(enemy);
            let required = abilities::block_requirement(attack, enemy, &self.rules);
            let attempt_spent = enemy.has(EnemyTraits::ELUSIVE)
                && self
                    .combat
                    .bookkeeping(enemy.id)
                    .is_some_and(|entry| entry.block_attempted);
            if !attempt_spent && remaining_block >= required {
                remaining_block -= required;
                prediction.would_block.push(enemy.id);
                continue;
            }
            if self.status.enemy_stacks(enemy.id, StatusEffectKind::Frozen) > 0 {
                continue;
            }
            if abilities::select_defender(enemy, hero, armor, &self.rules) != Defender::Hero {
                continue;
            }
            let hit = abilities::resolve_hit(enemy, attack, armor, &self.rules);
            prediction.expected_wounds += hit.wounds;
            if hit.side_effects.contains(&DamageSideEffect::Poison) {
                prediction.poison_warning = true;
            }
        }

        let attack = abilities::hero_attack(attack_total, self.status.hero_effects());
        let allocation = allocate(
            self.targets(AttackType::Physical, false),
            Pools::melee(attack),
        );
        for hit in allocation.hits {
            match hit {
                Hit::Defeat { id, .. } => prediction.would_defeat.push(id),
                Hit::BossDamage { id, damage } => {
                    let lethal = self
                        .combat
                        .enemy(id)
                        .and_then(Enemy::boss)
                        .is_some_and(|profile| damage >= profile.current_health);
                    if lethal {
                        prediction.would_defeat.push(id);
                    }
                }
            }
        }

        Ok(prediction)
    }

    // ===== internals =====

    fn emit(&self, event: GameEvent) {
        self.events.emit(event);
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        expected: CombatPhase,
    ) -> Result<(), CombatError> {
        match self.combat.phase() {
            CombatPhase::NotInCombat => Err(CombatError::NotInCombat),
            actual if actual != expected => {
                Err(CombatError::invalid_phase(operation, expected, actual))
            }
            _ => Ok(()),
        }
    }

    fn active_enemy(&self, enemy: EnemyId) -> Result<&Enemy, CombatError> {
        self.combat
            .enemy(enemy)
            .ok_or(CombatError::EnemyNotFound(enemy))
    }

    fn attack_of(&self, enemy: &Enemy) -> u32 {
        abilities::effective_attack(
            enemy,
            &self.combat.modifiers(enemy.id),
            self.status.enemy_effects(enemy.id),
        )
    }

    fn targets(&self, attack_type: AttackType, at_range: bool) -> Vec<Target> {
        self.combat
            .enemies()
            .iter()
            .map(|enemy| Target {
                id: enemy.id,
                armor: abilities::effective_armor(
                    enemy,
                    &self.combat.modifiers(enemy.id),
                    self.status.enemy_effects(enemy.id),
                    Some(attack_type),
                    &self.rules,
                ),
                boss: enemy.is_boss(),
                fortified: at_range && abilities::is_ranged_immune(enemy, false),
            })
            .collect()
    }

    /// Sets the phase and announces it.
    fn transition(&mut self, to: CombatPhase) {
        let from = self.combat.phase();
        self.combat.set_phase(to);
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    /// Moves to `to` and runs phase-start effects. A phase start that leaves
    /// no enemy standing completes the combat.
    fn enter_phase(&mut self, hero: &mut Hero, to: CombatPhase) {
        self.transition(to);
        if !to.is_resolving() {
            return;
        }
        self.tick_phase_start(hero);
        if self.combat.enemies().is_empty() {
            self.transition(CombatPhase::Complete);
        }
    }

    fn tick_phase_start(&mut self, hero: &mut Hero) {
        if let Some(report) = self.status.process_hero_phase_start(hero) {
            if report.wounds > 0 {
                self.combat.record_wounds(report.wounds);
                self.emit(GameEvent::WoundsTaken {
                    count: report.wounds,
                    source: None,
                });
            }
            self.emit_tick(&report);
        }

        let reports = self
            .status
            .process_enemy_phase_start(self.combat.enemies_mut());
        for report in &reports {
            self.emit_tick(report);
        }

        let burned: Vec<EnemyId> = self
            .combat
            .enemies()
            .iter()
            .filter(|enemy| enemy.boss().is_some_and(|profile| profile.current_health == 0))
            .map(|enemy| enemy.id)
            .collect();
        for boss in burned {
            self.defeat(hero, boss);
        }
    }

    fn emit_tick(&self, report: &TickReport) {
        let Some(target) = report.target else {
            return;
        };
        for kind in &report.expired {
            self.emit(GameEvent::StatusExpired {
                target,
                kind: *kind,
            });
        }
        for kind in &report.applied {
            let stacks = match target {
                EffectTarget::Hero => self.status.hero_stacks(*kind),
                EffectTarget::Enemy(enemy) => self.status.enemy_stacks(enemy, *kind),
            };
            self.emit(GameEvent::StatusApplied {
                target,
                kind: *kind,
                stacks,
            });
        }
    }

    fn emit_removal(&self, target: EffectTarget, removal: &Removal) {
        self.emit(GameEvent::StatusExpired {
            target,
            kind: removal.effect.kind,
        });
        if let Some((kind, stacks)) = removal.applied {
            self.emit(GameEvent::StatusApplied {
                target,
                kind,
                stacks,
            });
        }
    }

    fn defeat(&mut self, hero: &mut Hero, enemy: EnemyId) -> Option<u32> {
        let defeated = self.combat.defeat(enemy)?;
        let fame = defeated.fame;
        let kind = defeated.kind.clone();
        hero.fame += fame;
        self.status.forget_enemy(enemy);
        self.emit(GameEvent::EnemyDefeated { enemy, kind, fame });
        Some(fame)
    }

    fn apply_hits(&mut self, hero: &mut Hero, hits: Vec<Hit>) -> AttackResolution {
        let mut resolution = AttackResolution::default();
        for hit in hits {
            match hit {
                Hit::Defeat { id, .. } => {
                    if let Some(fame) = self.defeat(hero, id) {
                        resolution.defeated.push(id);
                        resolution.fame_gained += fame;
                    }
                }
                Hit::BossDamage { id, damage } => {
                    let Some(boss) = self.combat.enemy_mut(id) else {
                        continue;
                    };
                    let dealt = boss.take_damage(damage);
                    let dead = boss
                        .boss()
                        .is_some_and(|profile| profile.current_health == 0);
                    resolution.boss_damage.push((id, dealt));

                    if dead {
                        if let Some(fame) = self.defeat(hero, id) {
                            resolution.defeated.push(id);
                            resolution.fame_gained += fame;
                        }
                    } else {
                        let transitions = self.fire_thresholds(id);
                        resolution.boss_transitions.extend(transitions);
                    }
                }
            }
        }
        resolution
    }

    /// Executes every threshold the boss has crossed, highest first, each at
    /// most once per combat.
    fn fire_thresholds(&mut self, boss: EnemyId) -> Vec<BossTransition> {
        let Some(profile) = self.combat.enemy(boss).and_then(Enemy::boss) else {
            return Vec::new();
        };
        let fired = self
            .combat
            .bookkeeping(boss)
            .map(|entry| entry.fired_thresholds.clone())
            .unwrap_or_default();
        let crossed = abilities::crossed_thresholds(profile, &fired);

        let mut transitions = Vec::new();
        for threshold in crossed {
            self.combat
                .bookkeeping_mut(boss)
                .fired_thresholds
                .push(threshold.percent);

            let mut summoned = None;
            match &threshold.ability {
                BossAbility::Summon(blueprint) => {
                    summoned = self.combat.spawn(blueprint, boss);
                    if let Some(enemy) = summoned {
                        self.emit(GameEvent::EnemySummoned {
                            summoner: boss,
                            enemy,
                        });
                    }
                }
                BossAbility::Enrage { attack_bonus } => {
                    self.combat.bookkeeping_mut(boss).modifiers.attack_bonus += attack_bonus;
                }
                BossAbility::Fortify => {
                    if let Some(enemy) = self.combat.enemy_mut(boss) {
                        enemy.traits.insert(EnemyTraits::FORTIFIED);
                    }
                }
                BossAbility::Heal { amount } => {
                    if let Some(enemy) = self.combat.enemy_mut(boss) {
                        enemy.heal(*amount);
                    }
                }
                BossAbility::Harden { armor_bonus } => {
                    self.combat.bookkeeping_mut(boss).modifiers.armor_bonus += armor_bonus;
                }
            }

            self.emit(GameEvent::BossTransition {
                boss,
                threshold: threshold.percent,
            });
            transitions.push(BossTransition {
                boss,
                threshold: threshold.percent,
                ability: threshold.ability,
                summoned,
            });
        }
        transitions
    }
}
