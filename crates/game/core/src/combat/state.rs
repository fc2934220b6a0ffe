//! Data of the combat in progress.

use std::collections::{BTreeMap, BTreeSet};

use crate::abilities::CombatModifiers;
use crate::config::GameConfig;
use crate::state::{Enemy, EnemyBlueprint, EnemyId};

use super::phase::CombatPhase;

/// Phase-scoped totals committed by the hero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTotals {
    pub ranged: u32,
    pub siege: u32,
    pub block: u32,
    pub attack: u32,
}

/// Per-enemy bookkeeping that only lives as long as the combat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyBookkeeping {
    pub modifiers: CombatModifiers,
    pub block_attempted: bool,
    pub summon_used: bool,
    /// Boss thresholds (percent) already executed.
    pub fired_thresholds: Vec<u8>,
    /// Set for enemies that joined mid-combat.
    pub summoned_by: Option<EnemyId>,
}

/// The active combat.
///
/// An enemy id is either in the active set or in `defeated`, never both.
/// The blocked set is only reachable through [`Combat::is_blocked`] and the
/// crate-private `block`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combat {
    phase: CombatPhase,
    enemies: Vec<Enemy>,
    blocked: BTreeSet<EnemyId>,
    defeated: Vec<Enemy>,
    totals: CombatTotals,
    bookkeeping: BTreeMap<EnemyId, EnemyBookkeeping>,
    wounds_taken: u32,
    fame_gained: u32,
}

impl Combat {
    pub(crate) fn start(enemies: Vec<Enemy>) -> Self {
        let bookkeeping = enemies
            .iter()
            .map(|enemy| (enemy.id, EnemyBookkeeping::default()))
            .collect();
        Self {
            phase: CombatPhase::NotInCombat,
            enemies,
            bookkeeping,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn defeated(&self) -> &[Enemy] {
        &self.defeated
    }

    pub fn totals(&self) -> CombatTotals {
        self.totals
    }

    pub fn is_blocked(&self, id: EnemyId) -> bool {
        self.blocked.contains(&id)
    }

    pub fn bookkeeping(&self, id: EnemyId) -> Option<&EnemyBookkeeping> {
        self.bookkeeping.get(&id)
    }

    pub fn modifiers(&self, id: EnemyId) -> CombatModifiers {
        self.bookkeeping
            .get(&id)
            .map(|entry| entry.modifiers)
            .unwrap_or_default()
    }

    pub fn wounds_taken(&self) -> u32 {
        self.wounds_taken
    }

    pub fn fame_gained(&self) -> u32 {
        self.fame_gained
    }

    pub(crate) fn set_phase(&mut self, phase: CombatPhase) {
        self.phase = phase;
    }

    pub(crate) fn totals_mut(&mut self) -> &mut CombatTotals {
        &mut self.totals
    }

    pub(crate) fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub(crate) fn bookkeeping_mut(&mut self, id: EnemyId) -> &mut EnemyBookkeeping {
        self.bookkeeping.entry(id).or_default()
    }

    /// Marks an enemy blocked. Returns false if it already was.
    pub(crate) fn block(&mut self, id: EnemyId) -> bool {
        self.blocked.insert(id)
    }

    pub(crate) fn record_wounds(&mut self, wounds: u32) {
        self.wounds_taken += wounds;
    }

    /// Moves an enemy from the active set to `defeated`.
    pub(crate) fn defeat(&mut self, id: EnemyId) -> Option<&Enemy> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        let enemy = self.enemies.remove(index);
        self.blocked.remove(&id);
        self.fame_gained += enemy.fame;
        self.defeated.push(enemy);
        self.defeated.last()
    }

    /// Spawns a blueprint into the active set with a fresh id.
    ///
    /// Returns `None` when the combat is at [`GameConfig::MAX_ENEMIES`].
    pub(crate) fn spawn(
        &mut self,
        blueprint: &EnemyBlueprint,
        summoner: EnemyId,
    ) -> Option<EnemyId> {
        if self.enemies.len() >= GameConfig::MAX_ENEMIES {
            return None;
        }
        let id = self.next_enemy_id();
        let position = self.enemy(summoner).and_then(|enemy| enemy.position);
        self.enemies.push(blueprint.spawn(id, position));
        self.bookkeeping.insert(
            id,
            EnemyBookkeeping {
                summoned_by: Some(summoner),
                ..EnemyBookkeeping::default()
            },
        );
        Some(id)
    }

    fn next_enemy_id(&self) -> EnemyId {
        let highest = self
            .enemies
            .iter()
            .chain(self.defeated.iter())
            .map(|enemy| enemy.id.0)
            .max()
            .unwrap_or(0);
        EnemyId(highest + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defeat_moves_enemy_exactly_once() {
        let orc = EnemyBlueprint::new("orc", 3, 3, 2);
        let mut combat = Combat::start(vec![orc.spawn(EnemyId(1), None)]);
        combat.block(EnemyId(1));

        assert!(combat.defeat(EnemyId(1)).is_some());
        assert!(combat.defeat(EnemyId(1)).is_none());
        assert!(combat.enemies().is_empty());
        assert_eq!(combat.defeated().len(), 1);
        assert!(!combat.is_blocked(EnemyId(1)));
        assert_eq!(combat.fame_gained(), 2);
    }

    #[test]
    fn spawned_enemies_get_fresh_ids() {
        let orc = EnemyBlueprint::new("orc", 3, 3, 2);
        let mut combat = Combat::start(vec![orc.spawn(EnemyId(4), None)]);
        combat.defeat(EnemyId(4));

        let first = combat.spawn(&orc, EnemyId(4));
        let second = combat.spawn(&orc, EnemyId(4));

        assert_eq!(first, Some(EnemyId(5)));
        assert_eq!(second, Some(EnemyId(6)));
        assert_eq!(
            combat.bookkeeping(EnemyId(5)).and_then(|b| b.summoned_by),
            Some(EnemyId(4))
        );
    }

    #[test]
    fn block_is_idempotent() {
        let orc = EnemyBlueprint::new("orc", 3, 3, 2);
        let mut combat = Combat::start(vec![orc.spawn(EnemyId(1), None)]);
        assert!(combat.block(EnemyId(1)));
        assert!(!combat.block(EnemyId(1)));
        assert!(combat.is_blocked(EnemyId(1)));
    }
}
