//! One game session: the state plus the two components allowed to mutate it.
//!
//! [`GameSession`] routes reversible actions to the [`ActionManager`] and
//! combat operations to the [`CombatEngine`], and drops the undo history the
//! moment a combat starts.

use std::sync::Arc;

use crate::action::{ActionKind, ActionManager, ActionResult, UndoError};
use crate::combat::{
    AttackResolution, BlockOutcome, CombatEngine, CombatError, CombatPhase, CombatSummary,
    CombatTotals, CumbersomeReduction, DamageReport, OutcomePrediction, RangedContribution,
    SummonReport, UnitActivation,
};
use crate::config::GameConfig;
use crate::events::{EventSink, NullSink};
use crate::state::{
    AttackType, CardId, DieId, Enemy, EnemyId, GameState, HexCoord, PlayMode, Terrain, UnitId,
};
use crate::status::{StatusEffectKind, StatusOutcome};

#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    combat: CombatEngine,
    actions: ActionManager,
}

impl GameSession {
    pub fn new(state: GameState, config: GameConfig, events: Arc<dyn EventSink>) -> Self {
        let combat = CombatEngine::new(config.rules.clone(), events.clone());
        let actions = ActionManager::new(config, events);
        Self {
            state,
            combat,
            actions,
        }
    }

    /// A session that publishes nowhere.
    pub fn detached(state: GameState, config: GameConfig) -> Self {
        Self::new(state, config, Arc::new(NullSink))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn combat(&self) -> &CombatEngine {
        &self.combat
    }

    pub fn actions(&self) -> &ActionManager {
        &self.actions
    }

    pub fn phase(&self) -> CombatPhase {
        self.combat.phase()
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_active()
    }

    // ===== reversible actions =====

    pub fn move_hero(&mut self, to: HexCoord) -> ActionResult {
        self.actions.move_hero(&mut self.state, &self.combat, to)
    }

    pub fn play_card(&mut self, card: CardId, mode: PlayMode) -> ActionResult {
        self.actions
            .play_card(&mut self.state, &self.combat, card, mode)
    }

    pub fn take_mana(&mut self, die: DieId) -> ActionResult {
        self.actions.take_mana(&mut self.state, &self.combat, die)
    }

    pub fn explore(&mut self, tiles: Vec<(HexCoord, Terrain)>) -> ActionResult {
        self.actions.explore(&mut self.state, &self.combat, tiles)
    }

    pub fn undo(&mut self) -> Result<ActionKind, UndoError> {
        self.actions.undo_last_action(&mut self.state, &self.combat)
    }

    // ===== combat =====

    pub fn start_combat(&mut self, enemies: Vec<Enemy>) -> Result<CombatPhase, CombatError> {
        let phase = self.combat.initiate_combat(&mut self.state.hero, enemies)?;
        self.actions.on_combat_started();
        Ok(phase)
    }

    pub fn add_ranged(
        &mut self,
        contribution: RangedContribution,
    ) -> Result<CombatTotals, CombatError> {
        self.combat.add_ranged(contribution)
    }

    pub fn activate_unit(&mut self, unit: UnitId) -> Result<UnitActivation, CombatError> {
        self.combat.activate_unit(&mut self.state.hero, unit)
    }

    pub fn end_ranged_phase(&mut self) -> Result<AttackResolution, CombatError> {
        self.combat.end_ranged_phase(&mut self.state.hero)
    }

    pub fn reduce_cumbersome(
        &mut self,
        enemy: EnemyId,
        movement: u32,
    ) -> Result<CumbersomeReduction, CombatError> {
        self.combat
            .reduce_cumbersome(&mut self.state.hero, enemy, movement)
    }

    pub fn block_enemy(
        &mut self,
        enemy: EnemyId,
        block_value: u32,
    ) -> Result<BlockOutcome, CombatError> {
        self.combat.block_enemy(enemy, block_value)
    }

    pub fn end_block_phase(&mut self) -> Result<Vec<SummonReport>, CombatError> {
        self.combat.end_block_phase(&mut self.state.hero)
    }

    pub fn resolve_damage_phase(&mut self) -> Result<DamageReport, CombatError> {
        self.combat.resolve_damage_phase(&mut self.state.hero)
    }

    pub fn attack_enemies(
        &mut self,
        total_attack: u32,
        attack_type: AttackType,
    ) -> Result<AttackResolution, CombatError> {
        self.combat
            .attack_enemies(&mut self.state.hero, total_attack, attack_type)
    }

    pub fn end_attack_phase(&mut self) -> Result<(), CombatError> {
        self.combat.end_attack_phase()
    }

    pub fn end_combat(&mut self) -> Result<CombatSummary, CombatError> {
        self.combat.end_combat(&mut self.state.hero)
    }

    pub fn predict_outcome(
        &self,
        attack_total: u32,
        block_total: u32,
    ) -> Result<OutcomePrediction, CombatError> {
        self.combat
            .predict_outcome(&self.state.hero, attack_total, block_total)
    }

    pub fn apply_hero_status(
        &mut self,
        kind: StatusEffectKind,
    ) -> Result<StatusOutcome, CombatError> {
        self.combat.apply_hero_status(kind)
    }

    pub fn apply_enemy_status(
        &mut self,
        enemy: EnemyId,
        kind: StatusEffectKind,
    ) -> Result<StatusOutcome, CombatError> {
        self.combat.apply_enemy_status(enemy, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, GameEvent, HistoryClearReason};
    use crate::state::{EnemyBlueprint, Hero, HexGrid, ResourcePool};

    fn session(log: Arc<EventLog>) -> GameSession {
        let mut hero = Hero::new(HexCoord::ORIGIN, Vec::new());
        hero.points.movement = 6;
        let map = HexGrid::with_tiles([
            (HexCoord::ORIGIN, Terrain::Plains),
            (HexCoord::new(1, 0), Terrain::Plains),
        ]);
        GameSession::new(
            GameState::new(hero, ResourcePool::default(), map),
            GameConfig::default(),
            log,
        )
    }

    #[test]
    fn starting_combat_drops_history() {
        let log = Arc::new(EventLog::new());
        let mut session = session(log.clone());
        session.move_hero(HexCoord::new(1, 0)).unwrap();
        assert!(session.actions().can_undo());

        let orc = EnemyBlueprint::new("orc", 3, 3, 2);
        let phase = session
            .start_combat(vec![orc.spawn(EnemyId(1), None)])
            .unwrap();

        assert_eq!(phase, CombatPhase::Block);
        assert_eq!(session.actions().history_len(), 0);
        assert!(log.events().contains(&GameEvent::HistoryCleared {
            reason: HistoryClearReason::CombatStarted,
            discarded: 1,
        }));
    }

    #[test]
    fn rejected_start_keeps_history() {
        let mut session = session(Arc::new(EventLog::new()));
        session.move_hero(HexCoord::new(1, 0)).unwrap();

        assert_eq!(session.start_combat(Vec::new()), Err(CombatError::NoEnemies));
        assert_eq!(session.actions().history_len(), 1);
        assert_eq!(session.undo(), Ok(ActionKind::MoveHero));
        assert_eq!(session.state().hero.position, HexCoord::ORIGIN);
    }
}
