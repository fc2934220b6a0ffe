//! Checkpoint and undo layer over out-of-combat actions.
//!
//! Every reversible action saves a checkpoint before it touches the state. If
//! any stage of the transition fails the checkpoint is popped and restored,
//! so a rejected action leaves no trace. Exploring and entering a combat both
//! wipe the history.

use std::sync::Arc;

use crate::combat::CombatEngine;
use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent, HistoryClearReason, NullSink, UndoRejection};
use crate::state::{CardId, DieId, GameState, HexCoord, PlayMode, Terrain};

use super::checkpoint::ActionCheckpoint;
use super::error::{ActionError, UndoError};
use super::kind::ActionKind;
use super::kinds::{Explore, MoveHero, PlayCard, TakeMana};
use super::transition::{
    ActionTransition, TransitionPhase, TransitionPhaseError, drive_transition,
};

pub type ActionResult = Result<(), TransitionPhaseError<ActionError>>;

pub struct ActionManager {
    history: Vec<ActionCheckpoint>,
    config: GameConfig,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for ActionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionManager")
            .field("history", &self.history.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for ActionManager {
    fn default() -> Self {
        Self::new(GameConfig::default(), Arc::new(NullSink))
    }
}

impl ActionManager {
    pub fn new(config: GameConfig, events: Arc<dyn EventSink>) -> Self {
        Self {
            history: Vec::new(),
            config,
            events,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Kind of the action the next undo would take back.
    pub fn last_action(&self) -> Option<ActionKind> {
        self.history.last().map(ActionCheckpoint::kind)
    }

    pub fn save_checkpoint(&mut self, kind: ActionKind, state: &GameState) {
        self.history.push(ActionCheckpoint::capture(kind, state));
    }

    pub fn move_hero(
        &mut self,
        state: &mut GameState,
        combat: &CombatEngine,
        to: HexCoord,
    ) -> ActionResult {
        self.perform(state, combat, &MoveHero::new(to))
    }

    pub fn play_card(
        &mut self,
        state: &mut GameState,
        combat: &CombatEngine,
        card: CardId,
        mode: PlayMode,
    ) -> ActionResult {
        self.perform(state, combat, &PlayCard::new(card, mode))
    }

    pub fn take_mana(
        &mut self,
        state: &mut GameState,
        combat: &CombatEngine,
        die: DieId,
    ) -> ActionResult {
        self.perform(state, combat, &TakeMana::new(die))
    }

    /// Runs a reversible transition behind a fresh checkpoint.
    pub fn perform<T>(
        &mut self,
        state: &mut GameState,
        combat: &CombatEngine,
        transition: &T,
    ) -> ActionResult
    where
        T: ActionTransition<Error = ActionError>,
    {
        let kind = transition.kind();
        debug_assert!(kind.is_reversible());
        if combat.is_active() {
            return Err(TransitionPhaseError::new(
                TransitionPhase::PreValidate,
                ActionError::CombatActive,
            ));
        }

        self.save_checkpoint(kind, state);
        if let Err(error) = drive_transition(transition, state, &self.config) {
            if let Some(checkpoint) = self.history.pop() {
                checkpoint.restore(state);
            }
            return Err(error);
        }

        self.events.emit(GameEvent::ActionCommitted { kind });
        Ok(())
    }

    /// Reveals tiles next to the hero. Cannot be undone and discards every
    /// checkpoint on success.
    pub fn explore(
        &mut self,
        state: &mut GameState,
        combat: &CombatEngine,
        tiles: Vec<(HexCoord, Terrain)>,
    ) -> ActionResult {
        if combat.is_active() {
            return Err(TransitionPhaseError::new(
                TransitionPhase::PreValidate,
                ActionError::CombatActive,
            ));
        }

        let explore = Explore::new(tiles);
        let checkpoint = ActionCheckpoint::capture(ActionKind::Explore, state);
        let revealed = state.map.clone();
        if let Err(error) = drive_transition(&explore, state, &self.config) {
            checkpoint.restore(state);
            state.map = revealed;
            return Err(error);
        }

        self.clear_history(HistoryClearReason::Exploration);
        self.events.emit(GameEvent::ActionCommitted {
            kind: ActionKind::Explore,
        });
        self.events.emit(GameEvent::ExplorationCommitted {
            tiles: explore.hexes(),
        });
        Ok(())
    }

    /// Takes back the most recent reversible action.
    ///
    /// During a combat nothing is restored and the whole history is dropped.
    pub fn undo_last_action(
        &mut self,
        state: &mut GameState,
        combat: &CombatEngine,
    ) -> Result<ActionKind, UndoError> {
        if combat.is_active() {
            let cleared = self.history.len();
            self.history.clear();
            self.events.emit(GameEvent::UndoRejected {
                reason: UndoRejection::CombatActive,
                cleared,
            });
            return Err(UndoError::CombatActive { cleared });
        }

        let Some(checkpoint) = self.history.pop() else {
            self.events.emit(GameEvent::UndoRejected {
                reason: UndoRejection::EmptyHistory,
                cleared: 0,
            });
            return Err(UndoError::EmptyHistory);
        };

        let kind = checkpoint.kind();
        checkpoint.restore(state);
        self.events.emit(GameEvent::ActionUndone { kind });
        Ok(kind)
    }

    pub fn on_combat_started(&mut self) {
        self.clear_history(HistoryClearReason::CombatStarted);
    }

    fn clear_history(&mut self, reason: HistoryClearReason) {
        let discarded = self.history.len();
        self.history.clear();
        self.events
            .emit(GameEvent::HistoryCleared { reason, discarded });
    }
}
