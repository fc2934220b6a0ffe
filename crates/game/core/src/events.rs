//! Domain events published by the combat engine and the action manager.
//!
//! The core never owns a global bus. Each component receives an
//! [`EventSink`] at construction and pushes events into it; subscribers
//! (statistics, achievements, presentation) live on the other side of the
//! sink and can only read.

use std::sync::{Arc, Mutex, PoisonError};

use crate::action::ActionKind;
use crate::combat::CombatPhase;
use crate::state::{EnemyId, HexCoord};
use crate::status::{EffectTarget, StatusEffectKind};

/// High-level occurrences in a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum GameEvent {
    CombatStarted {
        enemies: Vec<EnemyId>,
        phase: CombatPhase,
    },
    PhaseChanged {
        from: CombatPhase,
        to: CombatPhase,
    },
    EnemyDefeated {
        enemy: EnemyId,
        kind: String,
        fame: u32,
    },
    EnemySummoned {
        summoner: EnemyId,
        enemy: EnemyId,
    },
    WoundsTaken {
        count: u32,
        source: Option<EnemyId>,
    },
    BossTransition {
        boss: EnemyId,
        threshold: u8,
    },
    StatusApplied {
        target: EffectTarget,
        kind: StatusEffectKind,
        stacks: u8,
    },
    StatusExpired {
        target: EffectTarget,
        kind: StatusEffectKind,
    },
    CombatEnded {
        victory: bool,
        wounds_taken: u32,
        defeated: Vec<EnemyId>,
    },
    ActionCommitted {
        kind: ActionKind,
    },
    ActionUndone {
        kind: ActionKind,
    },
    /// An undo request was refused. `cleared` checkpoints were discarded.
    UndoRejected {
        reason: UndoRejection,
        cleared: usize,
    },
    HistoryCleared {
        reason: HistoryClearReason,
        discarded: usize,
    },
    ExplorationCommitted {
        tiles: Vec<HexCoord>,
    },
}

impl GameEvent {
    /// Stable snake_case name, used for topic routing and logging.
    pub const fn name(&self) -> &'static str {
        match self {
            GameEvent::CombatStarted { .. } => "combat_started",
            GameEvent::PhaseChanged { .. } => "phase_changed",
            GameEvent::EnemyDefeated { .. } => "enemy_defeated",
            GameEvent::EnemySummoned { .. } => "enemy_summoned",
            GameEvent::WoundsTaken { .. } => "wounds_taken",
            GameEvent::BossTransition { .. } => "boss_transition",
            GameEvent::StatusApplied { .. } => "status_applied",
            GameEvent::StatusExpired { .. } => "status_expired",
            GameEvent::CombatEnded { .. } => "combat_ended",
            GameEvent::ActionCommitted { .. } => "action_committed",
            GameEvent::ActionUndone { .. } => "action_undone",
            GameEvent::UndoRejected { .. } => "undo_rejected",
            GameEvent::HistoryCleared { .. } => "history_cleared",
            GameEvent::ExplorationCommitted { .. } => "exploration_committed",
        }
    }

    /// True for events raised by the combat engine.
    pub const fn is_combat(&self) -> bool {
        matches!(
            self,
            GameEvent::CombatStarted { .. }
                | GameEvent::PhaseChanged { .. }
                | GameEvent::EnemyDefeated { .. }
                | GameEvent::EnemySummoned { .. }
                | GameEvent::WoundsTaken { .. }
                | GameEvent::BossTransition { .. }
                | GameEvent::StatusApplied { .. }
                | GameEvent::StatusExpired { .. }
                | GameEvent::CombatEnded { .. }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UndoRejection {
    EmptyHistory,
    CombatActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HistoryClearReason {
    Exploration,
    CombatStarted,
}

/// Receiving end of domain events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GameEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: GameEvent) {
        (**self).emit(event)
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: GameEvent) {}
}

/// Records events in memory, in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<GameEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(GameEvent::name)
            .collect()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
