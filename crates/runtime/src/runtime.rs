//! High-level runtime orchestrator.
//!
//! The runtime owns one [`GameSession`], wires its events into the topic bus
//! and the presentation dispatcher, and logs every engine call. Rejections
//! come back as [`RuntimeError`] with the session untouched.

use std::env;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hexbound_content::{ContentBundle, ContentFactory};
use hexbound_core::{
    ActionKind, AttackResolution, AttackType, Bestiary, BlockOutcome, CardId, CombatPhase,
    CombatSummary, CombatTotals, CumbersomeReduction, DamageReport, DieId, Enemy, EnemyId,
    GameConfig, GameError, GameSession, GameState, HexCoord, OutcomePrediction, PlayMode,
    RangedContribution, StaticBestiary, StatusEffectKind, StatusOutcome, SummonReport, Terrain,
    UnitActivation, UnitId,
};
use tokio::sync::broadcast;

use crate::api::{Presenter, Result, RuntimeError};
use crate::events::{Event, EventBus, PersistenceEvent, SlotPurpose, Topic};
use crate::presentation::{PresentationDispatcher, RuntimeSink};
use crate::roster;
use crate::slots::{PendingSlot, SlotRequests};

/// Runtime configuration shared across the orchestrator and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Broadcast capacity of each bus topic.
    pub event_buffer_size: usize,
    /// Upper bound for a single presentation job.
    pub presentation_timeout: Duration,
    /// Directory holding `config.toml`, `rules.toml`, `bestiary.ron` and
    /// `deck.ron`. `None` uses the bundled content.
    pub content_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Reads `HEXBOUND_*` variables; anything missing or unparsable keeps its
    /// default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<usize>("HEXBOUND_EVENT_BUFFER") {
            config.event_buffer_size = size;
        }
        if let Some(millis) = read_env::<u64>("HEXBOUND_PRESENTATION_TIMEOUT_MS") {
            config.presentation_timeout = Duration::from_millis(millis);
        }
        config.content_dir = env::var("HEXBOUND_CONTENT_DIR").ok().map(PathBuf::from);

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig(
                "event_buffer_size must be positive".into(),
            ));
        }
        if self.presentation_timeout.is_zero() {
            return Err(RuntimeError::InvalidConfig(
                "presentation_timeout must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Loads content from `content_dir`, or the bundled data.
    pub fn load_content(&self) -> Result<ContentBundle> {
        let factory = match &self.content_dir {
            Some(dir) => ContentFactory::new(dir.clone()),
            None => ContentFactory::bundled(),
        };
        factory.load_bundle().map_err(RuntimeError::content)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: EventBus::DEFAULT_CAPACITY,
            presentation_timeout: PresentationDispatcher::DEFAULT_TIMEOUT,
            content_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that drives one game session.
pub struct Runtime {
    session: GameSession,
    bus: EventBus,
    slots: SlotRequests,
    bestiary: StaticBestiary,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> &GameState {
        self.session.state()
    }

    pub fn phase(&self) -> CombatPhase {
        self.session.phase()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn slots(&self) -> &SlotRequests {
        &self.slots
    }

    pub fn bestiary(&self) -> &StaticBestiary {
        &self.bestiary
    }

    /// Subscribe to one topic of runtime events
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    // ===== reversible actions =====

    pub fn move_hero(&mut self, to: HexCoord) -> Result<()> {
        let result = self.session.move_hero(to);
        observe("move_hero", result)
    }

    pub fn play_card(&mut self, card: CardId, mode: PlayMode) -> Result<()> {
        let result = self.session.play_card(card, mode);
        observe("play_card", result)
    }

    pub fn take_mana(&mut self, die: DieId) -> Result<()> {
        let result = self.session.take_mana(die);
        observe("take_mana", result)
    }

    pub fn explore(&mut self, tiles: Vec<(HexCoord, Terrain)>) -> Result<()> {
        let result = self.session.explore(tiles);
        observe("explore", result)
    }

    pub fn undo(&mut self) -> Result<ActionKind> {
        let result = self.session.undo();
        observe("undo", result)
    }

    // ===== combat =====

    /// Spawns one enemy per kind from the bestiary and starts a combat.
    pub fn start_encounter(&mut self, kinds: &[&str]) -> Result<CombatPhase> {
        let enemies = kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                self.bestiary
                    .blueprint(kind)
                    .map(|blueprint| blueprint.spawn(EnemyId(index as u32 + 1), None))
                    .ok_or_else(|| RuntimeError::UnknownEnemyKind((*kind).to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.start_combat(enemies)
    }

    pub fn start_combat(&mut self, enemies: Vec<Enemy>) -> Result<CombatPhase> {
        let result = self.session.start_combat(enemies);
        observe("start_combat", result)
    }

    pub fn add_ranged(&mut self, contribution: RangedContribution) -> Result<CombatTotals> {
        let result = self.session.add_ranged(contribution);
        observe("add_ranged", result)
    }

    pub fn activate_unit(&mut self, unit: UnitId) -> Result<UnitActivation> {
        let result = self.session.activate_unit(unit);
        observe("activate_unit", result)
    }

    pub fn end_ranged_phase(&mut self) -> Result<AttackResolution> {
        let result = self.session.end_ranged_phase();
        observe("end_ranged_phase", result)
    }

    pub fn reduce_cumbersome(
        &mut self,
        enemy: EnemyId,
        movement: u32,
    ) -> Result<CumbersomeReduction> {
        let result = self.session.reduce_cumbersome(enemy, movement);
        observe("reduce_cumbersome", result)
    }

    pub fn block_enemy(&mut self, enemy: EnemyId, block_value: u32) -> Result<BlockOutcome> {
        let result = self.session.block_enemy(enemy, block_value);
        observe("block_enemy", result)
    }

    pub fn end_block_phase(&mut self) -> Result<Vec<SummonReport>> {
        let result = self.session.end_block_phase();
        observe("end_block_phase", result)
    }

    pub fn resolve_damage_phase(&mut self) -> Result<DamageReport> {
        let result = self.session.resolve_damage_phase();
        observe("resolve_damage_phase", result)
    }

    pub fn attack_enemies(
        &mut self,
        total_attack: u32,
        attack_type: AttackType,
    ) -> Result<AttackResolution> {
        let result = self.session.attack_enemies(total_attack, attack_type);
        observe("attack_enemies", result)
    }

    pub fn end_attack_phase(&mut self) -> Result<()> {
        let result = self.session.end_attack_phase();
        observe("end_attack_phase", result)
    }

    pub fn end_combat(&mut self) -> Result<CombatSummary> {
        let result = self.session.end_combat();
        observe("end_combat", result)
    }

    pub fn predict_outcome(&self, attack_total: u32, block_total: u32) -> Result<OutcomePrediction> {
        let result = self.session.predict_outcome(attack_total, block_total);
        observe("predict_outcome", result)
    }

    pub fn apply_hero_status(&mut self, kind: StatusEffectKind) -> Result<StatusOutcome> {
        let result = self.session.apply_hero_status(kind);
        observe("apply_hero_status", result)
    }

    pub fn apply_enemy_status(
        &mut self,
        enemy: EnemyId,
        kind: StatusEffectKind,
    ) -> Result<StatusOutcome> {
        let result = self.session.apply_enemy_status(enemy, kind);
        observe("apply_enemy_status", result)
    }

    // ===== persistence =====

    /// Serializes the active enemy set for a save slot.
    pub fn save_roster(&self) -> Result<String> {
        let snapshots = self.session.combat().enemy_snapshots();
        let json = roster::encode_roster(&snapshots)?;
        let alive = snapshots.iter().filter(|s| s.is_alive).count();

        tracing::debug!(enemies = snapshots.len(), alive, "roster saved");
        self.bus
            .publish(Event::Persistence(PersistenceEvent::RosterSaved {
                enemies: snapshots.len(),
                alive,
            }));
        Ok(json)
    }

    /// Starts a combat against the living enemies of a saved roster.
    pub fn resume_encounter(&mut self, json: &str) -> Result<CombatPhase> {
        let enemies = roster::restore_roster(json, &self.bestiary, EnemyId(1))?;
        self.start_combat(enemies)
    }

    /// Asks whoever owns the prompt for a save/load slot.
    pub fn request_slot(&self, purpose: SlotPurpose) -> PendingSlot {
        self.slots.request(purpose)
    }
}

impl Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("phase", &self.session.phase())
            .field("history", &self.session.actions().history_len())
            .field("bus", &self.bus)
            .field("bestiary", &self.bestiary.len())
            .finish()
    }
}

fn observe<T, E>(operation: &'static str, result: std::result::Result<T, E>) -> Result<T>
where
    T: Debug,
    E: Into<RuntimeError>,
{
    match result {
        Ok(value) => {
            tracing::debug!(operation, outcome = ?value, "engine call succeeded");
            Ok(value)
        }
        Err(error) => {
            let error = error.into();
            tracing::warn!(
                operation,
                code = error.error_code(),
                severity = error.severity().as_str(),
                %error,
                "engine call rejected"
            );
            Err(error)
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    game_config: Option<GameConfig>,
    state: Option<GameState>,
    bestiary: Option<StaticBestiary>,
    presenters: Vec<Arc<dyn Presenter>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            game_config: None,
            state: None,
            bestiary: None,
            presenters: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override game tunables and combat rules
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = Some(config);
        self
    }

    /// Provide initial game state
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn bestiary(mut self, bestiary: StaticBestiary) -> Self {
        self.bestiary = Some(bestiary);
        self
    }

    /// Use loaded content for the game config and the bestiary.
    pub fn content(mut self, bundle: ContentBundle) -> Self {
        self.game_config = Some(bundle.config);
        self.bestiary = Some(bundle.bestiary);
        self
    }

    /// Register a presenter for fire-and-forget cues (optional)
    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenters.push(Arc::new(presenter));
        self
    }

    pub fn build(self) -> Result<Runtime> {
        self.config.validate()?;

        let bus = EventBus::with_capacity(self.config.event_buffer_size);
        let presentation = (!self.presenters.is_empty()).then(|| {
            let mut dispatcher = PresentationDispatcher::new(self.config.presentation_timeout);
            for presenter in self.presenters {
                dispatcher.register(presenter);
            }
            dispatcher
        });
        let sink = RuntimeSink {
            bus: bus.clone(),
            presentation,
        };

        let session = GameSession::new(
            self.state.unwrap_or_default(),
            self.game_config.unwrap_or_default(),
            Arc::new(sink),
        );

        Ok(Runtime {
            session,
            slots: SlotRequests::new(bus.clone()),
            bus,
            bestiary: self.bestiary.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_buffer_is_rejected() {
        let config = RuntimeConfig {
            event_buffer_size: 0,
            ..RuntimeConfig::default()
        };

        let error = Runtime::builder().config(config).build().unwrap_err();

        assert!(matches!(error, RuntimeError::InvalidConfig(_)));
    }

    #[test]
    fn unknown_kind_does_not_start_combat() {
        let mut runtime = Runtime::builder().build().unwrap();

        let error = runtime.start_encounter(&["nobody"]).unwrap_err();

        assert!(matches!(error, RuntimeError::UnknownEnemyKind(kind) if kind == "nobody"));
        assert_eq!(runtime.phase(), CombatPhase::NotInCombat);
    }
}
