//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use hexbound_core::{EventSink, GameEvent};
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use tokio::sync::broadcast;

use super::types::PersistenceEvent;

/// Topics for event routing
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Phase changes, defeats, wounds, boss transitions, combat start and end
    Combat,
    /// Status effects applied to or expired on the hero and enemies
    Status,
    /// Reversible actions, undo and history changes, exploration
    Action,
    /// Save/load slot requests and roster snapshots
    Persistence,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Game(GameEvent),
    Persistence(PersistenceEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(
                GameEvent::StatusApplied { .. } | GameEvent::StatusExpired { .. },
            ) => Topic::Status,
            Event::Game(event) if event.is_combat() => Topic::Combat,
            Event::Game(_) => Topic::Action,
            Event::Persistence(_) => Topic::Persistence,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic channel is created up front, so
/// publishing and subscribing never fail.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; Topic::COUNT]>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(std::array::from_fn(|_| broadcast::channel(capacity).0)),
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        &self.channels[topic as usize]
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Alias of [`Self::subscribe`].
    pub fn on(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.subscribe(topic)
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Subscribe to every topic
    pub fn subscribe_all(&self) -> HashMap<Topic, broadcast::Receiver<Event>> {
        Topic::iter()
            .map(|topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channel(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("EventBus");
        for topic in Topic::iter() {
            debug.field(&topic.to_string(), &self.subscriber_count(topic));
        }
        debug.finish()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: GameEvent) {
        self.publish(Event::Game(event));
    }
}

#[cfg(test)]
mod tests {
    use hexbound_core::{ActionKind, CombatPhase, EffectTarget, StatusEffectKind};

    use super::*;

    #[test]
    fn game_events_route_by_kind() {
        let phase = Event::Game(GameEvent::PhaseChanged {
            from: CombatPhase::Block,
            to: CombatPhase::Damage,
        });
        let status = Event::Game(GameEvent::StatusApplied {
            target: EffectTarget::Hero,
            kind: StatusEffectKind::Poison,
            stacks: 1,
        });
        let action = Event::Game(GameEvent::ActionCommitted {
            kind: ActionKind::MoveHero,
        });

        assert_eq!(phase.topic(), Topic::Combat);
        assert_eq!(status.topic(), Topic::Status);
        assert_eq!(action.topic(), Topic::Action);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(0);
        bus.emit(GameEvent::ActionCommitted {
            kind: ActionKind::TakeMana,
        });
        assert_eq!(bus.subscriber_count(Topic::Action), 0);
    }
}
