//! Runtime orchestration for hexbound game sessions.
//!
//! This crate wraps the pure rules of `hexbound-core` with the pieces a
//! running game needs. Consumers embed [`Runtime`] to drive actions and
//! combats, subscribe to events, and answer save/load prompts.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`presentation`] runs presenter cues without ever blocking the engine
//! - [`slots`] and [`roster`] cover save slots and enemy roster snapshots
pub mod api;
pub mod events;
pub mod presentation;
pub mod roster;
pub mod runtime;
pub mod slots;

pub use api::{Presenter, Result, RuntimeError};
pub use events::{Event, EventBus, PersistenceEvent, SlotPurpose, SlotRequestId, Topic};
pub use presentation::PresentationDispatcher;
pub use roster::{decode_roster, encode_roster, restore_roster, snapshot_roster};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use slots::{PendingSlot, SlotRequests};
