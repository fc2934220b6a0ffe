//! Topic-based event bus for runtime events.
//!
//! Domain events from the core arrive through the [`hexbound_core::EventSink`]
//! implementation on [`EventBus`] and are routed to topics; consumers
//! subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{PersistenceEvent, SlotPurpose, SlotRequestId};
