//! Event types that originate in the runtime rather than the core.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Correlates a slot prompt with its answer.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotRequestId(pub u64);

impl fmt::Display for SlotRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-request#{}", self.0)
    }
}

/// Why the player is being asked for a save slot.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SlotPurpose {
    Save,
    Load,
}

/// Save/load slot traffic between the runtime and whoever owns the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PersistenceEvent {
    /// A consumer should ask the player for a slot and answer through
    /// `SlotRequests::respond`.
    SlotRequested {
        request: SlotRequestId,
        purpose: SlotPurpose,
    },

    /// The request was answered. `slot` is `None` when the player cancelled.
    SlotResolved {
        request: SlotRequestId,
        slot: Option<u8>,
    },

    /// An enemy roster was serialized.
    RosterSaved { enemies: usize, alive: usize },
}
