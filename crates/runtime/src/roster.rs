//! Enemy roster persistence.
//!
//! Save slots store the active enemy set as a JSON array of
//! [`EnemySnapshot`]s. Restoring goes through a [`Bestiary`] so traits that
//! are not persisted come back from content.

use hexbound_core::{Bestiary, CombatEngine, Enemy, EnemyId, EnemySnapshot, rehydrate_roster};

use crate::api::Result;

/// Serializes the engine's current roster.
pub fn snapshot_roster(engine: &CombatEngine) -> Result<String> {
    encode_roster(&engine.enemy_snapshots())
}

pub fn encode_roster(snapshots: &[EnemySnapshot]) -> Result<String> {
    Ok(serde_json::to_string(snapshots)?)
}

pub fn decode_roster(json: &str) -> Result<Vec<EnemySnapshot>> {
    Ok(serde_json::from_str(json)?)
}

/// Rebuilds living enemies from a saved roster, numbering them from
/// `first_id`.
pub fn restore_roster(
    json: &str,
    bestiary: &(impl Bestiary + ?Sized),
    first_id: EnemyId,
) -> Result<Vec<Enemy>> {
    let snapshots = decode_roster(json)?;
    Ok(rehydrate_roster(&snapshots, bestiary, first_id))
}
