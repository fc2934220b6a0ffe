//! Presentation collaborators (animation, sound, UI cues).

use async_trait::async_trait;
use hexbound_core::GameEvent;

use super::Result;

/// Plays a presentation cue for a domain event.
///
/// Implementations run on spawned tasks with a timeout. Their outcome is only
/// logged; it never reaches the engine.
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn present(&self, event: &GameEvent) -> Result<()>;

    /// Whether this presenter has a cue for `event` at all.
    fn wants(&self, _event: &GameEvent) -> bool {
        true
    }
}
