use async_trait::async_trait;
use hexbound_core::GameEvent;
use hexbound_runtime::Presenter;

/// Stands in for animation and sound: every cue becomes a log line.
pub struct LogPresenter;

#[async_trait]
impl Presenter for LogPresenter {
    async fn present(&self, event: &GameEvent) -> hexbound_runtime::Result<()> {
        match event {
            GameEvent::EnemyDefeated { kind, fame, .. } => {
                tracing::info!("{kind} falls (+{fame} fame)");
            }
            GameEvent::WoundsTaken { count, .. } => tracing::info!("hero takes {count} wounds"),
            GameEvent::PhaseChanged { to, .. } => tracing::info!("-- {to} phase --"),
            other => tracing::debug!(cue = other.name()),
        }
        Ok(())
    }
}
