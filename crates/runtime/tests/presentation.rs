//! Presentation jobs run beside the engine and never feed back into it.

use std::time::Duration;

use async_trait::async_trait;
use hexbound_core::{CombatPhase, EnemyBlueprint, EnemyId, GameEvent, StaticBestiary};
use hexbound_runtime::{Presenter, Runtime, RuntimeConfig, RuntimeError};
use tokio::sync::mpsc;

struct Recording(mpsc::UnboundedSender<&'static str>);

#[async_trait]
impl Presenter for Recording {
    async fn present(&self, event: &GameEvent) -> hexbound_runtime::Result<()> {
        let _ = self.0.send(event.name());
        Ok(())
    }

    fn wants(&self, event: &GameEvent) -> bool {
        event.is_combat()
    }
}

struct Stalling;

#[async_trait]
impl Presenter for Stalling {
    async fn present(&self, _event: &GameEvent) -> hexbound_runtime::Result<()> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}

struct Failing;

#[async_trait]
impl Presenter for Failing {
    async fn present(&self, _event: &GameEvent) -> hexbound_runtime::Result<()> {
        Err(RuntimeError::Presentation("sprite sheet missing".into()))
    }
}

fn bestiary() -> StaticBestiary {
    [EnemyBlueprint::new("orc", 3, 3, 2)].into_iter().collect()
}

#[tokio::test]
async fn presenter_receives_combat_cues() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runtime = Runtime::builder()
        .bestiary(bestiary())
        .presenter(Recording(tx))
        .build()
        .expect("default config is valid");

    runtime.start_encounter(&["orc"]).expect("combat should start");

    let seen = tokio::time::timeout(Duration::from_secs(1), async {
        let mut seen = Vec::new();
        while let Some(cue) = rx.recv().await {
            seen.push(cue);
            if cue == "combat_started" {
                break;
            }
        }
        seen
    })
    .await
    .expect("cue should arrive");

    assert!(seen.contains(&"combat_started"));
    assert!(!seen.contains(&"action_committed"));
}

#[tokio::test]
async fn slow_and_failing_presenters_do_not_block_the_engine() {
    let config = RuntimeConfig {
        presentation_timeout: Duration::from_millis(10),
        ..RuntimeConfig::default()
    };
    let mut runtime = Runtime::builder()
        .config(config)
        .bestiary(bestiary())
        .presenter(Stalling)
        .presenter(Failing)
        .build()
        .expect("config is valid");

    let phase = tokio::time::timeout(Duration::from_secs(1), async {
        runtime.start_encounter(&["orc"])
    })
    .await
    .expect("engine call returns immediately")
    .expect("combat should start");

    assert_eq!(phase, CombatPhase::Block);
    runtime
        .block_enemy(EnemyId(1), 3)
        .expect("block phase accepts blocks");
    assert!(runtime.session().combat().is_blocked(EnemyId(1)));
}
