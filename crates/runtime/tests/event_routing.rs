//! Topic routing of session events through the runtime bus.

use hexbound_content::ContentFactory;
use hexbound_core::{
    GameEvent, GameState, Hero, HexCoord, HexGrid, ResourcePool, StatusEffectKind, Terrain,
};
use hexbound_runtime::{Event, Runtime, Topic};
use tokio::sync::broadcast::error::TryRecvError;

fn bundled_runtime() -> Runtime {
    let mut hero = Hero::new(HexCoord::ORIGIN, Vec::new());
    hero.points.movement = 4;
    let map = HexGrid::with_tiles([
        (HexCoord::ORIGIN, Terrain::Plains),
        (HexCoord::new(1, 0), Terrain::Plains),
    ]);
    let bundle = ContentFactory::bundled()
        .load_bundle()
        .expect("bundled content should load");

    Runtime::builder()
        .content(bundle)
        .initial_state(GameState::new(hero, ResourcePool::default(), map))
        .build()
        .expect("default config is valid")
}

#[tokio::test]
async fn actions_and_combat_land_on_their_own_topics() {
    let mut runtime = bundled_runtime();
    let mut actions = runtime.subscribe(Topic::Action);
    let mut combat = runtime.subscribe(Topic::Combat);
    let mut status = runtime.subscribe(Topic::Status);

    runtime
        .move_hero(HexCoord::new(1, 0))
        .expect("plains cost two movement");
    let phase = runtime
        .start_encounter(&["orc_marauder"])
        .expect("orc_marauder is in the bundled bestiary");
    runtime
        .apply_hero_status(StatusEffectKind::Poison)
        .expect("poison stacks on the hero");

    match actions.recv().await.expect("action event") {
        Event::Game(GameEvent::ActionCommitted { .. }) => {}
        other => panic!("unexpected action event: {other:?}"),
    }
    match actions.recv().await.expect("history event") {
        Event::Game(GameEvent::HistoryCleared { discarded, .. }) => assert_eq!(discarded, 1),
        other => panic!("unexpected action event: {other:?}"),
    }

    match combat.recv().await.expect("combat event") {
        Event::Game(GameEvent::CombatStarted { enemies, phase: entry }) => {
            assert_eq!(enemies.len(), 1);
            assert_eq!(entry, phase);
        }
        other => panic!("unexpected combat event: {other:?}"),
    }

    match status.recv().await.expect("status event") {
        Event::Game(GameEvent::StatusApplied { kind, stacks, .. }) => {
            assert_eq!(kind, StatusEffectKind::Poison);
            assert_eq!(stacks, 1);
        }
        other => panic!("unexpected status event: {other:?}"),
    }
    assert!(matches!(status.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn rejected_calls_publish_nothing() {
    let mut runtime = bundled_runtime();
    let mut actions = runtime.subscribe(Topic::Action);
    let before = runtime.state().clone();

    let error = runtime
        .move_hero(HexCoord::new(3, 0))
        .expect_err("hex is not adjacent");

    assert!(error.is_rejection());
    assert_eq!(runtime.state(), &before);
    assert!(matches!(actions.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn subscribing_to_several_topics_at_once() {
    let runtime = bundled_runtime();
    let receivers = runtime
        .bus()
        .subscribe_multiple(&[Topic::Combat, Topic::Persistence]);

    assert_eq!(receivers.len(), 2);
    assert_eq!(runtime.bus().subscriber_count(Topic::Combat), 1);
    assert_eq!(runtime.bus().subscriber_count(Topic::Status), 0);
}
