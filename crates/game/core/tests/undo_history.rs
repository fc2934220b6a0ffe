//! Checkpoint and undo behaviour of a whole session.

use std::sync::Arc;

use hexbound_core::{
    ActionError, ActionKind, Card, CardEffect, CardId, DieId, EnemyBlueprint, EnemyId, EventLog,
    GameConfig, GameEvent, GameSession, GameState, Hero, HexCoord, HexGrid, ManaColor, PlayMode,
    ResourcePool, SidewaysAs, Terrain, UndoError, UndoRejection,
};

fn session() -> (GameSession, Arc<EventLog>) {
    let hand = vec![
        Card::new(
            CardId(1),
            "Stamina",
            ManaColor::Blue,
            CardEffect::Move(2),
            CardEffect::Move(4),
        ),
        Card::new(
            CardId(2),
            "Determination",
            ManaColor::Blue,
            CardEffect::Block(2),
            CardEffect::Block(5),
        ),
        Card::new(
            CardId(3),
            "Swiftness",
            ManaColor::White,
            CardEffect::Move(2),
            CardEffect::Ranged(3),
        ),
    ];
    let mut hero = Hero::new(HexCoord::ORIGIN, hand);
    hero.points.movement = 1;
    let map = HexGrid::with_tiles([
        (HexCoord::ORIGIN, Terrain::Plains),
        (HexCoord::new(1, 0), Terrain::Hills),
        (HexCoord::new(2, 0), Terrain::Plains),
    ]);
    let pool = ResourcePool::new([ManaColor::Blue, ManaColor::Red, ManaColor::Gold]);
    let config = GameConfig {
        dice_per_turn: 2,
        ..GameConfig::default()
    };

    let log = Arc::new(EventLog::new());
    let session = GameSession::new(GameState::new(hero, pool, map), config, log.clone());
    (session, log)
}

#[test]
fn n_actions_then_n_undos_restore_everything() {
    let (mut session, _) = session();
    let initial = session.state().clone();

    session.take_mana(DieId(0)).expect("blue die is free");
    session
        .play_card(CardId(1), PlayMode::Powered)
        .expect("blue mana powers stamina");
    session
        .move_hero(HexCoord::new(1, 0))
        .expect("five movement covers hills");
    session
        .play_card(CardId(2), PlayMode::Sideways(SidewaysAs::Move))
        .expect("any card plays sideways");
    session
        .move_hero(HexCoord::new(2, 0))
        .expect("three movement covers plains");
    assert_eq!(session.actions().history_len(), 5);
    assert_ne!(session.state(), &initial);

    let mut undone = Vec::new();
    for _ in 0..5 {
        undone.push(session.undo().expect("history is not empty"));
    }

    assert_eq!(
        undone,
        vec![
            ActionKind::MoveHero,
            ActionKind::PlayCard,
            ActionKind::MoveHero,
            ActionKind::PlayCard,
            ActionKind::TakeMana,
        ]
    );
    assert_eq!(session.state(), &initial);
    assert_eq!(session.undo(), Err(UndoError::EmptyHistory));
}

#[test]
fn failed_action_is_rolled_back_and_not_recorded() {
    let (mut session, log) = session();
    let initial = session.state().clone();

    let error = session
        .move_hero(HexCoord::new(1, 0))
        .expect_err("one movement cannot enter hills");

    assert_eq!(
        error.error,
        ActionError::InsufficientMovement {
            required: 3,
            available: 1,
        }
    );
    assert_eq!(session.state(), &initial);
    assert!(!session.actions().can_undo());
    assert!(log.events().is_empty());
}

#[test]
fn undo_during_combat_clears_history_and_restores_nothing() {
    let (mut session, log) = session();
    session.take_mana(DieId(1)).expect("red die is free");
    session
        .play_card(CardId(3), PlayMode::Basic)
        .expect("basic play needs no mana");

    let orc = EnemyBlueprint::new("orc", 3, 3, 2).spawn(EnemyId(1), None);
    session.start_combat(vec![orc]).expect("combat should start");
    assert_eq!(session.actions().history_len(), 0);
    let snapshot = session.state().clone();

    assert_eq!(
        session.undo(),
        Err(UndoError::CombatActive { cleared: 0 })
    );
    assert_eq!(session.actions().history_len(), 0);
    assert_eq!(session.state(), &snapshot);
    assert_eq!(
        log.events().last(),
        Some(&GameEvent::UndoRejected {
            reason: UndoRejection::CombatActive,
            cleared: 0,
        })
    );

    let error = session
        .take_mana(DieId(2))
        .expect_err("actions are locked during combat");
    assert_eq!(error.error, ActionError::CombatActive);
}

#[test]
fn exploration_cannot_be_undone() {
    let (mut session, log) = session();
    session
        .play_card(CardId(1), PlayMode::Basic)
        .expect("basic play needs no mana");

    session
        .explore(vec![(HexCoord::new(0, 1), Terrain::Forest)])
        .expect("an adjacent hidden tile can be explored");

    assert!(session.state().map.is_revealed(HexCoord::new(0, 1)));
    assert_eq!(session.state().hero.points.movement, 1);
    assert_eq!(session.undo(), Err(UndoError::EmptyHistory));
    assert!(log.events().contains(&GameEvent::ExplorationCommitted {
        tiles: vec![HexCoord::new(0, 1)],
    }));
}
