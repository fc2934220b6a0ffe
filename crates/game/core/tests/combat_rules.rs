//! Rules that must hold for every combat, exercised through the public API.

use std::sync::Arc;

use hexbound_core::{
    AttackType, BlockStatus, Card, CardEffect, CardId, CombatEngine, CombatError, CombatPhase,
    CombatRules, EnemyBlueprint, EnemyId, EnemyTraits, EventLog, GameEvent, Hero, HexCoord,
    ManaColor, RangedContribution, StatusEffectKind, StatusEffectManager, StatusError,
    StatusOutcome,
};

fn bowman() -> Hero {
    Hero::new(
        HexCoord::ORIGIN,
        vec![Card::new(
            CardId(1),
            "Longbow",
            ManaColor::Green,
            CardEffect::Ranged(3),
            CardEffect::Ranged(5),
        )],
    )
}

fn engine() -> (CombatEngine, Arc<EventLog>) {
    let log = Arc::new(EventLog::new());
    (CombatEngine::new(CombatRules::default(), log.clone()), log)
}

#[test]
fn ranged_three_defeats_armor_three_without_wounds() {
    let (mut engine, _) = engine();
    let mut hero = bowman();
    let brute = EnemyBlueprint::new("brute", 3, 4, 3).spawn(EnemyId(1), None);

    engine
        .initiate_combat(&mut hero, vec![brute])
        .expect("combat should start");
    engine
        .add_ranged(RangedContribution::Ranged(3))
        .expect("ranged phase accepts ranged points");
    let resolution = engine
        .end_ranged_phase(&mut hero)
        .expect("ranged phase should resolve");

    assert_eq!(resolution.defeated, vec![EnemyId(1)]);
    assert_eq!(engine.phase(), CombatPhase::Complete);

    let summary = engine.end_combat(&mut hero).expect("combat should end");
    assert!(summary.victory);
    assert_eq!(summary.wounds_taken, 0);
    assert_eq!(hero.wounds, 0);
}

#[test]
fn ranged_points_never_touch_fortified_enemies() {
    let (mut engine, _) = engine();
    let mut hero = bowman();
    let keep = EnemyBlueprint::new("keep_guard", 2, 3, 4)
        .with_traits(EnemyTraits::FORTIFIED)
        .spawn(EnemyId(1), None);
    let wolf = EnemyBlueprint::new("wolf", 9, 2, 1).spawn(EnemyId(2), None);

    let phase = engine
        .initiate_combat(&mut hero, vec![keep, wolf])
        .expect("combat should start");
    assert_eq!(phase, CombatPhase::Ranged);

    engine
        .add_ranged(RangedContribution::Ranged(20))
        .expect("ranged phase accepts ranged points");
    let before = engine.enemies()[0].clone();
    let resolution = engine
        .end_ranged_phase(&mut hero)
        .expect("ranged phase should resolve");

    assert_eq!(resolution.defeated, vec![EnemyId(2)]);
    let after = engine
        .combat()
        .enemy(EnemyId(1))
        .expect("fortified enemy survives");
    assert_eq!(after, &before);
    assert_eq!(engine.phase(), CombatPhase::Block);
}

#[test]
fn fortified_only_enemies_skip_the_ranged_phase() {
    let (mut engine, _) = engine();
    let mut hero = bowman();
    let keep = EnemyBlueprint::new("keep_guard", 2, 3, 4)
        .with_traits(EnemyTraits::FORTIFIED)
        .spawn(EnemyId(1), None);

    let phase = engine
        .initiate_combat(&mut hero, vec![keep])
        .expect("combat should start");

    assert_eq!(phase, CombatPhase::Block);
    assert!(matches!(
        engine.add_ranged(RangedContribution::Ranged(3)),
        Err(CombatError::InvalidPhase { .. })
    ));
}

#[test]
fn swift_enemy_needs_double_block() {
    let (mut engine, _) = engine();
    let mut hero = Hero::default();
    let raider = EnemyBlueprint::new("raider", 4, 3, 2)
        .with_traits(EnemyTraits::SWIFT)
        .spawn(EnemyId(1), None);

    engine
        .initiate_combat(&mut hero, vec![raider])
        .expect("combat should start");
    let outcome = engine
        .block_enemy(EnemyId(1), 5)
        .expect("block phase accepts blocks");
    assert_eq!(outcome.status, BlockStatus::Insufficient);
    assert_eq!(outcome.required, 6);

    engine
        .end_block_phase(&mut hero)
        .expect("block phase should end");
    let report = engine
        .resolve_damage_phase(&mut hero)
        .expect("damage phase should resolve");

    // Attack 3 against armor 2.
    assert_eq!(report.wounds, 2);
    assert_eq!(hero.wounds, 2);
}

#[test]
fn blocking_twice_counts_once() {
    let (mut engine, _) = engine();
    let mut hero = Hero::default();
    let orc = EnemyBlueprint::new("orc", 3, 3, 2).spawn(EnemyId(1), None);

    engine
        .initiate_combat(&mut hero, vec![orc])
        .expect("combat should start");
    let first = engine.block_enemy(EnemyId(1), 3).expect("first block");
    let second = engine.block_enemy(EnemyId(1), 3).expect("second block");

    assert!(first.blocked);
    assert!(!second.blocked);
    assert_eq!(second.status, BlockStatus::AlreadyBlocked);
    assert_eq!(engine.totals().block, 3);
    assert!(engine.is_blocked(EnemyId(1)));
}

#[test]
fn unblocked_attack_four_against_armor_two_deals_two_wounds() {
    let (mut engine, log) = engine();
    let mut hero = Hero::default().with_armor(2);
    let ogre = EnemyBlueprint::new("ogre", 5, 4, 3).spawn(EnemyId(1), None);

    engine
        .initiate_combat(&mut hero, vec![ogre])
        .expect("combat should start");
    engine
        .end_block_phase(&mut hero)
        .expect("block phase should end");
    let report = engine
        .resolve_damage_phase(&mut hero)
        .expect("damage phase should resolve");

    assert_eq!(report.wounds, 2);
    assert_eq!(engine.phase(), CombatPhase::Attack);
    assert!(log.events().contains(&GameEvent::WoundsTaken {
        count: 2,
        source: Some(EnemyId(1)),
    }));
}

#[test]
fn two_poison_stacks_become_two_wounds() {
    let (mut engine, _) = engine();
    let mut hero = Hero::default();
    let orc = EnemyBlueprint::new("orc", 3, 3, 2).spawn(EnemyId(1), None);

    engine
        .initiate_combat(&mut hero, vec![orc])
        .expect("combat should start");
    engine
        .apply_hero_status(StatusEffectKind::Poison)
        .expect("first poison stack");
    engine
        .apply_hero_status(StatusEffectKind::Poison)
        .expect("second poison stack");
    engine
        .block_enemy(EnemyId(1), 3)
        .expect("block phase accepts blocks");
    engine
        .end_block_phase(&mut hero)
        .expect("block phase should end");
    engine
        .resolve_damage_phase(&mut hero)
        .expect("damage phase should resolve");
    assert_eq!(hero.wounds, 0);

    let summary = engine.end_combat(&mut hero).expect("combat should end");

    assert_eq!(summary.wounds_taken, 2);
    assert_eq!(hero.wounds, 2);
    assert_eq!(engine.status().hero_stacks(StatusEffectKind::Poison), 0);
}

#[test]
fn attacking_in_the_block_phase_changes_nothing() {
    let (mut engine, log) = engine();
    let mut hero = Hero::default();
    let orc = EnemyBlueprint::new("orc", 3, 3, 2).spawn(EnemyId(1), None);
    engine
        .initiate_combat(&mut hero, vec![orc])
        .expect("combat should start");

    let combat = engine.combat().clone();
    let hero_before = hero.clone();
    let events = log.events().len();

    let error = engine
        .attack_enemies(&mut hero, 10, AttackType::Physical)
        .expect_err("attack is only legal in the attack phase");

    assert_eq!(
        error,
        CombatError::InvalidPhase {
            operation: "attack_enemies",
            expected: CombatPhase::Attack,
            actual: CombatPhase::Block,
        }
    );
    assert_eq!(engine.combat(), &combat);
    assert_eq!(hero, hero_before);
    assert_eq!(log.events().len(), events);
}

#[test]
fn stacking_stops_at_the_cap() {
    let mut manager = StatusEffectManager::new();

    for expected in 1..=3 {
        let outcome = manager
            .apply_to_hero(StatusEffectKind::Weakened)
            .expect("below the cap");
        assert_eq!(outcome.stacks(), expected);
    }
    let capped = manager.apply_to_hero(StatusEffectKind::Weakened);

    assert_eq!(
        capped,
        Err(StatusError::AtStackCap {
            kind: StatusEffectKind::Weakened,
            max: 3,
        })
    );
    assert_eq!(manager.hero_stacks(StatusEffectKind::Weakened), 3);
    assert_eq!(
        manager.apply_to_hero(StatusEffectKind::Shielded),
        Ok(StatusOutcome::Applied)
    );
}

#[test]
fn full_encounter_with_a_summoner() {
    let (mut engine, log) = engine();
    let mut hero = Hero::default().with_armor(3);
    let imp = EnemyBlueprint::new("imp", 2, 2, 1);
    let warlock = EnemyBlueprint::new("warlock", 4, 3, 5)
        .with_traits(EnemyTraits::SUMMONER)
        .with_summons(imp)
        .spawn(EnemyId(1), Some(HexCoord::new(1, 0)));

    engine
        .initiate_combat(&mut hero, vec![warlock])
        .expect("combat should start");
    engine
        .block_enemy(EnemyId(1), 3)
        .expect("block phase accepts blocks");
    let summons = engine
        .end_block_phase(&mut hero)
        .expect("block phase should end");
    assert_eq!(summons.len(), 1);
    let imp_id = summons[0].enemy;

    let damage = engine
        .resolve_damage_phase(&mut hero)
        .expect("damage phase should resolve");
    // The summoned imp strikes unblocked: attack 2 against armor 3.
    assert_eq!(damage.wounds, 1);

    let resolution = engine
        .attack_enemies(&mut hero, 6, AttackType::Physical)
        .expect("attack phase accepts attacks");
    assert_eq!(resolution.defeated, vec![imp_id, EnemyId(1)]);
    assert_eq!(resolution.phase, CombatPhase::Complete);

    let summary = engine.end_combat(&mut hero).expect("combat should end");
    assert!(summary.victory);
    assert_eq!(summary.fame_gained, 6);
    assert_eq!(hero.fame, 6);
    assert_eq!(summary.wounds_taken, 1);
    assert_eq!(
        log.names().first().copied(),
        Some("combat_started"),
        "combat_started opens the event stream"
    );
}
