//! The scripted session: a few reversible actions, an exploration, then a
//! combat against a summoner and a pack of wolf riders.

use anyhow::Result;
use hexbound_core::{
    AttackType, Card, CardId, DieId, EnemyId, GameState, Hero, HexCoord, HexGrid, ManaColor,
    PlayMode, RangedContribution, ResourcePool, Terrain, Unit, UnitAbility, UnitId,
};
use hexbound_runtime::{Runtime, SlotPurpose};

const CROSSBOWMEN: UnitId = UnitId(1);
const GOLEMS: UnitId = UnitId(2);

pub fn starting_state(deck: Vec<Card>) -> GameState {
    let hero = Hero::new(HexCoord::ORIGIN, deck).with_units(vec![
        Unit::new(CROSSBOWMEN, "Crossbowmen", 4, UnitAbility::Ranged(3)),
        Unit::new(GOLEMS, "Golems", 5, UnitAbility::Block(2)),
    ]);
    let map = HexGrid::with_tiles([
        (HexCoord::ORIGIN, Terrain::Plains),
        (HexCoord::new(1, 0), Terrain::Plains),
        (HexCoord::new(1, -1), Terrain::Hills),
    ]);
    let pool = ResourcePool::new([ManaColor::Green, ManaColor::Blue, ManaColor::Red]);
    GameState::new(hero, pool, map)
}

pub async fn run(runtime: &mut Runtime) -> Result<()> {
    runtime.take_mana(DieId(0))?;
    runtime.play_card(CardId(1), PlayMode::Powered)?;
    runtime.move_hero(HexCoord::new(1, 0))?;
    let undone = runtime.undo()?;
    tracing::info!(%undone, "changed our mind");
    runtime.move_hero(HexCoord::new(1, 0))?;
    runtime.play_card(CardId(2), PlayMode::Basic)?;
    runtime.explore(vec![(HexCoord::new(2, 0), Terrain::Forest)])?;

    let phase = runtime.start_encounter(&["orc_summoner", "wolf_riders"])?;
    tracing::info!(%phase, "ambushed");
    if let Err(error) = runtime.undo() {
        tracing::info!(%error, "no taking that back");
    }

    runtime.activate_unit(CROSSBOWMEN)?;
    runtime.add_ranged(RangedContribution::Ranged(2))?;
    let ranged = runtime.end_ranged_phase()?;
    tracing::info!(defeated = ?ranged.defeated, unspent = ranged.unspent, "volley");

    let wolves = EnemyId(2);
    runtime.activate_unit(GOLEMS)?;
    let block = runtime.block_enemy(wolves, 6)?;
    tracing::info!(status = ?block.status, required = block.required, "shield wall");
    runtime.end_block_phase()?;
    runtime.resolve_damage_phase()?;

    let prediction = runtime.predict_outcome(4, 0)?;
    tracing::info!(?prediction, "sizing up the charge");
    runtime.attack_enemies(4, AttackType::Physical)?;
    let summary = runtime.end_combat()?;
    tracing::info!(
        victory = summary.victory,
        fame = summary.fame_gained,
        wounds = summary.wounds_taken,
        "combat over"
    );

    let slot = runtime.request_slot(SlotPurpose::Save);
    let slots = runtime.slots().clone();
    let request = slot.id();
    tokio::spawn(async move { slots.respond(request, Some(1)) });
    let chosen = slot.wait().await?;
    tracing::info!(?chosen, "saving");
    println!("{}", runtime.save_roster()?);

    Ok(())
}
