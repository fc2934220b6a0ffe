//! Snapshots taken before each reversible action.

use crate::state::{Card, GameState, HexCoord, HeroPoints, ManaColor};

use super::kind::ActionKind;

/// Deep copy of everything a reversible action may touch.
///
/// Opaque on purpose: the only thing a checkpoint can do is put the state
/// back the way it was.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCheckpoint {
    kind: ActionKind,
    position: HexCoord,
    points: HeroPoints,
    hand: Vec<Card>,
    play_area: Vec<Card>,
    temp_mana: Vec<ManaColor>,
    used_dice: Vec<bool>,
}

impl ActionCheckpoint {
    pub fn capture(kind: ActionKind, state: &GameState) -> Self {
        let hero = &state.hero;
        Self {
            kind,
            position: hero.position,
            points: hero.points,
            hand: hero.hand.clone(),
            play_area: hero.play_area.clone(),
            temp_mana: hero.temp_mana.clone(),
            used_dice: state.pool.used_markers(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn restore(self, state: &mut GameState) {
        let hero = &mut state.hero;
        hero.position = self.position;
        hero.points = self.points;
        hero.hand = self.hand;
        hero.play_area = self.play_area;
        hero.temp_mana = self.temp_mana;
        state.pool.restore_markers(&self.used_dice);
    }
}
