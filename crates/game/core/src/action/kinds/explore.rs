use crate::action::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{GameState, HexCoord, Terrain};

/// Reveals tiles next to the hero. Cannot be undone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explore {
    pub tiles: Vec<(HexCoord, Terrain)>,
}

impl Explore {
    pub fn new(tiles: Vec<(HexCoord, Terrain)>) -> Self {
        Self { tiles }
    }

    pub fn hexes(&self) -> Vec<HexCoord> {
        self.tiles.iter().map(|(hex, _)| *hex).collect()
    }
}

impl ActionTransition for Explore {
    type Error = ActionError;

    fn kind(&self) -> ActionKind {
        ActionKind::Explore
    }

    fn pre_validate(&self, state: &GameState, config: &GameConfig) -> Result<(), Self::Error> {
        if self.tiles.is_empty() {
            return Err(ActionError::NothingToExplore);
        }
        let from = state.hero.position;
        for (hex, _) in &self.tiles {
            if !from.is_adjacent(*hex) {
                return Err(ActionError::HexNotAdjacent { from, to: *hex });
            }
            if state.map.is_revealed(*hex) {
                return Err(ActionError::TileAlreadyRevealed(*hex));
            }
        }
        let available = state.hero.points.movement;
        if available < config.explore_cost {
            return Err(ActionError::InsufficientMovement {
                required: config.explore_cost,
                available,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, config: &GameConfig) -> Result<(), Self::Error> {
        state.hero.points.movement -= config.explore_cost;
        for (hex, terrain) in &self.tiles {
            state.map.reveal(*hex, *terrain);
        }
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        if self.tiles.iter().all(|(hex, _)| state.map.is_revealed(*hex)) {
            Ok(())
        } else {
            Err(ActionError::PostCondition("explored tile is still hidden"))
        }
    }
}
