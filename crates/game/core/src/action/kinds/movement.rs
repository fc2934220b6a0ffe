use crate::action::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{GameState, HexCoord};

/// Moves the hero to an adjacent revealed hex, paying its terrain cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveHero {
    pub to: HexCoord,
}

impl MoveHero {
    pub fn new(to: HexCoord) -> Self {
        Self { to }
    }

    fn cost(&self, state: &GameState) -> Result<u32, ActionError> {
        state
            .map
            .move_cost(self.to)
            .ok_or(ActionError::InvalidHex(self.to))
    }
}

impl ActionTransition for MoveHero {
    type Error = ActionError;

    fn kind(&self) -> ActionKind {
        ActionKind::MoveHero
    }

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let from = state.hero.position;
        if !from.is_adjacent(self.to) {
            return Err(ActionError::HexNotAdjacent { from, to: self.to });
        }
        let required = self.cost(state)?;
        let available = state.hero.points.movement;
        if available < required {
            return Err(ActionError::InsufficientMovement {
                required,
                available,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let cost = self.cost(state)?;
        state.hero.points.movement -= cost;
        state.hero.position = self.to;
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        if state.hero.position != self.to {
            return Err(ActionError::PostCondition("hero did not reach destination"));
        }
        Ok(())
    }
}
