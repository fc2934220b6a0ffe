use crate::action::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{DieId, GameState};

/// Takes a die from the shared pool as a temporary mana token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeMana {
    pub die: DieId,
}

impl TakeMana {
    pub fn new(die: DieId) -> Self {
        Self { die }
    }
}

impl ActionTransition for TakeMana {
    type Error = ActionError;

    fn kind(&self) -> ActionKind {
        ActionKind::TakeMana
    }

    fn pre_validate(&self, state: &GameState, config: &GameConfig) -> Result<(), Self::Error> {
        if !state.pool.is_available(self.die) {
            return Err(ActionError::DieUnavailable(self.die));
        }
        if state.pool.used_count() >= config.dice_per_turn {
            return Err(ActionError::DiceLimitReached {
                limit: config.dice_per_turn,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let color = state
            .pool
            .mark_used(self.die)
            .ok_or(ActionError::DieUnavailable(self.die))?;
        state.hero.temp_mana.push(color);
        Ok(())
    }
}
