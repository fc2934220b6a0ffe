use crate::action::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{CardEffect, CardId, GameState, ManaColor, PlayMode, SidewaysAs};

/// Plays a card from the hand into the play area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayCard {
    pub card: CardId,
    pub mode: PlayMode,
}

impl PlayCard {
    pub fn new(card: CardId, mode: PlayMode) -> Self {
        Self { card, mode }
    }
}

/// Index of the token that should pay for a card of `color`: an exact match
/// is preferred over gold.
fn mana_token(tokens: &[ManaColor], color: ManaColor) -> Option<usize> {
    tokens
        .iter()
        .position(|token| *token == color)
        .or_else(|| tokens.iter().position(|token| token.can_power(color)))
}

impl ActionTransition for PlayCard {
    type Error = ActionError;

    fn kind(&self) -> ActionKind {
        ActionKind::PlayCard
    }

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let hero = &state.hero;
        let card = hero
            .card_in_hand(self.card)
            .ok_or(ActionError::CardNotInHand(self.card))?;
        if card.wound {
            return Err(ActionError::WoundNotPlayable(self.card));
        }
        if self.mode == PlayMode::Powered {
            let powered = card
                .color
                .and_then(|color| mana_token(&hero.temp_mana, color));
            if powered.is_none() {
                return Err(ActionError::InsufficientMana { color: card.color });
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, config: &GameConfig) -> Result<(), Self::Error> {
        let hero = &mut state.hero;
        let card = hero
            .move_to_play_area(self.card)
            .cloned()
            .ok_or(ActionError::CardNotInHand(self.card))?;

        let effect = match self.mode {
            PlayMode::Basic => card.basic,
            PlayMode::Powered => {
                let index = card
                    .color
                    .and_then(|color| mana_token(&hero.temp_mana, color))
                    .ok_or(ActionError::InsufficientMana { color: card.color })?;
                hero.temp_mana.remove(index);
                card.powered
            }
            PlayMode::Sideways(as_value) => {
                let value = config.sideways_value;
                match as_value {
                    SidewaysAs::Move => CardEffect::Move(value),
                    SidewaysAs::Attack => CardEffect::Attack(value),
                    SidewaysAs::Block => CardEffect::Block(value),
                    SidewaysAs::Influence => CardEffect::Influence(value),
                }
            }
        };
        hero.gain(effect);
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let hero = &state.hero;
        if hero.card_in_hand(self.card).is_some()
            || !hero.play_area.iter().any(|card| card.id == self.card)
        {
            return Err(ActionError::PostCondition("card did not reach the play area"));
        }
        Ok(())
    }
}
