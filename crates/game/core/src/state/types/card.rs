//! Action cards held by the hero.

use super::common::CardId;

/// Mana colour of a die, a crystal-less token, or a card.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ManaColor {
    Red,
    Blue,
    Green,
    White,
    /// Wildcard: powers a card of any basic colour.
    Gold,
    Black,
}

impl ManaColor {
    /// Returns true if a token of this colour can power a card of `card_color`.
    pub fn can_power(self, card_color: ManaColor) -> bool {
        self == card_color || (self == ManaColor::Gold && card_color != ManaColor::Black)
    }
}

/// What a card (or one of its modes) grants when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CardEffect {
    Move(u32),
    Attack(u32),
    Block(u32),
    Influence(u32),
    Ranged(u32),
    Siege(u32),
    GainMana(ManaColor),
    /// No effect (wound cards).
    Nothing,
}

impl CardEffect {
    pub fn is_ranged_source(&self) -> bool {
        matches!(self, CardEffect::Ranged(value) | CardEffect::Siege(value) if *value > 0)
    }

    pub fn is_siege_source(&self) -> bool {
        matches!(self, CardEffect::Siege(value) if *value > 0)
    }
}

/// Which value a sideways-played card contributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SidewaysAs {
    Move,
    Attack,
    Block,
    Influence,
}

/// How a card is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlayMode {
    Basic,
    /// Consumes one temporary mana token able to power the card's colour.
    Powered,
    Sideways(SidewaysAs),
}

/// A card instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub color: Option<ManaColor>,
    pub basic: CardEffect,
    pub powered: CardEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wound: bool,
}

impl Card {
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        color: ManaColor,
        basic: CardEffect,
        powered: CardEffect,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: Some(color),
            basic,
            powered,
            wound: false,
        }
    }

    /// A wound card. It clogs the hand and can never be played.
    pub fn wound(id: CardId) -> Self {
        Self {
            id,
            name: "Wound".to_string(),
            color: None,
            basic: CardEffect::Nothing,
            powered: CardEffect::Nothing,
            wound: true,
        }
    }

    pub fn is_ranged_source(&self) -> bool {
        !self.wound && (self.basic.is_ranged_source() || self.powered.is_ranged_source())
    }

    pub fn is_siege_source(&self) -> bool {
        !self.wound && (self.basic.is_siege_source() || self.powered.is_siege_source())
    }
}
