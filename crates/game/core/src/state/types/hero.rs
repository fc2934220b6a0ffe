//! The hero and its recruited units.

use super::card::{Card, CardEffect, ManaColor};
use super::common::{CardId, HexCoord, UnitId};

/// Points accumulated this turn from played cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroPoints {
    pub movement: u32,
    pub attack: u32,
    pub block: u32,
    pub influence: u32,
}

/// Ability a unit contributes when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitAbility {
    Attack(u32),
    Block(u32),
    Ranged(u32),
    Siege(u32),
}

impl UnitAbility {
    pub fn value(&self) -> u32 {
        match *self {
            UnitAbility::Attack(v)
            | UnitAbility::Block(v)
            | UnitAbility::Ranged(v)
            | UnitAbility::Siege(v) => v,
        }
    }
}

/// A unit recruited by the hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub armor: u32,
    pub ability: UnitAbility,
    pub ready: bool,
    pub wounded: bool,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, armor: u32, ability: UnitAbility) -> Self {
        Self {
            id,
            name: name.into(),
            armor,
            ability,
            ready: true,
            wounded: false,
        }
    }
}

/// Hero state read and written by the combat engine and the action manager.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub position: HexCoord,
    pub points: HeroPoints,
    pub hand: Vec<Card>,
    /// Cards played this turn.
    pub play_area: Vec<Card>,
    pub discard: Vec<Card>,
    /// Temporary mana tokens available this turn.
    pub temp_mana: Vec<ManaColor>,
    /// Wound cards currently held (hand and discard).
    pub wounds: u32,
    pub armor: u32,
    pub fame: u32,
    pub units: Vec<Unit>,
    next_wound_id: u32,
}

impl Hero {
    pub const DEFAULT_ARMOR: u32 = 2;
    /// Wound cards are numbered from here so they never collide with deck cards.
    pub const WOUND_ID_BASE: u32 = 1_000_000;

    pub fn new(position: HexCoord, hand: Vec<Card>) -> Self {
        Self {
            position,
            points: HeroPoints::default(),
            hand,
            play_area: Vec::new(),
            discard: Vec::new(),
            temp_mana: Vec::new(),
            wounds: 0,
            armor: Self::DEFAULT_ARMOR,
            fame: 0,
            units: Vec::new(),
            next_wound_id: Self::WOUND_ID_BASE,
        }
    }

    pub fn with_armor(mut self, armor: u32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self
    }

    pub fn card_in_hand(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|card| card.id == id)
    }

    /// Moves a card from the hand into the play area.
    pub fn move_to_play_area(&mut self, id: CardId) -> Option<&Card> {
        let index = self.hand.iter().position(|card| card.id == id)?;
        let card = self.hand.remove(index);
        self.play_area.push(card);
        self.play_area.last()
    }

    /// Adds `count` wound cards to the hand.
    pub fn take_wounds(&mut self, count: u32) {
        for _ in 0..count {
            let card = Card::wound(CardId(self.next_wound_id));
            self.next_wound_id += 1;
            self.hand.push(card);
        }
        self.wounds += count;
    }

    /// Removes up to `count` wound cards, hand first. Returns how many were healed.
    pub fn heal_wounds(&mut self, count: u32) -> u32 {
        let mut healed = 0;
        while healed < count {
            if let Some(index) = self.hand.iter().position(|card| card.wound) {
                self.hand.remove(index);
            } else if let Some(index) = self.discard.iter().position(|card| card.wound) {
                self.discard.remove(index);
            } else {
                break;
            }
            healed += 1;
        }
        self.wounds = self.wounds.saturating_sub(healed);
        healed
    }

    /// Discards up to `count` non-wound cards from the front of the hand.
    pub fn discard_non_wounds(&mut self, count: u32) -> Vec<CardId> {
        let mut discarded = Vec::new();
        while (discarded.len() as u32) < count {
            let Some(index) = self.hand.iter().position(|card| !card.wound) else {
                break;
            };
            let card = self.hand.remove(index);
            discarded.push(card.id);
            self.discard.push(card);
        }
        discarded
    }

    /// Any ranged or siege source among hand cards and ready units.
    pub fn has_ranged_source(&self) -> bool {
        self.hand.iter().any(Card::is_ranged_source)
            || self.ready_units().any(|unit| {
                matches!(unit.ability, UnitAbility::Ranged(v) | UnitAbility::Siege(v) if v > 0)
            })
    }

    /// Any siege source among hand cards and ready units.
    pub fn has_siege_source(&self) -> bool {
        self.hand.iter().any(Card::is_siege_source)
            || self
                .ready_units()
                .any(|unit| matches!(unit.ability, UnitAbility::Siege(v) if v > 0))
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    /// Units that can still be activated or targeted this combat.
    pub fn ready_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.ready && !unit.wounded)
    }

    /// Adds the value of a played effect to the hero's points or mana.
    pub fn gain(&mut self, effect: CardEffect) {
        match effect {
            CardEffect::Move(v) => self.points.movement += v,
            CardEffect::Attack(v) | CardEffect::Ranged(v) | CardEffect::Siege(v) => {
                self.points.attack += v
            }
            CardEffect::Block(v) => self.points.block += v,
            CardEffect::Influence(v) => self.points.influence += v,
            CardEffect::GainMana(color) => self.temp_mana.push(color),
            CardEffect::Nothing => {}
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new(HexCoord::ORIGIN, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wounds_are_cards_in_hand() {
        let mut hero = Hero::default();
        hero.take_wounds(2);

        assert_eq!(hero.wounds, 2);
        assert_eq!(hero.hand.iter().filter(|card| card.wound).count(), 2);
        assert_ne!(hero.hand[0].id, hero.hand[1].id);

        assert_eq!(hero.heal_wounds(5), 2);
        assert_eq!(hero.wounds, 0);
        assert!(hero.hand.is_empty());
    }

    #[test]
    fn discard_skips_wounds() {
        let strike = Card::new(
            CardId(1),
            "Strike",
            ManaColor::Red,
            CardEffect::Attack(2),
            CardEffect::Attack(4),
        );
        let mut hero = Hero::new(HexCoord::ORIGIN, vec![strike]);
        hero.take_wounds(1);

        let discarded = hero.discard_non_wounds(3);

        assert_eq!(discarded, vec![CardId(1)]);
        assert_eq!(hero.hand.len(), 1);
        assert!(hero.hand[0].wound);
    }
}
