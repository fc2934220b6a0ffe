//! Shared resource pool of mana dice.

use super::card::ManaColor;
use super::common::DieId;

/// A die in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManaDie {
    pub id: DieId,
    pub color: ManaColor,
    pub used: bool,
}

/// Dice available to the hero this round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    dice: Vec<ManaDie>,
}

impl ResourcePool {
    pub fn new(colors: impl IntoIterator<Item = ManaColor>) -> Self {
        let dice = colors
            .into_iter()
            .enumerate()
            .map(|(index, color)| ManaDie {
                id: DieId(index as u32),
                color,
                used: false,
            })
            .collect();
        Self { dice }
    }

    pub fn dice(&self) -> &[ManaDie] {
        &self.dice
    }

    pub fn die(&self, id: DieId) -> Option<&ManaDie> {
        self.dice.iter().find(|die| die.id == id)
    }

    pub fn is_available(&self, id: DieId) -> bool {
        self.die(id).is_some_and(|die| !die.used)
    }

    pub fn used_count(&self) -> u32 {
        self.dice.iter().filter(|die| die.used).count() as u32
    }

    /// Marks a die as used and returns its colour.
    ///
    /// Returns `None` if the die is unknown or already used.
    pub fn mark_used(&mut self, id: DieId) -> Option<ManaColor> {
        let die = self.dice.iter_mut().find(|die| die.id == id && !die.used)?;
        die.used = true;
        Some(die.color)
    }

    /// Used-die markers in pool order.
    pub fn used_markers(&self) -> Vec<bool> {
        self.dice.iter().map(|die| die.used).collect()
    }

    /// Restores used-die markers captured by [`Self::used_markers`].
    pub fn restore_markers(&mut self, markers: &[bool]) {
        for (die, used) in self.dice.iter_mut().zip(markers) {
            die.used = *used;
        }
    }

    /// Returns every die to the pool at the end of a round.
    pub fn reset(&mut self) {
        for die in &mut self.dice {
            die.used = false;
        }
    }
}
