//! Capabilities shared by everything that takes part in a fight.

use super::enemy::Enemy;
use super::hero::{Hero, Unit, UnitAbility};

/// Closed set of combatant kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CombatantKind {
    Hero,
    Unit,
    Enemy,
    Boss,
}

/// Mandatory capability set of a combatant. Every kind answers every query.
pub trait Combatant {
    fn kind(&self) -> CombatantKind;

    /// Can act, or be targeted, in the current combat.
    fn is_ready(&self) -> bool;

    fn armor(&self) -> u32;

    /// Printed attack value; zero for combatants that never attack.
    fn attack_value(&self) -> u32;
}

impl Combatant for Hero {
    fn kind(&self) -> CombatantKind {
        CombatantKind::Hero
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn armor(&self) -> u32 {
        self.armor
    }

    fn attack_value(&self) -> u32 {
        self.points.attack
    }
}

impl Combatant for Unit {
    fn kind(&self) -> CombatantKind {
        CombatantKind::Unit
    }

    fn is_ready(&self) -> bool {
        self.ready && !self.wounded
    }

    fn armor(&self) -> u32 {
        self.armor
    }

    fn attack_value(&self) -> u32 {
        match self.ability {
            UnitAbility::Attack(v) | UnitAbility::Ranged(v) | UnitAbility::Siege(v) => v,
            UnitAbility::Block(_) => 0,
        }
    }
}

impl Combatant for Enemy {
    fn kind(&self) -> CombatantKind {
        if self.is_boss() {
            CombatantKind::Boss
        } else {
            CombatantKind::Enemy
        }
    }

    fn is_ready(&self) -> bool {
        self.boss().is_none_or(|profile| profile.current_health > 0)
    }

    fn armor(&self) -> u32 {
        self.armor
    }

    fn attack_value(&self) -> u32 {
        self.attack
    }
}
