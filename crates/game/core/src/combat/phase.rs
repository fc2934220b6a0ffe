/// Combat phases, in the only order they can occur.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum CombatPhase {
    #[default]
    NotInCombat,
    Ranged,
    Block,
    Damage,
    Attack,
    Complete,
}

impl CombatPhase {
    /// True from initiation until the combat is ended.
    pub const fn is_active(self) -> bool {
        !matches!(self, CombatPhase::NotInCombat)
    }

    /// True while enemies can still act or be acted upon.
    pub const fn is_resolving(self) -> bool {
        matches!(
            self,
            CombatPhase::Ranged | CombatPhase::Block | CombatPhase::Damage | CombatPhase::Attack
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_ordered() {
        assert!(CombatPhase::Ranged < CombatPhase::Block);
        assert!(CombatPhase::Attack < CombatPhase::Complete);
        assert_eq!(CombatPhase::NotInCombat.to_string(), "not_in_combat");
        assert!(CombatPhase::Complete.is_active());
        assert!(!CombatPhase::Complete.is_resolving());
    }
}
