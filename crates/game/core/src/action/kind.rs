/// Player-triggered out-of-combat actions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    MoveHero,
    PlayCard,
    TakeMana,
    /// Irreversible: reveals new tiles.
    Explore,
}

impl ActionKind {
    /// Whether the action can be taken back with an undo.
    pub const fn is_reversible(self) -> bool {
        !matches!(self, ActionKind::Explore)
    }
}
