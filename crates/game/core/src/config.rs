/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of mana dice the hero may take from the pool per turn.
    pub dice_per_turn: u32,
    /// Movement points spent to reveal a new map tile.
    pub explore_cost: u32,
    /// Value granted by playing any non-wound card sideways.
    pub sideways_value: u32,
    /// Combat policy knobs.
    pub rules: CombatRules,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_ENEMIES: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DICE_PER_TURN: u32 = 1;
    pub const DEFAULT_EXPLORE_COST: u32 = 2;
    pub const DEFAULT_SIDEWAYS_VALUE: u32 = 1;

    pub fn new() -> Self {
        Self {
            dice_per_turn: Self::DEFAULT_DICE_PER_TURN,
            explore_cost: Self::DEFAULT_EXPLORE_COST,
            sideways_value: Self::DEFAULT_SIDEWAYS_VALUE,
            rules: CombatRules::default(),
        }
    }

    pub fn with_rules(rules: CombatRules) -> Self {
        Self {
            rules,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tunable combat policy.
///
/// The multipliers follow the board game rules text. The trait policies cover
/// abilities whose exact effect is a table-level house rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Block required against a swift enemy, as a multiple of its attack.
    pub swift_multiplier: u32,
    /// Wound multiplier for unblocked brutal enemies.
    pub brutal_multiplier: u32,
    /// Armor multiplier when the enemy resists the incoming attack type.
    pub resistance_multiplier: u32,
    pub poison_mode: PoisonMode,
    pub vampiric: VampiricPolicy,
    pub assassin: AssassinPolicy,
    /// Non-wound cards the hero discards per unblocked paralyzing enemy.
    pub paralyze_discards: u32,
}

impl CombatRules {
    pub const DEFAULT_SWIFT_MULTIPLIER: u32 = 2;
    pub const DEFAULT_BRUTAL_MULTIPLIER: u32 = 2;
    pub const DEFAULT_RESISTANCE_MULTIPLIER: u32 = 2;
    pub const DEFAULT_PARALYZE_DISCARDS: u32 = 1;
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            swift_multiplier: Self::DEFAULT_SWIFT_MULTIPLIER,
            brutal_multiplier: Self::DEFAULT_BRUTAL_MULTIPLIER,
            resistance_multiplier: Self::DEFAULT_RESISTANCE_MULTIPLIER,
            poison_mode: PoisonMode::default(),
            vampiric: VampiricPolicy::default(),
            assassin: AssassinPolicy::default(),
            paralyze_discards: Self::DEFAULT_PARALYZE_DISCARDS,
        }
    }
}

/// How an unblocked poisonous enemy hurts the hero.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PoisonMode {
    /// Normal wounds plus one poison stack.
    #[default]
    Additional,
    /// One poison stack instead of the normal wounds.
    Replace,
}

/// What an unblocked vampiric enemy gains from wounding the hero.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VampiricPolicy {
    /// Bosses recover health and regular enemies gain armor, one per wound dealt.
    #[default]
    HealAttacker,
    /// The hero takes one extra wound.
    ExtraWound,
}

/// Who an unblocked assassin strikes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AssassinPolicy {
    /// The lowest-armor defender among the hero and its ready units.
    #[default]
    WeakestDefender,
    /// Always the hero.
    HeroOnly,
}
