//! Status effect kinds, their definition table and the bounded effect set.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Types of status effects.
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
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    /// Converted to wounds when the combat ends.
    Poison,

    /// Deals damage equal to its stacks at every phase start.
    Burn,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Heals wounds (or boss health) equal to its stacks at every phase start.
    Regeneration,

    /// Hero armor +1.
    Shielded,

    /// Attack +2. Leaves the bearer weakened when it wears off.
    Enraged,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Attack −stacks.
    Weakened,

    /// Armor −stacks.
    Sundered,

    /// Enemy deals no damage.
    Frozen,
}

/// Remaining lifetime of an effect, counted in ticks of its [`StatusClock`].
///
/// Serialized as a plain integer where `-1` is permanent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i32", into = "i32"))]
pub enum Duration {
    Turns(u8),
    /// Lasts until explicitly removed or the combat ends.
    Permanent,
}

impl Duration {
    /// Raw encoding: `-1` is permanent.
    pub const fn as_raw(self) -> i32 {
        match self {
            Duration::Turns(n) => n as i32,
            Duration::Permanent => -1,
        }
    }

    /// Inverse of [`Self::as_raw`]. Negative values are permanent, values
    /// above `u8::MAX` saturate.
    pub fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            Duration::Permanent
        } else {
            Duration::Turns(raw.min(u8::MAX as i32) as u8)
        }
    }

    pub const fn is_permanent(self) -> bool {
        matches!(self, Duration::Permanent)
    }

    /// Decrements a finite duration. Returns true once it has run out.
    fn tick(&mut self) -> bool {
        match self {
            Duration::Turns(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
            Duration::Permanent => false,
        }
    }
}

impl From<i32> for Duration {
    fn from(raw: i32) -> Self {
        Duration::from_raw(raw)
    }
}

impl From<Duration> for i32 {
    fn from(duration: Duration) -> Self {
        duration.as_raw()
    }
}

/// When an effect's duration counts down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusClock {
    /// Entry to every resolving phase.
    PhaseStart,
    /// End of the damage phase. Block-phase protections live through the
    /// damage they were applied against.
    DamageResolved,
}

/// Static rules of one status effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusDefinition {
    pub max_stacks: u8,
    pub duration: Duration,
    pub stackable: bool,
    /// Cleared when the combat ends.
    pub combat_scoped: bool,
    pub clock: StatusClock,
}

impl StatusEffectKind {
    pub const fn definition(self) -> StatusDefinition {
        use Duration::*;
        let (max_stacks, duration, stackable, combat_scoped) = match self {
            StatusEffectKind::Poison => (5, Permanent, true, true),
            StatusEffectKind::Burn => (3, Turns(2), true, true),
            StatusEffectKind::Regeneration => (3, Turns(3), true, false),
            StatusEffectKind::Weakened => (3, Turns(2), true, true),
            StatusEffectKind::Sundered => (2, Turns(2), true, true),
            StatusEffectKind::Shielded => (1, Turns(1), false, true),
            StatusEffectKind::Frozen => (1, Turns(1), false, true),
            StatusEffectKind::Enraged => (1, Turns(2), false, true),
        };
        let clock = match self {
            StatusEffectKind::Shielded | StatusEffectKind::Frozen => StatusClock::DamageResolved,
            _ => StatusClock::PhaseStart,
        };
        StatusDefinition {
            max_stacks,
            duration,
            stackable,
            combat_scoped,
            clock,
        }
    }

    /// Effect applied to the same bearer when this one is removed.
    pub const fn on_remove(self) -> Option<StatusEffectKind> {
        match self {
            StatusEffectKind::Enraged => Some(StatusEffectKind::Weakened),
            _ => None,
        }
    }
}

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub stacks: u8,
    pub remaining: Duration,
    pub stackable: bool,
}

impl StatusEffect {
    /// Fresh effect with one stack and the kind's default duration.
    pub fn new(kind: StatusEffectKind) -> Self {
        let definition = kind.definition();
        Self {
            kind,
            stacks: 1,
            remaining: definition.duration,
            stackable: definition.stackable,
        }
    }
}

/// Active effects on one bearer, bounded by [`GameConfig::MAX_STATUS_EFFECTS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSet {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|effect| effect.kind == kind)
    }

    pub fn contains(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Current stacks of `kind`, zero when absent.
    pub fn stacks(&self, kind: StatusEffectKind) -> u8 {
        self.get(kind).map_or(0, |effect| effect.stacks)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub(crate) fn get_mut(&mut self, kind: StatusEffectKind) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|effect| effect.kind == kind)
    }

    /// Pushes a new effect. Returns the effect back if the set is full.
    pub(crate) fn push(&mut self, effect: StatusEffect) -> Result<(), StatusEffect> {
        self.effects.try_push(effect).map_err(|error| error.element())
    }

    pub(crate) fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|effect| effect.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Decrements the finite durations driven by `clock` and removes what
    /// ran out.
    pub(crate) fn tick(&mut self, clock: StatusClock) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        self.effects.retain(|effect| {
            if effect.kind.definition().clock != clock {
                return true;
            }
            if effect.remaining.tick() {
                expired.push(*effect);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Drops combat-scoped effects without running removal hooks.
    pub(crate) fn clear_combat_scoped(&mut self) {
        self.effects
            .retain(|effect| !effect.kind.definition().combat_scoped);
    }

    pub(crate) fn clear(&mut self) {
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_round_trips_as_minus_one() {
        assert_eq!(i32::from(Duration::Permanent), -1);
        assert_eq!(Duration::from(-1), Duration::Permanent);
        assert_eq!(Duration::from(-7), Duration::Permanent);
        assert_eq!(Duration::from(2), Duration::Turns(2));
        assert_eq!(Duration::from(300), Duration::Turns(u8::MAX));
    }

    #[test]
    fn definition_table_matches_rules() {
        let poison = StatusEffectKind::Poison.definition();
        assert_eq!(poison.max_stacks, 5);
        assert!(poison.duration.is_permanent());

        let regeneration = StatusEffectKind::Regeneration.definition();
        assert!(!regeneration.combat_scoped);

        assert!(!StatusEffectKind::Frozen.definition().stackable);
        assert_eq!(
            StatusEffectKind::Enraged.on_remove(),
            Some(StatusEffectKind::Weakened)
        );
    }

    #[test]
    fn tick_removes_only_finite_expired_effects() {
        let mut set = EffectSet::new();
        set.push(StatusEffect::new(StatusEffectKind::Poison)).unwrap();
        set.push(StatusEffect::new(StatusEffectKind::Sundered)).unwrap();
        set.push(StatusEffect::new(StatusEffectKind::Burn)).unwrap();

        assert!(set.tick(StatusClock::PhaseStart).is_empty());
        let expired = set.tick(StatusClock::PhaseStart);

        let kinds: Vec<_> = expired.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![StatusEffectKind::Sundered, StatusEffectKind::Burn]);
        assert!(set.contains(StatusEffectKind::Poison));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn block_protections_age_only_on_damage_resolution() {
        let mut set = EffectSet::new();
        set.push(StatusEffect::new(StatusEffectKind::Frozen)).unwrap();
        set.push(StatusEffect::new(StatusEffectKind::Shielded)).unwrap();
        set.push(StatusEffect::new(StatusEffectKind::Weakened)).unwrap();

        assert!(set.tick(StatusClock::PhaseStart).is_empty());
        assert!(set.contains(StatusEffectKind::Frozen));

        let expired = set.tick(StatusClock::DamageResolved);
        let kinds: Vec<_> = expired.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![StatusEffectKind::Frozen, StatusEffectKind::Shielded]);
        assert_eq!(
            set.get(StatusEffectKind::Weakened).map(|e| e.remaining),
            Some(Duration::Turns(1))
        );
    }

    #[test]
    fn clear_combat_scoped_keeps_regeneration() {
        let mut set = EffectSet::new();
        set.push(StatusEffect::new(StatusEffectKind::Regeneration))
            .unwrap();
        set.push(StatusEffect::new(StatusEffectKind::Weakened)).unwrap();

        set.clear_combat_scoped();

        assert_eq!(set.len(), 1);
        assert!(set.contains(StatusEffectKind::Regeneration));
    }
}
