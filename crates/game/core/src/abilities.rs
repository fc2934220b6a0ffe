//! How enemy traits and status effects alter combat math.
//!
//! Every function here is pure. The combat engine keeps the per-enemy
//! bookkeeping ([`CombatModifiers`]) and the effect sets, and asks these
//! functions what the numbers are.

use crate::config::{AssassinPolicy, CombatRules, PoisonMode, VampiricPolicy};
use crate::state::{
    AttackType, BossProfile, Combatant, Enemy, EnemyTraits, Hero, PhaseThreshold, UnitId,
};
use crate::status::{EffectSet, StatusEffectKind};

/// Attack bonus granted by the Enraged effect.
pub const ENRAGED_ATTACK_BONUS: u32 = 2;

/// Combat-only adjustments the engine accumulated for one enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatModifiers {
    /// Attack removed by spending movement on a cumbersome enemy.
    pub cumbersome_reduction: u32,
    /// Attack added by a boss enrage.
    pub attack_bonus: u32,
    /// Armor added by vampiric feeding or a boss harden.
    pub armor_bonus: u32,
}

fn stacks(effects: Option<&EffectSet>, kind: StatusEffectKind) -> u32 {
    effects.map_or(0, |set| u32::from(set.stacks(kind)))
}

/// Attack the enemy strikes with this combat.
pub fn effective_attack(
    enemy: &Enemy,
    modifiers: &CombatModifiers,
    effects: Option<&EffectSet>,
) -> u32 {
    let enraged = if stacks(effects, StatusEffectKind::Enraged) > 0 {
        ENRAGED_ATTACK_BONUS
    } else {
        0
    };
    (enemy.attack + modifiers.attack_bonus + enraged)
        .saturating_sub(modifiers.cumbersome_reduction)
        .saturating_sub(stacks(effects, StatusEffectKind::Weakened))
}

/// Armor the hero's attack must meet. Never below 1.
///
/// When `attack_type` is given and the enemy resists it, armor is multiplied
/// by the resistance multiplier.
pub fn effective_armor(
    enemy: &Enemy,
    modifiers: &CombatModifiers,
    effects: Option<&EffectSet>,
    attack_type: Option<AttackType>,
    rules: &CombatRules,
) -> u32 {
    let base = (enemy.armor + modifiers.armor_bonus)
        .saturating_sub(stacks(effects, StatusEffectKind::Sundered))
        .max(1);
    let resisted = attack_type.is_some_and(|kind| kind.is_resisted_by(enemy.resistances));
    if resisted {
        base * rules.resistance_multiplier.max(1)
    } else {
        base
    }
}

/// Block needed to stop the enemy's attack.
pub fn block_requirement(attack: u32, enemy: &Enemy, rules: &CombatRules) -> u32 {
    if enemy.has(EnemyTraits::SWIFT) {
        attack * rules.swift_multiplier
    } else {
        attack
    }
}

/// Fortified enemies ignore everything but siege at range.
pub fn is_ranged_immune(enemy: &Enemy, siege: bool) -> bool {
    enemy.has(EnemyTraits::FORTIFIED) && !siege
}

/// Whether the hero's ranged sources could hurt this enemy at all.
pub fn is_targetable_at_range(enemy: &Enemy, has_ranged: bool, has_siege: bool) -> bool {
    if enemy.has(EnemyTraits::FORTIFIED) {
        has_siege
    } else {
        has_ranged || has_siege
    }
}

/// Hero attack after the hero's own effects.
pub fn hero_attack(total: u32, effects: &EffectSet) -> u32 {
    let enraged = if effects.contains(StatusEffectKind::Enraged) {
        ENRAGED_ATTACK_BONUS
    } else {
        0
    };
    (total + enraged).saturating_sub(u32::from(effects.stacks(StatusEffectKind::Weakened)))
}

/// Hero armor against incoming attacks. Never below 1.
pub fn hero_armor(hero: &Hero, effects: &EffectSet) -> u32 {
    (hero.armor + u32::from(effects.stacks(StatusEffectKind::Shielded)))
        .saturating_sub(u32::from(effects.stacks(StatusEffectKind::Sundered)))
        .max(1)
}

/// Wounds an unmodified attack inflicts: `ceil(attack / armor)`, at least 1
/// for any non-zero attack.
pub fn wounds_from(attack: u32, armor: u32) -> u32 {
    if attack == 0 {
        return 0;
    }
    attack.div_ceil(armor.max(1)).max(1)
}

/// Side effect of an unblocked enemy beyond plain wounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageSideEffect {
    /// One Poison stack on the hero.
    Poison,
    /// The attacker feeds: bosses heal, regular enemies gain armor.
    Drain { amount: u32 },
    /// The hero discards non-wound cards.
    Discard { count: u32 },
}

/// Wounds and side effects of one unblocked enemy hitting the hero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageResolution {
    pub wounds: u32,
    pub side_effects: Vec<DamageSideEffect>,
}

/// Resolves an unblocked enemy against the hero.
pub fn resolve_hit(
    enemy: &Enemy,
    attack: u32,
    hero_armor: u32,
    rules: &CombatRules,
) -> DamageResolution {
    let mut wounds = wounds_from(attack, hero_armor);
    let mut side_effects = Vec::new();
    if wounds == 0 {
        return DamageResolution {
            wounds,
            side_effects,
        };
    }

    if enemy.has(EnemyTraits::BRUTAL) {
        wounds *= rules.brutal_multiplier.max(1);
    }
    if enemy.has(EnemyTraits::POISON) {
        side_effects.push(DamageSideEffect::Poison);
        if rules.poison_mode == PoisonMode::Replace {
            wounds = 0;
        }
    }
    if enemy.has(EnemyTraits::VAMPIRIC) {
        match rules.vampiric {
            VampiricPolicy::HealAttacker if wounds > 0 => {
                side_effects.push(DamageSideEffect::Drain { amount: wounds })
            }
            VampiricPolicy::HealAttacker => {}
            VampiricPolicy::ExtraWound => wounds += 1,
        }
    }
    if enemy.has(EnemyTraits::PARALYZE) && rules.paralyze_discards > 0 {
        side_effects.push(DamageSideEffect::Discard {
            count: rules.paralyze_discards,
        });
    }

    DamageResolution {
        wounds,
        side_effects,
    }
}

/// Who absorbs an unblocked hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Defender {
    Hero,
    Unit(UnitId),
}

/// Picks the defender of an unblocked enemy.
///
/// Only assassins choose: under [`AssassinPolicy::WeakestDefender`] they
/// strike the ready combatant with the lowest armor, the hero winning ties.
pub fn select_defender(
    enemy: &Enemy,
    hero: &Hero,
    hero_armor: u32,
    rules: &CombatRules,
) -> Defender {
    if !enemy.has(EnemyTraits::ASSASSIN) || rules.assassin == AssassinPolicy::HeroOnly {
        return Defender::Hero;
    }
    hero.units
        .iter()
        .filter(|unit| unit.is_ready())
        .filter(|unit| unit.armor() < hero_armor)
        .min_by_key(|unit| unit.armor())
        .map_or(Defender::Hero, |unit| Defender::Unit(unit.id))
}

/// Phase thresholds a boss crosses at its current health, highest first.
///
/// `fired` lists thresholds already executed this combat. A dead boss
/// triggers nothing.
pub fn crossed_thresholds(profile: &BossProfile, fired: &[u8]) -> Vec<PhaseThreshold> {
    if profile.current_health == 0 {
        return Vec::new();
    }
    let percent = profile.health_percent();
    let mut crossed: Vec<PhaseThreshold> = profile
        .thresholds
        .iter()
        .filter(|threshold| {
            percent <= u32::from(threshold.percent) && !fired.contains(&threshold.percent)
        })
        .cloned()
        .collect();
    crossed.sort_by(|a, b| b.percent.cmp(&a.percent));
    crossed
}
