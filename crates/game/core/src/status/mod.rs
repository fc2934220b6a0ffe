//! Stacking, duration-bound status effects on the hero and on enemies.
//!
//! The [`StatusEffectManager`] exclusively owns every effect set. The combat
//! engine asks it to tick at phase boundaries and to settle poison when the
//! combat ends; nothing else mutates effects.
mod effect;
mod manager;

pub use effect::{
    Duration, EffectSet, StatusClock, StatusDefinition, StatusEffect, StatusEffectKind,
};
pub use manager::{
    EffectTarget, Removal, StatusEffectManager, StatusError, StatusOutcome, TickReport,
};
