//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Enemy bestiary (data-driven via RON)
//! - Starting deck (data-driven via RON)
//! - Combat rules (data-driven via TOML)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed through the core [`hexbound_core::Bestiary`] oracle and
//! the session constructors; it never appears in game state by reference.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BestiaryLoader, ConfigLoader, ContentBundle, ContentFactory, DeckLoader, LoadResult,
};
