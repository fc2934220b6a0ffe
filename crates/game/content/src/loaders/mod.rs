//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON or TOML file into core types and validates what
//! serde alone cannot (duplicate keys, impossible thresholds).

pub mod bestiary;
pub mod config;
pub mod deck;
pub mod factory;

pub use bestiary::BestiaryLoader;
pub use config::ConfigLoader;
pub use deck::DeckLoader;
pub use factory::{ContentBundle, ContentFactory};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
