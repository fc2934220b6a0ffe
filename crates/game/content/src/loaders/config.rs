//! Game configuration and combat rules loader.

use std::path::Path;

use hexbound_core::{CombatRules, GameConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Load combat policy from a TOML file.
    pub fn load_rules(path: &Path) -> LoadResult<CombatRules> {
        let content = read_file(path)?;
        Self::parse_rules(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }

    pub fn parse_rules(content: &str) -> LoadResult<CombatRules> {
        let rules: CombatRules = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        if rules.swift_multiplier == 0
            || rules.brutal_multiplier == 0
            || rules.resistance_multiplier == 0
        {
            anyhow::bail!("Combat multipliers must be at least 1");
        }
        Ok(rules)
    }
}
