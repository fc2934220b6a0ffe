//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use hexbound_core::{Card, GameConfig, StaticBestiary};

use crate::loaders::{BestiaryLoader, ConfigLoader, DeckLoader, LoadResult};

/// Everything a session needs from the data directory.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    /// Game config with the rules from `rules.toml` folded in.
    pub config: GameConfig,
    pub bestiary: StaticBestiary,
    pub deck: Vec<Card>,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── rules.toml     (optional)
/// ├── bestiary.ron
/// └── deck.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`, then combat rules from
    /// `rules.toml` when that file exists.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let mut config = ConfigLoader::load(&self.data_dir.join("config.toml"))?;
        let rules = self.data_dir.join("rules.toml");
        if rules.exists() {
            config.rules = ConfigLoader::load_rules(&rules)?;
        }
        Ok(config)
    }

    /// Load enemy blueprints from `bestiary.ron`.
    pub fn load_bestiary(&self) -> LoadResult<StaticBestiary> {
        BestiaryLoader::load(&self.data_dir.join("bestiary.ron"))
    }

    /// Load the starting deck from `deck.ron`.
    pub fn load_deck(&self) -> LoadResult<Vec<Card>> {
        DeckLoader::load(&self.data_dir.join("deck.ron"))
    }

    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_config()?,
            bestiary: self.load_bestiary()?,
            deck: self.load_deck()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use hexbound_core::{Bestiary, PoisonMode};

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let bundle = ContentFactory::bundled().load_bundle().unwrap();

        assert!(bundle.bestiary.blueprint("orc_summoner").is_some());
        assert!(bundle.bestiary.blueprint("dragon_lord").is_some());
        assert_eq!(bundle.deck.len(), 10);
        assert_eq!(bundle.config, GameConfig::default());
    }

    #[test]
    fn rules_file_overrides_config_rules() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "dice_per_turn = 2\n").unwrap();
        fs::write(dir.path().join("rules.toml"), "poison_mode = \"replace\"\n").unwrap();

        let config = ContentFactory::new(dir.path()).load_config().unwrap();

        assert_eq!(config.dice_per_turn, 2);
        assert_eq!(config.rules.poison_mode, PoisonMode::Replace);
    }

    #[test]
    fn missing_bestiary_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let error = ContentFactory::new(dir.path())
            .load_bestiary()
            .unwrap_err();
        assert!(error.to_string().contains("bestiary.ron"));
    }
}
