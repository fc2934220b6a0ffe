//! Enemy bestiary loader.

use std::collections::HashSet;
use std::path::Path;

use hexbound_core::{BossAbility, EnemyBlueprint, EnemyRank, StaticBestiary};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Bestiary structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestiaryCatalog {
    pub enemies: Vec<EnemyBlueprint>,
}

/// Loader for enemy blueprints from RON files.
pub struct BestiaryLoader;

impl BestiaryLoader {
    pub fn load(path: &Path) -> LoadResult<StaticBestiary> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StaticBestiary> {
        let catalog: BestiaryCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;

        let mut seen = HashSet::new();
        for blueprint in &catalog.enemies {
            if blueprint.kind.is_empty() {
                anyhow::bail!("Bestiary entry without a kind");
            }
            if !seen.insert(blueprint.kind.as_str()) {
                anyhow::bail!("Duplicate bestiary kind '{}'", blueprint.kind);
            }
            validate(blueprint)?;
        }

        Ok(catalog.enemies.into_iter().collect())
    }
}

fn validate(blueprint: &EnemyBlueprint) -> LoadResult<()> {
    let EnemyRank::Boss(profile) = &blueprint.rank else {
        return Ok(());
    };
    if profile.max_health == 0 || profile.current_health > profile.max_health {
        anyhow::bail!(
            "Boss '{}' has invalid health {}/{}",
            blueprint.kind,
            profile.current_health,
            profile.max_health
        );
    }
    for threshold in &profile.thresholds {
        if threshold.percent == 0 || threshold.percent > 100 {
            anyhow::bail!(
                "Boss '{}' has threshold {}% outside 1..=100",
                blueprint.kind,
                threshold.percent
            );
        }
        if let BossAbility::Summon(minion) = &threshold.ability {
            validate(minion)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hexbound_core::{Bestiary, EnemyTraits};

    use super::*;

    #[test]
    fn parses_traits_and_summons() {
        let bestiary = BestiaryLoader::parse(
            r#"(
                enemies: [
                    (kind: "wolf", armor: 4, attack: 3, fame: 3, traits: "SWIFT | ELUSIVE"),
                    (
                        kind: "caller",
                        armor: 4,
                        fame: 4,
                        traits: "SUMMONER",
                        summons: Some((kind: "wolf", armor: 4, attack: 3, fame: 3)),
                    ),
                ],
            )"#,
        )
        .unwrap();

        let wolf = bestiary.blueprint("wolf").unwrap();
        assert!(wolf.traits.contains(EnemyTraits::SWIFT | EnemyTraits::ELUSIVE));
        let caller = bestiary.blueprint("caller").unwrap();
        assert_eq!(caller.attack, 0);
        assert_eq!(caller.summons.map(|minion| minion.kind), Some("wolf".into()));
    }

    #[test]
    fn duplicate_kinds_are_rejected() {
        let result = BestiaryLoader::parse(
            r#"(enemies: [(kind: "orc", armor: 3), (kind: "orc", armor: 4)])"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn boss_thresholds_must_be_percentages() {
        let result = BestiaryLoader::parse(
            r#"(enemies: [(
                kind: "lich",
                armor: 5,
                rank: boss((max_health: 10, current_health: 10, thresholds: [
                    (percent: 150, ability: fortify),
                ])),
            )])"#,
        );
        assert!(result.is_err());
    }
}
