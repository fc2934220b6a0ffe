//! Enemy definitions oracle.

use std::collections::HashMap;

use crate::state::EnemyBlueprint;

/// Provides enemy blueprints by kind (e.g. "orc_summoner").
pub trait Bestiary {
    fn blueprint(&self, kind: &str) -> Option<EnemyBlueprint>;
}

/// In-memory bestiary.
#[derive(Clone, Debug, Default)]
pub struct StaticBestiary {
    blueprints: HashMap<String, EnemyBlueprint>,
}

impl StaticBestiary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the blueprint for its kind.
    pub fn insert(&mut self, blueprint: EnemyBlueprint) {
        self.blueprints.insert(blueprint.kind.clone(), blueprint);
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

impl FromIterator<EnemyBlueprint> for StaticBestiary {
    fn from_iter<T: IntoIterator<Item = EnemyBlueprint>>(iter: T) -> Self {
        let mut bestiary = Self::new();
        for blueprint in iter {
            bestiary.insert(blueprint);
        }
        bestiary
    }
}

impl Bestiary for StaticBestiary {
    fn blueprint(&self, kind: &str) -> Option<EnemyBlueprint> {
        self.blueprints.get(kind).cloned()
    }
}
