//! Starting deck loader.

use std::collections::HashSet;
use std::path::Path;

use hexbound_core::{Card, Hero};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Deck structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckCatalog {
    pub cards: Vec<Card>,
}

/// Loader for the hero's starting deck from RON files.
pub struct DeckLoader;

impl DeckLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Card>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Card>> {
        let catalog: DeckCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse deck RON: {}", e))?;

        let mut seen = HashSet::new();
        for card in &catalog.cards {
            if card.wound {
                anyhow::bail!("Starting deck cannot contain wound {}", card.id);
            }
            // Wound cards are numbered from WOUND_ID_BASE.
            if card.id.0 >= Hero::WOUND_ID_BASE {
                anyhow::bail!("Card id {} collides with wound ids", card.id);
            }
            if !seen.insert(card.id) {
                anyhow::bail!("Duplicate card id {}", card.id);
            }
        }

        Ok(catalog.cards)
    }
}
