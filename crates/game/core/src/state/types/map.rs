//! Revealed portion of the hex map.
//!
//! Map generation is external; the grid only records which tiles have been
//! revealed and what they cost to enter.

use std::collections::BTreeMap;

use super::common::HexCoord;

/// Terrain of a hex.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Terrain {
    Plains,
    Hills,
    Forest,
    Wasteland,
    Desert,
    Swamp,
    Lake,
    Mountain,
}

impl Terrain {
    /// Movement cost to enter, or `None` if impassable.
    pub const fn move_cost(self) -> Option<u32> {
        match self {
            Terrain::Plains => Some(2),
            Terrain::Hills | Terrain::Forest => Some(3),
            Terrain::Wasteland => Some(4),
            Terrain::Desert | Terrain::Swamp => Some(5),
            Terrain::Lake | Terrain::Mountain => None,
        }
    }
}

/// Revealed hexes keyed by coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexGrid {
    tiles: BTreeMap<HexCoord, Terrain>,
}

impl HexGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiles(tiles: impl IntoIterator<Item = (HexCoord, Terrain)>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    pub fn terrain(&self, hex: HexCoord) -> Option<Terrain> {
        self.tiles.get(&hex).copied()
    }

    pub fn is_revealed(&self, hex: HexCoord) -> bool {
        self.tiles.contains_key(&hex)
    }

    /// Movement cost to enter `hex`; `None` if unrevealed or impassable.
    pub fn move_cost(&self, hex: HexCoord) -> Option<u32> {
        self.terrain(hex).and_then(Terrain::move_cost)
    }

    pub fn reveal(&mut self, hex: HexCoord, terrain: Terrain) {
        self.tiles.insert(hex, terrain);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
