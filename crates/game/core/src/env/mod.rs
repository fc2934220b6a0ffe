//! Traits describing read-only content.
//!
//! Oracles expose static data (enemy definitions) so the engine can rebuild
//! enemies without hard coupling to a concrete content source.
mod bestiary;

pub use bestiary::{Bestiary, StaticBestiary};
