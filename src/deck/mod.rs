//! Deck provider boundary: composition lookup and seeded shuffling.

pub mod provider;

pub use provider::{DeckId, DeckInfo, DeckProvider, DeckStore, ScriptedDecks};
