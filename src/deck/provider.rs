//! Deck provider boundary.
//!
//! Deck composition, ownership, and balance checks are host concerns. The
//! battle engine only needs three reads: the deck's assigned battle card,
//! its support-card count, and a freshly shuffled ordered sequence of
//! support-card ids. The shuffle is seeded by the engine from its
//! `RandomnessProvider`, so a replay against identical provider outputs
//! reproduces the same sequence.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{BattleCardId, SupportCardId};
use crate::error::BattleError;

/// Unique identifier for a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub u64);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// Summary of a deck's fixed composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckInfo {
    /// Battle card assigned to the deck.
    pub battle_card: BattleCardId,
    /// Total number of support cards in the deck.
    pub support_card_count: u32,
}

/// Read access to deck composition plus shuffling.
pub trait DeckProvider {
    /// Look up a deck's assigned battle card and support-card count.
    fn deck(&self, id: DeckId) -> Result<DeckInfo, BattleError>;

    /// Number of support cards in a deck.
    fn support_card_count(&self, id: DeckId) -> Result<u32, BattleError> {
        Ok(self.deck(id)?.support_card_count)
    }

    /// Produce a freshly shuffled ordered sequence of the deck's support
    /// card ids. The seed comes from the engine's randomness provider.
    ///
    /// The returned sequence must contain exactly the deck's cards: a
    /// shuffle permutes, it never adds or drops.
    fn shuffle_deck(&self, id: DeckId, seed: u64) -> Result<Vec<SupportCardId>, BattleError>;
}

/// In-memory deck store.
///
/// Holds each deck's battle card and support-card multiset. Shuffling is a
/// seeded Fisher-Yates over the expanded card list.
#[derive(Clone, Debug, Default)]
pub struct DeckStore {
    decks: FxHashMap<DeckId, DeckEntry>,
}

#[derive(Clone, Debug)]
struct DeckEntry {
    battle_card: BattleCardId,
    /// (card id, copies) pairs in insertion order, so expansion is stable.
    support_cards: Vec<(SupportCardId, u32)>,
}

impl DeckStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a deck with its battle card and support-card counts.
    pub fn add_deck(
        &mut self,
        id: DeckId,
        battle_card: BattleCardId,
        support_cards: impl IntoIterator<Item = (SupportCardId, u32)>,
    ) {
        self.decks.insert(
            id,
            DeckEntry {
                battle_card,
                support_cards: support_cards.into_iter().collect(),
            },
        );
    }

    fn entry(&self, id: DeckId) -> Result<&DeckEntry, BattleError> {
        self.decks.get(&id).ok_or(BattleError::DeckNotFound(id))
    }
}

impl DeckProvider for DeckStore {
    fn deck(&self, id: DeckId) -> Result<DeckInfo, BattleError> {
        let entry = self.entry(id)?;
        Ok(DeckInfo {
            battle_card: entry.battle_card,
            support_card_count: entry.support_cards.iter().map(|(_, n)| n).sum(),
        })
    }

    fn shuffle_deck(&self, id: DeckId, seed: u64) -> Result<Vec<SupportCardId>, BattleError> {
        let entry = self.entry(id)?;

        let mut sequence: Vec<SupportCardId> = entry
            .support_cards
            .iter()
            .flat_map(|&(card, count)| std::iter::repeat(card).take(count as usize))
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        sequence.shuffle(&mut rng);
        Ok(sequence)
    }
}

/// Fixed-sequence provider for tests and replays.
///
/// Returns a pre-recorded shuffle regardless of seed.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecks {
    decks: FxHashMap<DeckId, (BattleCardId, Vec<SupportCardId>)>,
}

impl ScriptedDecks {
    /// Create an empty scripted provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a deck with a fixed shuffled sequence.
    pub fn add_deck(&mut self, id: DeckId, battle_card: BattleCardId, sequence: Vec<SupportCardId>) {
        self.decks.insert(id, (battle_card, sequence));
    }
}

impl DeckProvider for ScriptedDecks {
    fn deck(&self, id: DeckId) -> Result<DeckInfo, BattleError> {
        let (battle_card, sequence) = self.decks.get(&id).ok_or(BattleError::DeckNotFound(id))?;
        Ok(DeckInfo {
            battle_card: *battle_card,
            support_card_count: sequence.len() as u32,
        })
    }

    fn shuffle_deck(&self, id: DeckId, _seed: u64) -> Result<Vec<SupportCardId>, BattleError> {
        let (_, sequence) = self.decks.get(&id).ok_or(BattleError::DeckNotFound(id))?;
        Ok(sequence.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_type_store() -> DeckStore {
        let mut store = DeckStore::new();
        store.add_deck(
            DeckId::new(1),
            BattleCardId::new(1),
            [
                (SupportCardId::new(1), 23),
                (SupportCardId::new(2), 15),
            ],
        );
        store
    }

    #[test]
    fn test_deck_info() {
        let store = two_type_store();
        let info = store.deck(DeckId::new(1)).unwrap();

        assert_eq!(info.battle_card, BattleCardId::new(1));
        assert_eq!(info.support_card_count, 38);
        assert_eq!(store.support_card_count(DeckId::new(1)).unwrap(), 38);
    }

    #[test]
    fn test_missing_deck() {
        let store = DeckStore::new();
        let err = store.deck(DeckId::new(9)).unwrap_err();
        assert_eq!(err, BattleError::DeckNotFound(DeckId::new(9)));
    }

    #[test]
    fn test_shuffle_preserves_composition() {
        // 23 cards of type A and 15 of type B stay 23 + 15 under shuffle.
        let store = two_type_store();
        let sequence = store.shuffle_deck(DeckId::new(1), 42).unwrap();

        assert_eq!(sequence.len(), 38);
        let a = sequence.iter().filter(|c| c.raw() == 1).count();
        let b = sequence.iter().filter(|c| c.raw() == 2).count();
        assert_eq!(a, 23);
        assert_eq!(b, 15);
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let store = two_type_store();

        let first = store.shuffle_deck(DeckId::new(1), 7).unwrap();
        let second = store.shuffle_deck(DeckId::new(1), 7).unwrap();
        let other = store.shuffle_deck(DeckId::new(1), 8).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_scripted_decks() {
        let mut decks = ScriptedDecks::new();
        let sequence = vec![
            SupportCardId::new(1),
            SupportCardId::new(3),
            SupportCardId::new(2),
        ];
        decks.add_deck(DeckId::new(5), BattleCardId::new(2), sequence.clone());

        assert_eq!(decks.deck(DeckId::new(5)).unwrap().support_card_count, 3);
        assert_eq!(decks.shuffle_deck(DeckId::new(5), 999).unwrap(), sequence);
    }
}
