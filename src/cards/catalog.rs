//! Card catalog - definition lookup boundary.
//!
//! The battle engine reads card definitions through the `CardCatalog` trait.
//! Catalog storage is a host concern; `CardRoster` is the in-memory
//! implementation used by tests and offline simulation.
//!
//! Lookup failure is fatal for the operation that needed the card: the
//! engine surfaces it as a `NotFound` error and leaves the battle untouched.

use rustc_hash::FxHashMap;

use crate::error::BattleError;

use super::definition::{BattleCardDef, BattleCardId, SupportCardDef, SupportCardId};

/// Read-only lookup of card definitions.
pub trait CardCatalog {
    /// Look up a battle card definition.
    fn battle_card(&self, id: BattleCardId) -> Result<&BattleCardDef, BattleError>;

    /// Look up a support card definition.
    fn support_card(&self, id: SupportCardId) -> Result<&SupportCardDef, BattleError>;
}

/// In-memory card catalog.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardRoster, CardCatalog, BattleCardDef, BattleCardId, BattleCardType};
/// use rust_duel::core::StatSet;
///
/// let mut roster = CardRoster::new();
/// roster.add_battle_card(BattleCardDef::new(
///     BattleCardId::new(1),
///     BattleCardType::Normal,
///     "Pepesaur",
///     450,
///     StatSet::new(10, 20, 10, 20, 10, 5),
/// ));
///
/// assert_eq!(roster.battle_card(BattleCardId::new(1)).unwrap().name, "Pepesaur");
/// assert!(roster.battle_card(BattleCardId::new(99)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRoster {
    battle_cards: FxHashMap<BattleCardId, BattleCardDef>,
    support_cards: FxHashMap<SupportCardId, SupportCardDef>,
}

impl CardRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a battle card definition.
    ///
    /// Panics if a card with the same ID already exists; catalog setup is a
    /// construction-time step, not a runtime operation.
    pub fn add_battle_card(&mut self, def: BattleCardDef) {
        if self.battle_cards.contains_key(&def.id) {
            panic!("battle card {} already registered", def.id);
        }
        self.battle_cards.insert(def.id, def);
    }

    /// Add a support card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn add_support_card(&mut self, def: SupportCardDef) {
        if self.support_cards.contains_key(&def.id) {
            panic!("support card {} already registered", def.id);
        }
        self.support_cards.insert(def.id, def);
    }

    /// Number of registered battle cards.
    #[must_use]
    pub fn battle_card_count(&self) -> usize {
        self.battle_cards.len()
    }

    /// Number of registered support cards.
    #[must_use]
    pub fn support_card_count(&self) -> usize {
        self.support_cards.len()
    }

    /// Iterate over all support card definitions.
    pub fn support_cards(&self) -> impl Iterator<Item = &SupportCardDef> {
        self.support_cards.values()
    }
}

impl CardCatalog for CardRoster {
    fn battle_card(&self, id: BattleCardId) -> Result<&BattleCardDef, BattleError> {
        self.battle_cards
            .get(&id)
            .ok_or(BattleError::BattleCardNotFound(id))
    }

    fn support_card(&self, id: SupportCardId) -> Result<&SupportCardDef, BattleError> {
        self.support_cards
            .get(&id)
            .ok_or(BattleError::SupportCardNotFound(id))
    }
}
