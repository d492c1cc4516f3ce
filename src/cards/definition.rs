//! Card definitions - static card data.
//!
//! `BattleCardDef` is the single unit a player fields; its base stats seed a
//! hand's health and effective stats. `SupportCardDef` is a consumable drawn
//! from the deck whose effects modify stats for one or more turns.
//!
//! Definitions are immutable and owned by the card catalog. Per-battle
//! mutable state (health, effective stats, active effects) lives in
//! `battle::PlayerHand`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::StatSet;
use crate::effects::{DurationEffect, InstantEffect};

/// Unique identifier for a battle card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleCardId(pub u32);

impl BattleCardId {
    /// Create a new battle card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BattleCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BattleCard({})", self.0)
    }
}

/// Unique identifier for a support card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportCardId(pub u32);

impl SupportCardId {
    /// Create a new support card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SupportCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SupportCard({})", self.0)
    }
}

/// Battle card category.
///
/// Selects the damage formula: `Normal` attackers pit attack against the
/// defender's defense, `Special` attackers pit special attack against
/// special defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleCardType {
    Normal,
    Special,
}

/// Support card category (offense, defense, ...).
///
/// Opaque to the engine except where requirement codes count cards of a
/// category played during a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportCardType(pub u8);

impl SupportCardType {
    /// Create a new support card type.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw type value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Static battle card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleCardDef {
    /// Unique identifier.
    pub id: BattleCardId,

    /// Category selecting the damage formula.
    pub card_type: BattleCardType,

    /// Display name.
    pub name: String,

    /// Starting health.
    pub hp: i64,

    /// Base combat stats.
    pub stats: StatSet,
}

impl BattleCardDef {
    /// Create a new battle card definition.
    #[must_use]
    pub fn new(
        id: BattleCardId,
        card_type: BattleCardType,
        name: impl Into<String>,
        hp: i64,
        stats: StatSet,
    ) -> Self {
        Self {
            id,
            card_type,
            name: name.into(),
            hp,
            stats,
        }
    }
}

/// Static support card definition.
///
/// A support card carries zero or more instant effects applied in hand-draw
/// order during combat resolution, and at most one duration effect that
/// registers an active modifier on the target hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportCardDef {
    /// Unique identifier.
    pub id: SupportCardId,

    /// Category, consulted by requirement codes.
    pub card_type: SupportCardType,

    /// Display name.
    pub name: String,

    /// Effects applied for the current combat only.
    pub instant_effects: SmallVec<[InstantEffect; 2]>,

    /// Effect persisting across turns, if any.
    pub duration_effect: Option<DurationEffect>,

    /// At most one active effect from this card may be in force per hand.
    pub unstackable: bool,

    /// Re-applying this card does not refresh its remaining-turns counter.
    pub unresettable: bool,
}

impl SupportCardDef {
    /// Create a support card with no effects.
    #[must_use]
    pub fn new(id: SupportCardId, card_type: SupportCardType, name: impl Into<String>) -> Self {
        Self {
            id,
            card_type,
            name: name.into(),
            instant_effects: SmallVec::new(),
            duration_effect: None,
            unstackable: false,
            unresettable: false,
        }
    }

    /// Add an instant effect (builder pattern).
    #[must_use]
    pub fn with_instant(mut self, effect: InstantEffect) -> Self {
        self.instant_effects.push(effect);
        self
    }

    /// Set the duration effect (builder pattern).
    #[must_use]
    pub fn with_duration(mut self, effect: DurationEffect) -> Self {
        self.duration_effect = Some(effect);
        self
    }

    /// Mark as unstackable (builder pattern).
    #[must_use]
    pub fn unstackable(mut self) -> Self {
        self.unstackable = true;
        self
    }

    /// Mark as unresettable (builder pattern).
    #[must_use]
    pub fn unresettable(mut self) -> Self {
        self.unresettable = true;
        self
    }
}
