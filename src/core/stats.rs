//! Combat stats.
//!
//! Every battle card carries six stats. A `StatSet` holds one value per
//! stat; the battle engine keeps two per hand: the immutable base stats from
//! the card definition and the effective stats after active effects.
//!
//! Stats are `i64` so effect deltas can be negative, but a `StatSet` never
//! stores a negative value: `apply` clamps at zero.

use serde::{Deserialize, Serialize};

/// The stat a support-card effect targets.
///
/// Variant order matches the wire encoding used by card catalogs
/// (attack = 0, special attack = 1, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Attack,
    SpecialAttack,
    Defense,
    SpecialDefense,
    Speed,
    Intelligence,
}

impl StatKind {
    /// All stat kinds, in encoding order.
    pub const ALL: [StatKind; 6] = [
        StatKind::Attack,
        StatKind::SpecialAttack,
        StatKind::Defense,
        StatKind::SpecialDefense,
        StatKind::Speed,
        StatKind::Intelligence,
    ];
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatKind::Attack => "attack",
            StatKind::SpecialAttack => "special-attack",
            StatKind::Defense => "defense",
            StatKind::SpecialDefense => "special-defense",
            StatKind::Speed => "speed",
            StatKind::Intelligence => "intelligence",
        };
        f.write_str(name)
    }
}

/// One value per combat stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatSet {
    pub attack: i64,
    pub special_attack: i64,
    pub defense: i64,
    pub special_defense: i64,
    pub speed: i64,
    pub intelligence: i64,
}

impl StatSet {
    /// Create a stat set with explicit values.
    #[must_use]
    pub const fn new(
        attack: i64,
        special_attack: i64,
        defense: i64,
        special_defense: i64,
        speed: i64,
        intelligence: i64,
    ) -> Self {
        Self {
            attack,
            special_attack,
            defense,
            special_defense,
            speed,
            intelligence,
        }
    }

    /// Get the value for a stat.
    #[must_use]
    pub fn get(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
            StatKind::Intelligence => self.intelligence,
        }
    }

    /// Set the value for a stat, clamped at zero.
    pub fn set(&mut self, kind: StatKind, value: i64) {
        let value = value.max(0);
        match kind {
            StatKind::Attack => self.attack = value,
            StatKind::SpecialAttack => self.special_attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::SpecialDefense => self.special_defense = value,
            StatKind::Speed => self.speed = value,
            StatKind::Intelligence => self.intelligence = value,
        }
    }

    /// Add a delta to a stat, clamped at zero.
    pub fn apply(&mut self, kind: StatKind, delta: i64) {
        self.set(kind, self.get(kind) + delta);
    }
}
