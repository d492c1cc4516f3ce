//! Effect records.
//!
//! Support cards carry two shapes of effect:
//!
//! - `InstantEffect`: applies to a hand's stats for the current combat
//!   resolution only.
//! - `DurationEffect`: registers an `ActiveEffect` that keeps its delta in
//!   force for a number of turns.
//!
//! Both are plain records with explicit merge rules in the resolver; there
//! is no effect inheritance hierarchy.

use serde::{Deserialize, Serialize};

use crate::cards::SupportCardId;
use crate::core::StatKind;
use crate::effects::requirement::RequirementCode;

/// Which hand an effect targets, relative to the card's player.
///
/// Encoding order: own side = 0, enemy side = 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The hand that played the card.
    Own,
    /// The opposing hand.
    Enemy,
}

/// A stat modification applied for the current combat only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantEffect {
    /// Base power. Scaled by the requirement outcome before application.
    pub power: i64,
    /// Stat the effect modifies.
    pub stat: StatKind,
    /// Hand the effect modifies.
    pub side: Side,
    /// Condition gating (and scaling) the effect.
    pub req: RequirementCode,
}

/// A stat modification that persists across turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationEffect {
    /// Base power. Scaled by the requirement outcome before application.
    pub power: i64,
    /// Number of turns the effect stays in force after registration.
    pub num_turns: u32,
    /// Stat the effect modifies.
    pub stat: StatKind,
    /// Hand the effect modifies.
    pub side: Side,
    /// Condition gating (and scaling) the effect.
    pub req: RequirementCode,
}

/// A duration effect currently in force on a hand.
///
/// `remaining_turns` counts down once per new turn; the effect's delta is
/// folded into the hand's effective stats while it survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// Support card that registered this effect.
    pub source: SupportCardId,
    /// Turns left before the effect expires.
    pub remaining_turns: u32,
    /// Delta in force, already requirement-scaled at registration.
    pub power: i64,
    /// Stat the effect modifies.
    pub stat: StatKind,
    /// Hand the effect modifies, relative to the registering player.
    pub side: Side,
}
