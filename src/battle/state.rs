//! Battle state: hands, turn bookkeeping, snapshots.
//!
//! A `Battle` is an independent, sequentially-mutated state object. The
//! engine applies operations to it in a fixed order; nothing here performs
//! provider calls or randomness.
//!
//! ## Draw model
//!
//! Each player's full shuffled support-card sequence is fixed at battle
//! creation. A draw consumes the next contiguous slice of that sequence,
//! tracked by the `played_card_count` cursor. The cursor only grows and
//! never exceeds the sequence length, so draws are O(1) and exhaustion
//! yields an empty hand rather than an error.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{BattleCardId, BattleCardType, SupportCardId};
use crate::core::{PlayerAddr, StatSet};
use crate::deck::DeckId;
use crate::effects::ActiveEffect;

/// Unique identifier for a battle. Assigned sequentially starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleId(pub u64);

impl BattleId {
    /// Create a new battle ID.
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

impl std::fmt::Display for BattleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Battle({})", self.0)
    }
}

/// Which of the two sub-phases of a turn is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnHalf {
    First,
    Second,
}

/// Which player slot holds a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// The opposing slot.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// Battle state machine phase.
///
/// `Created -> {NewTurn -> AttackerResolved -> Fought -> HalfResolved}* -> Ended`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Created,
    NewTurn,
    AttackerResolved,
    Fought,
    HalfResolved,
    Ended,
}

impl Phase {
    /// Static name for error reporting.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::Created => "Created",
            Phase::NewTurn => "NewTurn",
            Phase::AttackerResolved => "AttackerResolved",
            Phase::Fought => "Fought",
            Phase::HalfResolved => "HalfResolved",
            Phase::Ended => "Ended",
        }
    }
}

/// One player's mutable battle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    /// Remaining health. Only ever decreases; floored at zero.
    pub health: i64,

    /// Fielded battle card.
    pub battle_card_id: BattleCardId,

    /// Battle card category, resolved once at creation.
    pub battle_card_type: BattleCardType,

    /// Base stats from the battle card definition. Never mutated.
    pub base_stats: StatSet,

    /// Current stats after active duration effects (and, during a combat
    /// resolution, instant boosts). Never negative.
    pub effective_stats: StatSet,

    /// Full shuffled support-card sequence. Fixed at battle creation.
    pub sequence: Vec<SupportCardId>,

    /// Draw cursor: cards consumed from the sequence so far.
    pub played_card_count: usize,

    /// Ids drawn into the current hand.
    pub current_hand: SmallVec<[SupportCardId; 8]>,

    /// Duration effects currently in force on this hand.
    pub active_effects: Vec<ActiveEffect>,
}

impl PlayerHand {
    /// Create a hand from a resolved battle card and shuffled sequence.
    #[must_use]
    pub fn new(
        battle_card_id: BattleCardId,
        battle_card_type: BattleCardType,
        hp: i64,
        base_stats: StatSet,
        sequence: Vec<SupportCardId>,
    ) -> Self {
        Self {
            health: hp,
            battle_card_id,
            battle_card_type,
            base_stats,
            effective_stats: base_stats,
            sequence,
            played_card_count: 0,
            current_hand: SmallVec::new(),
            active_effects: Vec::new(),
        }
    }

    /// Cards already consumed from the sequence, in play order.
    #[must_use]
    pub fn played_so_far(&self) -> &[SupportCardId] {
        &self.sequence[..self.played_card_count]
    }

    /// Undrawn cards left in the sequence.
    #[must_use]
    pub fn remaining_cards(&self) -> usize {
        self.sequence.len() - self.played_card_count
    }

    /// Draw the next hand: up to `effective intelligence` contiguous ids,
    /// fewer if the sequence is nearly exhausted, zero once it is.
    ///
    /// Returns the number of cards drawn.
    pub fn draw_hand(&mut self) -> usize {
        let want = self.effective_stats.intelligence.max(0) as usize;
        let take = want.min(self.remaining_cards());

        self.current_hand.clear();
        self.current_hand
            .extend_from_slice(&self.sequence[self.played_card_count..self.played_card_count + take]);
        self.played_card_count += take;
        take
    }

    /// Start-of-turn effect upkeep: drop effects whose countdown reached
    /// zero, decrement the survivors, and re-derive effective stats from
    /// base plus surviving deltas.
    pub fn tick_effects(&mut self) {
        self.active_effects.retain(|e| e.remaining_turns > 0);
        for effect in &mut self.active_effects {
            effect.remaining_turns -= 1;
        }
        self.recompute_effective();
    }

    /// Re-derive effective stats from base stats plus active effects.
    ///
    /// Discards any combat-local instant boosts.
    pub fn recompute_effective(&mut self) {
        let mut stats = self.base_stats;
        for effect in &self.active_effects {
            stats.apply(effect.stat, effect.power);
        }
        self.effective_stats = stats;
    }

    /// Apply damage, flooring health at zero.
    pub fn take_damage(&mut self, damage: i64) {
        self.health = (self.health - damage.max(0)).max(0);
    }

    /// Whether this hand has been knocked out.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

/// One player's identity plus hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSide {
    pub addr: PlayerAddr,
    pub deck_id: DeckId,
    pub hand: PlayerHand,
}

/// Post-fight state capture, one per combat resolution.
///
/// Two battles are replays of each other exactly when their snapshot
/// sequences are byte-identical under serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub half: TurnHalf,
    pub attacker: PlayerSlot,
    pub damage: i64,
    pub p1_health: i64,
    pub p2_health: i64,
    pub p1_stats: StatSet,
    pub p2_stats: StatSet,
}

/// A battle between two players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub id: BattleId,
    pub player1: BattleSide,
    pub player2: BattleSide,

    /// Turn counter, starts at 1.
    pub current_turn: u32,

    /// Attacker for the current half; `None` until roles are resolved.
    pub attacker: Option<PlayerSlot>,

    /// Current sub-phase of the turn.
    pub half: TurnHalf,

    /// State machine phase.
    pub phase: Phase,

    /// Winner, set exactly once when the battle ends.
    pub winner: Option<PlayerAddr>,

    /// Post-fight snapshots in order.
    pub history: Vector<TurnSnapshot>,
}

impl Battle {
    /// The side in a slot.
    #[must_use]
    pub fn side(&self, slot: PlayerSlot) -> &BattleSide {
        match slot {
            PlayerSlot::One => &self.player1,
            PlayerSlot::Two => &self.player2,
        }
    }

    /// Mutable access to the side in a slot.
    pub fn side_mut(&mut self, slot: PlayerSlot) -> &mut BattleSide {
        match slot {
            PlayerSlot::One => &mut self.player1,
            PlayerSlot::Two => &mut self.player2,
        }
    }

    /// Both hands, attacker first. Only valid once roles are resolved.
    #[must_use]
    pub fn hands_by_role(&self) -> Option<(&PlayerHand, &PlayerHand)> {
        let attacker = self.attacker?;
        Some((&self.side(attacker).hand, &self.side(attacker.other()).hand))
    }

    /// Whether the battle has ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }
}
