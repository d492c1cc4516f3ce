//! Error taxonomy.
//!
//! Every failure is unrecoverable at the point it occurs: the operation
//! surfaces the error without mutating battle state, and nothing is retried
//! internally. Provider unavailability maps to the `*NotFound` variants.

use thiserror::Error;

use crate::battle::BattleId;
use crate::cards::{BattleCardId, SupportCardId};
use crate::core::PlayerAddr;
use crate::deck::DeckId;

/// Errors surfaced by the battle engine and its providers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    /// A player attempted to battle themselves.
    #[error("cannot battle yourself")]
    InvalidParticipants,

    /// The caller is not allowed to create or administer battles.
    #[error("{0} is not authorized to administer battles")]
    Unauthorized(PlayerAddr),

    /// A referenced battle card could not be resolved.
    #[error("{0} not found in catalog")]
    BattleCardNotFound(BattleCardId),

    /// A referenced support card could not be resolved.
    #[error("{0} not found in catalog")]
    SupportCardNotFound(SupportCardId),

    /// A referenced deck could not be resolved.
    #[error("{0} not found")]
    DeckNotFound(DeckId),

    /// An operation was invoked against a battle not in the state it
    /// requires.
    #[error("invalid state for {operation}: battle is in {found}")]
    InvalidState {
        /// Operation that was attempted.
        operation: &'static str,
        /// State the battle was actually in.
        found: &'static str,
    },

    /// A mutating call was made against an already-ended battle.
    #[error("battle {0} has already ended")]
    Terminal(BattleId),
}

impl BattleError {
    /// Whether this error is a provider lookup failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BattleError::BattleCardNotFound(_)
                | BattleError::SupportCardNotFound(_)
                | BattleError::DeckNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = BattleError::InvalidParticipants;
        assert_eq!(err.to_string(), "cannot battle yourself");

        let err = BattleError::Unauthorized(PlayerAddr::new(0xB0B));
        assert!(err.to_string().contains("not authorized"));

        let err = BattleError::InvalidState {
            operation: "fight",
            found: "Created",
        };
        assert_eq!(err.to_string(), "invalid state for fight: battle is in Created");
    }

    #[test]
    fn test_is_not_found() {
        assert!(BattleError::DeckNotFound(DeckId::new(3)).is_not_found());
        assert!(BattleError::BattleCardNotFound(BattleCardId::new(1)).is_not_found());
        assert!(!BattleError::InvalidParticipants.is_not_found());
    }
}
