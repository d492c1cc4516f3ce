//! Core engine types: players, stats, randomness.
//!
//! These are the leaf building blocks the rest of the crate composes.
//! Nothing in here knows about cards, decks, or battles.

pub mod player;
pub mod rng;
pub mod stats;

pub use player::PlayerAddr;
pub use rng::{RandomnessProvider, SeededRng, SeededRngState};
pub use stats::{StatKind, StatSet};
