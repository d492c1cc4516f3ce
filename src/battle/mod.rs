//! Battle state machine and engine.
//!
//! `state` holds the pure data (battles, hands, snapshots); `engine` applies
//! operations to it through the provider traits.

pub mod engine;
pub mod state;

pub use engine::{BattleEngine, EngineConfig};
pub use state::{Battle, BattleId, BattleSide, Phase, PlayerHand, PlayerSlot, TurnHalf, TurnSnapshot};
