//! # rust-duel
//!
//! A deterministic resolution engine for two-player turn-based card battles.
//!
//! Each player fields one battle card (health plus six combat stats) and a
//! shuffled sequence of support cards. Battles advance in turns of two
//! halves; in each half the faster side attacks, both sides draw support
//! cards, drawn cards boost stats through instant and duration effects, and
//! the attacker deals stat-differential damage. The first side to drive the
//! opponent's health to zero wins.
//!
//! ## Determinism
//!
//! Given the same card catalog, deck provider, and randomness provider
//! outputs, a battle replays identically: snapshots in `Battle::history`
//! serialize byte-for-byte equal. Randomness is consumed only to seed deck
//! shuffles at creation and to break exact speed ties, exactly once per tie.
//!
//! ## Architecture
//!
//! - [`core`]: player addresses, stats, the randomness boundary
//! - [`cards`]: card definitions and the catalog trait
//! - [`deck`]: deck composition lookup and seeded shuffling
//! - [`effects`]: instant/duration effects, requirement codes, resolution
//! - [`battle`]: the battle state machine and engine
//! - [`error`]: the error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use rust_duel::battle::{BattleEngine, EngineConfig};
//! use rust_duel::cards::CardRoster;
//! use rust_duel::core::{PlayerAddr, SeededRng};
//! use rust_duel::deck::{DeckId, DeckStore};
//!
//! # fn main() -> Result<(), rust_duel::error::BattleError> {
//! let admin = PlayerAddr::new(0xAD);
//! let catalog = CardRoster::new(); // populate with card definitions
//! let decks = DeckStore::new(); // populate with deck compositions
//!
//! let mut engine = BattleEngine::new(catalog, decks, SeededRng::new(42), EngineConfig::new(admin));
//!
//! let mut battle = engine.create_battle(
//!     admin,
//!     PlayerAddr::new(1),
//!     DeckId::new(1),
//!     PlayerAddr::new(2),
//!     DeckId::new(2),
//! )?;
//! let winner = engine.go_for_battle(&mut battle)?;
//! println!("winner: {winner}");
//! # Ok(())
//! # }
//! ```

pub mod battle;
pub mod cards;
pub mod core;
pub mod deck;
pub mod effects;
pub mod error;

pub use crate::battle::{Battle, BattleEngine, BattleId, EngineConfig};
pub use crate::cards::{CardCatalog, CardRoster};
pub use crate::core::{PlayerAddr, RandomnessProvider, SeededRng};
pub use crate::deck::{DeckId, DeckProvider, DeckStore};
pub use crate::error::BattleError;
