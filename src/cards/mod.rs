//! Card system: definitions and the catalog boundary.
//!
//! ## Key Types
//!
//! - `BattleCardId` / `SupportCardId`: definition identifiers
//! - `BattleCardDef`: the fielded unit with fixed base stats
//! - `SupportCardDef`: a drawn consumable with instant/duration effects
//! - `CardCatalog`: read-only lookup trait consumed by the battle engine
//! - `CardRoster`: in-memory catalog implementation

pub mod catalog;
pub mod definition;

pub use catalog::{CardCatalog, CardRoster};
pub use definition::{
    BattleCardDef, BattleCardId, BattleCardType, SupportCardDef, SupportCardId, SupportCardType,
};
