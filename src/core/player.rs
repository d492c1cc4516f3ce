//! Player identification.
//!
//! The engine does not manage accounts or custody. A `PlayerAddr` is an
//! opaque handle supplied by the host; the engine only compares addresses
//! for equality (self-battle checks, winner reporting, admin gating).

use serde::{Deserialize, Serialize};

/// Opaque player address.
///
/// Hosts map this to whatever identity scheme they use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerAddr(pub u64);

impl PlayerAddr {
    /// Create a new player address.
    #[must_use]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Get the raw address value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({:#x})", self.0)
    }
}
