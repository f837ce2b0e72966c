//! Identifiers for rooms, players, and card instances.
//!
//! Every card dealt into a room gets its own `CardId`, so two "Bang" cards
//! are distinct objects even though they share a name. Rules look cards up
//! by id; the name is only a display and effect-lookup key.
//!
//! ## Usage
//!
//! ```
//! use bang_engine::core::{CardId, PlayerId, RoomId};
//!
//! let room = RoomId::new(7);
//! let player = PlayerId::new(1);
//! let card = CardId::new(42);
//!
//! assert_eq!(format!("{room}"), "Room(7)");
//! assert_eq!(format!("{player}"), "Player 1");
//! assert_eq!(card.raw(), 42);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a card instance within a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Player identifier.
///
/// Players are numbered from 1 in join order; the id never changes once
/// assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
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

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Room (game session) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl RoomId {
    /// Create a new room ID.
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

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Room({})", self.0)
    }
}

impl From<u64> for RoomId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
