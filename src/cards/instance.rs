//! Card instances - the physical cards in a room.
//!
//! A `Card` pairs a unique `CardId` with its `CardKind` and optional
//! suit/value. Suit and value matter for draw checks (Barrel, Dynamite)
//! and give numbered cards their names.

use serde::{Deserialize, Serialize};

use super::definition::{CardKind, Suit};
use crate::core::entity::CardId;

/// A single card in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the room.
    pub id: CardId,
    pub kind: CardKind,
    pub suit: Option<Suit>,
    pub value: Option<u8>,
}

impl Card {
    /// Create a card with no suit or value.
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self {
            id,
            kind,
            suit: None,
            value: None,
        }
    }

    /// Create a plain numbered card.
    #[must_use]
    pub const fn numbered(id: CardId, value: u8, suit: Suit) -> Self {
        Self {
            id,
            kind: CardKind::Numbered,
            suit: Some(suit),
            value: Some(value),
        }
    }

    /// Set the suit (builder pattern).
    #[must_use]
    pub const fn with_suit(mut self, suit: Suit) -> Self {
        self.suit = Some(suit);
        self
    }

    /// Display name, e.g. "Bang" or "7 of Hearts".
    #[must_use]
    pub fn name(&self) -> String {
        match (self.kind, self.suit, self.value) {
            (CardKind::Numbered, Some(suit), Some(value)) => format!("{value} of {suit}"),
            (kind, _, _) => kind.name().to_string(),
        }
    }

    /// Does `name` refer to this card? Case-insensitive.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        if self.name().eq_ignore_ascii_case(name) {
            return true;
        }
        // Named kinds also answer to their parse aliases ("Missed").
        self.kind != CardKind::Numbered && name.parse::<CardKind>() == Ok(self.kind)
    }

    #[must_use]
    pub fn is(&self, kind: CardKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.name(), self.id.raw())
    }
}
