//! Deck composition - how many of each card a fresh deck holds.
//!
//! ## Example
//!
//! ```
//! use bang_engine::cards::{CardKind, DeckComposition};
//!
//! let classic = DeckComposition::classic();
//! assert_eq!(classic.count(CardKind::Bang), 25);
//! assert_eq!(classic.total(), 108);
//!
//! let no_cat_balou = DeckComposition::classic().with_count(CardKind::CatBalou, 0);
//! assert_eq!(no_cat_balou.total(), 105);
//! ```

use serde::{Deserialize, Serialize};

use super::definition::{CardKind, Suit, Weapon};
use super::instance::Card;
use crate::core::entity::CardId;

/// Counts of each special card plus the numbered-card range.
///
/// Numbered cards are generated for every suit and every value in
/// `numbered_values`. Barrel cards are dealt with suit Hearts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    /// Inclusive value range of numbered cards, e.g. `(2, 10)`. `None` for none.
    pub numbered_values: Option<(u8, u8)>,
    /// Special card counts, in deck-building order.
    pub special: Vec<(CardKind, u32)>,
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self::classic()
    }
}

impl DeckComposition {
    /// The standard 108-card deck.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            numbered_values: Some((2, 10)),
            special: vec![
                (CardKind::Bang, 25),
                (CardKind::Missed, 15),
                (CardKind::Beer, 10),
                (CardKind::Stagecoach, 2),
                (CardKind::WellsFargo, 2),
                (CardKind::GeneralStore, 2),
                (CardKind::Panic, 3),
                (CardKind::CatBalou, 3),
                (CardKind::Gatling, 1),
                (CardKind::Duel, 3),
                (CardKind::Weapon(Weapon::Schofield), 1),
                (CardKind::Barrel, 1),
                (CardKind::Jail, 1),
                (CardKind::Dynamite, 1),
                (CardKind::Mustang, 1),
                (CardKind::Scope, 1),
            ],
        }
    }

    /// A deck with no numbered cards and no special cards.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            numbered_values: None,
            special: Vec::new(),
        }
    }

    /// Set the count of a special card kind (builder pattern).
    #[must_use]
    pub fn with_count(mut self, kind: CardKind, count: u32) -> Self {
        match self.special.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = count,
            None => self.special.push((kind, count)),
        }
        self
    }

    /// Set the numbered value range (builder pattern).
    #[must_use]
    pub fn with_numbered(mut self, values: Option<(u8, u8)>) -> Self {
        self.numbered_values = values;
        self
    }

    /// Count of a given kind. Numbered cards are counted across all suits.
    #[must_use]
    pub fn count(&self, kind: CardKind) -> u32 {
        if kind == CardKind::Numbered {
            return self.numbered_count();
        }
        self.special
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, c)| *c)
            .sum()
    }

    fn numbered_count(&self) -> u32 {
        match self.numbered_values {
            Some((lo, hi)) if lo <= hi => u32::from(hi - lo + 1) * Suit::ALL.len() as u32,
            _ => 0,
        }
    }

    /// Total number of cards in a fresh deck.
    #[must_use]
    pub fn total(&self) -> usize {
        let special: u32 = self.special.iter().map(|(_, c)| *c).sum();
        (self.numbered_count() + special) as usize
    }

    /// Build the cards, unshuffled, allocating ids with `next_id`.
    pub fn build(&self, mut next_id: impl FnMut() -> CardId) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.total());

        if let Some((lo, hi)) = self.numbered_values {
            for suit in Suit::ALL {
                for value in lo..=hi {
                    cards.push(Card::numbered(next_id(), value, suit));
                }
            }
        }

        for &(kind, count) in &self.special {
            for _ in 0..count {
                let card = Card::new(next_id(), kind);
                let card = if kind == CardKind::Barrel {
                    card.with_suit(Suit::Hearts)
                } else {
                    card
                };
                cards.push(card);
            }
        }

        cards
    }
}
