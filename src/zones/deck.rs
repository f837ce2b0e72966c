//! Draw pile and discard pile.
//!
//! The `DeckManager` owns the shared card supply of a room:
//! - an ordered draw pile, drawn from the front
//! - an unordered discard pile
//!
//! When a draw finds the draw pile empty, the discard pile is shuffled
//! and becomes the new draw pile. If both are empty the draw yields nothing.
//!
//! ## Usage
//!
//! ```
//! use bang_engine::cards::{Card, CardKind};
//! use bang_engine::core::{CardId, GameRng};
//! use bang_engine::zones::DeckManager;
//!
//! let mut rng = GameRng::new(42);
//! let mut deck = DeckManager::new();
//!
//! deck.discard(Card::new(CardId(1), CardKind::Bang));
//! assert_eq!(deck.draw_pile_len(), 0);
//!
//! // Empty draw pile: the discard pile is reshuffled in
//! let card = deck.draw(&mut rng).unwrap();
//! assert_eq!(card.id, CardId(1));
//! assert_eq!(deck.discard_len(), 0);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::core::entity::CardId;
use crate::core::rng::GameRng;

/// Draw pile (ordered, front = top) plus discard pile (unordered).
///
/// The draw pile is an `im::Vector` so cloning a room for a transactional
/// update is cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManager {
    draw_pile: Vector<Card>,
    discard_pile: Vec<Card>,
}

impl DeckManager {
    /// Create an empty deck manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored piles. `draw_pile` is top first.
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile: draw_pile.into_iter().collect(),
            discard_pile,
        }
    }

    /// Replace both piles with a freshly shuffled deck.
    pub fn reset(&mut self, mut cards: Vec<Card>, rng: &mut GameRng) {
        rng.shuffle(&mut cards);
        self.draw_pile = cards.into_iter().collect();
        self.discard_pile.clear();
    }

    /// Draw the top card, reshuffling the discard pile in if needed.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.draw_pile.is_empty() && !self.reshuffle(rng) {
            return None;
        }
        self.draw_pile.pop_front()
    }

    /// Draw up to `count` cards. Stops early once both piles are exhausted.
    pub fn draw_many(&mut self, count: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw(rng) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Move the whole discard pile, shuffled, into the draw pile.
    ///
    /// Returns false if there was nothing to reshuffle.
    pub fn reshuffle(&mut self, rng: &mut GameRng) -> bool {
        if self.discard_pile.is_empty() {
            return false;
        }
        let mut cards = std::mem::take(&mut self.discard_pile);
        rng.shuffle(&mut cards);
        debug!(cards = cards.len(), "reshuffled discard pile into draw pile");
        self.draw_pile.extend(cards);
        true
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Put several cards on the discard pile.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    /// Place a card on top of the draw pile.
    pub fn put_on_top(&mut self, card: Card) {
        self.draw_pile.push_front(card);
    }

    /// Place a card at the bottom of the draw pile.
    pub fn put_on_bottom(&mut self, card: Card) {
        self.draw_pile.push_back(card);
    }

    /// Peek at the top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.draw_pile.front()
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards in the draw pile, top first.
    pub fn draw_pile(&self) -> impl Iterator<Item = &Card> + '_ {
        self.draw_pile.iter()
    }

    /// Cards in the discard pile, in discard order.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Is this card id in the discard pile?
    #[must_use]
    pub fn is_discarded(&self, id: CardId) -> bool {
        self.discard_pile.iter().any(|c| c.id == id)
    }
}
