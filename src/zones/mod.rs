//! Shared card supply of a room.
//!
//! ## Key Types
//!
//! - `DeckManager`: ordered draw pile plus unordered discard pile, with
//!   reshuffle-on-exhaustion draws

pub mod deck;

pub use deck::DeckManager;
