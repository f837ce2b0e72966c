//! Card model: kinds, instances, and deck composition.
//!
//! - `CardKind`: what a card does (closed enum, one variant per effect)
//! - `Card`: a physical card with a unique `CardId`
//! - `DeckComposition`: how many of each card a fresh deck holds

mod definition;
mod instance;
mod registry;

pub use definition::{CardKind, Suit, UnknownCardName, Weapon};
pub use instance::Card;
pub use registry::DeckComposition;
