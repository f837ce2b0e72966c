//! Card effects.
//!
//! - `PermanentEffect`: typed tags a player can carry (Mustang, Scope,
//!   Barrel, Jail, Dynamite, an equipped weapon)
//! - `EffectSet`: the duplicate-free set of tags on one player
//! - `CardEffectDispatcher`: resolves a played card against a room
//!
//! ## Design
//!
//! Every card kind is an enum variant with its own arm in the dispatcher.
//! Effects never look cards up by free-form strings once the played card
//! has been found in hand.

mod effect;
mod resolver;

pub use effect::{EffectSet, PermanentEffect};
pub use resolver::CardEffectDispatcher;
