//! Core engine types: ids, players, room state, actions, RNG, configuration,
//! and errors.
//!
//! Everything here is plain data plus lookups. The rules that move cards and
//! hit points around live in `crate::rules` and `crate::effects`.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use entity::{CardId, PlayerId, RoomId};
pub use player::{Player, Role};
pub use rng::{GameRng, GameRngState};
pub use config::EngineConfig;
pub use action::{Action, ActionKind, ActionRecord, CardRef};
pub use error::{GameError, GameResult};
pub use state::GameState;
