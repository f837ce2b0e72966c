//! # bang-engine
//!
//! Rules engine for a hidden-role Wild West shooting card game for four to
//! seven players: one Sheriff, Deputies, Outlaws and Renegades.
//!
//! ## Design Principles
//!
//! 1. **Closed card set**: every card kind is an enum variant with its own
//!    resolution arm. Cards carry unique ids, names are only for display
//!    and lookup.
//!
//! 2. **Transactional actions**: an action either fully applies or leaves
//!    the room untouched. Stores apply actions to a working copy.
//!
//! 3. **Deterministic rooms**: every random choice goes through the room's
//!    seeded `GameRng`, whose position is persisted with the room.
//!
//! ## Modules
//!
//! - `core`: ids, players, room state, actions, RNG, config, errors
//! - `cards`: card kinds, instances, deck composition
//! - `zones`: draw and discard piles
//! - `effects`: permanent effects and the card dispatcher
//! - `rules`: range, combat, duels, turns and the action entry point
//! - `store`: room storage backends
//! - `service`: room operations with serde request/response views
//! - `telemetry`: tracing subscriber setup

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod rules;
pub mod store;
pub mod service;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, CardId, CardRef, EngineConfig, GameError, GameResult,
    GameRng, GameRngState, GameState, Player, PlayerId, Role, RoomId,
};

pub use crate::cards::{Card, CardKind, DeckComposition, Suit, Weapon};

pub use crate::zones::DeckManager;

pub use crate::effects::{CardEffectDispatcher, EffectSet, PermanentEffect};

pub use crate::rules::{
    ActionOutcome, CombatResolver, DefenseOutcome, DuelOutcome, DuelResolver, EffectOutcome,
    RangeCalculator, RoleAssignment, RulesEngine, TurnController,
};

pub use crate::store::{MemoryStore, RoomRecord, RoomStore, SnapshotStore};

pub use crate::service::{ActionResponse, ErrorBody, GameService, PlayerActionRequest, RoomView};
