//! Game rules.
//!
//! - `RangeCalculator`: seat distance and weapon reach
//! - `CombatResolver`: one shot and its defense
//! - `DuelResolver`: alternating Bang exchange
//! - `TurnController`: lobby, start, turn gating and hand limit
//! - `RulesEngine`: the entry point every action goes through
//!
//! Card effects live in `crate::effects` and call back into these.

pub mod combat;
pub mod duel;
pub mod engine;
pub mod outcome;
pub mod range;
pub mod turn;

pub use combat::CombatResolver;
pub use duel::DuelResolver;
pub use engine::RulesEngine;
pub use outcome::{ActionOutcome, DefenseOutcome, DuelOutcome, DynamiteCheck, EffectOutcome, Steal};
pub use range::RangeCalculator;
pub use turn::{RoleAssignment, TurnController};
