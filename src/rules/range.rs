//! Seat-circle distance and weapon reach.
//!
//! Distance is the shorter way around the table between two seats, plus one
//! if the *target* rides a Mustang. It is therefore not symmetric when only
//! one side has a Mustang. Reach is the weapon's base range plus one for a
//! Scope. A shot is legal when distance <= reach.

use crate::core::{GameResult, GameState, Player, PlayerId};
use crate::effects::PermanentEffect;

/// Distance and range arithmetic.
pub struct RangeCalculator;

impl RangeCalculator {
    /// Distance from `viewer` to `target` around a table of `seats` seats.
    #[must_use]
    pub fn distance_between(viewer: &Player, target: &Player, seats: usize) -> u32 {
        if viewer.id == target.id {
            return 0;
        }
        let seats = seats as u32;
        let direct = viewer.seat.abs_diff(target.seat);
        let mut distance = direct.min(seats.saturating_sub(direct));
        if target.has_effect(PermanentEffect::Mustang) {
            distance += 1;
        }
        distance
    }

    /// Distance between two players of a room. Dead players keep their seats.
    pub fn distance(state: &GameState, viewer: PlayerId, target: PlayerId) -> GameResult<u32> {
        let a = state.player(viewer)?;
        let b = state.player(target)?;
        Ok(Self::distance_between(a, b, state.player_count()))
    }

    /// How far a player can shoot.
    #[must_use]
    pub fn weapon_range(player: &Player) -> u32 {
        let mut range = player.weapon.base_range();
        if player.has_effect(PermanentEffect::Scope) {
            range += 1;
        }
        range
    }

    /// Is `target` within `shooter`'s reach? Returns (distance, range).
    pub fn reach(state: &GameState, shooter: PlayerId, target: PlayerId) -> GameResult<(u32, u32)> {
        let distance = Self::distance(state, shooter, target)?;
        let range = Self::weapon_range(state.player(shooter)?);
        Ok((distance, range))
    }
}
