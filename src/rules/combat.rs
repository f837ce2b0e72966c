//! Shooting and defending.
//!
//! `shoot` checks reach, then ammunition, spends one Bang and makes the
//! target defend. `defend` is shared with Gatling, which skips the shooter
//! side entirely.

use tracing::{debug, info};

use super::outcome::DefenseOutcome;
use super::range::RangeCalculator;
use crate::cards::{CardKind, Suit};
use crate::core::{GameError, GameResult, GameState, PlayerId};
use crate::effects::PermanentEffect;

/// Resolves a single shot.
pub struct CombatResolver;

impl CombatResolver {
    /// `shooter` fires one Bang at `target`.
    ///
    /// Fails without touching state if the target is missing or dead, out of
    /// range, or the shooter has no Bang.
    pub fn shoot(
        state: &mut GameState,
        shooter: PlayerId,
        target: PlayerId,
    ) -> GameResult<DefenseOutcome> {
        state.living_player(target)?;

        let (distance, range) = RangeCalculator::reach(state, shooter, target)?;
        if distance > range {
            return Err(GameError::OutOfRange { distance, range });
        }

        let bang = state
            .player_mut(shooter)?
            .take_kind(CardKind::Bang)
            .ok_or_else(|| GameError::CardNotInHand(CardKind::Bang.name().to_string()))?;
        state.deck.discard(bang);

        let target_index = state.index_of(target)?;
        let outcome = Self::defend(state, target_index);
        info!(room = %state.id, %shooter, %target, ?outcome, "shot resolved");
        Ok(outcome)
    }

    /// The player at `index` defends against one shot.
    ///
    /// Miss first, then a one-time Barrel check (heart evades), then damage.
    pub fn defend(state: &mut GameState, index: usize) -> DefenseOutcome {
        let player = &mut state.players[index];

        if let Some(miss) = player.take_kind(CardKind::Missed) {
            state.deck.discard(miss);
            return DefenseOutcome::Evaded;
        }

        if player.effects.remove(PermanentEffect::Barrel) {
            let check = state.draw_for_check();
            debug!(room = %state.id, player = %state.players[index].id, ?check, "barrel check");
            if let Some(card) = check {
                state.deck.discard(card);
                if card.suit == Some(Suit::Hearts) {
                    return DefenseOutcome::EvadedByBarrel;
                }
            }
        }

        let player = &mut state.players[index];
        player.take_damage(1);
        if !player.alive {
            DefenseOutcome::Killed
        } else {
            DefenseOutcome::Hit { hp: player.hp }
        }
    }
}
