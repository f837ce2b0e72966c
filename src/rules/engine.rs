//! Action entry point.
//!
//! `RulesEngine::apply` is the only way an action reaches a room:
//! - Turn gating (`TurnController::ensure_turn`)
//! - Dispatch to pass, shoot, or card play
//! - History recording
//!
//! On error the caller must discard the state it passed in; the stores do
//! this by applying actions to a working copy.

use tracing::debug;

use super::combat::CombatResolver;
use super::outcome::ActionOutcome;
use super::range::RangeCalculator;
use super::turn::TurnController;
use crate::cards::CardKind;
use crate::core::{Action, CardRef, GameError, GameResult, GameState, PlayerId};
use crate::effects::CardEffectDispatcher;

pub struct RulesEngine;

impl RulesEngine {
    /// Apply `action` for `player`.
    pub fn apply(
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> GameResult<ActionOutcome> {
        let result = Self::resolve(state, player, action);
        if let Err(err) = &result {
            debug!(room = %state.id, %player, ?action, %err, "action rejected");
        }
        result
    }

    fn resolve(
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> GameResult<ActionOutcome> {
        let index = TurnController::ensure_turn(state, player)?;

        let outcome = match action {
            Action::Pass => {
                let next = TurnController::next_living_after(state, player)?;
                state.record(player, action.clone());
                TurnController::begin_turn(state, next);
                return Ok(ActionOutcome::Passed { next });
            }
            Action::Shoot { target } => {
                let target = target.ok_or(GameError::MissingTarget)?;
                let defense = CombatResolver::shoot(state, player, target)?;
                ActionOutcome::Shot { target, defense }
            }
            Action::PlayCard { card, target } => {
                let (card, effect) = CardEffectDispatcher::play(state, index, card, *target)?;
                ActionOutcome::Played { card, effect }
            }
        };

        state.record(player, action.clone());

        // The current player can die on their own turn (a lost duel,
        // dynamite); the turn then moves on as if they had passed. With no
        // one left alive the action fails like a pass would.
        if !state.players[index].alive {
            let next = TurnController::next_living_after(state, player)?;
            TurnController::begin_turn(state, next);
        }
        Ok(outcome)
    }

    /// Actions `player` could submit right now without being rejected.
    ///
    /// Pass is always included. Shots are listed for every living target in
    /// reach when the player holds a Bang. Every card in hand is listed by
    /// id; Duel and Jail once per living opponent.
    #[must_use]
    pub fn candidate_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
        let Ok(index) = TurnController::ensure_turn(state, player) else {
            return Vec::new();
        };
        let me = &state.players[index];
        let opponents: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|p| p.alive && p.id != player)
            .map(|p| p.id)
            .collect();

        let mut actions = vec![Action::Pass];
        if me.holds(CardKind::Bang) {
            for &target in &opponents {
                if let Ok((distance, range)) = RangeCalculator::reach(state, player, target) {
                    if distance <= range {
                        actions.push(Action::shoot(target));
                    }
                }
            }
        }
        for card in &me.hand {
            if card.kind.requires_target() {
                for &target in &opponents {
                    actions.push(Action::PlayCard {
                        card: CardRef::Id(card.id),
                        target: Some(target),
                    });
                }
            } else {
                actions.push(Action::play_id(card.id, None));
            }
        }
        actions
    }
}
