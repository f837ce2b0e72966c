//! Game lifecycle and turn order.
//!
//! ## Lifecycle
//!
//! A room starts in the lobby, where players join and mark themselves
//! ready. `start_game` closes the lobby exactly once: it deals roles, builds
//! and shuffles a fresh deck, deals opening hands and hands the first turn
//! to the first player who joined. There is no game-over state.
//!
//! ## Turns
//!
//! Only the current player may act. A turn holds any number of card plays
//! and shots and ends on `pass`, which moves to the next living player in
//! seat order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{EngineConfig, GameError, GameResult, GameState, PlayerId, Role};

/// A role handed out by `start_game`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
}

pub struct TurnController;

impl TurnController {
    /// Close the lobby and deal the game.
    ///
    /// Checks run in this order: already started, too few players, someone
    /// not ready, too many players. Nothing changes unless all pass.
    pub fn start_game(
        state: &mut GameState,
        config: &EngineConfig,
    ) -> GameResult<Vec<RoleAssignment>> {
        if state.started {
            return Err(GameError::GameAlreadyStarted);
        }
        let count = state.player_count();
        if count < config.min_players {
            return Err(GameError::InsufficientPlayers {
                found: count,
                required: config.min_players,
            });
        }
        if state.players.iter().any(|p| !p.ready) {
            return Err(GameError::NotAllReady);
        }
        if count > config.max_players {
            return Err(GameError::UnsupportedPlayerCount(count));
        }
        let mut roles = Role::lineup(count).ok_or(GameError::UnsupportedPlayerCount(count))?;

        state.rng.shuffle(&mut roles);
        let mut assignments = Vec::with_capacity(count);
        for (player, role) in state.players.iter_mut().zip(roles) {
            player.role = Some(role);
            assignments.push(RoleAssignment {
                id: player.id,
                name: player.name.clone(),
                role,
            });
        }

        let cards = config.deck.build(|| state.alloc_card_id());
        state.deck.reset(cards, &mut state.rng);
        for index in 0..count {
            state.players[index].hand.clear();
            state.draw_into_hand(index, config.starting_hand_size);
        }

        state.started = true;
        state.roles_assigned = true;
        state.current_player = state.players.first().map(|p| p.id);
        state.turn_number = 1;
        state.action_sequence = 0;

        info!(
            room = %state.id,
            players = count,
            deck = state.deck.draw_pile_len(),
            "game started"
        );
        Ok(assignments)
    }

    /// Check that `player` may act right now. Returns their index.
    pub fn ensure_turn(state: &GameState, player: PlayerId) -> GameResult<usize> {
        if !state.started {
            return Err(GameError::GameNotStarted);
        }
        let index = state.index_of(player)?;
        if !state.players[index].alive {
            return Err(GameError::PlayerDeadOrMissing(player));
        }
        match state.current_player {
            None => Err(GameError::CurrentPlayerUndetermined),
            Some(current) if current != player => Err(GameError::NotYourTurn(player)),
            Some(_) => Ok(index),
        }
    }

    /// The next living player after `from` in seat order, wrapping.
    ///
    /// `from` itself is the last candidate, so a lone survivor keeps the
    /// turn.
    pub fn next_living_after(state: &GameState, from: PlayerId) -> GameResult<PlayerId> {
        let start = state.index_of(from)?;
        let count = state.player_count();
        (1..=count)
            .map(|offset| &state.players[(start + offset) % count])
            .find(|p| p.alive)
            .map(|p| p.id)
            .ok_or(GameError::CurrentPlayerUndetermined)
    }

    /// Hand the turn to `next` and reset the per-turn counters.
    pub fn begin_turn(state: &mut GameState, next: PlayerId) {
        state.current_player = Some(next);
        state.turn_number += 1;
        state.action_sequence = 0;
        debug!(room = %state.id, player = %next, turn = state.turn_number, "turn begins");
    }

    /// Discard cards from the end of the hand of the player at `index`
    /// until it holds no more cards than their hit points.
    ///
    /// Returns how many cards were discarded.
    pub fn enforce_hand_limit(state: &mut GameState, index: usize) -> usize {
        let surplus = state.players[index].truncate_hand();
        let count = surplus.len();
        if count > 0 {
            debug!(
                room = %state.id,
                player = %state.players[index].id,
                discarded = count,
                "hand truncated to hp"
            );
            state.deck.discard_all(surplus);
        }
        count
    }
}
