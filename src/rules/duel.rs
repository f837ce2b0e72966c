//! Duels.
//!
//! The target answers first. Each answer costs one Bang; the side that
//! cannot answer loses one hit point and the duel ends there.

use tracing::info;

use super::outcome::DuelOutcome;
use crate::cards::CardKind;
use crate::core::GameState;

pub struct DuelResolver;

impl DuelResolver {
    /// Run a duel between the players at `challenger` and `target` (indices
    /// into `state.players`).
    pub fn duel(state: &mut GameState, challenger: usize, target: usize) -> DuelOutcome {
        let mut responder = target;
        let mut other = challenger;
        let mut rounds = 0;

        while let Some(bang) = state.players[responder].take_kind(CardKind::Bang) {
            state.deck.discard(bang);
            rounds += 1;
            std::mem::swap(&mut responder, &mut other);
        }

        let loser = &mut state.players[responder];
        let killed = loser.take_damage(1);
        let outcome = DuelOutcome {
            loser: loser.id,
            rounds,
            killed,
        };
        info!(room = %state.id, loser = %outcome.loser, rounds, killed, "duel resolved");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, PlayerId, RoomId};

    fn table() -> GameState {
        let config = EngineConfig::default();
        let mut state = GameState::new(RoomId(1), 5);
        for name in ["Ann", "Bob", "Cid", "Dan"] {
            state.add_player(name, &config);
        }
        state
    }

    #[test]
    fn test_target_without_bang_loses_immediately() {
        let mut state = table();
        state.give_card(PlayerId(1), CardKind::Bang).unwrap();

        let outcome = DuelResolver::duel(&mut state, 0, 2);

        assert_eq!(outcome.loser, PlayerId(3));
        assert_eq!(outcome.rounds, 0);
        assert!(!outcome.killed);
        assert_eq!(state.players[2].hp, 3);
        assert_eq!(state.players[0].hand.len(), 1);
    }

    #[test]
    fn test_target_with_bang_beats_empty_challenger() {
        let mut state = table();
        state.give_card(PlayerId(3), CardKind::Bang).unwrap();

        let outcome = DuelResolver::duel(&mut state, 0, 2);

        assert_eq!(outcome.loser, PlayerId(1));
        assert_eq!(outcome.rounds, 1);
        assert_eq!(state.players[2].hp, 4);
        assert_eq!(state.players[0].hp, 3);
        assert_eq!(state.deck.discard_len(), 1);
    }

    #[test]
    fn test_alternation_runs_until_someone_is_empty() {
        let mut state = table();
        for _ in 0..2 {
            state.give_card(PlayerId(1), CardKind::Bang).unwrap();
            state.give_card(PlayerId(2), CardKind::Bang).unwrap();
        }

        // Bob, Ann, Bob, Ann, then Bob is out.
        let outcome = DuelResolver::duel(&mut state, 0, 1);

        assert_eq!(outcome.loser, PlayerId(2));
        assert_eq!(outcome.rounds, 4);
        assert!(state.players[0].hand.is_empty());
        assert!(state.players[1].hand.is_empty());
    }

    #[test]
    fn test_duel_can_kill() {
        let mut state = table();
        state.players[1].hp = 1;

        let outcome = DuelResolver::duel(&mut state, 0, 1);

        assert!(outcome.killed);
        assert!(!state.players[1].alive);
    }
}
