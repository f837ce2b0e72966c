//! Room state.
//!
//! ## GameState
//!
//! Everything one room owns:
//! - Players, in join order (join order is turn order and seat order)
//! - The shared deck (`DeckManager`)
//! - Lifecycle flags and the current player
//! - Action history
//! - The room's RNG stream
//!
//! `GameState` is plain data. Rules live in `crate::rules`; this type only
//! provides lookups and the card-movement primitives rules are built from.

use im::Vector;
use tracing::debug;

use super::action::ActionRecord;
use super::config::EngineConfig;
use super::entity::{CardId, PlayerId, RoomId};
use super::error::{GameError, GameResult};
use super::player::Player;
use super::rng::GameRng;
use crate::cards::{Card, CardKind};
use crate::zones::DeckManager;

/// Full state of one room.
#[derive(Clone, Debug)]
pub struct GameState {
    pub id: RoomId,

    /// Players in join order.
    pub players: Vec<Player>,

    /// Draw and discard piles.
    pub deck: DeckManager,

    pub started: bool,
    pub roles_assigned: bool,

    /// Whose turn it is. Always a living player once started.
    pub current_player: Option<PlayerId>,

    /// Turn number (starts at 1 when the game starts).
    pub turn_number: u32,

    /// Action sequence within the current turn.
    pub action_sequence: u32,

    /// Committed actions, oldest first.
    pub history: Vector<ActionRecord>,

    /// Deterministic RNG for this room.
    pub rng: GameRng,

    /// Next card id to allocate.
    next_card_id: u32,
}

impl GameState {
    /// Create an empty room in the lobby.
    #[must_use]
    pub fn new(id: RoomId, seed: u64) -> Self {
        Self::with_rng(id, GameRng::new(seed))
    }

    /// Create an empty room with an existing RNG stream.
    #[must_use]
    pub fn with_rng(id: RoomId, rng: GameRng) -> Self {
        Self {
            id,
            players: Vec::new(),
            deck: DeckManager::new(),
            started: false,
            roles_assigned: false,
            current_player: None,
            turn_number: 0,
            action_sequence: 0,
            history: Vector::new(),
            rng,
            next_card_id: 1,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    // === Players ===

    /// Seat a new player. Ids and seats follow join order.
    pub fn add_player(&mut self, name: impl Into<String>, config: &EngineConfig) -> PlayerId {
        let seat = self.players.len() as u32;
        let id = PlayerId::new(seat + 1);
        let player = Player::new(id, name, seat)
            .with_hp(config.starting_hp, config.max_hp)
            .with_weapon(config.default_weapon);
        self.players.push(player);
        id
    }

    /// Position of a player in join order.
    pub fn index_of(&self, id: PlayerId) -> GameResult<usize> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))
    }

    pub fn player(&self, id: PlayerId) -> GameResult<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> GameResult<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))
    }

    /// Look up a player who must be alive.
    pub fn living_player(&self, id: PlayerId) -> GameResult<&Player> {
        let player = self.player(id)?;
        if !player.alive {
            return Err(GameError::PlayerDeadOrMissing(id));
        }
        Ok(player)
    }

    /// Ids of living players in seat order.
    #[must_use]
    pub fn living_ids(&self) -> Vec<PlayerId> {
        self.players.iter().filter(|p| p.alive).map(|p| p.id).collect()
    }

    // === Cards ===

    /// Allocate a fresh card id.
    pub fn alloc_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    /// The id the next allocated card will get.
    #[must_use]
    pub fn next_card_id(&self) -> u32 {
        self.next_card_id
    }

    /// Restore the card id counter of a persisted room.
    pub fn set_next_card_id(&mut self, next: u32) {
        self.next_card_id = next;
    }

    /// Create a new card instance of `kind`.
    pub fn mint_card(&mut self, kind: CardKind) -> Card {
        Card::new(self.alloc_card_id(), kind)
    }

    /// Put a newly minted card into a player's hand. Used for table setup.
    pub fn give_card(&mut self, player: PlayerId, kind: CardKind) -> GameResult<CardId> {
        let card = self.mint_card(kind);
        self.player_mut(player)?.hand.push(card);
        Ok(card.id)
    }

    /// Draw up to `count` cards into the hand of the player at `index`.
    ///
    /// Returns how many cards were actually drawn.
    pub fn draw_into_hand(&mut self, index: usize, count: usize) -> usize {
        let drawn = self.deck.draw_many(count, &mut self.rng);
        let n = drawn.len();
        if n < count {
            debug!(room = %self.id, wanted = count, drawn = n, "deck exhausted while drawing");
        }
        self.players[index].hand.extend(drawn);
        n
    }

    /// Draw one card for a check (Barrel, Dynamite). The card goes nowhere;
    /// the caller discards it.
    pub fn draw_for_check(&mut self) -> Option<Card> {
        self.deck.draw(&mut self.rng)
    }

    /// Total cards across draw pile, discard pile, and every hand.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.deck.draw_pile_len()
            + self.deck.discard_len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    // === History ===

    /// Record a committed action.
    pub fn record(&mut self, player: PlayerId, action: super::action::Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history.push_back(ActionRecord {
            player,
            action,
            turn: self.turn_number,
            sequence,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby(names: &[&str]) -> GameState {
        let config = EngineConfig::default();
        let mut state = GameState::new(RoomId(1), 42);
        for name in names {
            state.add_player(*name, &config);
        }
        state
    }

    #[test]
    fn test_add_player_assigns_sequential_ids_and_seats() {
        let state = lobby(&["Ann", "Bob", "Cid"]);

        let ids: Vec<_> = state.players.iter().map(|p| p.id.raw()).collect();
        let seats: Vec<_> = state.players.iter().map(|p| p.seat).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(seats, vec![0, 1, 2]);
        assert_eq!(state.player_count(), 3);
    }

    #[test]
    fn test_player_lookup() {
        let mut state = lobby(&["Ann", "Bob"]);

        assert_eq!(state.player(PlayerId(2)).unwrap().name, "Bob");
        assert_eq!(state.index_of(PlayerId(2)), Ok(1));
        assert_eq!(
            state.player(PlayerId(9)).unwrap_err(),
            GameError::PlayerNotFound(PlayerId(9))
        );

        state.player_mut(PlayerId(1)).unwrap().alive = false;
        assert_eq!(
            state.living_player(PlayerId(1)).unwrap_err(),
            GameError::PlayerDeadOrMissing(PlayerId(1))
        );
        assert_eq!(state.living_ids(), vec![PlayerId(2)]);
    }

    #[test]
    fn test_give_card_allocates_unique_ids() {
        let mut state = lobby(&["Ann"]);

        let a = state.give_card(PlayerId(1), CardKind::Bang).unwrap();
        let b = state.give_card(PlayerId(1), CardKind::Bang).unwrap();

        assert_ne!(a, b);
        assert_eq!(state.player(PlayerId(1)).unwrap().hand.len(), 2);
        assert_eq!(state.cards_in_play(), 2);
    }

    #[test]
    fn test_draw_into_hand_with_short_deck() {
        let mut state = lobby(&["Ann"]);
        let card = state.mint_card(CardKind::Beer);
        state.deck.put_on_top(card);

        assert_eq!(state.draw_into_hand(0, 3), 1);
        assert_eq!(state.players[0].hand, vec![card]);
    }

    #[test]
    fn test_record_sequences() {
        let mut state = lobby(&["Ann"]);
        state.record(PlayerId(1), super::super::action::Action::Pass);
        state.record(PlayerId(1), super::super::action::Action::Pass);

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[1].sequence, 1);
    }
}
