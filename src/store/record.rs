//! Row-shaped room records.
//!
//! A `RoomRecord` is a room flattened into tables the way a relational
//! backend would keep it:
//! - `cards`: one row per card id (the identity table)
//! - `players`: scalar player fields plus typed effect tags
//! - `hands`: hand membership with positions
//! - `deck`: draw pile with positions (0 = top)
//! - `discard`: discard pile, card ids only
//!
//! plus lifecycle flags, counters, history and the RNG position.
//! `into_state` checks every reference and fails with `Storage` on a
//! dangling one.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, Suit, Weapon};
use crate::core::{
    ActionRecord, CardId, GameError, GameResult, GameRng, GameRngState, GameState, Player,
    PlayerId, Role, RoomId,
};
use crate::effects::PermanentEffect;
use crate::zones::DeckManager;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRow {
    pub id: CardId,
    pub kind: CardKind,
    pub suit: Option<Suit>,
    pub value: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: PlayerId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub role: Option<Role>,
    pub alive: bool,
    pub ready: bool,
    pub seat: u32,
    pub weapon: Weapon,
    pub effects: Vec<PermanentEffect>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRow {
    pub player: PlayerId,
    pub card: CardId,
    pub position: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRow {
    pub card: CardId,
    pub position: u32,
}

/// One persisted room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: RoomId,
    pub started: bool,
    pub roles_assigned: bool,
    pub current_player: Option<PlayerId>,
    pub turn_number: u32,
    pub action_sequence: u32,
    pub next_card_id: u32,
    pub rng: GameRngState,
    pub cards: Vec<CardRow>,
    pub players: Vec<PlayerRow>,
    pub hands: Vec<HandRow>,
    pub deck: Vec<DeckRow>,
    pub discard: Vec<CardId>,
    pub history: Vec<ActionRecord>,
}

impl RoomRecord {
    /// Flatten a room into rows.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let mut cards: FxHashMap<CardId, CardRow> = FxHashMap::default();
        let mut note = |card: &Card| {
            cards.entry(card.id).or_insert_with(|| CardRow {
                id: card.id,
                kind: card.kind,
                suit: card.suit,
                value: card.value,
            });
        };

        let mut hands = Vec::new();
        for player in &state.players {
            for (position, card) in player.hand.iter().enumerate() {
                note(card);
                hands.push(HandRow {
                    player: player.id,
                    card: card.id,
                    position: position as u32,
                });
            }
        }
        let deck = state
            .deck
            .draw_pile()
            .enumerate()
            .map(|(position, card)| {
                note(card);
                DeckRow {
                    card: card.id,
                    position: position as u32,
                }
            })
            .collect();
        let discard = state
            .deck
            .discard_pile()
            .iter()
            .map(|card| {
                note(card);
                card.id
            })
            .collect();

        let mut cards: Vec<CardRow> = cards.into_values().collect();
        cards.sort_unstable_by_key(|row| row.id);

        let players = state
            .players
            .iter()
            .map(|p| PlayerRow {
                id: p.id,
                name: p.name.clone(),
                hp: p.hp,
                max_hp: p.max_hp,
                role: p.role,
                alive: p.alive,
                ready: p.ready,
                seat: p.seat,
                weapon: p.weapon,
                effects: p.effects.iter().collect(),
            })
            .collect();

        Self {
            id: state.id,
            started: state.started,
            roles_assigned: state.roles_assigned,
            current_player: state.current_player,
            turn_number: state.turn_number,
            action_sequence: state.action_sequence,
            next_card_id: state.next_card_id(),
            rng: state.rng.state(),
            cards,
            players,
            hands,
            deck,
            discard,
            history: state.history.iter().cloned().collect(),
        }
    }

    /// Rebuild the room.
    pub fn into_state(self) -> GameResult<GameState> {
        let cards: FxHashMap<CardId, Card> = self
            .cards
            .into_iter()
            .map(|row| {
                let card = Card {
                    id: row.id,
                    kind: row.kind,
                    suit: row.suit,
                    value: row.value,
                };
                (row.id, card)
            })
            .collect();
        let card = |id: CardId| {
            cards
                .get(&id)
                .copied()
                .ok_or_else(|| GameError::Storage(format!("unknown card {id} in room {}", self.id)))
        };

        let mut state = GameState::with_rng(self.id, GameRng::from_state(&self.rng));
        state.players = self
            .players
            .into_iter()
            .map(|row| {
                let mut player = Player::new(row.id, row.name, row.seat)
                    .with_hp(row.hp, row.max_hp)
                    .with_weapon(row.weapon);
                player.role = row.role;
                player.alive = row.alive;
                player.ready = row.ready;
                player.effects = row.effects.into_iter().collect();
                player
            })
            .collect();

        let mut hands = self.hands;
        hands.sort_unstable_by_key(|row| (row.player, row.position));
        for row in hands {
            let card = card(row.card)?;
            state
                .player_mut(row.player)
                .map_err(|_| {
                    GameError::Storage(format!("hand row for unknown player {}", row.player))
                })?
                .hand
                .push(card);
        }

        let mut deck = self.deck;
        deck.sort_unstable_by_key(|row| row.position);
        let draw_pile = deck
            .into_iter()
            .map(|row| card(row.card))
            .collect::<GameResult<Vec<_>>>()?;
        let discard_pile = self
            .discard
            .into_iter()
            .map(card)
            .collect::<GameResult<Vec<_>>>()?;
        state.deck = DeckManager::from_piles(draw_pile, discard_pile);

        state.started = self.started;
        state.roles_assigned = self.roles_assigned;
        state.current_player = self.current_player;
        state.turn_number = self.turn_number;
        state.action_sequence = self.action_sequence;
        state.history = self.history.into_iter().collect();
        state.set_next_card_id(self.next_card_id);
        Ok(state)
    }

    pub fn encode(&self) -> GameResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> GameResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, EngineConfig};
    use crate::rules::TurnController;

    fn started() -> GameState {
        let config = EngineConfig::default();
        let mut state = GameState::new(RoomId(4), 21);
        for name in ["Ann", "Bob", "Cid", "Dan"] {
            let id = state.add_player(name, &config);
            state.player_mut(id).unwrap().ready = true;
        }
        TurnController::start_game(&mut state, &config).unwrap();
        state.players[1].effects.insert(PermanentEffect::Mustang);
        state.players[2].effects.insert(PermanentEffect::Weapon(Weapon::Remington));
        let card = state.players[0].hand[0];
        state.deck.discard(card);
        state.record(PlayerId(1), Action::Pass);
        state
    }

    #[test]
    fn test_rows_rebuild_room() {
        let state = started();
        let record = RoomRecord::from_state(&state);

        assert_eq!(record.hands.len(), 16);
        assert_eq!(record.discard.len(), 1);
        // the discarded copy shares its id with the hand card
        assert_eq!(record.cards.len(), state.cards_in_play() - 1);

        let rebuilt = record.into_state().unwrap();
        assert_eq!(rebuilt.players, state.players);
        assert_eq!(rebuilt.deck, state.deck);
        assert_eq!(rebuilt.current_player, state.current_player);
        assert_eq!(rebuilt.history, state.history);
        assert_eq!(rebuilt.next_card_id(), state.next_card_id());
        assert_eq!(rebuilt.rng.state(), state.rng.state());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let record = RoomRecord::from_state(&started());
        let bytes = record.encode().unwrap();
        assert_eq!(RoomRecord::decode(&bytes).unwrap(), record);
        assert!(matches!(RoomRecord::decode(&bytes[..3]), Err(GameError::Storage(_))));
    }

    #[test]
    fn test_dangling_card_is_rejected() {
        let mut record = RoomRecord::from_state(&started());
        record.discard.push(CardId(99_999));
        assert!(matches!(record.into_state(), Err(GameError::Storage(_))));
    }
}
