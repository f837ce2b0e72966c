//! Request and response bodies.
//!
//! Transport-neutral serde types for the room operations. Field names match
//! the JSON clients already send and read.

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, ActionKind, CardId, CardRef, GameError, GameResult, GameState, Player, PlayerId, Role,
};
use crate::rules::ActionOutcome;

/// Body of a player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerActionRequest {
    pub player_id: PlayerId,
    /// `play_card`, `pass` or `shoot`.
    pub action: String,
    #[serde(default)]
    pub card_name: Option<String>,
    /// Exact card instance; wins over `card_name` when both are given.
    #[serde(default)]
    pub card_id: Option<CardId>,
    #[serde(default)]
    pub target_player_id: Option<PlayerId>,
}

impl PlayerActionRequest {
    #[must_use]
    pub fn new(player_id: PlayerId, action: ActionKind) -> Self {
        Self {
            player_id,
            action: action.as_str().to_string(),
            card_name: None,
            card_id: None,
            target_player_id: None,
        }
    }

    #[must_use]
    pub fn with_card_name(mut self, name: impl Into<String>) -> Self {
        self.card_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_card_id(mut self, id: CardId) -> Self {
        self.card_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.target_player_id = Some(target);
        self
    }

    /// Parse into a typed action.
    pub fn to_action(&self) -> GameResult<Action> {
        let kind: ActionKind = self.action.parse()?;
        let action = match kind {
            ActionKind::Pass => Action::Pass,
            ActionKind::Shoot => Action::Shoot {
                target: self.target_player_id,
            },
            ActionKind::PlayCard => {
                let card = match (self.card_id, &self.card_name) {
                    (Some(id), _) => CardRef::Id(id),
                    (None, Some(name)) => CardRef::Name(name.clone()),
                    (None, None) => return Err(GameError::MissingCard),
                };
                Action::PlayCard {
                    card,
                    target: self.target_player_id,
                }
            }
        };
        Ok(action)
    }
}

/// Result of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    pub outcome: ActionOutcome,
}

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        Self {
            status: outcome.status(),
            outcome,
        }
    }
}

/// One player as seen by everyone at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub hand: Vec<String>,
    /// Only the Sheriff is revealed.
    pub role: Option<Role>,
    pub alive: bool,
    pub ready: bool,
    pub weapon: String,
    pub permanent_effects: Vec<String>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            hp: player.hp,
            max_hp: player.max_hp,
            hand: player.hand.iter().map(|c| c.name()).collect(),
            role: player.role.filter(|r| *r == Role::Sheriff),
            alive: player.alive,
            ready: player.ready,
            weapon: player.weapon.name().to_string(),
            permanent_effects: player.effects.names(),
        }
    }
}

/// Public view of a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub players: Vec<PlayerView>,
    pub game_started: bool,
    pub current_player: Option<PlayerId>,
    pub deck_count: usize,
    pub discard_count: usize,
    pub turn_number: u32,
}

impl From<&GameState> for RoomView {
    fn from(state: &GameState) -> Self {
        Self {
            players: state.players.iter().map(PlayerView::from).collect(),
            game_started: state.started,
            current_player: state.current_player,
            deck_count: state.deck.draw_pile_len(),
            discard_count: state.deck.discard_len(),
            turn_number: state.turn_number,
        }
    }
}

/// Error rendering for a transport layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub detail: String,
}

impl From<&GameError> for ErrorBody {
    fn from(err: &GameError) -> Self {
        Self {
            status: err.status_code(),
            detail: err.to_string(),
        }
    }
}
