//! Player actions.
//!
//! A turn is a sequence of `Action`s by the current player, ended by
//! `Action::Pass`. Cards are referenced either by id (exact) or by name,
//! in which case the first matching card in hand order is used.
//!
//! ```
//! use bang_engine::core::{Action, ActionKind, CardRef, PlayerId};
//!
//! let kind: ActionKind = "play_card".parse().unwrap();
//! assert_eq!(kind, ActionKind::PlayCard);
//!
//! let duel = Action::play_named("Duel", Some(PlayerId::new(3)));
//! assert_eq!(duel.kind(), ActionKind::PlayCard);
//! assert!(matches!(duel, Action::PlayCard { card: CardRef::Name(_), .. }));
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::entity::{CardId, PlayerId};
use super::error::GameError;

/// The action verbs a client may submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PlayCard,
    Pass,
    Shoot,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::PlayCard => "play_card",
            ActionKind::Pass => "pass",
            ActionKind::Shoot => "shoot",
        }
    }
}

impl FromStr for ActionKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play_card" => Ok(ActionKind::PlayCard),
            "pass" => Ok(ActionKind::Pass),
            "shoot" => Ok(ActionKind::Shoot),
            other => Err(GameError::UnknownAction(other.to_string())),
        }
    }
}

/// How an action names the card to play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardRef {
    Id(CardId),
    Name(String),
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardRef::Id(id) => write!(f, "{id}"),
            CardRef::Name(name) => f.write_str(name),
        }
    }
}

/// A complete player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    PlayCard {
        card: CardRef,
        target: Option<PlayerId>,
    },
    Pass,
    Shoot {
        target: Option<PlayerId>,
    },
}

impl Action {
    /// Play a card by name.
    #[must_use]
    pub fn play_named(name: impl Into<String>, target: Option<PlayerId>) -> Self {
        Action::PlayCard {
            card: CardRef::Name(name.into()),
            target,
        }
    }

    /// Play a specific card instance.
    #[must_use]
    pub fn play_id(id: CardId, target: Option<PlayerId>) -> Self {
        Action::PlayCard {
            card: CardRef::Id(id),
            target,
        }
    }

    #[must_use]
    pub fn shoot(target: PlayerId) -> Self {
        Action::Shoot {
            target: Some(target),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PlayCard { .. } => ActionKind::PlayCard,
            Action::Pass => ActionKind::Pass,
            Action::Shoot { .. } => ActionKind::Shoot,
        }
    }
}

/// A committed action, kept in the room's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}
