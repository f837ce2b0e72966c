//! Engine error taxonomy.
//!
//! Every rule violation is a local, synchronous, non-retryable failure. A
//! failed action leaves the room unchanged. `status_code` gives the
//! HTTP-style category a transport layer should report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{PlayerId, RoomId};

/// Result alias used throughout the engine.
pub type GameResult<T> = Result<T, GameError>;

/// Errors raised by the rules engine, stores, and service.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("room {0} already exists")]
    RoomAlreadyExists(RoomId),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("player {0} is dead or missing")]
    PlayerDeadOrMissing(PlayerId),

    #[error("game has not started")]
    GameNotStarted,

    #[error("game has already started")]
    GameAlreadyStarted,

    #[error("not enough players: {found}, need at least {required}")]
    InsufficientPlayers { found: usize, required: usize },

    #[error("not every player is ready")]
    NotAllReady,

    #[error("unsupported player count: {0}")]
    UnsupportedPlayerCount(usize),

    #[error("card '{0}' is not in hand")]
    CardNotInHand(String),

    #[error("target at distance {distance} is out of range {range}")]
    OutOfRange { distance: u32, range: u32 },

    #[error("this action needs a target player")]
    MissingTarget,

    #[error("play_card needs a card name or card id")]
    MissingCard,

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("current player is undetermined")]
    CurrentPlayerUndetermined,

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// HTTP-style status category for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            GameError::RoomNotFound(_)
            | GameError::PlayerNotFound(_)
            | GameError::PlayerDeadOrMissing(_) => 404,
            GameError::NotYourTurn(_) => 403,
            GameError::CurrentPlayerUndetermined
            | GameError::Storage(_)
            | GameError::Internal(_) => 500,
            _ => 400,
        }
    }

    /// Is this a caller mistake (4xx) rather than an engine fault?
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Storage(err.to_string())
    }
}
