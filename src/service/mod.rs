//! Room operations.
//!
//! `GameService` is what a transport layer talks to: create a room, seat
//! players, mark them ready, start the game, read the table and submit
//! actions. Every call goes through the store, one room at a time.
//!
//! ```
//! use bang_engine::core::{EngineConfig, RoomId};
//! use bang_engine::service::GameService;
//!
//! let service = GameService::in_memory(EngineConfig::default().with_seed(1));
//! service.create_room(RoomId::new(1)).unwrap();
//! for name in ["Ann", "Bob", "Cid", "Dan"] {
//!     let id = service.add_player(RoomId::new(1), name).unwrap();
//!     service.set_ready(RoomId::new(1), id).unwrap();
//! }
//! let roles = service.start_game(RoomId::new(1)).unwrap();
//! assert_eq!(roles.len(), 4);
//! ```

pub mod views;

pub use views::{ActionResponse, ErrorBody, PlayerActionRequest, PlayerView, RoomView};

use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info};

use crate::core::{Action, EngineConfig, GameError, GameResult, GameRng, GameState, PlayerId, RoomId};
use crate::rules::{ActionOutcome, RoleAssignment, RulesEngine, TurnController};
use crate::store::{MemoryStore, RoomStore};

/// Room operations over a `RoomStore`.
pub struct GameService<S> {
    store: S,
    config: EngineConfig,
    rng: GameRng,
}

impl GameService<MemoryStore> {
    /// Service backed by a `MemoryStore`.
    #[must_use]
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(MemoryStore::new(), config)
    }
}

impl<S: RoomStore> GameService<S> {
    #[must_use]
    pub fn new(store: S, config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self { store, config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open an empty room. Each room gets its own RNG stream derived from
    /// the service seed and the room id.
    pub fn create_room(&self, id: RoomId) -> GameResult<()> {
        let rng = self.rng.for_context(&format!("room:{}", id.raw()));
        self.store.create(GameState::with_rng(id, rng))?;
        info!(room = %id, "room opened");
        Ok(())
    }

    /// Seat a player. Only possible before the game starts.
    pub fn add_player(&self, room: RoomId, name: &str) -> GameResult<PlayerId> {
        self.store.update(room, |state| {
            if state.started {
                return Err(GameError::GameAlreadyStarted);
            }
            let id = state.add_player(name, &self.config);
            info!(%room, player = %id, name, "player joined");
            Ok(id)
        })
    }

    pub fn set_ready(&self, room: RoomId, player: PlayerId) -> GameResult<()> {
        self.store.update(room, |state| {
            state.player_mut(player)?.ready = true;
            Ok(())
        })
    }

    pub fn start_game(&self, room: RoomId) -> GameResult<Vec<RoleAssignment>> {
        self.store
            .update(room, |state| TurnController::start_game(state, &self.config))
    }

    pub fn room_view(&self, room: RoomId) -> GameResult<RoomView> {
        Ok(RoomView::from(&self.store.load(room)?))
    }

    /// Apply a typed action.
    ///
    /// A panic inside the rules is reported as `Internal` and the room is
    /// left as it was.
    pub fn apply(&self, room: RoomId, player: PlayerId, action: &Action) -> GameResult<ActionOutcome> {
        self.store
            .update(room, |state| Self::guarded(state, room, player, action))
    }

    /// Apply a raw request, as a transport would.
    ///
    /// Turn gating runs before the request is parsed, so a player out of
    /// turn always gets `NotYourTurn`.
    pub fn player_action(
        &self,
        room: RoomId,
        request: &PlayerActionRequest,
    ) -> GameResult<ActionResponse> {
        if !self.store.contains(room) {
            return Err(GameError::RoomNotFound(room));
        }
        let player = request.player_id;
        let outcome = self.store.update(room, |state| {
            TurnController::ensure_turn(state, player)?;
            let action = request.to_action()?;
            Self::guarded(state, room, player, &action)
        })?;
        Ok(ActionResponse::from(outcome))
    }

    fn guarded(
        state: &mut GameState,
        room: RoomId,
        player: PlayerId,
        action: &Action,
    ) -> GameResult<ActionOutcome> {
        panic::catch_unwind(AssertUnwindSafe(|| RulesEngine::apply(state, player, action)))
            .unwrap_or_else(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(%room, %player, ?action, %message, "rules panicked");
                Err(GameError::Internal(message))
            })
    }
}
