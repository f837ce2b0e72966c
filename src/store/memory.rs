//! In-memory room store.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::RoomStore;
use crate::core::{GameError, GameResult, GameState, RoomId};

/// Rooms kept as live values.
///
/// The outer lock only guards the room table; each room has its own mutex,
/// so actions in different rooms never wait on each other.
#[derive(Default)]
pub struct MemoryStore {
    rooms: RwLock<FxHashMap<RoomId, Arc<Mutex<GameState>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn room(&self, id: RoomId) -> GameResult<Arc<Mutex<GameState>>> {
        self.rooms
            .read()
            .get(&id)
            .cloned()
            .ok_or(GameError::RoomNotFound(id))
    }
}

impl RoomStore for MemoryStore {
    fn create(&self, state: GameState) -> GameResult<()> {
        let mut rooms = self.rooms.write();
        if rooms.contains_key(&state.id) {
            return Err(GameError::RoomAlreadyExists(state.id));
        }
        debug!(room = %state.id, "room created");
        rooms.insert(state.id, Arc::new(Mutex::new(state)));
        Ok(())
    }

    fn contains(&self, id: RoomId) -> bool {
        self.rooms.read().contains_key(&id)
    }

    fn load(&self, id: RoomId) -> GameResult<GameState> {
        let room = self.room(id)?;
        let state = room.lock().clone();
        Ok(state)
    }

    fn update<T, F>(&self, id: RoomId, f: F) -> GameResult<T>
    where
        F: FnOnce(&mut GameState) -> GameResult<T>,
    {
        let room = self.room(id)?;
        let mut guard = room.lock();
        let mut working = guard.clone();
        let value = f(&mut working)?;
        *guard = working;
        Ok(value)
    }

    fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
