//! Encoded room store.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::record::RoomRecord;
use super::RoomStore;
use crate::core::{GameError, GameResult, GameState, RoomId};

/// Rooms kept as bincode-encoded `RoomRecord`s.
///
/// Every update decodes the room, runs the closure and re-encodes it. State
/// never lives outside an update, so a room always round-trips through its
/// row form.
#[derive(Default)]
pub struct SnapshotStore {
    rooms: RwLock<FxHashMap<RoomId, Arc<Mutex<Vec<u8>>>>>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn room(&self, id: RoomId) -> GameResult<Arc<Mutex<Vec<u8>>>> {
        self.rooms
            .read()
            .get(&id)
            .cloned()
            .ok_or(GameError::RoomNotFound(id))
    }

    fn decode(bytes: &[u8]) -> GameResult<GameState> {
        RoomRecord::decode(bytes)?.into_state()
    }

    /// Encoded size of a room in bytes.
    pub fn stored_len(&self, id: RoomId) -> GameResult<usize> {
        Ok(self.room(id)?.lock().len())
    }
}

impl RoomStore for SnapshotStore {
    fn create(&self, state: GameState) -> GameResult<()> {
        let bytes = RoomRecord::from_state(&state).encode()?;
        let mut rooms = self.rooms.write();
        if rooms.contains_key(&state.id) {
            return Err(GameError::RoomAlreadyExists(state.id));
        }
        debug!(room = %state.id, bytes = bytes.len(), "room created");
        rooms.insert(state.id, Arc::new(Mutex::new(bytes)));
        Ok(())
    }

    fn contains(&self, id: RoomId) -> bool {
        self.rooms.read().contains_key(&id)
    }

    fn load(&self, id: RoomId) -> GameResult<GameState> {
        let room = self.room(id)?;
        let bytes = room.lock();
        Self::decode(&bytes)
    }

    fn update<T, F>(&self, id: RoomId, f: F) -> GameResult<T>
    where
        F: FnOnce(&mut GameState) -> GameResult<T>,
    {
        let room = self.room(id)?;
        let mut bytes = room.lock();
        let mut state = Self::decode(&bytes).map_err(|err| {
            warn!(room = %id, %err, "stored room failed to decode");
            err
        })?;
        let value = f(&mut state)?;
        *bytes = RoomRecord::from_state(&state).encode()?;
        Ok(value)
    }

    fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
