//! Room storage.
//!
//! The rules engine never touches storage directly. Services go through
//! `RoomStore`, which hands out one exclusive, transactional update at a
//! time per room:
//!
//! - `MemoryStore`: live `GameState` values behind per-room mutexes
//! - `SnapshotStore`: each room kept as a bincode-encoded `RoomRecord`
//!
//! Both backends apply an update to a working copy and keep it only if the
//! closure returns `Ok`, so a rejected action leaves the room exactly as it
//! was.

mod memory;
pub mod record;
mod snapshot;

pub use memory::MemoryStore;
pub use record::RoomRecord;
pub use snapshot::SnapshotStore;

use crate::core::{GameResult, GameState, RoomId};

/// A keyed collection of rooms with serialised per-room access.
pub trait RoomStore: Send + Sync {
    /// Add a new room. Fails with `RoomAlreadyExists` if the id is taken.
    fn create(&self, state: GameState) -> GameResult<()>;

    fn contains(&self, id: RoomId) -> bool;

    /// A copy of the room's current state.
    fn load(&self, id: RoomId) -> GameResult<GameState>;

    /// Run `f` with exclusive access to the room. Changes are kept only if
    /// `f` returns `Ok`.
    fn update<T, F>(&self, id: RoomId, f: F) -> GameResult<T>
    where
        F: FnOnce(&mut GameState) -> GameResult<T>;

    /// Ids of every stored room, ascending.
    fn room_ids(&self) -> Vec<RoomId>;
}
