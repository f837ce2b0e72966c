//! Engine configuration.
//!
//! `EngineConfig` holds the table rules a service applies to every room it
//! creates: starting hit points, hand size, player-count bounds, the deck
//! composition, and the base RNG seed.

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use crate::cards::{DeckComposition, Weapon};

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base seed. Every room derives its own stream from it.
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Hit points a player joins with.
    pub starting_hp: i32,

    /// Beer and equip heals stop here.
    pub max_hp: i32,

    /// Cards dealt to each player at game start.
    pub starting_hand_size: usize,

    /// Weapon every player joins with.
    pub default_weapon: Weapon,

    /// Fewest players `start_game` accepts.
    pub min_players: usize,

    /// Most players `start_game` accepts.
    pub max_players: usize,

    /// Cards in a fresh deck.
    pub deck: DeckComposition,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_hp: 4,
            max_hp: 5,
            starting_hand_size: 4,
            default_weapon: Weapon::Colt,
            min_players: 4,
            max_players: 7,
            deck: DeckComposition::classic(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> GameResult<Self> {
        serde_json::from_str(json).map_err(|e| GameError::Internal(format!("invalid config: {e}")))
    }

    /// Use a fixed base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set starting and maximum hit points.
    #[must_use]
    pub fn with_hp(mut self, starting_hp: i32, max_hp: i32) -> Self {
        self.starting_hp = starting_hp;
        self.max_hp = max_hp;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: DeckComposition) -> Self {
        self.deck = deck;
        self
    }
}
