//! Players and hidden roles.
//!
//! ## Player
//!
//! Per-player data: hit points, hand, role, seat, weapon, and permanent
//! effects. The seat is fixed at join time and defines both turn order and
//! distance around the table.
//!
//! ## Role
//!
//! Hidden roles are dealt from a fixed multiset per player count; see
//! `Role::lineup`.

use serde::{Deserialize, Serialize};

use super::entity::{CardId, PlayerId};
use crate::cards::{Card, CardKind, Weapon};
use crate::effects::{EffectSet, PermanentEffect};

/// Hidden role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Sheriff,
    Deputy,
    Outlaw,
    Renegade,
}

impl Role {
    /// The unshuffled role multiset for a player count.
    ///
    /// Returns `None` for unsupported counts.
    ///
    /// ```
    /// use bang_engine::core::Role;
    ///
    /// let roles = Role::lineup(4).unwrap();
    /// assert_eq!(roles, vec![Role::Sheriff, Role::Outlaw, Role::Outlaw, Role::Renegade]);
    /// assert!(Role::lineup(3).is_none());
    /// ```
    #[must_use]
    pub fn lineup(player_count: usize) -> Option<Vec<Role>> {
        use Role::*;

        let roles = match player_count {
            4 => vec![Sheriff, Outlaw, Outlaw, Renegade],
            5 => vec![Sheriff, Deputy, Outlaw, Outlaw, Renegade],
            6 => vec![Sheriff, Deputy, Deputy, Outlaw, Outlaw, Renegade],
            7 => vec![Sheriff, Deputy, Deputy, Outlaw, Outlaw, Renegade, Renegade],
            _ => return None,
        };
        Some(roles)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Sheriff => "Sheriff",
            Role::Deputy => "Deputy",
            Role::Outlaw => "Outlaw",
            Role::Renegade => "Renegade",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    /// Cards in insertion order.
    pub hand: Vec<Card>,
    pub role: Option<Role>,
    pub alive: bool,
    pub ready: bool,
    pub seat: u32,
    pub weapon: Weapon,
    pub effects: EffectSet,
}

impl Player {
    /// Create a player in the lobby.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, seat: u32) -> Self {
        Self {
            id,
            name: name.into(),
            hp: 4,
            max_hp: 5,
            hand: Vec::new(),
            role: None,
            alive: true,
            ready: false,
            seat,
            weapon: Weapon::Colt,
            effects: EffectSet::new(),
        }
    }

    /// Set starting hit points (builder pattern).
    #[must_use]
    pub fn with_hp(mut self, hp: i32, max_hp: i32) -> Self {
        self.hp = hp;
        self.max_hp = max_hp;
        self
    }

    /// Set the starting weapon (builder pattern).
    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = weapon;
        self
    }

    #[must_use]
    pub fn has_effect(&self, effect: PermanentEffect) -> bool {
        self.effects.contains(effect)
    }

    /// Index of the first card of `kind` in hand order.
    #[must_use]
    pub fn position_of_kind(&self, kind: CardKind) -> Option<usize> {
        self.hand.iter().position(|c| c.kind == kind)
    }

    /// Index of the card with this id.
    #[must_use]
    pub fn position_of_id(&self, id: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == id)
    }

    /// Index of the first card answering to `name` in hand order.
    #[must_use]
    pub fn position_of_name(&self, name: &str) -> Option<usize> {
        self.hand.iter().position(|c| c.matches_name(name))
    }

    #[must_use]
    pub fn holds(&self, kind: CardKind) -> bool {
        self.position_of_kind(kind).is_some()
    }

    /// Remove and return the first card of `kind`.
    pub fn take_kind(&mut self, kind: CardKind) -> Option<Card> {
        let index = self.position_of_kind(kind)?;
        Some(self.hand.remove(index))
    }

    /// Heal by one, capped at `max_hp`. Returns true if hp changed.
    pub fn heal(&mut self) -> bool {
        if self.hp < self.max_hp {
            self.hp += 1;
            true
        } else {
            false
        }
    }

    /// Lose `amount` hp; a player at 0 or below is dead.
    ///
    /// Returns true if this damage killed the player.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        if self.hp <= 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }

    /// Cut the hand down to `hp` cards, removing from the end.
    ///
    /// Returns the removed cards in hand order.
    pub fn truncate_hand(&mut self) -> Vec<Card> {
        let limit = usize::try_from(self.hp.max(0)).unwrap_or(0);
        if self.hand.len() <= limit {
            return Vec::new();
        }
        self.hand.split_off(limit)
    }
}
