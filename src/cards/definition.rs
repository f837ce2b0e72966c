//! Card kinds - the static part of a card.
//!
//! `CardKind` is a closed enum: every playable effect has its own variant
//! and the dispatcher matches on it exhaustively. Display names are the
//! keys clients use when they play a card by name.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in deck-building order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Weapons and their base reach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Colt,
    Schofield,
    Remington,
    Carbine,
    Winchester,
    Volcanic,
}

impl Weapon {
    pub const ALL: [Weapon; 6] = [
        Weapon::Colt,
        Weapon::Schofield,
        Weapon::Remington,
        Weapon::Carbine,
        Weapon::Winchester,
        Weapon::Volcanic,
    ];

    /// Base range before the Scope bonus.
    #[must_use]
    pub const fn base_range(self) -> u32 {
        match self {
            Weapon::Colt => 1,
            Weapon::Schofield => 2,
            Weapon::Remington => 3,
            Weapon::Carbine => 4,
            Weapon::Winchester => 5,
            Weapon::Volcanic => 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Weapon::Colt => "Colt",
            Weapon::Schofield => "Schofield",
            Weapon::Remington => "Remington",
            Weapon::Carbine => "Carbine",
            Weapon::Winchester => "Winchester",
            Weapon::Volcanic => "Volcanic",
        }
    }
}

impl std::fmt::Display for Weapon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weapon {
    type Err = UnknownCardName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weapon::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCardName(s.to_string()))
    }
}

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Bang,
    Missed,
    Beer,
    Stagecoach,
    WellsFargo,
    GeneralStore,
    Panic,
    CatBalou,
    Gatling,
    Duel,
    Weapon(Weapon),
    Barrel,
    Jail,
    Dynamite,
    Mustang,
    Scope,
    /// Plain suited card (2-10) with no effect of its own.
    Numbered,
}

impl CardKind {
    /// Every named kind, used for parsing. `Numbered` is excluded since its
    /// name depends on suit and value.
    pub const NAMED: [CardKind; 16] = [
        CardKind::Bang,
        CardKind::Missed,
        CardKind::Beer,
        CardKind::Stagecoach,
        CardKind::WellsFargo,
        CardKind::GeneralStore,
        CardKind::Panic,
        CardKind::CatBalou,
        CardKind::Gatling,
        CardKind::Duel,
        CardKind::Weapon(Weapon::Schofield),
        CardKind::Barrel,
        CardKind::Jail,
        CardKind::Dynamite,
        CardKind::Mustang,
        CardKind::Scope,
    ];

    /// Display name (the name clients send to play the card).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Bang => "Bang",
            CardKind::Missed => "Miss",
            CardKind::Beer => "Beer",
            CardKind::Stagecoach => "Stagecoach",
            CardKind::WellsFargo => "Wells Fargo",
            CardKind::GeneralStore => "General Store",
            CardKind::Panic => "Panic",
            CardKind::CatBalou => "Cat Balou",
            CardKind::Gatling => "Gatling",
            CardKind::Duel => "Duel",
            CardKind::Weapon(w) => w.name(),
            CardKind::Barrel => "Barrel",
            CardKind::Jail => "Jail",
            CardKind::Dynamite => "Dynamite",
            CardKind::Mustang => "Mustang",
            CardKind::Scope => "Scope",
            CardKind::Numbered => "Numbered",
        }
    }

    /// Does playing this card require a target player?
    #[must_use]
    pub const fn requires_target(self) -> bool {
        matches!(self, CardKind::Duel | CardKind::Jail)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name matches no card kind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown card name: {0}")]
pub struct UnknownCardName(pub String);

impl FromStr for CardKind {
    type Err = UnknownCardName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("Missed") {
            return Ok(CardKind::Missed);
        }
        if let Ok(weapon) = name.parse::<Weapon>() {
            return Ok(CardKind::Weapon(weapon));
        }
        CardKind::NAMED
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCardName(s.to_string()))
    }
}
