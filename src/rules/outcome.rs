//! What an action did.
//!
//! Outcomes are returned to the caller and serialised into responses.
//! `ActionOutcome::status` renders the one-line message clients show.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;
use crate::effects::PermanentEffect;

/// Result of one defense against a Bang or Gatling shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DefenseOutcome {
    /// A Miss card was spent.
    Evaded,
    /// The Barrel check drew a heart.
    EvadedByBarrel,
    /// One hp lost, still standing.
    Hit { hp: i32 },
    /// One hp lost, now dead.
    Killed,
}

impl DefenseOutcome {
    #[must_use]
    pub fn took_damage(self) -> bool {
        matches!(self, DefenseOutcome::Hit { .. } | DefenseOutcome::Killed)
    }
}

/// Result of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOutcome {
    /// The side that could not answer with a Bang.
    pub loser: PlayerId,
    /// Bang cards discarded before someone ran out.
    pub rounds: u32,
    pub killed: bool,
}

/// One holder's dynamite check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamiteCheck {
    pub holder: PlayerId,
    /// The card drawn for the check; `None` if nothing was left to draw.
    pub drawn: Option<Card>,
    pub exploded: bool,
    pub killed: bool,
}

/// A card taken from another player's hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Steal {
    pub victim: PlayerId,
    pub card: Card,
    /// The stolen card was also put on the discard pile (Cat Balou).
    pub discarded: bool,
}

/// Effect of a played card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectOutcome {
    Healed { hp: i32, healed: bool },
    Drew { count: usize },
    Gatling { results: Vec<(PlayerId, DefenseOutcome)> },
    Duel(DuelOutcome),
    Jailed { target: PlayerId },
    Dynamite { checks: Vec<DynamiteCheck> },
    BarrelEquipped,
    Equipped { effect: PermanentEffect, hp: i32 },
    Stole { steal: Option<Steal> },
    NoEffect,
}

/// Result of a committed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionOutcome {
    Passed { next: PlayerId },
    Shot { target: PlayerId, defense: DefenseOutcome },
    Played { card: Card, effect: EffectOutcome },
}

impl ActionOutcome {
    /// One-line human readable status.
    #[must_use]
    pub fn status(&self) -> String {
        match self {
            ActionOutcome::Passed { next } => format!("turn passed to {next}"),
            ActionOutcome::Shot { target, defense } => defense_status(*target, *defense),
            ActionOutcome::Played { card, effect } => match effect {
                EffectOutcome::Healed { hp, .. } => format!("{} used, hp {hp}", card.name()),
                EffectOutcome::Jailed { target } => format!("{} applied to {target}", card.name()),
                EffectOutcome::Duel(duel) => {
                    format!("duel completed, {} lost after {} rounds", duel.loser, duel.rounds)
                }
                EffectOutcome::Equipped { .. } => format!("{} equipped", card.name()),
                EffectOutcome::NoEffect => format!("card '{}' played", card.name()),
                _ => format!("{} used", card.name()),
            },
        }
    }
}

fn defense_status(target: PlayerId, defense: DefenseOutcome) -> String {
    match defense {
        DefenseOutcome::Evaded => format!("{target} evaded"),
        DefenseOutcome::EvadedByBarrel => format!("{target} evaded with a barrel"),
        DefenseOutcome::Hit { .. } => format!("{target} was shot"),
        DefenseOutcome::Killed => format!("{target} was killed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::core::CardId;

    #[test]
    fn test_status_messages() {
        let shot = ActionOutcome::Shot {
            target: PlayerId(2),
            defense: DefenseOutcome::Killed,
        };
        assert_eq!(shot.status(), "Player 2 was killed");

        let beer = ActionOutcome::Played {
            card: Card::new(CardId(1), CardKind::Beer),
            effect: EffectOutcome::Healed { hp: 5, healed: true },
        };
        assert_eq!(beer.status(), "Beer used, hp 5");

        let plain = ActionOutcome::Played {
            card: Card::new(CardId(1), CardKind::Missed),
            effect: EffectOutcome::NoEffect,
        };
        assert_eq!(plain.status(), "card 'Miss' played");
    }

    #[test]
    fn test_took_damage() {
        assert!(DefenseOutcome::Hit { hp: 2 }.took_damage());
        assert!(DefenseOutcome::Killed.took_damage());
        assert!(!DefenseOutcome::EvadedByBarrel.took_damage());
    }

    #[test]
    fn test_serialization_is_tagged() {
        let outcome = ActionOutcome::Passed { next: PlayerId(3) };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["action"], "passed");
        assert_eq!(json["next"], 3);
    }

    #[test]
    fn test_equipped_json_roundtrip() {
        let outcome = ActionOutcome::Played {
            card: Card::new(CardId(9), CardKind::Scope),
            effect: EffectOutcome::Equipped {
                effect: PermanentEffect::Scope,
                hp: 4,
            },
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["action"], "played");
        assert_eq!(json["effect"]["kind"], "equipped");

        let back: ActionOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }
}
