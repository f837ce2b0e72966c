//! Permanent effects attached to players.
//!
//! A player's effects form a small duplicate-free set of typed tags.
//! Mustang and Scope modify distance and range, Barrel is a one-time dodge,
//! Jail is an inert marker, Dynamite is checked by the dynamite pass, and
//! `Weapon(_)` records the equipped weapon card.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardKind, Weapon};

/// A modifier attached to a player until explicitly removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermanentEffect {
    Mustang,
    Scope,
    Barrel,
    Jail,
    Dynamite,
    Weapon(Weapon),
}

impl PermanentEffect {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PermanentEffect::Mustang => "Mustang",
            PermanentEffect::Scope => "Scope",
            PermanentEffect::Barrel => "Barrel",
            PermanentEffect::Jail => "Jail",
            PermanentEffect::Dynamite => "Dynamite",
            PermanentEffect::Weapon(w) => w.name(),
        }
    }

    /// The effect a card attaches when played, if any.
    #[must_use]
    pub const fn from_card(kind: CardKind) -> Option<Self> {
        match kind {
            CardKind::Mustang => Some(PermanentEffect::Mustang),
            CardKind::Scope => Some(PermanentEffect::Scope),
            CardKind::Barrel => Some(PermanentEffect::Barrel),
            CardKind::Jail => Some(PermanentEffect::Jail),
            CardKind::Dynamite => Some(PermanentEffect::Dynamite),
            CardKind::Weapon(w) => Some(PermanentEffect::Weapon(w)),
            _ => None,
        }
    }
}

impl std::fmt::Display for PermanentEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Duplicate-free set of effects, kept in attach order.
///
/// Serializes as a plain list of tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectSet {
    effects: SmallVec<[PermanentEffect; 4]>,
}

impl EffectSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, effect: PermanentEffect) -> bool {
        self.effects.contains(&effect)
    }

    /// Attach an effect. Returns false if it was already present.
    ///
    /// A weapon tag replaces any previously equipped weapon tag.
    pub fn insert(&mut self, effect: PermanentEffect) -> bool {
        if self.contains(effect) {
            return false;
        }
        if matches!(effect, PermanentEffect::Weapon(_)) {
            self.effects
                .retain(|e| !matches!(e, PermanentEffect::Weapon(_)));
        }
        self.effects.push(effect);
        true
    }

    /// Remove an effect. Returns true if it was present.
    pub fn remove(&mut self, effect: PermanentEffect) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| *e != effect);
        self.effects.len() != before
    }

    /// The equipped weapon tag, if any.
    #[must_use]
    pub fn weapon(&self) -> Option<Weapon> {
        self.effects.iter().find_map(|e| match e {
            PermanentEffect::Weapon(w) => Some(*w),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = PermanentEffect> + '_ {
        self.effects.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect names, for views.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|e| e.name().to_string()).collect()
    }
}

impl FromIterator<PermanentEffect> for EffectSet {
    fn from_iter<I: IntoIterator<Item = PermanentEffect>>(iter: I) -> Self {
        let mut set = EffectSet::new();
        for effect in iter {
            set.insert(effect);
        }
        set
    }
}
