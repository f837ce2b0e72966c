//! Card play resolution.
//!
//! The `CardEffectDispatcher` takes a card out of the acting player's hand,
//! discards it, applies the card's effect and finally cuts the hand down to
//! the player's hit points. All validation happens before the card leaves
//! the hand, so a rejected play changes nothing.

use tracing::{debug, info};

use super::PermanentEffect;
use crate::cards::{Card, CardKind, Suit};
use crate::core::{CardRef, GameError, GameResult, GameState, PlayerId};
use crate::rules::outcome::{DynamiteCheck, EffectOutcome, Steal};
use crate::rules::{CombatResolver, DuelResolver, TurnController};

/// Values of a spade that set off dynamite.
const DYNAMITE_VALUES: std::ops::RangeInclusive<u8> = 2..=9;

/// Dynamite damage.
const DYNAMITE_DAMAGE: i32 = 3;

/// Dispatches played cards to their effects.
pub struct CardEffectDispatcher;

impl CardEffectDispatcher {
    /// The player at `actor` plays `card`, optionally at `target`.
    ///
    /// Returns the played card and what it did.
    pub fn play(
        state: &mut GameState,
        actor: usize,
        card: &CardRef,
        target: Option<PlayerId>,
    ) -> GameResult<(Card, EffectOutcome)> {
        let player = &state.players[actor];
        let position = match card {
            CardRef::Id(id) => player.position_of_id(*id),
            CardRef::Name(name) => player.position_of_name(name),
        }
        .ok_or_else(|| GameError::CardNotInHand(card.to_string()))?;
        let kind = player.hand[position].kind;

        let target_index = if kind.requires_target() {
            let target = target.ok_or(GameError::MissingTarget)?;
            state.living_player(target)?;
            Some(state.index_of(target)?)
        } else {
            None
        };

        let played = state.players[actor].hand.remove(position);
        state.deck.discard(played);

        let effect = match (kind, target_index) {
            (CardKind::Beer, _) => {
                let player = &mut state.players[actor];
                let healed = player.heal();
                EffectOutcome::Healed {
                    hp: player.hp,
                    healed,
                }
            }
            (CardKind::Stagecoach, _) => Self::draw(state, actor, 2),
            (CardKind::WellsFargo, _) => Self::draw(state, actor, 3),
            (CardKind::GeneralStore, _) => {
                let count = state.player_count();
                Self::draw(state, actor, count)
            }
            (CardKind::Gatling, _) => Self::gatling(state, actor),
            (CardKind::Duel, Some(target)) => {
                EffectOutcome::Duel(DuelResolver::duel(state, actor, target))
            }
            (CardKind::Jail, Some(target)) => {
                let jailed = &mut state.players[target];
                jailed.effects.insert(PermanentEffect::Jail);
                EffectOutcome::Jailed { target: jailed.id }
            }
            (CardKind::Dynamite, _) => {
                state.players[actor].effects.insert(PermanentEffect::Dynamite);
                EffectOutcome::Dynamite {
                    checks: Self::resolve_dynamite(state),
                }
            }
            (CardKind::Barrel, _) => {
                state.players[actor].effects.insert(PermanentEffect::Barrel);
                EffectOutcome::BarrelEquipped
            }
            (CardKind::Mustang, _) => Self::equip(state, actor, PermanentEffect::Mustang),
            (CardKind::Scope, _) => Self::equip(state, actor, PermanentEffect::Scope),
            (CardKind::Weapon(weapon), _) => {
                Self::equip(state, actor, PermanentEffect::Weapon(weapon))
            }
            (CardKind::Panic, _) => EffectOutcome::Stole {
                steal: Self::steal(state, actor, false),
            },
            (CardKind::CatBalou, _) => EffectOutcome::Stole {
                steal: Self::steal(state, actor, true),
            },
            _ => EffectOutcome::NoEffect,
        };

        TurnController::enforce_hand_limit(state, actor);

        info!(
            room = %state.id,
            player = %state.players[actor].id,
            card = %played,
            ?effect,
            "card played"
        );
        Ok((played, effect))
    }

    fn draw(state: &mut GameState, actor: usize, count: usize) -> EffectOutcome {
        EffectOutcome::Drew {
            count: state.draw_into_hand(actor, count),
        }
    }

    /// Every other living player defends once, in seat order.
    fn gatling(state: &mut GameState, actor: usize) -> EffectOutcome {
        let defenders: Vec<usize> = (0..state.player_count())
            .filter(|&i| i != actor && state.players[i].alive)
            .collect();
        let results = defenders
            .into_iter()
            .map(|i| (state.players[i].id, CombatResolver::defend(state, i)))
            .collect();
        EffectOutcome::Gatling { results }
    }

    /// Equip Mustang, Scope or a weapon. The equip also heals one hit point.
    fn equip(state: &mut GameState, actor: usize, effect: PermanentEffect) -> EffectOutcome {
        let player = &mut state.players[actor];
        player.heal();
        player.effects.insert(effect);
        EffectOutcome::Equipped {
            effect,
            hp: player.hp,
        }
    }

    /// Check every living dynamite holder in seat order.
    ///
    /// A spade from 2 to 9 explodes: three damage and the dynamite is gone.
    /// Anything else leaves it where it is. With nothing left to draw the
    /// holder is skipped.
    pub fn resolve_dynamite(state: &mut GameState) -> Vec<DynamiteCheck> {
        let holders: Vec<usize> = (0..state.player_count())
            .filter(|&i| {
                let p = &state.players[i];
                p.alive && p.has_effect(PermanentEffect::Dynamite)
            })
            .collect();

        let mut checks = Vec::with_capacity(holders.len());
        for index in holders {
            let holder = state.players[index].id;
            let Some(drawn) = state.draw_for_check() else {
                debug!(room = %state.id, %holder, "no card left for dynamite check");
                checks.push(DynamiteCheck {
                    holder,
                    drawn: None,
                    exploded: false,
                    killed: false,
                });
                continue;
            };
            state.deck.discard(drawn);

            let exploded = drawn.suit == Some(Suit::Spades)
                && drawn.value.is_some_and(|v| DYNAMITE_VALUES.contains(&v));
            let player = &mut state.players[index];
            let killed = if exploded {
                player.effects.remove(PermanentEffect::Dynamite);
                player.take_damage(DYNAMITE_DAMAGE)
            } else {
                player.effects.insert(PermanentEffect::Dynamite);
                false
            };
            info!(room = %state.id, %holder, card = %drawn, exploded, killed, "dynamite check");
            checks.push(DynamiteCheck {
                holder,
                drawn: Some(drawn),
                exploded,
                killed,
            });
        }
        checks
    }

    /// Take one random card from one random other living player who holds
    /// any. With `discard` the card is also put on the discard pile after it
    /// reaches the actor's hand.
    fn steal(state: &mut GameState, actor: usize, discard: bool) -> Option<Steal> {
        let victims: Vec<usize> = (0..state.player_count())
            .filter(|&i| {
                let p = &state.players[i];
                i != actor && p.alive && !p.hand.is_empty()
            })
            .collect();
        if victims.is_empty() {
            debug!(room = %state.id, "no one to steal from");
            return None;
        }

        let victim = victims[state.rng.gen_range_usize(0..victims.len())];
        let hand_len = state.players[victim].hand.len();
        let pick = state.rng.gen_range_usize(0..hand_len);
        let card = state.players[victim].hand.remove(pick);
        state.players[actor].hand.push(card);
        if discard {
            state.deck.discard(card);
        }

        let victim = state.players[victim].id;
        debug!(room = %state.id, %victim, %card, discard, "card stolen");
        Some(Steal {
            victim,
            card,
            discarded: discard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Weapon;
    use crate::core::{EngineConfig, RoomId};
    use crate::rules::outcome::DefenseOutcome;

    fn table(n: usize) -> GameState {
        let config = EngineConfig::default();
        let mut state = GameState::new(RoomId(1), 17);
        for i in 0..n {
            state.add_player(format!("p{i}"), &config);
        }
        state
    }

    fn play(state: &mut GameState, name: &str, target: Option<PlayerId>) -> GameResult<EffectOutcome> {
        CardEffectDispatcher::play(state, 0, &CardRef::Name(name.into()), target).map(|(_, e)| e)
    }

    fn stock(state: &mut GameState, count: usize) {
        for _ in 0..count {
            let card = state.mint_card(CardKind::Missed);
            state.deck.put_on_bottom(card);
        }
    }

    #[test]
    fn test_missing_card() {
        let mut state = table(4);
        assert_eq!(
            play(&mut state, "Beer", None),
            Err(GameError::CardNotInHand("Beer".into()))
        );
    }

    #[test]
    fn test_beer_heals_and_caps() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Beer).unwrap();
        state.give_card(PlayerId(1), CardKind::Beer).unwrap();

        assert_eq!(
            play(&mut state, "Beer", None),
            Ok(EffectOutcome::Healed { hp: 5, healed: true })
        );
        assert_eq!(
            play(&mut state, "beer", None),
            Ok(EffectOutcome::Healed { hp: 5, healed: false })
        );
        assert_eq!(state.deck.discard_len(), 2);
    }

    #[test]
    fn test_stagecoach_draws_two() {
        let mut state = table(4);
        stock(&mut state, 5);
        state.give_card(PlayerId(1), CardKind::Stagecoach).unwrap();

        assert_eq!(play(&mut state, "Stagecoach", None), Ok(EffectOutcome::Drew { count: 2 }));
        assert_eq!(state.players[0].hand.len(), 2);
        assert_eq!(state.deck.draw_pile_len(), 3);
    }

    #[test]
    fn test_general_store_goes_to_actor_and_truncates() {
        let mut state = table(5);
        stock(&mut state, 10);
        state.give_card(PlayerId(1), CardKind::GeneralStore).unwrap();

        assert_eq!(play(&mut state, "General Store", None), Ok(EffectOutcome::Drew { count: 5 }));
        // five drawn, hp 4: one goes straight to the discard pile
        assert_eq!(state.players[0].hand.len(), 4);
        assert!(state.players[1..].iter().all(|p| p.hand.is_empty()));
        assert_eq!(state.deck.discard_len(), 2);
    }

    #[test]
    fn test_duel_requires_living_target() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Duel).unwrap();

        assert_eq!(play(&mut state, "Duel", None), Err(GameError::MissingTarget));
        assert_eq!(
            play(&mut state, "Duel", Some(PlayerId(9))),
            Err(GameError::PlayerNotFound(PlayerId(9)))
        );
        state.players[2].alive = false;
        assert_eq!(
            play(&mut state, "Duel", Some(PlayerId(3))),
            Err(GameError::PlayerDeadOrMissing(PlayerId(3)))
        );
        assert_eq!(state.players[0].hand.len(), 1);
        assert_eq!(state.deck.discard_len(), 0);
    }

    #[test]
    fn test_jail_is_a_marker() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Jail).unwrap();

        assert_eq!(
            play(&mut state, "Jail", Some(PlayerId(3))),
            Ok(EffectOutcome::Jailed { target: PlayerId(3) })
        );
        assert!(state.players[2].has_effect(PermanentEffect::Jail));
    }

    #[test]
    fn test_gatling_hits_every_other_living_player() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Gatling).unwrap();
        state.give_card(PlayerId(2), CardKind::Missed).unwrap();
        state.players[3].alive = false;

        let effect = play(&mut state, "Gatling", None).unwrap();

        assert_eq!(
            effect,
            EffectOutcome::Gatling {
                results: vec![
                    (PlayerId(2), DefenseOutcome::Evaded),
                    (PlayerId(3), DefenseOutcome::Hit { hp: 3 }),
                ]
            }
        );
        assert_eq!(state.players[0].hp, 4);
    }

    #[test]
    fn test_equip_weapon_heals_and_attaches_tag_only() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Weapon(Weapon::Schofield)).unwrap();
        state.give_card(PlayerId(1), CardKind::Mustang).unwrap();

        let effect = play(&mut state, "Schofield", None).unwrap();
        assert_eq!(
            effect,
            EffectOutcome::Equipped {
                effect: PermanentEffect::Weapon(Weapon::Schofield),
                hp: 5
            }
        );
        // the tag is recorded but the gun in hand is still the Colt
        assert_eq!(state.players[0].weapon, Weapon::Colt);
        assert_eq!(crate::rules::RangeCalculator::weapon_range(&state.players[0]), 1);

        play(&mut state, "Mustang", None).unwrap();
        assert!(state.players[0].has_effect(PermanentEffect::Mustang));
        assert_eq!(state.players[0].hp, 5);
    }

    #[test]
    fn test_barrel_attaches() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Barrel).unwrap();

        assert_eq!(play(&mut state, "Barrel", None), Ok(EffectOutcome::BarrelEquipped));
        assert!(state.players[0].has_effect(PermanentEffect::Barrel));
    }

    #[test]
    fn test_dynamite_explodes_on_low_spade() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Dynamite).unwrap();
        let spade = Card::numbered(state.alloc_card_id(), 4, Suit::Spades);
        state.deck.put_on_top(spade);

        let effect = play(&mut state, "Dynamite", None).unwrap();

        let EffectOutcome::Dynamite { checks } = effect else {
            panic!("expected dynamite outcome");
        };
        assert_eq!(checks.len(), 1);
        assert!(checks[0].exploded);
        assert_eq!(state.players[0].hp, 1);
        assert!(!state.players[0].has_effect(PermanentEffect::Dynamite));
        assert!(state.deck.is_discarded(spade.id));
    }

    #[test]
    fn test_dynamite_checks_every_holder() {
        let mut state = table(4);
        state.players[2].effects.insert(PermanentEffect::Dynamite);
        state.give_card(PlayerId(1), CardKind::Dynamite).unwrap();
        let heart = Card::numbered(state.alloc_card_id(), 4, Suit::Hearts);
        let ten = Card::numbered(state.alloc_card_id(), 10, Suit::Spades);
        state.deck.put_on_top(ten);
        state.deck.put_on_top(heart);

        let EffectOutcome::Dynamite { checks } = play(&mut state, "Dynamite", None).unwrap() else {
            panic!("expected dynamite outcome");
        };

        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].holder, PlayerId(1));
        assert_eq!(checks[1].holder, PlayerId(3));
        assert!(checks.iter().all(|c| !c.exploded));
        assert!(state.players[0].has_effect(PermanentEffect::Dynamite));
        assert!(state.players[2].has_effect(PermanentEffect::Dynamite));
    }

    #[test]
    fn test_panic_moves_card() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Panic).unwrap();
        let loot = state.give_card(PlayerId(3), CardKind::Beer).unwrap();

        let EffectOutcome::Stole { steal: Some(steal) } = play(&mut state, "Panic", None).unwrap()
        else {
            panic!("expected a steal");
        };

        assert_eq!(steal.victim, PlayerId(3));
        assert_eq!(steal.card.id, loot);
        assert!(!steal.discarded);
        assert_eq!(state.players[0].hand[0].id, loot);
        assert!(state.players[2].hand.is_empty());
        assert!(!state.deck.is_discarded(loot));
    }

    #[test]
    fn test_cat_balou_duplicates_into_discard() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::CatBalou).unwrap();
        for _ in 0..3 {
            state.give_card(PlayerId(2), CardKind::Bang).unwrap();
        }

        let EffectOutcome::Stole { steal: Some(steal) } =
            play(&mut state, "Cat Balou", None).unwrap()
        else {
            panic!("expected a steal");
        };

        assert_eq!(state.players[0].hand, vec![steal.card]);
        assert!(state.deck.is_discarded(steal.card.id));
        assert_eq!(state.players[1].hand.len(), 2);
    }

    #[test]
    fn test_steal_with_no_victims() {
        let mut state = table(4);
        state.give_card(PlayerId(1), CardKind::Panic).unwrap();

        assert_eq!(play(&mut state, "Panic", None), Ok(EffectOutcome::Stole { steal: None }));
    }

    #[test]
    fn test_plain_card_has_no_effect() {
        let mut state = table(4);
        let id = state.give_card(PlayerId(1), CardKind::Bang).unwrap();

        let (card, effect) =
            CardEffectDispatcher::play(&mut state, 0, &CardRef::Id(id), None).unwrap();

        assert_eq!(card.id, id);
        assert_eq!(effect, EffectOutcome::NoEffect);
        assert!(state.deck.is_discarded(id));
    }
}
