//! Room operations over both store backends.
//!
//! Every scenario runs against `MemoryStore` and `SnapshotStore`; the two
//! must be indistinguishable from the outside.

use std::sync::Arc;
use std::thread;

use bang_engine::cards::CardKind;
use bang_engine::core::{ActionKind, EngineConfig, GameError, PlayerId, Role, RoomId};
use bang_engine::rules::{ActionOutcome, RoleAssignment};
use bang_engine::service::{ErrorBody, GameService, PlayerActionRequest, RoomView};
use bang_engine::store::{MemoryStore, RoomStore, SnapshotStore};

const ROOM: RoomId = RoomId(10);

fn config() -> EngineConfig {
    EngineConfig::default().with_seed(2024)
}

fn seat<S: RoomStore>(service: &GameService<S>, count: usize) -> Vec<PlayerId> {
    service.create_room(ROOM).unwrap();
    (0..count)
        .map(|i| {
            let id = service.add_player(ROOM, &format!("p{i}")).unwrap();
            service.set_ready(ROOM, id).unwrap();
            id
        })
        .collect()
}

fn memory() -> Box<dyn Scenario> {
    Box::new(GameService::new(MemoryStore::new(), config()))
}

fn snapshot() -> Box<dyn Scenario> {
    Box::new(GameService::new(SnapshotStore::new(), config()))
}

fn for_each_store(check: impl Fn(fn() -> Box<dyn Scenario>)) {
    check(memory);
    check(snapshot);
}

/// Object-safe slice of `GameService` so scenarios can run on both stores.
trait Scenario {
    fn seat(&self, count: usize) -> Vec<PlayerId>;
    fn start(&self) -> Result<Vec<RoleAssignment>, GameError>;
    fn act(&self, request: PlayerActionRequest) -> Result<ActionOutcome, GameError>;
    fn view(&self) -> RoomView;
    fn join(&self, name: &str) -> Result<PlayerId, GameError>;
}

impl<S: RoomStore> Scenario for GameService<S> {
    fn seat(&self, count: usize) -> Vec<PlayerId> {
        seat(self, count)
    }

    fn start(&self) -> Result<Vec<RoleAssignment>, GameError> {
        self.start_game(ROOM)
    }

    fn act(&self, request: PlayerActionRequest) -> Result<ActionOutcome, GameError> {
        self.player_action(ROOM, &request).map(|r| r.outcome)
    }

    fn view(&self) -> RoomView {
        self.room_view(ROOM).unwrap()
    }

    fn join(&self, name: &str) -> Result<PlayerId, GameError> {
        self.add_player(ROOM, name)
    }
}

#[test]
fn test_four_player_start_view() {
    for_each_store(|make| {
        let service = make();
        service.seat(4);

        let roles = service.start().unwrap();
        let view = service.view();

        assert_eq!(roles.iter().filter(|a| a.role == Role::Sheriff).count(), 1);
        assert!(view.game_started);
        assert_eq!(view.current_player, Some(PlayerId(1)));
        assert!(view.players.iter().all(|p| p.hand.len() == 4));
        assert_eq!(view.deck_count, config().deck.total() - 16);

        let revealed: Vec<_> = view.players.iter().filter_map(|p| p.role).collect();
        assert_eq!(revealed, vec![Role::Sheriff]);
    });
}

#[test]
fn test_lobby_errors() {
    for_each_store(|make| {
        let service = make();
        service.seat(3);
        assert_eq!(
            service.start(),
            Err(GameError::InsufficientPlayers { found: 3, required: 4 })
        );

        service.join("late").unwrap();
        assert_eq!(service.start(), Err(GameError::NotAllReady));
        assert!(!service.view().game_started);
    });
}

#[test]
fn test_unknown_action_is_client_error() {
    for_each_store(|make| {
        let service = make();
        service.seat(4);
        service.start().unwrap();

        let mut request = PlayerActionRequest::new(PlayerId(1), ActionKind::Pass);
        request.action = "dance".into();
        let err = service.act(request).unwrap_err();

        assert_eq!(err, GameError::UnknownAction("dance".into()));
        assert_eq!(ErrorBody::from(&err).status, 400);
    });
}

/// Out of turn, a malformed request is still a turn error.
#[test]
fn test_turn_checked_before_request_is_parsed() {
    for_each_store(|make| {
        let service = make();
        service.seat(4);
        service.start().unwrap();

        let mut dance = PlayerActionRequest::new(PlayerId(3), ActionKind::Pass);
        dance.action = "dance".into();
        assert_eq!(service.act(dance), Err(GameError::NotYourTurn(PlayerId(3))));

        let no_card = PlayerActionRequest::new(PlayerId(3), ActionKind::PlayCard);
        assert_eq!(service.act(no_card), Err(GameError::NotYourTurn(PlayerId(3))));

        let own_turn = PlayerActionRequest::new(PlayerId(1), ActionKind::PlayCard);
        assert_eq!(service.act(own_turn), Err(GameError::MissingCard));
        assert_eq!(service.view().current_player, Some(PlayerId(1)));
    });
}

#[test]
fn test_rejected_action_leaves_room_unchanged() {
    for_each_store(|make| {
        let service = make();
        service.seat(4);
        service.start().unwrap();
        let before = service.view();

        let far = PlayerActionRequest::new(PlayerId(1), ActionKind::Shoot).with_target(PlayerId(3));
        assert!(service.act(far).is_err());
        let not_held = PlayerActionRequest::new(PlayerId(1), ActionKind::PlayCard)
            .with_card_name("No Such Card");
        assert!(matches!(service.act(not_held), Err(GameError::CardNotInHand(_))));
        let wrong_turn = PlayerActionRequest::new(PlayerId(2), ActionKind::Pass);
        assert_eq!(service.act(wrong_turn), Err(GameError::NotYourTurn(PlayerId(2))));

        assert_eq!(service.view(), before);
    });
}

#[test]
fn test_play_by_name_through_service() {
    for_each_store(|make| {
        let service = make();
        service.seat(4);
        service.start().unwrap();
        let hand = service.view().players[0].hand.clone();
        let name = hand[0].clone();

        let request = PlayerActionRequest::new(PlayerId(1), ActionKind::PlayCard)
            .with_card_name(name.clone())
            .with_target(PlayerId(2));
        let outcome = service.act(request).unwrap();

        let ActionOutcome::Played { card, .. } = outcome else {
            panic!("expected a card play");
        };
        assert_eq!(card.name(), name);
        assert!(service.view().discard_count >= 1);
    });
}

#[test]
fn test_missing_room() {
    let service = GameService::in_memory(config());
    let request = PlayerActionRequest::new(PlayerId(1), ActionKind::Pass);
    assert_eq!(
        service.player_action(RoomId(5), &request),
        Err(GameError::RoomNotFound(RoomId(5)))
    );
    assert_eq!(service.room_view(RoomId(5)), Err(GameError::RoomNotFound(RoomId(5))));
    assert_eq!(
        service.add_player(RoomId(5), "Ann"),
        Err(GameError::RoomNotFound(RoomId(5)))
    );
}

/// Both backends produce the same game from the same seed.
#[test]
fn test_backends_agree() {
    let memory = GameService::new(MemoryStore::new(), config());
    let snapshot = GameService::new(SnapshotStore::new(), config());
    seat(&memory, 5);
    seat(&snapshot, 5);
    assert_eq!(memory.start_game(ROOM), snapshot.start_game(ROOM));

    for _ in 0..10 {
        let current = memory.room_view(ROOM).unwrap().current_player.unwrap();
        let request = PlayerActionRequest::new(current, ActionKind::Pass);
        assert_eq!(
            memory.player_action(ROOM, &request),
            snapshot.player_action(ROOM, &request)
        );
    }
    assert_eq!(memory.room_view(ROOM), snapshot.room_view(ROOM));
}

/// Concurrent submissions to one room are serialised: exactly one pass
/// per turn is accepted.
#[test]
fn test_concurrent_passes_are_serialised() {
    let service = Arc::new(GameService::in_memory(config()));
    seat(service.as_ref(), 4);
    service.start_game(ROOM).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let request = PlayerActionRequest::new(PlayerId(1), ActionKind::Pass);
                service.player_action(ROOM, &request).is_ok()
            })
        })
        .collect();
    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 1);
    let view = service.room_view(ROOM).unwrap();
    assert_eq!(view.current_player, Some(PlayerId(2)));
    assert_eq!(view.turn_number, 2);
}

#[test]
fn test_rooms_are_independent() {
    let service = GameService::in_memory(config());
    seat(&service, 4);
    service.create_room(RoomId(11)).unwrap();
    for name in ["a", "b", "c", "d"] {
        let id = service.add_player(RoomId(11), name).unwrap();
        service.set_ready(RoomId(11), id).unwrap();
    }
    service.start_game(ROOM).unwrap();

    assert!(service.room_view(ROOM).unwrap().game_started);
    assert!(!service.room_view(RoomId(11)).unwrap().game_started);
    assert_eq!(service.store().room_ids(), vec![ROOM, RoomId(11)]);
}

#[test]
fn test_given_card_id_is_played() {
    let service = GameService::in_memory(config());
    seat(&service, 4);
    service.start_game(ROOM).unwrap();
    let beer = service
        .store()
        .update(ROOM, |state| state.give_card(PlayerId(1), CardKind::Beer))
        .unwrap();

    let request = PlayerActionRequest::new(PlayerId(1), ActionKind::PlayCard).with_card_id(beer);
    let response = service.player_action(ROOM, &request).unwrap();

    assert!(response.status.starts_with("Beer used"));
}
