mod common;

use common::seated_room;
use holdem_engine::deck::Deck;
use holdem_engine::engine::start_hand_with_deck;
use holdem_engine::errors::GameError;
use holdem_engine::player::User;
use holdem_engine::room::{create_room, create_room_with, join_room, RoomStatus, TableConfig};

#[test]
fn create_room_seats_the_host() {
    let host = User::new("h", "Host");
    let room = create_room(&host);
    assert_eq!(room.host_id, "h");
    assert_eq!(room.status, RoomStatus::Waiting);
    assert_eq!(room.max_players, 10);
    assert_eq!(room.min_players, 2);
    assert_eq!(room.players.len(), 1);
    assert_eq!(room.players[0].chips, 200);
    assert_eq!(room.players[0].seat, 0);
    assert!(room.game.is_none());
    assert!(!room.room_id.is_empty());
    assert!(room.room_id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(room.host().map(|p| p.name.as_str()), Some("Host"));
}

#[test]
fn custom_stakes_are_kept_on_the_room() {
    let config = TableConfig {
        starting_stack: 500,
        small_blind: 5,
        big_blind: 10,
        min_players: 3,
        max_players: 6,
    };
    let room = create_room_with(&User::new("h", "Host"), config);
    assert_eq!(room.players[0].chips, 500);
    assert_eq!((room.small_blind, room.big_blind), (5, 10));
    assert_eq!(room.max_players, 6);
}

#[test]
fn join_appends_in_seat_order() {
    let room = seated_room(3);
    let room = join_room(&room, &User::new("x", "X")).unwrap();
    assert_eq!(room.players.len(), 4);
    assert_eq!(room.players[3].id, "x");
    assert_eq!(room.players[3].seat, 3);
    assert_eq!(room.players[3].chips, 200);
}

#[test]
fn join_is_idempotent_for_seated_players() {
    let room = seated_room(3);
    let again = join_room(&room, &User::new("p1", "Someone Else")).unwrap();
    assert_eq!(again, room);
}

#[test]
fn join_rejects_an_eleventh_player() {
    let room = seated_room(10);
    let err = join_room(&room, &User::new("late", "Late")).unwrap_err();
    assert_eq!(err, GameError::RoomFull);
    // full is checked before the idempotent shortcut
    assert_eq!(join_room(&room, &User::new("p3", "P3")), Err(GameError::RoomFull));
}

#[test]
fn join_rejects_a_running_room() {
    let room = start_hand_with_deck(&seated_room(2), Deck::shuffled(3)).unwrap();
    assert_eq!(
        join_room(&room, &User::new("late", "Late")),
        Err(GameError::RoomAlreadyStarted)
    );
    assert_eq!(
        join_room(&room, &User::new("p0", "P0")),
        Err(GameError::RoomAlreadyStarted)
    );
}

#[test]
fn room_document_round_trips_through_json() {
    let room = start_hand_with_deck(&seated_room(3), Deck::shuffled(11)).unwrap();
    let json = serde_json::to_string(&room).unwrap();
    assert!(json.contains("\"roomId\":\"room1\""));
    assert!(json.contains("\"status\":\"playing\""));
    let back: holdem_engine::room::Room = serde_json::from_str(&json).unwrap();
    assert_eq!(back, room);
}
