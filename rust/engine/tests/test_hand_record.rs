mod common;

use std::io::BufRead;

use common::{act, seated_room, stacked};
use holdem_engine::deck::Deck;
use holdem_engine::engine::start_hand_with_deck;
use holdem_engine::logger::{format_hand_id, HandLogger, HandRecord};
use holdem_engine::player::PlayerAction;

fn folded_hand() -> (holdem_engine::room::Room, holdem_engine::room::Room) {
    let before = seated_room(3);
    let mut room = start_hand_with_deck(&before, Deck::shuffled(7)).unwrap();
    room = act(&room, PlayerAction::Raise(6));
    room = act(&room, PlayerAction::Fold);
    room = act(&room, PlayerAction::Fold);
    (before, room)
}

#[test]
fn hand_ids_are_zero_padded() {
    assert_eq!(format_hand_id("abc", 1), "abc-000001");
    assert_eq!(format_hand_id("abc", 1234567), "abc-1234567");
}

#[test]
fn record_captures_stack_changes() {
    let (before, after) = folded_hand();
    let rec = HandRecord::from_rooms(&before, &after, Some(7)).expect("finished hand");
    assert_eq!(rec.hand_id, "room1-000001");
    assert_eq!(rec.room_id, "room1");
    assert_eq!(rec.seed, Some(7));
    let nets: Vec<i64> = rec.seats.iter().map(|s| s.net()).collect();
    assert_eq!(nets, vec![3, -1, -2]);
    assert_eq!(nets.iter().sum::<i64>(), 0);
    assert_eq!(rec.summary.winners, vec!["p0".to_string()]);
    assert!(rec.summary.showdown.is_empty());
}

#[test]
fn no_record_without_a_finished_hand() {
    let room = seated_room(2);
    let started = start_hand_with_deck(&room, Deck::shuffled(1)).unwrap();
    assert!(HandRecord::from_rooms(&room, &started, None).is_none());
}

#[test]
fn showdown_hands_are_recorded() {
    let deck = stacked(&["A♠", "A♦", "7♣", "2♦", "A♥", "K♣", "9♠", "5♥", "4♦"]);
    let before = seated_room(2);
    let mut room = start_hand_with_deck(&before, deck).unwrap();
    room = act(&room, PlayerAction::Call);
    while room.is_playing() {
        room = act(&room, PlayerAction::Check);
    }
    let rec = HandRecord::from_rooms(&before, &room, None).unwrap();
    assert_eq!(rec.summary.showdown.len(), 2);
    assert_eq!(rec.summary.board.len(), 5);
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["summary"]["showdown"][0]["playerId"], "p0");
    assert_eq!(json["summary"]["showdown"][0]["score"]["category"], "three_of_a_kind");
}

#[test]
fn logger_writes_one_line_per_hand_with_timestamp() {
    let (before, after) = folded_hand();
    let rec = HandRecord::from_rooms(&before, &after, Some(7)).unwrap();
    let mut logger = HandLogger::new(Vec::new());
    logger.write(&rec).unwrap();
    logger.write(&rec).unwrap();
    let out = logger.into_inner();
    let lines: Vec<String> = out.as_slice().lines().collect::<Result<_, _>>().unwrap();
    assert_eq!(lines.len(), 2);
    let parsed: HandRecord = serde_json::from_str(&lines[0]).unwrap();
    assert!(parsed.ts.as_deref().is_some_and(|ts| ts.ends_with('Z')));
    assert_eq!(parsed.summary, rec.summary);
}

#[test]
fn logger_keeps_existing_timestamp() {
    let (before, after) = folded_hand();
    let mut rec = HandRecord::from_rooms(&before, &after, None).unwrap();
    rec.ts = Some("2024-01-01T00:00:00Z".into());
    let mut logger = HandLogger::new(Vec::new());
    logger.write(&rec).unwrap();
    let out = String::from_utf8(logger.into_inner()).unwrap();
    assert!(out.ends_with('\n'));
    assert!(out.contains("\"ts\":\"2024-01-01T00:00:00Z\""));
}
