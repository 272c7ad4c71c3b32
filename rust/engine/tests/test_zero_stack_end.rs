mod common;

use common::{act, seated_room, stacked};
use holdem_engine::deck::Deck;
use holdem_engine::engine::start_hand_with_deck;
use holdem_engine::errors::GameError;
use holdem_engine::player::PlayerAction;
use holdem_engine::room::RoomStatus;

#[test]
fn busted_seat_is_dealt_in_folded() {
    let mut room = seated_room(3);
    room.players[1].chips = 0;
    let room = start_hand_with_deck(&room, Deck::shuffled(5)).unwrap();
    let game = room.game.as_ref().unwrap();
    assert!(game.players[1].folded);
    // blinds skip the empty seat
    assert_eq!(game.players[2].committed, 1);
    assert_eq!(game.players[0].committed, 2);
    assert_eq!(game.turn, Some(2));
}

#[test]
fn one_funded_seat_cannot_start() {
    let mut room = seated_room(3);
    room.players[1].chips = 0;
    room.players[2].chips = 0;
    assert_eq!(
        start_hand_with_deck(&room, Deck::shuffled(5)),
        Err(GameError::NotEnoughPlayers)
    );
}

#[test]
fn loser_of_an_all_in_sits_out_next_hand() {
    // p0: K♠ K♥, p1: Q♠ Q♥, dry board
    let deck = stacked(&["K♠", "K♥", "Q♠", "Q♥", "2♥", "7♣", "9♠", "J♥", "3♦"]);
    let mut room = start_hand_with_deck(&seated_room(2), deck).unwrap();
    room = act(&room, PlayerAction::AllIn);
    room = act(&room, PlayerAction::Call);
    assert_eq!(room.status, RoomStatus::Waiting);
    assert_eq!(room.players[1].chips, 0);
    assert_eq!(
        start_hand_with_deck(&room, Deck::shuffled(9)),
        Err(GameError::NotEnoughPlayers)
    );
}

#[test]
fn busted_players_do_not_block_a_three_way_table() {
    let mut room = seated_room(4);
    room.players[2].chips = 0;
    let mut room = start_hand_with_deck(&room, Deck::shuffled(21)).unwrap();
    let mut steps = 0;
    while room.is_playing() {
        let game = room.game.as_ref().unwrap();
        let seat = game.turn.unwrap();
        assert_ne!(seat, 2, "empty seat was asked to act");
        room = act(&room, PlayerAction::Call);
        steps += 1;
        assert!(steps < 50);
    }
    assert_eq!(room.total_chips(), 600);
    assert_eq!(room.players[2].chips, 0);
}
