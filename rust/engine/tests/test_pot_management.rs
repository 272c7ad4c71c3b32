mod common;

use common::{act, seated_room, seated_room_with, stacked};
use holdem_engine::deck::Deck;
use holdem_engine::engine::{apply_action, start_hand_with_deck};
use holdem_engine::errors::GameError;
use holdem_engine::player::PlayerAction as A;
use holdem_engine::player::User;
use holdem_engine::room::{join_room, Room, RoomStatus, TableConfig, MAX_TABLE_CHIPS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn tied_winners_split_and_odd_chip_goes_left_of_dealer() {
    // royal flush on board: every remaining player ties
    let deck = stacked(&[
        "2♣", "3♦", "4♣", "5♦", "6♣", "7♦", "10♠", "J♠", "Q♠", "K♠", "A♠",
    ]);
    let mut room = start_hand_with_deck(&seated_room(3), deck).unwrap();
    room = act(&room, A::Call); // p0
    room = act(&room, A::Fold); // p1 leaves 1 chip behind
    room = act(&room, A::Check); // p2
    while room.status == RoomStatus::Playing {
        room = act(&room, A::Check);
    }
    let summary = room.last_hand.as_ref().unwrap();
    assert_eq!(summary.pot, 5);
    // seat 2 sits closer to the dealer's left than seat 0
    assert_eq!(summary.winners, vec!["p2".to_string(), "p0".to_string()]);
    assert_eq!(summary.payouts[0].amount, 3);
    assert_eq!(summary.payouts[1].amount, 2);
    let chips: Vec<u32> = room.players.iter().map(|p| p.chips).collect();
    assert_eq!(chips, vec![200, 199, 201]);
    assert!(summary.log.last().unwrap().starts_with("Showdown: P2, P0 split pot 5"));
}

#[test]
fn short_all_in_winner_takes_the_whole_pot() {
    // p0: A♠ A♦, p1: 2♣ 7♦, p2: 3♣ 8♦, board A♥ K♣ 9♠ 5♥ 4♦
    let deck = stacked(&[
        "A♠", "A♦", "2♣", "7♦", "3♣", "8♦", "A♥", "K♣", "9♠", "5♥", "4♦",
    ]);
    let mut room = seated_room(3);
    room.players[0].chips = 10;
    let mut room = start_hand_with_deck(&room, deck).unwrap();
    room = act(&room, A::AllIn); // p0 for 10
    room = act(&room, A::Call); // p1
    room = act(&room, A::Call); // p2
    assert_eq!(room.game.as_ref().unwrap().pot, 30);
    room = act(&room, A::Raise(50)); // p1 bets the flop
    room = act(&room, A::Call); // p2
    while room.status == RoomStatus::Playing {
        room = act(&room, A::Check);
    }
    // no side pot: the 10-chip all-in collects everything
    let chips: Vec<u32> = room.players.iter().map(|p| p.chips).collect();
    assert_eq!(chips, vec![130, 140, 140]);
    assert_eq!(room.total_chips(), 410);
}

fn random_action<R: Rng>(rng: &mut R, current_bet: u32) -> A {
    match rng.random_range(0..10) {
        0 => A::Fold,
        1..=3 => A::Check,
        4..=6 => A::Call,
        7 | 8 => A::Raise(current_bet + rng.random_range(1..=12)),
        _ => A::AllIn,
    }
}

fn play_random_hand(room: &Room, rng: &mut ChaCha20Rng) -> Room {
    let total = room.total_chips();
    let mut room = start_hand_with_deck(room, Deck::shuffled(rng.random())).unwrap();
    assert_eq!(room.total_chips(), total);
    for _ in 0..500 {
        let Some(game) = room.game.as_ref() else {
            break;
        };
        let id = game.player_to_act().expect("someone to act").id.clone();
        let street = game.street;
        let action = random_action(rng, game.current_bet);
        room = match apply_action(&room, &id, action) {
            Ok(next) => next,
            Err(GameError::IllegalCheck)
            | Err(GameError::InsufficientChips)
            | Err(GameError::InvalidRaiseAmount { .. }) => {
                apply_action(&room, &id, A::Call).expect("call is always legal")
            }
            Err(e) => panic!("unexpected error: {}", e),
        };
        assert_eq!(room.total_chips(), total, "chips leaked after {:?}", action);
        if let Some(next) = room.game.as_ref() {
            assert!(next.board.len() <= 5);
            assert!(next.street as u8 >= street as u8);
        }
    }
    assert_eq!(room.status, RoomStatus::Waiting, "hand did not finish");
    room
}

#[test]
fn chips_are_conserved_through_random_hands() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for players in 2..=6 {
        let mut room = seated_room(players);
        for _ in 0..20 {
            if room.players.iter().filter(|p| p.chips > 0).count() < 2 {
                break;
            }
            room = play_random_hand(&room, &mut rng);
            assert_eq!(room.total_chips(), 200 * players as u64);
        }
    }
}

#[test]
fn largest_stacks_settle_without_overflow() {
    let config = TableConfig {
        starting_stack: u32::MAX / 2,
        max_players: 2,
        ..TableConfig::default()
    };
    assert!(config.fits_chip_limit());
    let room = seated_room_with(2, config);
    let total = room.total_chips();
    let mut room = start_hand_with_deck(&room, Deck::shuffled(7)).unwrap();
    room = act(&room, A::AllIn);
    room = act(&room, A::Call);
    assert_eq!(room.status, RoomStatus::Waiting);
    assert_eq!(room.total_chips(), total);
    assert_eq!(room.last_hand.as_ref().unwrap().pot as u64, total);
}

#[test]
fn seating_past_the_chip_limit_is_refused() {
    let config = TableConfig {
        starting_stack: u32::MAX,
        max_players: 2,
        ..TableConfig::default()
    };
    assert!(!config.fits_chip_limit());
    let room = Room::new("big", &User::new("p0", "P0"), config, 0);
    assert_eq!(
        join_room(&room, &User::new("p1", "P1")).unwrap_err(),
        GameError::ChipLimitExceeded {
            limit: MAX_TABLE_CHIPS
        }
    );

    // a snapshot edited outside the engine is caught before any chips move
    let mut room = seated_room(2);
    for p in &mut room.players {
        p.chips = u32::MAX;
    }
    let before = room.clone();
    let err = start_hand_with_deck(&room, Deck::shuffled(1)).unwrap_err();
    assert!(matches!(err, GameError::ChipLimitExceeded { .. }));
    assert_eq!(room, before);
}
