#![allow(dead_code)]

use holdem_engine::cards::{full_deck, Card};
use holdem_engine::deck::Deck;
use holdem_engine::engine::apply_action;
use holdem_engine::player::{PlayerAction, User};
use holdem_engine::room::{join_room, Room, TableConfig};

pub fn c(label: &str) -> Card {
    label.parse().expect("valid card label")
}

/// Room with players `p0..pN` seated in order and default stakes.
pub fn seated_room(n: usize) -> Room {
    seated_room_with(n, TableConfig::default())
}

pub fn seated_room_with(n: usize, config: TableConfig) -> Room {
    let mut room = Room::new("room1", &User::new("p0", "P0"), config, 0);
    for i in 1..n {
        room = join_room(&room, &User::new(format!("p{}", i), format!("P{}", i))).unwrap();
    }
    room
}

/// A deck that deals `order` first (hole cards seat by seat, then flop,
/// turn, river) followed by the remaining cards.
pub fn stacked(order: &[&str]) -> Deck {
    let wanted: Vec<Card> = order.iter().map(|l| c(l)).collect();
    let mut cards: Vec<Card> = full_deck()
        .into_iter()
        .filter(|card| !wanted.contains(card))
        .collect();
    cards.extend(wanted.into_iter().rev());
    Deck::from_cards(cards)
}

pub fn to_act(room: &Room) -> String {
    room.game
        .as_ref()
        .and_then(|g| g.player_to_act())
        .map(|p| p.id.clone())
        .expect("a player to act")
}

/// Applies an action for whoever is next to act.
pub fn act(room: &Room, action: PlayerAction) -> Room {
    let id = to_act(room);
    apply_action(room, &id, action).expect("legal action")
}
