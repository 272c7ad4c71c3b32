use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::player::HandPlayer;

/// Betting streets in order. `Showdown` is only reached transiently while the
/// pot is settled.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Board cards dealt when leaving this street.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Street::Preflop => 3,
            Street::Flop | Street::Turn => 1,
            Street::River | Street::Showdown => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        }
    }
}

/// State of the hand in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub hand_number: u64,
    pub deck: Deck,
    pub pot: u32,
    pub board: Vec<Card>,
    /// Seat index of the dealer button
    pub dealer: usize,
    pub street: Street,
    /// Street commitment every player must match to stay in
    pub current_bet: u32,
    /// Seat index to act, `None` when nobody can act
    pub turn: Option<usize>,
    pub last_aggressor: usize,
    pub players: Vec<HandPlayer>,
    pub log: Vec<String>,
}

impl Game {
    pub fn player(&self, id: &str) -> Option<&HandPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_to_act(&self) -> Option<&HandPlayer> {
        self.turn.and_then(|t| self.players.get(t))
    }

    pub fn unfolded(&self) -> impl Iterator<Item = (usize, &HandPlayer)> {
        self.players.iter().enumerate().filter(|(_, p)| !p.folded)
    }

    /// Every player who can still bet has acted and matched the current bet.
    /// Vacuously true when nobody can bet.
    pub fn is_street_complete(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.is_contender())
            .all(|p| p.acted && p.committed == self.current_bet)
    }

    pub fn chips_in_play(&self) -> u64 {
        self.players.iter().map(|p| p.chips as u64).sum::<u64>() + self.pot as u64
    }
}

/// First seat after `from` (cyclically) that is not folded, not all-in and
/// still holds chips.
pub fn next_active(players: &[HandPlayer], from: usize) -> Option<usize> {
    let n = players.len();
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&idx| players[idx].is_active())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::player::{LobbyPlayer, User};

    fn seats(chips: &[u32]) -> Vec<HandPlayer> {
        let hole = [
            Card::new(Rank::Two, Suit::Spades),
            Card::new(Rank::Three, Suit::Spades),
        ];
        chips
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                LobbyPlayer::seat(&User::new(format!("p{}", i), format!("P{}", i)), c, i)
                    .deal_in(hole)
            })
            .collect()
    }

    #[test]
    fn next_active_wraps_and_skips_inactive() {
        let mut players = seats(&[10, 10, 0, 10]);
        players[3].folded = true;
        assert_eq!(next_active(&players, 1), Some(0));
        players[0].all_in = true;
        assert_eq!(next_active(&players, 1), Some(1));
        players[1].folded = true;
        assert_eq!(next_active(&players, 1), None);
    }

    #[test]
    fn street_order() {
        assert_eq!(Street::Preflop.next(), Street::Flop);
        assert_eq!(Street::River.next(), Street::Showdown);
        assert_eq!(Street::Preflop.cards_to_deal(), 3);
        assert_eq!(Street::Turn.cards_to_deal(), 1);
    }
}
