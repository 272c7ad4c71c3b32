use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Default starting stack size for each seated player in chips
pub const STARTING_STACK: u32 = 200;

/// Identity supplied by the session layer when a user creates or joins a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "action", content = "to")]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when nothing is owed)
    Check,
    /// Match the current bet, capped at the remaining stack
    Call,
    /// Raise the street commitment to the given total
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

/// A seated player between hands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyPlayer {
    pub id: String,
    pub name: String,
    pub chips: u32,
    pub seat: usize,
}

impl LobbyPlayer {
    pub fn seat(user: &User, chips: u32, seat: usize) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            chips,
            seat,
        }
    }

    /// Enters a hand with the given hole cards. Seats without chips sit the
    /// hand out and are dealt in already folded.
    pub fn deal_in(&self, hand: [Card; 2]) -> HandPlayer {
        HandPlayer {
            id: self.id.clone(),
            name: self.name.clone(),
            chips: self.chips,
            seat: self.seat,
            hand,
            folded: self.chips == 0,
            all_in: false,
            committed: 0,
            acted: false,
        }
    }
}

/// A player while a hand is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPlayer {
    pub id: String,
    pub name: String,
    pub chips: u32,
    pub seat: usize,
    pub hand: [Card; 2],
    pub folded: bool,
    pub all_in: bool,
    /// Chips wagered on the current street
    pub committed: u32,
    /// Whether the player acted since the last bet increase
    pub acted: bool,
}

impl HandPlayer {
    /// Can still be given the turn.
    pub fn is_active(&self) -> bool {
        !self.folded && !self.all_in && self.chips > 0
    }

    /// Still has to match bets on this street.
    pub fn is_contender(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub fn to_call(&self, current_bet: u32) -> u32 {
        current_bet.saturating_sub(self.committed)
    }

    /// Moves up to `amount` chips from the stack into the street commitment and
    /// returns what was actually paid. Emptying the stack marks the player all-in.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.committed += paid;
        if self.chips == 0 {
            self.all_in = true;
        }
        paid
    }

    pub fn into_lobby(self) -> LobbyPlayer {
        LobbyPlayer {
            id: self.id,
            name: self.name,
            chips: self.chips,
            seat: self.seat,
        }
    }
}
