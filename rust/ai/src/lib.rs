//! # holdem-ai: automated seats
//!
//! Policies that pick an action for the seat to act, used to drive simulated
//! hands and to fill empty seats.
//!
//! - [`SeatPolicy`] - the decision interface
//! - [`baseline`] - rule-based play from hand strength and pot odds
//! - [`random`] - seeded random play, handy for fuzzing the engine
//! - [`create_policy`] - build a policy by name
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{create_policy, SeatPolicy};
//! use holdem_engine::deck::Deck;
//! use holdem_engine::engine::{apply_action, start_hand_with_deck};
//! use holdem_engine::player::User;
//! use holdem_engine::room::{join_room, Room, TableConfig};
//!
//! let room = Room::new("demo", &User::new("a", "Ann"), TableConfig::default(), 0);
//! let room = join_room(&room, &User::new("b", "Bo")).unwrap();
//! let room = start_hand_with_deck(&room, Deck::shuffled(42)).unwrap();
//!
//! let mut bot = create_policy("baseline", 0).unwrap();
//! let seat = room.game.as_ref().and_then(|g| g.turn).unwrap();
//! let action = bot.choose(&room, seat);
//! let id = room.game.as_ref().unwrap().players[seat].id.clone();
//! assert!(apply_action(&room, &id, action).is_ok());
//! ```

use holdem_engine::player::{HandPlayer, PlayerAction};
use holdem_engine::room::Room;

pub mod baseline;
pub mod random;

/// Chooses actions for one seat.
///
/// Implementations must return an action the engine accepts for `seat`
/// when `seat` is the seat to act in `room.game`.
///
/// ```rust
/// use holdem_ai::SeatPolicy;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::room::Room;
///
/// struct CallingStation;
///
/// impl SeatPolicy for CallingStation {
///     fn choose(&mut self, _room: &Room, _seat: usize) -> PlayerAction {
///         PlayerAction::Call
///     }
///
///     fn name(&self) -> &str {
///         "calling-station"
///     }
/// }
/// ```
pub trait SeatPolicy: Send {
    fn choose(&mut self, room: &Room, seat: usize) -> PlayerAction;

    fn name(&self) -> &str;
}

/// Names accepted by [`create_policy`].
pub const POLICY_NAMES: [&str; 2] = ["baseline", "random"];

/// Builds a policy by name. `seed` feeds policies that use randomness.
///
/// ```rust
/// use holdem_ai::create_policy;
///
/// assert_eq!(create_policy("baseline", 1).unwrap().name(), "baseline");
/// assert!(create_policy("shark", 1).is_none());
/// ```
pub fn create_policy(name: &str, seed: u64) -> Option<Box<dyn SeatPolicy>> {
    match name {
        "baseline" => Some(Box::new(baseline::BaselinePolicy::new())),
        "random" => Some(Box::new(random::RandomPolicy::new(seed))),
        _ => None,
    }
}

/// Turns a desired raise target into something the engine accepts for
/// `player`: a raise when affordable, all-in when the target covers the
/// stack, otherwise a call.
pub(crate) fn legal_raise(player: &HandPlayer, current_bet: u32, raise_to: u32) -> PlayerAction {
    let max_to = player.committed + player.chips;
    if raise_to >= max_to {
        if max_to > current_bet {
            PlayerAction::AllIn
        } else {
            PlayerAction::Call
        }
    } else if raise_to > current_bet {
        PlayerAction::Raise(raise_to)
    } else {
        PlayerAction::Call
    }
}
