//! Seeded random policy.

use holdem_engine::player::PlayerAction;
use holdem_engine::room::Room;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::{legal_raise, SeatPolicy};

/// Picks uniformly among the kinds of move open to the seat. The same seed
/// replays the same choices against the same tables.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl SeatPolicy for RandomPolicy {
    fn choose(&mut self, room: &Room, seat: usize) -> PlayerAction {
        let Some(game) = room.game.as_ref() else {
            return PlayerAction::Check;
        };
        let Some(player) = game.players.get(seat) else {
            return PlayerAction::Fold;
        };
        let to_call = player.to_call(game.current_bet);

        match self.rng.random_range(0..8) {
            0 if to_call > 0 => PlayerAction::Fold,
            0 | 1 | 2 if to_call == 0 => PlayerAction::Check,
            0..=3 => PlayerAction::Call,
            4..=6 => {
                let step = room.big_blind.max(1) * self.rng.random_range(1..=4);
                legal_raise(player, game.current_bet, game.current_bet + step)
            }
            _ => PlayerAction::AllIn,
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}
