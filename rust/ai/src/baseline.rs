//! Rule-based policy driven by hand strength and pot odds.

use holdem_engine::cards::Card;
use holdem_engine::hand::{best_hand, Category};
use holdem_engine::player::PlayerAction;
use holdem_engine::room::Room;

use crate::{legal_raise, SeatPolicy};

/// Deterministic rule-based player.
///
/// **Preflop:** premium pairs and big aces raise, medium hands call cheap
/// bets, weak hands fold to any bet and check when free.
///
/// **Postflop:** the made-hand category of the best five cards sets the
/// strength; two pair and better bet or raise, one pair calls small bets,
/// everything else checks or folds on pot odds.
#[derive(Debug, Clone, Default)]
pub struct BaselinePolicy;

impl BaselinePolicy {
    pub fn new() -> Self {
        Self
    }

    /// Preflop strength on a 0-10 scale.
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let r1 = hole[0].rank.value();
        let r2 = hole[1].rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Postflop strength from the best five of hole + board. `None` before
    /// the flop.
    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
        let mut cards = hole.to_vec();
        cards.extend_from_slice(board);
        let best = best_hand(&cards)?;
        let base = match best.score.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker_boost = match best.score.kickers.first() {
            Some(&k) if k >= 12 => 1,
            _ => 0,
        };
        Some((base + kicker_boost).min(10))
    }

    /// Share of the final pot the caller would be putting in, inverted:
    /// `pot / (pot + call)`. 1.0 when the action is free.
    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    /// Picks an action from strength and table numbers. Raise targets are
    /// totals for the street and still need [`legal_raise`].
    fn decide(
        strength: u8,
        to_call: u32,
        current_bet: u32,
        min_raise: u32,
        stack: u32,
        pot: u32,
    ) -> Intent {
        if to_call == 0 {
            return match strength {
                9..=10 => Intent::RaiseTo(current_bet + (pot * 2 / 3).max(min_raise)),
                7..=8 => Intent::RaiseTo(current_bet + (pot / 2).max(min_raise)),
                _ => Intent::Check,
            };
        }

        if to_call >= stack {
            return if strength >= 7 { Intent::AllIn } else { Intent::Fold };
        }

        let odds = Self::pot_odds(pot, to_call);
        match strength {
            9..=10 => Intent::RaiseTo(current_bet + (pot / 2).max(min_raise)),
            7..=8 => Intent::Call,
            5..=6 if odds >= 0.3 || to_call <= pot / 4 => Intent::Call,
            3..=4 if odds >= 0.4 || to_call <= pot / 6 => Intent::Call,
            _ => Intent::Fold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Fold,
    Check,
    Call,
    RaiseTo(u32),
    AllIn,
}

impl SeatPolicy for BaselinePolicy {
    fn choose(&mut self, room: &Room, seat: usize) -> PlayerAction {
        let Some(game) = room.game.as_ref() else {
            return PlayerAction::Check;
        };
        let Some(player) = game.players.get(seat) else {
            return PlayerAction::Fold;
        };

        let to_call = player.to_call(game.current_bet);
        let strength = Self::postflop_strength(player.hand, &game.board)
            .unwrap_or_else(|| Self::preflop_strength(player.hand));
        let intent = Self::decide(
            strength,
            to_call,
            game.current_bet,
            room.big_blind.max(1),
            player.chips,
            game.pot,
        );

        match intent {
            Intent::Fold if to_call == 0 => PlayerAction::Check,
            Intent::Fold => PlayerAction::Fold,
            Intent::Check => PlayerAction::Check,
            Intent::Call => PlayerAction::Call,
            Intent::AllIn => PlayerAction::AllIn,
            Intent::RaiseTo(to) => legal_raise(player, game.current_bet, to),
        }
    }

    fn name(&self) -> &str {
        "baseline"
    }
}
