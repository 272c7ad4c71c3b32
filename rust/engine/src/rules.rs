use crate::errors::GameError;
use crate::player::{HandPlayer, PlayerAction as A};

/// A player action checked against the table state, carrying the chips it moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips paid to call, capped at the stack
    Call(u32),
    /// New street commitment and the chips paid to reach it
    Raise { to: u32, paid: u32 },
    /// Whole stack committed; `to` is the resulting street commitment
    AllIn { to: u32, paid: u32 },
}

impl ValidatedAction {
    /// Chips this action moves from the stack into the pot.
    pub fn paid(&self) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(paid) => *paid,
            ValidatedAction::Raise { paid, .. } | ValidatedAction::AllIn { paid, .. } => *paid,
        }
    }

    /// Whether the action lifts the bet every other player has to match.
    pub fn raises(&self, current_bet: u32) -> bool {
        match self {
            ValidatedAction::Raise { .. } => true,
            ValidatedAction::AllIn { to, .. } => *to > current_bet,
            _ => false,
        }
    }
}

/// Validates a player action according to betting rules and stack size.
///
/// # Errors
///
/// - [`GameError::IllegalCheck`] - check while an outstanding bet exists
/// - [`GameError::InvalidRaiseAmount`] - raise target not above the current bet
/// - [`GameError::InsufficientChips`] - raise target beyond the player's stack
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::player::{LobbyPlayer, PlayerAction, User};
/// use holdem_engine::rules::{validate_action, ValidatedAction};
///
/// let hole = [Card::new(Rank::Two, Suit::Clubs), Card::new(Rank::Seven, Suit::Hearts)];
/// let player = LobbyPlayer::seat(&User::new("a", "A"), 50, 0).deal_in(hole);
///
/// let raise = validate_action(&player, 2, PlayerAction::Raise(10)).unwrap();
/// assert_eq!(raise, ValidatedAction::Raise { to: 10, paid: 10 });
/// assert!(validate_action(&player, 2, PlayerAction::Check).is_err());
/// ```
pub fn validate_action(
    player: &HandPlayer,
    current_bet: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let to_call = player.to_call(current_bet);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if player.committed == current_bet {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::IllegalCheck)
            }
        }
        A::Call => Ok(ValidatedAction::Call(to_call.min(player.chips))),
        A::Raise(raise_to) => {
            if raise_to <= current_bet {
                return Err(GameError::InvalidRaiseAmount {
                    raise_to,
                    current_bet,
                });
            }
            let paid = raise_to - player.committed;
            if paid > player.chips {
                return Err(GameError::InsufficientChips);
            }
            Ok(ValidatedAction::Raise { to: raise_to, paid })
        }
        A::AllIn => Ok(ValidatedAction::AllIn {
            to: player.committed + player.chips,
            paid: player.chips,
        }),
    }
}
