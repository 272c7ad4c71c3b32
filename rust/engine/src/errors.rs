use thiserror::Error;

/// Rejections of an illegal operation. None of them are fatal: the input
/// room snapshot is left unchanged and the caller may retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("room full")]
    RoomFull,
    #[error("already started")]
    RoomAlreadyStarted,
    #[error("not enough players")]
    NotEnoughPlayers,
    #[error("hand not in progress")]
    HandNotInProgress,
    #[error("not this player's turn")]
    OutOfTurn,
    #[error("cannot check")]
    IllegalCheck,
    #[error("invalid raise amount: {raise_to}, current bet: {current_bet}")]
    InvalidRaiseAmount { raise_to: u32, current_bet: u32 },
    #[error("insufficient chips")]
    InsufficientChips,
    #[error("deck exhausted")]
    DeckExhausted,
    #[error("chips at the table exceed {limit}")]
    ChipLimitExceeded { limit: u64 },
}
