//! Terminal rendering for cards, actions, and tables.
//!
//! Cards use the engine's labels ("10♦", "A♠") where the terminal supports
//! Unicode, and ASCII suit letters ("10d", "As") elsewhere.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use std::fmt::Write as _;

use holdem_engine::cards::{Card, Suit};
use holdem_engine::player::PlayerAction;
use holdem_engine::room::{HandSummary, Room, RoomStatus};

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn ascii_suit(suit: Suit) -> char {
    match suit {
        Suit::Spades => 's',
        Suit::Hearts => 'h',
        Suit::Diamonds => 'd',
        Suit::Clubs => 'c',
    }
}

pub fn format_card(card: &Card) -> String {
    if supports_unicode() {
        card.label()
    } else {
        format!("{}{}", card.rank.label(), ascii_suit(card.suit))
    }
}

/// Format a board (list of cards) as a string in bracket notation.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// ```rust
/// use holdem_engine::player::PlayerAction;
/// # use holdem_cli::formatters::format_action;
///
/// assert_eq!(format_action(&PlayerAction::Raise(10)), "raise to 10");
/// assert_eq!(format_action(&PlayerAction::AllIn), "all-in");
/// ```
pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Raise(to) => format!("raise to {}", to),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

/// Renders the table as seen by `viewer`. Only the viewer's own hole cards
/// are shown; every other live hand prints as `[?? ??]`.
pub fn render_table(room: &Room, viewer: Option<&str>) -> String {
    let mut s = String::new();
    let status = match room.status {
        RoomStatus::Waiting => "waiting",
        RoomStatus::Playing => "playing",
    };
    let _ = writeln!(
        s,
        "Room {}  status: {}  players: {}/{}  blinds: {}/{}",
        room.room_id,
        status,
        room.players.len(),
        room.max_players,
        room.small_blind,
        room.big_blind
    );

    match room.game.as_ref() {
        Some(game) => {
            let _ = writeln!(
                s,
                "Hand #{}  street: {}  pot: {}  bet: {}",
                game.hand_number,
                game.street.as_str(),
                game.pot,
                game.current_bet
            );
            let _ = writeln!(s, "Board: {}", format_board(&game.board));
            for (i, p) in game.players.iter().enumerate() {
                let marker = match (i == game.dealer, game.turn == Some(i)) {
                    (true, true) => "D>",
                    (true, false) => "D ",
                    (false, true) => " >",
                    (false, false) => "  ",
                };
                let cards = if viewer == Some(p.id.as_str()) {
                    format_board(&p.hand)
                } else if p.folded {
                    "[]".to_string()
                } else {
                    "[?? ??]".to_string()
                };
                let state = if p.folded {
                    "  folded"
                } else if p.all_in {
                    "  all-in"
                } else {
                    ""
                };
                let _ = writeln!(
                    s,
                    "{} seat {:<2} {:<12} chips {:>6}  bet {:>5}  {}{}",
                    marker, p.seat, p.name, p.chips, p.committed, cards, state
                );
            }
            if let Some(p) = game.player_to_act() {
                let to_call = p.to_call(game.current_bet);
                let _ = writeln!(s, "To act: {} ({} to call)", p.name, to_call);
            }
            for line in &game.log {
                let _ = writeln!(s, "  | {}", line);
            }
        }
        None => {
            for p in &room.players {
                let host = if p.id == room.host_id { "  (host)" } else { "" };
                let _ = writeln!(
                    s,
                    "   seat {:<2} {:<12} chips {:>6}{}",
                    p.seat, p.name, p.chips, host
                );
            }
            if let Some(summary) = room.last_hand.as_ref() {
                s.push_str(&render_summary(summary));
            }
        }
    }
    s
}

/// Renders a finished hand: board, revealed hands, payouts, and the log.
pub fn render_summary(summary: &HandSummary) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Last hand #{}: pot {}  board {}",
        summary.hand_number,
        summary.pot,
        format_board(&summary.board)
    );
    for shown in &summary.showdown {
        let _ = writeln!(
            s,
            "  {} shows {} -> {} ({})",
            shown.player_id,
            format_board(&shown.hole),
            format_board(&shown.best),
            shown.score.category
        );
    }
    for payout in &summary.payouts {
        let _ = writeln!(s, "  {} collects {}", payout.player_id, payout.amount);
    }
    for line in &summary.log {
        let _ = writeln!(s, "  | {}", line);
    }
    s
}
