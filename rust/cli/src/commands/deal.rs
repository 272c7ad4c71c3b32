//! `deal`: deal one hand from a seed and show every hand plus the board the
//! deck would run out.

use std::io::Write;

use holdem_engine::deck::Deck;
use holdem_engine::engine::start_hand_with_deck;
use holdem_engine::hand::best_hand;
use holdem_engine::player::User;
use holdem_engine::room::{Room, TableConfig, join_room};

use crate::error::CliError;
use crate::formatters::format_board;

pub fn handle_deal_command(seed: u64, players: u8, out: &mut dyn Write) -> Result<(), CliError> {
    let mut room = Room::new("deal", &User::new("p1", "P1"), TableConfig::default(), 0);
    for i in 2..=players {
        room = join_room(&room, &User::new(format!("p{}", i), format!("P{}", i)))?;
    }
    let room = start_hand_with_deck(&room, Deck::shuffled(seed))?;
    let game = room
        .game
        .as_ref()
        .ok_or_else(|| CliError::InvalidInput("hand ended before any action".into()))?;
    let mut deck = game.deck.clone();
    let board = deck.deal_n(5)?;

    writeln!(out, "Seed: {}", seed)?;
    for p in &game.players {
        let mut seven = p.hand.to_vec();
        seven.extend_from_slice(&board);
        let made = best_hand(&seven)
            .map(|b| b.score.category.to_string())
            .unwrap_or_default();
        writeln!(out, "Hole {}: {}  {}", p.name, format_board(&p.hand), made)?;
    }
    writeln!(out, "Board: {}", format_board(&board))?;
    Ok(())
}
