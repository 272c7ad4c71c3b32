//! `eval`: best five-card hand from five to seven cards.

use std::collections::HashSet;
use std::io::Write;

use holdem_engine::cards::Card;
use holdem_engine::hand::best_hand;

use crate::error::CliError;
use crate::formatters::format_board;

pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let parsed = parse_cards(cards)?;
    if !(5..=7).contains(&parsed.len()) {
        return Err(CliError::InvalidInput(format!(
            "need 5 to 7 cards, got {}",
            parsed.len()
        )));
    }
    let best = best_hand(&parsed)
        .ok_or_else(|| CliError::InvalidInput("need at least 5 cards".into()))?;
    writeln!(out, "Best: {} ({})", format_board(&best.cards), best.score.category)?;
    writeln!(out, "Score: {:?}", best.score.values())?;
    Ok(())
}

/// Parses labels, also accepting space- or comma-separated lists inside a
/// single argument. Duplicates are rejected.
fn parse_cards(args: &[String]) -> Result<Vec<Card>, CliError> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();
    for token in args
        .iter()
        .flat_map(|a| a.split([' ', ',']))
        .filter(|t| !t.is_empty())
    {
        let card: Card = token
            .parse()
            .map_err(|e| CliError::InvalidInput(format!("{}: {}", token, e)))?;
        if !seen.insert(card) {
            return Err(CliError::InvalidInput(format!("duplicate card {}", token)));
        }
        cards.push(card);
    }
    Ok(cards)
}
