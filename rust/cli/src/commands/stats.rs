//! `stats`: aggregate hand records (`.jsonl` or `.jsonl.zst`, a file or a
//! directory tree of them).
//!
//! Every record is checked for chip conservation: its seat nets must sum
//! to zero and its payouts must add up to its pot.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use holdem_engine::logger::HandRecord;
use serde::Serialize;

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;

#[derive(Debug, Default, Serialize)]
struct PlayerStats {
    hands: u64,
    wins: u64,
    net: i64,
}

#[derive(Debug, Default)]
struct StatsState {
    hands: u64,
    showdowns: u64,
    splits: u64,
    total_pot: u64,
    categories: BTreeMap<String, u64>,
    players: BTreeMap<String, PlayerStats>,
    skipped: u64,
    corrupted: u64,
    violations: u64,
}

pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState::default();

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let Ok(rd) = std::fs::read_dir(&d) else {
                continue;
            };
            let mut entries: Vec<_> = rd.filter_map(Result::ok).map(|e| e.path()).collect();
            entries.sort();
            for p in entries {
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
                {
                    match read_text_auto(&p.to_string_lossy()) {
                        Ok(content) => consume(&content, &mut state, err)?,
                        Err(_) => state.corrupted += 1,
                    }
                }
            }
        }
    } else {
        match read_text_auto(input) {
            Ok(s) => consume(&s, &mut state, err)?,
            Err(e) => {
                return Err(CliError::InvalidInput(format!("Failed to read {}: {}", input, e)));
            }
        }
    }

    if state.corrupted > 0 {
        ui::display_warning(err, &format!("Skipped {} corrupted record(s)", state.corrupted))?;
    }
    if state.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.hands == 0 && (state.corrupted > 0 || state.skipped > 0) {
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let average_pot = if state.hands == 0 {
        0.0
    } else {
        state.total_pot as f64 / state.hands as f64
    };
    let summary = serde_json::json!({
        "hands": state.hands,
        "showdowns": state.showdowns,
        "split_pots": state.splits,
        "average_pot": average_pot,
        "categories": state.categories,
        "players": state.players,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;

    if state.violations > 0 {
        return Err(CliError::InvalidInput(format!(
            "chip conservation violated in {} hand(s)",
            state.violations
        )));
    }
    Ok(())
}

fn consume(content: &str, state: &mut StatsState, err: &mut dyn Write) -> Result<(), CliError> {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        if i == last
            && !has_trailing_nl
            && serde_json::from_str::<serde_json::Value>(line).is_err()
        {
            state.skipped += 1;
            continue;
        }
        let rec: HandRecord = crate::parse_json_or_continue!(line, state.corrupted);

        let net_sum: i64 = rec.seats.iter().map(|s| s.net()).sum();
        let paid: u32 = rec.summary.payouts.iter().map(|p| p.amount).sum();
        if net_sum != 0 || paid != rec.summary.pot {
            state.violations += 1;
            ui::write_error(
                err,
                &format!("Chip conservation violated at hand {}", rec.hand_id),
            )?;
            continue;
        }

        state.hands += 1;
        state.total_pot += rec.summary.pot as u64;
        if !rec.summary.showdown.is_empty() {
            state.showdowns += 1;
            if let Some(top) = rec
                .summary
                .showdown
                .iter()
                .find(|s| rec.summary.winners.first() == Some(&s.player_id))
            {
                *state
                    .categories
                    .entry(top.score.category.to_string())
                    .or_default() += 1;
            }
        }
        if rec.summary.winners.len() > 1 {
            state.splits += 1;
        }
        for seat in &rec.seats {
            let entry = state.players.entry(seat.player_id.clone()).or_default();
            if seat.start_chips > 0 {
                entry.hands += 1;
            }
            entry.net += seat.net();
            if rec.summary.winners.contains(&seat.player_id) {
                entry.wins += 1;
            }
        }
    }
    Ok(())
}
