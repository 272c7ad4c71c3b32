//! `sim`: automated seats play hands at one table.
//!
//! Hand `i` is shuffled with `seed + i`, so a run is reproducible from its
//! base seed. Chip conservation is checked after every action.

use std::io::Write;
use std::path::PathBuf;

use holdem_ai::{POLICY_NAMES, SeatPolicy, create_policy};
use holdem_engine::deck::Deck;
use holdem_engine::engine::{apply_action, start_hand_with_deck};
use holdem_engine::logger::{HandLogger, HandRecord};
use holdem_engine::player::{PlayerAction, User};
use holdem_engine::room::{Room, TableConfig, join_room};
use tracing::{debug, info, warn};

use crate::error::CliError;
use crate::io_utils::RecordWriter;
use crate::ui;

const MAX_ACTIONS_PER_HAND: usize = 2_000;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub hands: u64,
    pub players: u8,
    pub seed: u64,
    pub policy: String,
    pub output: Option<PathBuf>,
    pub table: TableConfig,
}

pub fn handle_sim_command(
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let mut policies: Vec<Box<dyn SeatPolicy>> = (0..opts.players as u64)
        .map(|seat| create_policy(&opts.policy, opts.seed.wrapping_add(seat)))
        .collect::<Option<_>>()
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "unknown policy {} (expected one of: {})",
                opts.policy,
                POLICY_NAMES.join(", ")
            ))
        })?;

    let mut room = seat_table(opts.players, opts.table)?;
    let mut logger = match &opts.output {
        Some(path) => Some(HandLogger::new(RecordWriter::create(path)?)),
        None => None,
    };

    let mut played = 0u64;
    for i in 0..opts.hands {
        if room.players.iter().filter(|p| p.chips > 0).count() < room.min_players {
            ui::display_warning(err, &format!("table broke after {} hand(s)", played))?;
            break;
        }
        let hand_seed = opts.seed.wrapping_add(i);
        let before = room.clone();
        room = play_hand(&room, hand_seed, &mut policies)?;
        played += 1;

        if let Some(logger) = logger.as_mut()
            && let Some(record) = HandRecord::from_rooms(&before, &room, Some(hand_seed))
        {
            logger.write(&record)?;
        }
    }

    if let Some(logger) = logger {
        logger.into_inner().finish()?;
    }
    info!(hands = played, seed = opts.seed, policy = %opts.policy, "simulation finished");

    let start = opts.table.starting_stack as i64;
    let seats: Vec<serde_json::Value> = room
        .players
        .iter()
        .map(|p| {
            serde_json::json!({
                "id": p.id,
                "chips": p.chips,
                "net": p.chips as i64 - start,
            })
        })
        .collect();
    let summary = serde_json::json!({
        "hands": played,
        "seed": opts.seed,
        "policy": opts.policy,
        "seats": seats,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}

fn seat_table(players: u8, table: TableConfig) -> Result<Room, CliError> {
    let mut room = Room::new("sim", &User::new("p1", "P1"), table, 0);
    for i in 2..=players {
        room = join_room(&room, &User::new(format!("p{}", i), format!("P{}", i)))?;
    }
    Ok(room)
}

/// Plays one hand to completion. A policy move the engine rejects is
/// replaced by a fold.
fn play_hand(
    room: &Room,
    seed: u64,
    policies: &mut [Box<dyn SeatPolicy>],
) -> Result<Room, CliError> {
    let total = room.total_chips();
    let mut room = start_hand_with_deck(room, Deck::shuffled(seed))?;
    let mut steps = 0usize;

    while let Some(game) = room.game.as_ref() {
        let seat = game
            .turn
            .ok_or_else(|| CliError::InvalidInput(format!("hand {} stalled", game.hand_number)))?;
        let id = game.players[seat].id.clone();
        let action = policies[seat].choose(&room, seat);
        room = match apply_action(&room, &id, action) {
            Ok(next) => next,
            Err(e) => {
                warn!(player = %id, ?action, error = %e, "policy chose an illegal action, folding");
                apply_action(&room, &id, PlayerAction::Fold)?
            }
        };
        debug!(player = %id, ?action, "sim action");

        if room.total_chips() != total {
            return Err(CliError::InvalidInput(format!(
                "chip conservation violated in hand {} (seed {}): {} != {}",
                room.hands_played,
                seed,
                room.total_chips(),
                total
            )));
        }
        steps += 1;
        if steps > MAX_ACTIONS_PER_HAND {
            return Err(CliError::InvalidInput(format!(
                "hand {} did not finish (seed {})",
                room.hands_played, seed
            )));
        }
    }
    Ok(room)
}
