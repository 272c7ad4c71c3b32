//! Table commands against a stored room: `start`, `act`, `show`.

use std::io::Write;

use holdem_engine::engine::apply_action;
use holdem_engine::room::start_game;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::cli::ActionKind;
use crate::error::CliError;
use crate::formatters::{format_action, render_table};
use crate::store::RoomStore;

/// Shuffles with `seed` and starts the next hand.
pub fn handle_start_command(
    store: &RoomStore,
    room_id: &str,
    seed: u64,
    viewer: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let stored = store.update(room_id, |room| Ok(start_game(room, &mut rng)?))?;
    info!(room_id, seed, hand = stored.room.hands_played, "hand dealt");
    write!(out, "{}", render_table(&stored.room, viewer))?;
    Ok(())
}

pub fn handle_act_command(
    store: &RoomStore,
    room_id: &str,
    player: &str,
    kind: ActionKind,
    to: Option<u32>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let action = kind
        .into_action(to)
        .ok_or_else(|| CliError::InvalidInput("raise needs --to <amount>".into()))?;
    let stored = store.update(room_id, |room| Ok(apply_action(room, player, action)?))?;
    writeln!(out, "{} {}", player, format_action(&action))?;
    write!(out, "{}", render_table(&stored.room, Some(player)))?;
    Ok(())
}

pub fn handle_show_command(
    store: &RoomStore,
    room_id: &str,
    viewer: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let stored = store.load(room_id)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stored)?)?;
    } else {
        write!(out, "{}", render_table(&stored.room, viewer))?;
    }
    Ok(())
}
