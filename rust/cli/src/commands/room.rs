//! `room create`, `room join` and `rooms`.

use std::io::Write;

use holdem_engine::player::User;
use holdem_engine::room::{create_room_with, join_room};
use tracing::info;

use crate::config::Config;
use crate::error::CliError;
use crate::store::RoomStore;

fn user(id: &str, name: Option<&str>) -> Result<User, CliError> {
    if id.trim().is_empty() {
        return Err(CliError::InvalidInput("player id must not be empty".into()));
    }
    Ok(User::new(id, name.unwrap_or(id)))
}

/// Creates a room with the configured stakes and prints its id.
pub fn handle_room_create_command(
    store: &RoomStore,
    config: &Config,
    player: &str,
    name: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let host = user(player, name)?;
    let room = create_room_with(&host, config.table());
    store.create(&room)?;
    info!(room_id = %room.room_id, host = %host.id, "room created");
    writeln!(out, "{}", room.room_id)?;
    Ok(())
}

pub fn handle_room_join_command(
    store: &RoomStore,
    room_id: &str,
    player: &str,
    name: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let joiner = user(player, name)?;
    let stored = store.update(room_id, |room| Ok(join_room(room, &joiner)?))?;
    let room = &stored.room;
    let seated = room
        .players
        .iter()
        .find(|p| p.id == joiner.id)
        .ok_or_else(|| CliError::Store(format!("{} missing after join", joiner.id)))?;
    info!(room_id = %room.room_id, player = %joiner.id, seat = seated.seat, "player seated");
    writeln!(
        out,
        "{} seated at {} in room {} ({}/{})",
        seated.name,
        seated.seat,
        room.room_id,
        room.players.len(),
        room.max_players
    )?;
    Ok(())
}

pub fn handle_rooms_command(store: &RoomStore, out: &mut dyn Write) -> Result<(), CliError> {
    for id in store.list()? {
        let stored = store.load(&id)?;
        let status = if stored.room.is_playing() { "playing" } else { "waiting" };
        writeln!(
            out,
            "{}  {}  {}/{} players  {} hands",
            id,
            status,
            stored.room.players.len(),
            stored.room.max_players,
            stored.room.hands_played
        )?;
    }
    Ok(())
}
