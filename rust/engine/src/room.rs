use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine;
use crate::errors::GameError;
use crate::game::Game;
use crate::hand::Score;
use crate::player::{LobbyPlayer, User, STARTING_STACK};

pub const SMALL_BLIND: u32 = 1;
pub const BIG_BLIND: u32 = 2;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
/// Upper bound on the chips seated at one table, so every pot and stack fits
/// in a `u32`.
pub const MAX_TABLE_CHIPS: u64 = u32::MAX as u64;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
}

/// Stakes and seating limits a room is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
        }
    }
}

impl TableConfig {
    /// Whether a full table of starting stacks stays within [`MAX_TABLE_CHIPS`].
    pub fn fits_chip_limit(&self) -> bool {
        u64::from(self.starting_stack) * self.max_players as u64 <= MAX_TABLE_CHIPS
    }
}

/// Chips awarded to one player when a hand ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub player_id: String,
    pub amount: u32,
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowdownHand {
    pub player_id: String,
    pub hole: [Card; 2],
    pub best: [Card; 5],
    pub score: Score,
}

/// What remains of a finished hand once its game state is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandSummary {
    pub hand_number: u64,
    pub dealer: usize,
    pub pot: u32,
    pub board: Vec<Card>,
    pub winners: Vec<String>,
    pub payouts: Vec<Payout>,
    /// Empty when the hand ended with everyone else folding
    pub showdown: Vec<ShowdownHand>,
    pub log: Vec<String>,
}

/// The persisted room document. `game` is present exactly when the status is
/// [`RoomStatus::Playing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: String,
    pub host_id: String,
    pub status: RoomStatus,
    pub max_players: usize,
    pub min_players: usize,
    #[serde(default = "default_starting_stack")]
    pub starting_stack: u32,
    #[serde(default = "default_small_blind")]
    pub small_blind: u32,
    #[serde(default = "default_big_blind")]
    pub big_blind: u32,
    pub players: Vec<LobbyPlayer>,
    pub game: Option<Game>,
    /// Dealer seat of the previous hand
    #[serde(default)]
    pub last_dealer: Option<usize>,
    #[serde(default)]
    pub hands_played: u64,
    #[serde(default)]
    pub last_hand: Option<HandSummary>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

fn default_starting_stack() -> u32 {
    STARTING_STACK
}
fn default_small_blind() -> u32 {
    SMALL_BLIND
}
fn default_big_blind() -> u32 {
    BIG_BLIND
}

impl Room {
    /// A waiting room with `host` in seat 0.
    pub fn new(
        room_id: impl Into<String>,
        host: &User,
        config: TableConfig,
        created_at: i64,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            host_id: host.id.clone(),
            status: RoomStatus::Waiting,
            max_players: config.max_players,
            min_players: config.min_players,
            starting_stack: config.starting_stack,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            players: vec![LobbyPlayer::seat(host, config.starting_stack, 0)],
            game: None,
            last_dealer: None,
            hands_played: 0,
            last_hand: None,
            created_at,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == RoomStatus::Playing && self.game.is_some()
    }

    pub fn host(&self) -> Option<&LobbyPlayer> {
        self.players.iter().find(|p| p.id == self.host_id)
    }

    pub fn total_chips(&self) -> u64 {
        match &self.game {
            Some(game) => game.chips_in_play(),
            None => self.players.iter().map(|p| p.chips as u64).sum(),
        }
    }
}

/// Creates a room hosted by `host` with the default stakes.
pub fn create_room(host: &User) -> Room {
    create_room_with(host, TableConfig::default())
}

pub fn create_room_with(host: &User, config: TableConfig) -> Room {
    let now = chrono::Utc::now().timestamp_millis();
    let suffix: u16 = rand::rng().random_range(0..1000);
    let room_id = format!("{}{}", to_base36(now as u64), suffix);
    Room::new(room_id, host, config, now)
}

/// Seats `user` in a waiting room. Joining a room the user already sits in
/// returns the room unchanged.
pub fn join_room(room: &Room, user: &User) -> Result<Room, GameError> {
    if room.status != RoomStatus::Waiting {
        return Err(GameError::RoomAlreadyStarted);
    }
    if room.players.len() >= room.max_players {
        return Err(GameError::RoomFull);
    }
    if room.players.iter().any(|p| p.id == user.id) {
        return Ok(room.clone());
    }
    if room.total_chips() + u64::from(room.starting_stack) > MAX_TABLE_CHIPS {
        return Err(GameError::ChipLimitExceeded {
            limit: MAX_TABLE_CHIPS,
        });
    }
    let mut next = room.clone();
    let seat = next.players.len();
    next.players.push(LobbyPlayer::seat(user, room.starting_stack, seat));
    tracing::debug!(room_id = %room.room_id, user_id = %user.id, seat, "player joined");
    Ok(next)
}

/// Starts the next hand with a freshly shuffled deck.
pub fn start_game<R: Rng + ?Sized>(room: &Room, rng: &mut R) -> Result<Room, GameError> {
    engine::start_hand(room, rng)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
