use std::io::Write;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::room::{HandSummary, Room};

/// Stack of one seat before and after a finished hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatResult {
    pub player_id: String,
    pub name: String,
    pub seat: usize,
    pub start_chips: u32,
    pub end_chips: u32,
}

impl SeatResult {
    pub fn net(&self) -> i64 {
        self.end_chips as i64 - self.start_chips as i64
    }
}

/// One finished hand, serialized as a single JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: ROOMID-NNNNNN)
    pub hand_id: String,
    pub room_id: String,
    /// RNG seed used for the shuffle, when known
    pub seed: Option<u64>,
    pub seats: Vec<SeatResult>,
    pub summary: HandSummary,
    /// Timestamp when the hand was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    /// Builds a record from the rooms before and after a hand. Returns `None`
    /// when `after` carries no finished hand.
    pub fn from_rooms(before: &Room, after: &Room, seed: Option<u64>) -> Option<Self> {
        let summary = after.last_hand.clone()?;
        let seats = before
            .players
            .iter()
            .map(|p| SeatResult {
                player_id: p.id.clone(),
                name: p.name.clone(),
                seat: p.seat,
                start_chips: p.chips,
                end_chips: after
                    .players
                    .iter()
                    .find(|q| q.id == p.id)
                    .map_or(p.chips, |q| q.chips),
            })
            .collect();
        Some(Self {
            hand_id: format_hand_id(&after.room_id, summary.hand_number),
            room_id: after.room_id.clone(),
            seed,
            seats,
            summary,
            ts: None,
        })
    }
}

pub fn format_hand_id(room_id: &str, seq: u64) -> String {
    format!("{}-{:06}", room_id, seq)
}

/// Writes [`HandRecord`]s as JSON lines.
pub struct HandLogger<W: Write> {
    writer: W,
}

impl<W: Write> HandLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
