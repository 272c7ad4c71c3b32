//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use holdem_engine::player::PlayerAction;

#[derive(Parser, Debug)]
#[command(name = "holdem", version, about = "Multiplayer Texas Hold'em tables from the terminal")]
pub struct HoldemCli {
    /// Room store directory (overrides HOLDEM_STORE and the config file)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or join rooms
    Room {
        #[command(subcommand)]
        cmd: RoomCommand,
    },
    /// Start the next hand in a room
    Start {
        room: String,
        /// Shuffle seed (defaults to HOLDEM_SEED, else random)
        #[arg(long)]
        seed: Option<u64>,
        /// Show the table as this player sees it
        #[arg(long)]
        player: Option<String>,
    },
    /// Act for a player in a running hand
    Act {
        room: String,
        #[arg(long)]
        player: String,
        #[arg(value_enum)]
        action: ActionKind,
        /// Street total to raise to
        #[arg(long, required_if_eq("action", "raise"))]
        to: Option<u32>,
    },
    /// Show a room's table
    Show {
        room: String,
        /// Reveal this player's hole cards
        #[arg(long)]
        player: Option<String>,
        /// Print the stored room document as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// List rooms in the store
    Rooms,
    /// Best five-card hand from 5 to 7 cards, e.g. `eval A♠ K♠ Qs Js 10s`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Deal one hand from a seed and print every hand and the full board
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=10))]
        players: u8,
    },
    /// Play hands between automated seats
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(2..=10))]
        players: u8,
        #[arg(long)]
        seed: Option<u64>,
        /// Seat policy: baseline or random
        #[arg(long, default_value = "baseline")]
        policy: String,
        /// Write hand records as JSONL (`.zst` to compress)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Summarise hand records from a file or directory
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

#[derive(Subcommand, Debug)]
pub enum RoomCommand {
    /// Create a room hosted by `--player`
    Create {
        #[arg(long)]
        player: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Seat `--player` in a waiting room
    Join {
        room: String,
        #[arg(long)]
        player: String,
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    #[value(name = "allin", alias = "all-in")]
    AllIn,
}

impl ActionKind {
    /// Pairs the kind with the raise target. `None` only for a raise with no
    /// target.
    pub fn into_action(self, to: Option<u32>) -> Option<PlayerAction> {
        match self {
            ActionKind::Fold => Some(PlayerAction::Fold),
            ActionKind::Check => Some(PlayerAction::Check),
            ActionKind::Call => Some(PlayerAction::Call),
            ActionKind::Raise => to.map(PlayerAction::Raise),
            ActionKind::AllIn => Some(PlayerAction::AllIn),
        }
    }
}
