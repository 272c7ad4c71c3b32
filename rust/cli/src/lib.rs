//! # holdem CLI library
//!
//! Runs shared Hold'em tables from the terminal. Rooms live in a file store
//! (see [`store`]); every mutation is a locked read-apply-write of one room
//! document through the engine's pure operations.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "room", "create", "--player", "ann"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `room create|join`: open a room or take a seat
//! - `rooms`: list stored rooms
//! - `start`: deal the next hand
//! - `act`: fold, check, call, raise or go all-in
//! - `show`: render the table for a viewer
//! - `eval`: best hand from 5 to 7 cards
//! - `deal`: deal one seeded hand for inspection
//! - `sim`: automated seats play a session
//! - `stats`: summarise hand records
//! - `cfg`: show resolved configuration

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod store;
pub mod ui;

use cli::{Commands, HoldemCli, RoomCommand};
use commands::sim::SimOptions;
use commands::{
    handle_act_command, handle_cfg_command, handle_deal_command, handle_eval_command,
    handle_room_create_command, handle_room_join_command, handle_rooms_command,
    handle_show_command, handle_sim_command, handle_start_command, handle_stats_command,
};
use config::Config;
pub use error::CliError;
use store::RoomStore;

const COMMANDS: &[&str] = &[
    "room", "rooms", "start", "act", "show", "eval", "deal", "sim", "stats", "cfg",
];

/// Main entry point for the CLI application.
///
/// Parses `args` (program name first), runs the subcommand, and returns the
/// process exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`].
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "deal", "--seed", "42"];
/// let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: holdem <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: holdem --help");
            return exit_code::ERROR;
        }
    };

    match dispatch(cli, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn dispatch(cli: HoldemCli, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let store_override = cli.store;
    match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::Deal { seed, players } => {
            let cfg = config::load()?;
            handle_deal_command(resolve_seed(seed, &cfg), players, out)
        }
        Commands::Sim {
            hands,
            players,
            seed,
            policy,
            output,
        } => {
            let cfg = config::load()?;
            let opts = SimOptions {
                hands,
                players,
                seed: resolve_seed(seed, &cfg),
                policy,
                output,
                table: cfg.table(),
            };
            handle_sim_command(&opts, out, err)
        }
        Commands::Room { cmd } => {
            let (cfg, store) = open_store(store_override)?;
            match cmd {
                RoomCommand::Create { player, name } => {
                    handle_room_create_command(&store, &cfg, &player, name.as_deref(), out)
                }
                RoomCommand::Join { room, player, name } => {
                    handle_room_join_command(&store, &room, &player, name.as_deref(), out)
                }
            }
        }
        Commands::Rooms => {
            let (_, store) = open_store(store_override)?;
            handle_rooms_command(&store, out)
        }
        Commands::Start { room, seed, player } => {
            let (cfg, store) = open_store(store_override)?;
            handle_start_command(&store, &room, resolve_seed(seed, &cfg), player.as_deref(), out)
        }
        Commands::Act {
            room,
            player,
            action,
            to,
        } => {
            let (_, store) = open_store(store_override)?;
            handle_act_command(&store, &room, &player, action, to, out)
        }
        Commands::Show { room, player, json } => {
            let (_, store) = open_store(store_override)?;
            handle_show_command(&store, &room, player.as_deref(), json, out)
        }
    }
}

fn open_store(store_override: Option<PathBuf>) -> Result<(Config, RoomStore), CliError> {
    let cfg = config::load()?;
    let dir = store_override.unwrap_or_else(|| cfg.store.clone());
    let store = RoomStore::open(dir)?;
    Ok((cfg, store))
}

/// Explicit seed, else the configured one, else fresh entropy.
fn resolve_seed(explicit: Option<u64>, cfg: &Config) -> u64 {
    explicit.or(cfg.seed).unwrap_or_else(rand::random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_command_parses() {
        let commands = vec![
            vec!["holdem", "room", "create", "--player", "a"],
            vec!["holdem", "room", "join", "r1", "--player", "b"],
            vec!["holdem", "rooms"],
            vec!["holdem", "start", "r1"],
            vec!["holdem", "act", "r1", "--player", "a", "call"],
            vec!["holdem", "act", "r1", "--player", "a", "raise", "--to", "8"],
            vec!["holdem", "act", "r1", "--player", "a", "all-in"],
            vec!["holdem", "show", "r1", "--player", "a"],
            vec!["holdem", "eval", "Ah", "Kh", "Qh", "Jh", "10h"],
            vec!["holdem", "deal", "--seed", "1"],
            vec!["holdem", "sim", "--hands", "1"],
            vec!["holdem", "stats", "--input", "x.jsonl"],
            vec!["holdem", "cfg"],
        ];
        for args in commands {
            assert!(HoldemCli::try_parse_from(&args).is_ok(), "Failed to parse: {:?}", args);
        }
        assert_eq!(COMMANDS.len(), 10);
    }

    #[test]
    fn raise_requires_a_target() {
        let res = HoldemCli::try_parse_from(["holdem", "act", "r1", "--player", "a", "raise"]);
        assert!(res.is_err());
    }

    #[test]
    fn player_counts_are_bounded() {
        assert!(HoldemCli::try_parse_from(["holdem", "deal", "--players", "11"]).is_err());
        let args = ["holdem", "sim", "--hands", "1", "--players", "1"];
        assert!(HoldemCli::try_parse_from(args).is_err());
    }

    #[test]
    fn explicit_seed_wins() {
        let cfg = Config {
            seed: Some(5),
            ..Config::default()
        };
        assert_eq!(resolve_seed(Some(9), &cfg), 9);
        assert_eq!(resolve_seed(None, &cfg), 5);
    }
}
