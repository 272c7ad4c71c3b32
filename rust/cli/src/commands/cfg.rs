//! `cfg`: print the resolved configuration with the source of each value.
//!
//! ```json
//! {
//!   "starting_stack": { "value": 200, "source": "default" },
//!   "seed": { "value": 7, "source": "env" },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config;
use crate::error::CliError;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_stack": { "value": config.starting_stack, "source": sources.starting_stack },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "min_players": { "value": config.min_players, "source": sources.min_players },
        "max_players": { "value": config.max_players, "source": sources.max_players },
        "seed": { "value": config.seed, "source": sources.seed },
        "store": { "value": config.store.display().to_string(), "source": sources.store },
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
