//! Command handlers.
//!
//! Each command lives in its own module and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>` taking its
//! output streams as `&mut dyn Write`.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod room;
pub mod sim;
pub mod stats;
pub mod table;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use room::{handle_room_create_command, handle_room_join_command, handle_rooms_command};
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
pub use table::{handle_act_command, handle_show_command, handle_start_command};
