//! Command handler modules for the quickdraw CLI.
//!
//! Each command lives in its own file and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, writing to the
//! `&mut dyn Write` streams it is given.

mod cfg;
mod deal;
mod eval;
mod play;
mod schedule;
mod synth;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use schedule::handle_schedule_command;
pub use synth::handle_synth_command;
