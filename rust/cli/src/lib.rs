//! # Quickdraw CLI Library
//!
//! Command-line front end for the quickdraw five-card poker engine.
//!
//! The primary entry point is [`run`], which parses arguments and dispatches
//! to one of the subcommands:
//!
//! - `deal`: Deal five cards from a seeded deck and rank them
//! - `eval`: Rank a hand given as card tokens
//! - `synth`: Build a hand of a requested category (the power-up builder)
//! - `schedule`: Print goals, phases and speeds per level
//! - `play`: Autoplay a session through the selection gate
//! - `cfg`: Display the resolved configuration
//!
//! ```
//! use std::io;
//! let args = vec!["quickdraw", "eval", "As", "Ks", "Qs", "Js", "10s"];
//! let mut out = Vec::new();
//! let code = quickdraw_cli::run(args, &mut out, &mut io::stderr());
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Royal Flush"));
//! ```

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, QuickdrawCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_schedule_command, handle_synth_command,
};

pub use error::CliError;

/// Parses `args` and runs the chosen subcommand.
///
/// Returns `0` on success and `2` on any error; help and version output go
/// to `out` with code `0`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = QuickdrawCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Quickdraw Poker CLI").is_err()
                        || writeln!(err, "Usage: quickdraw <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in Commands::NAMES {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: quickdraw --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Deal { seed } => handle_deal_command(seed, out),
                Commands::Eval { cards } => handle_eval_command(&cards, out),
                Commands::Synth { category, seed } => handle_synth_command(&category, seed, out),
                Commands::Schedule { levels } => handle_schedule_command(levels, out),
                Commands::Play {
                    mode,
                    seed,
                    hands,
                    log,
                } => handle_play_command(mode, seed, hands, log, out, err),
                // cfg reports its own failures on `err`
                Commands::Cfg => {
                    return match handle_cfg_command(out, err) {
                        Ok(()) => exit_code::SUCCESS,
                        Err(_) => exit_code::ERROR,
                    };
                }
            };
            match result {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    tracing::debug!(error = %e, "command failed");
                    let _ = ui::write_error(err, &e.to_string());
                    exit_code::ERROR
                }
            }
        }
    }
}
