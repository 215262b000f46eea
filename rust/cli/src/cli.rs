//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use quickdraw_engine::session::GameMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "quickdraw",
    version,
    about = "Quickdraw five-card poker mini-game engine"
)]
pub struct QuickdrawCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal five cards from a freshly shuffled deck and rank them
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate a five-card hand, e.g. `eval As Ks Qs Js 10s`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Build a hand of the named category from a shuffled deck
    Synth {
        /// Category name or id, e.g. "Full House" or full_house
        category: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print goals, phases and speeds for the first levels
    Schedule {
        #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u32).range(1..=500))]
        levels: u32,
    },
    /// Autoplay a session through the selection gate
    Play {
        /// classic, blitz_fc, blitz_cb or ssc
        #[arg(long)]
        mode: Option<GameMode>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        hands: u32,
        /// Write every submitted hand as a JSONL record
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] =
        &["deal", "eval", "synth", "schedule", "play", "cfg"];
}
