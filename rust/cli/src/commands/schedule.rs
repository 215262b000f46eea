//! Schedule command: the level ladder under the configured scoring rules.

use crate::config;
use crate::error::CliError;
use quickdraw_engine::rules::{Phase, ScoringRules};
use std::io::Write;

pub fn handle_schedule_command(levels: u32, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    write_schedule(&cfg.scoring, levels, out)
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Static => "static",
        Phase::Conveyor => "conveyor",
        Phase::Falling => "falling",
    }
}

fn write_schedule(rules: &ScoringRules, levels: u32, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{:>5}  {:>6}  {:<8}  {:>5}", "level", "goal", "phase", "speed")?;
    for level in 1..=levels {
        writeln!(
            out,
            "{:>5}  {:>6}  {:<8}  {:>5.2}",
            level,
            rules.level_goal(level),
            phase_label(rules.phase(level)),
            rules.speed(level)
        )?;
    }
    Ok(())
}
