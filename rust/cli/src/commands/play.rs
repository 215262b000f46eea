//! # Play Command
//!
//! Scripted autoplay of one session. Every pick goes through the
//! [`SelectionGate`] the same way a touch screen would: each card is tapped
//! twice from two threads at once, and the gate keeps exactly one of the taps.
//!
//! The autoplayer looks at the top [`WINDOW`] undealt cards, holds the best
//! five of them and submits. A level closes as soon as its goal is met, or in
//! classic mode when fewer than five cards remain; an uncleared level ends the
//! game.

use crate::config;
use crate::error::CliError;
use crate::ui::{self, format_cards, format_stars};
use quickdraw_engine::cards::Card;
use quickdraw_engine::gate::SelectionGate;
use quickdraw_engine::hand::evaluate_hand;
use quickdraw_engine::logger::{HandLogger, HandRecord, TraceLog};
use quickdraw_engine::session::{GameMode, SessionState};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/// How many undealt cards the autoplayer considers per hand.
pub const WINDOW: usize = 7;

#[derive(Debug, Default)]
struct TapStats {
    taps: u32,
    accepted: u32,
}

pub fn handle_play_command(
    mode: Option<GameMode>,
    seed: Option<u64>,
    hands: u32,
    log: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".into()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let mode = mode.unwrap_or(cfg.mode);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut session = SessionState::with_rules(mode, seed, cfg.scoring.clone());
    while session.level() < cfg.level {
        session.advance_level();
    }
    let trace = Arc::new(TraceLog::default());
    let gate = SelectionGate::with_observer(session, trace.clone());
    let mut logger = match &log {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    writeln!(out, "Mode: {}  Seed: {}  Level: {}", mode, seed, cfg.level)?;
    let mut stats = TapStats::default();
    let mut played = 0;

    while played < hands {
        let snap = gate.snapshot();
        if snap.deck.len() < 5 {
            writeln!(out, "Level {}: deck exhausted", snap.level)?;
            if !finish_level(&gate, cfg.level_seconds, out)? {
                break;
            }
            continue;
        }

        let picks = choose_hand(&snap.deck);
        for card in &picks {
            double_tap(&gate, *card, &mut stats);
        }
        let held = gate.snapshot().selected_cards;
        if held.len() != 5 {
            ui::display_warning(err, &format!("only {} of 5 picks landed", held.len()))?;
        }

        let result = gate.submit_hand()?;
        played += 1;
        let after = gate.snapshot();
        writeln!(
            out,
            "Hand {:>3}: {:<18} {:<15} +{:<5} score {}",
            played,
            format_cards(&result.cards),
            result.category.to_string(),
            result.total_points,
            after.score
        )?;
        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            let record = HandRecord::from_result(id, mode, after.level, &result, after.score);
            logger.write(&record)?;
        }

        let goal = cfg.scoring.level_goal(after.level);
        if after.level_score >= goal as i64 && !finish_level(&gate, cfg.level_seconds, out)? {
            break;
        }
    }

    let blocked = trace
        .events()
        .iter()
        .filter(|e| e.reason.is_some())
        .count();
    tracing::debug!(blocked_in_trace = blocked, "autoplay finished");
    let summary = gate.end_game()?;
    writeln!(
        out,
        "Game over: score {} in {} hands, level {} {}",
        summary.score,
        summary.hands_played,
        summary.level,
        format_stars(summary.stars)
    )?;
    writeln!(
        out,
        "Taps: {} sent, {} accepted, {} dropped",
        stats.taps,
        stats.accepted,
        stats.taps - stats.accepted
    )?;
    Ok(())
}

/// Closes the current level and advances when it was cleared.
fn finish_level(
    gate: &SelectionGate,
    level_seconds: u32,
    out: &mut dyn Write,
) -> Result<bool, CliError> {
    let summary = gate.complete_level(level_seconds)?;
    writeln!(
        out,
        "Level {} {}: {} / {} (time +{}, leftovers -{})",
        summary.level,
        if summary.cleared { "cleared" } else { "failed" },
        summary.level_score,
        summary.goal,
        summary.time_bonus,
        summary.leftover_penalty
    )?;
    if summary.cleared {
        gate.advance_level()?;
    }
    Ok(summary.cleared)
}

// Two simultaneous taps on the same card; at most one may land.
fn double_tap(gate: &SelectionGate, card: Card, stats: &mut TapStats) {
    let accepted = thread::scope(|scope| {
        let taps: Vec<_> = (0..2).map(|_| scope.spawn(|| gate.select(card))).collect();
        taps.into_iter()
            .filter_map(|t| t.join().ok())
            .filter(|o| o.is_accepted())
            .count() as u32
    });
    stats.taps += 2;
    stats.accepted += accepted;
}

/// Best five cards among the top of the deck, by total points.
fn choose_hand(deck: &[Card]) -> Vec<Card> {
    let window = &deck[..deck.len().min(WINDOW)];
    let n = window.len();
    let mut best: Option<(u32, Vec<Card>)> = None;
    let mut idx = [0usize, 1, 2, 3, 4];
    if n < 5 {
        return window.to_vec();
    }
    loop {
        let hand: Vec<Card> = idx.iter().map(|&i| window[i]).collect();
        let points = evaluate_hand(&hand).total_points;
        if best.as_ref().is_none_or(|(p, _)| points > *p) {
            best = Some((points, hand));
        }
        let Some(pos) = (0..5).rev().find(|&i| idx[i] != i + n - 5) else {
            break;
        };
        idx[pos] += 1;
        for j in pos + 1..5 {
            idx[j] = idx[j - 1] + 1;
        }
    }
    best.map(|(_, hand)| hand).unwrap_or_default()
}
