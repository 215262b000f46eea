//! Synth command: exercise the power-up hand builder against a full deck.

use crate::error::CliError;
use crate::ui::format_cards;
use quickdraw_engine::deck::Deck;
use quickdraw_engine::hand::{evaluate_hand, HandCategory};
use std::io::Write;

pub fn handle_synth_command(
    category: &str,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let category: HandCategory = category.parse()?;
    let base_seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(base_seed);
    deck.shuffle();

    let hand = deck.synthesize(category)?;
    let result = evaluate_hand(&hand);
    writeln!(out, "Requested: {}", category)?;
    writeln!(out, "Hand: {}", format_cards(&hand))?;
    writeln!(
        out,
        "Evaluates as: {} ({} points)",
        result.category, result.total_points
    )?;
    Ok(())
}
