//! Eval command: rank a hand given on the command line.

use crate::error::CliError;
use crate::ui::format_cards;
use quickdraw_engine::cards::Card;
use quickdraw_engine::hand::evaluate_hand;
use std::io::Write;

pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let hand = cards
        .iter()
        .map(|s| s.parse::<Card>())
        .collect::<Result<Vec<_>, _>>()?;
    if hand.len() != 5 {
        return Err(CliError::InvalidInput(format!(
            "expected 5 cards, got {}",
            hand.len()
        )));
    }
    for (i, card) in hand.iter().enumerate() {
        if hand[i + 1..].contains(card) {
            return Err(CliError::InvalidInput(format!("duplicate card {}", card)));
        }
    }

    let result = evaluate_hand(&hand);
    writeln!(out, "Hand: {}", format_cards(&result.cards))?;
    writeln!(out, "Category: {}", result.category)?;
    writeln!(
        out,
        "Points: {} base + {} card value = {}",
        result.category.base_points(),
        result.value_bonus,
        result.total_points
    )?;
    Ok(())
}
