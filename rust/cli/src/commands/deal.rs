//! Deal command: five cards off a freshly shuffled deck, ranked.

use crate::error::CliError;
use crate::ui::format_cards;
use quickdraw_engine::deck::Deck;
use quickdraw_engine::hand::evaluate_hand;
use std::io::Write;

pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(base_seed);
    deck.shuffle();
    let hand = deck.draw_n(5);
    let result = evaluate_hand(&hand);

    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "Hand: {}", format_cards(&hand))?;
    writeln!(
        out,
        "Rank: {} ({} points)",
        result.category, result.total_points
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_command_deterministic() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();

        handle_deal_command(Some(12345), &mut out1).unwrap();
        handle_deal_command(Some(12345), &mut out2).unwrap();

        assert_eq!(out1, out2, "Same seed should produce identical output");
    }

    #[test]
    fn test_deal_command_output_format() {
        let mut out = Vec::new();
        handle_deal_command(Some(999), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Seed: 999");
        assert!(lines[1].starts_with("Hand: "));
        assert_eq!(lines[1].split_whitespace().count(), 6);
        assert!(lines[2].starts_with("Rank: "));
    }

    #[test]
    fn test_deal_command_without_seed() {
        let mut out = Vec::new();
        assert!(handle_deal_command(None, &mut out).is_ok());
    }
}
