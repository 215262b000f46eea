use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CardParseError;

/// Suit of a card. Suits carry no strength of their own.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    fn from_char(c: char) -> Option<Suit> {
        match c {
            'h' | 'H' | '♥' => Some(Suit::Hearts),
            'd' | 'D' | '♦' => Some(Suit::Diamonds),
            'c' | 'C' | '♣' => Some(Suit::Clubs),
            's' | 'S' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Face rank; the discriminant is the strength value (2..=14, Ace high).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        let rank = match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    fn from_label(s: &str) -> Option<Rank> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }
}

/// A single immutable playing card.
/// Its id is derived from rank and suit, so it is unique within the 52-card universe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Stable identifier such as `"10-hearts"` or `"A-spades"`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.rank.label(), self.suit.name())
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Accepts short forms like `AS`, `10h`, `Td` or `7♥`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let suit_char = trimmed
            .chars()
            .last()
            .ok_or_else(|| CardParseError::Malformed(s.to_string()))?;
        let suit =
            Suit::from_char(suit_char).ok_or_else(|| CardParseError::UnknownSuit(s.to_string()))?;
        let rank_part = &trimmed[..trimmed.len() - suit_char.len_utf8()];
        if rank_part.is_empty() {
            return Err(CardParseError::Malformed(s.to_string()));
        }
        let rank =
            Rank::from_label(rank_part).ok_or_else(|| CardParseError::UnknownRank(s.to_string()))?;
        Ok(Card { suit, rank })
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// The 52-card universe, suits outer and ranks inner.
pub fn full_deck() -> Vec<Card> {
    all_suits()
        .into_iter()
        .flat_map(|suit| all_ranks().into_iter().map(move |rank| Card { suit, rank }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_rank_dash_suit() {
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).id(), "10-hearts");
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).id(), "A-spades");
    }

    #[test]
    fn parses_short_forms() {
        let ace: Card = "AS".parse().unwrap();
        assert_eq!(ace, Card::new(Rank::Ace, Suit::Spades));
        let ten: Card = "10h".parse().unwrap();
        assert_eq!(ten, Card::new(Rank::Ten, Suit::Hearts));
        let t: Card = "Td".parse().unwrap();
        assert_eq!(t, Card::new(Rank::Ten, Suit::Diamonds));
        let seven: Card = "7♥".parse().unwrap();
        assert_eq!(seven, Card::new(Rank::Seven, Suit::Hearts));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!("".parse::<Card>(), Err(CardParseError::Malformed(_))));
        assert!(matches!("h".parse::<Card>(), Err(CardParseError::Malformed(_))));
        assert!(matches!("1h".parse::<Card>(), Err(CardParseError::UnknownRank(_))));
        assert!(matches!("Ax".parse::<Card>(), Err(CardParseError::UnknownSuit(_))));
    }

    #[test]
    fn display_uses_symbols() {
        assert_eq!(Card::new(Rank::Queen, Suit::Diamonds).to_string(), "Q♦");
    }
}
