use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::SynthesisError;

/// The ten standard poker hand categories, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// Base score awarded to a malformed (not exactly five cards) hand.
pub const MALFORMED_BASE_POINTS: u32 = 5;

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            HandCategory::HighCard => "high_card",
            HandCategory::OnePair => "one_pair",
            HandCategory::TwoPair => "two_pair",
            HandCategory::ThreeOfAKind => "three_of_a_kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full_house",
            HandCategory::FourOfAKind => "four_of_a_kind",
            HandCategory::StraightFlush => "straight_flush",
            HandCategory::RoyalFlush => "royal_flush",
        }
    }

    /// Spaced so that the largest value bonus (70) never crosses a category.
    pub fn base_points(self) -> u32 {
        match self {
            HandCategory::HighCard => 100,
            HandCategory::OnePair => 200,
            HandCategory::TwoPair => 400,
            HandCategory::ThreeOfAKind => 600,
            HandCategory::Straight => 800,
            HandCategory::Flush => 1000,
            HandCategory::FullHouse => 1200,
            HandCategory::FourOfAKind => 1600,
            HandCategory::StraightFlush => 2000,
            HandCategory::RoyalFlush => 2500,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HandCategory {
    type Err = SynthesisError;

    /// Accepts display names ("Full House") and ids ("full_house"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HandCategory::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted) || c.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SynthesisError::UnknownCategory(s.to_string()))
    }
}

/// Classification of a held hand. Derived fresh on every evaluation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub category: HandCategory,
    pub cards: Vec<Card>,
    /// Raw sum of the card values
    pub value_bonus: u32,
    /// Category base score plus `value_bonus`
    pub total_points: u32,
}

/// Classifies a hand. Anything other than exactly five cards falls back to a
/// low-scoring High Card instead of failing.
pub fn evaluate_hand(cards: &[Card]) -> HandResult {
    let value_bonus: u32 = cards.iter().map(|c| c.value() as u32).sum();
    if cards.len() != 5 {
        return HandResult {
            category: HandCategory::HighCard,
            cards: cards.to_vec(),
            value_bonus,
            total_points: MALFORMED_BASE_POINTS + value_bonus,
        };
    }
    let category = classify(cards);
    HandResult {
        category,
        cards: cards.to_vec(),
        value_bonus,
        total_points: category.base_points() + value_bonus,
    }
}

pub fn compare_results(a: &HandResult, b: &HandResult) -> Ordering {
    match a.total_points.cmp(&b.total_points) {
        Ordering::Equal => a.category.cmp(&b.category),
        ord => ord,
    }
}

// First match wins; the order resolves hands that satisfy several checks.
fn classify(cards: &[Card]) -> HandCategory {
    let mut value_counts = [0u8; 15]; // 2..14 used
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for c in cards {
        value_counts[c.value() as usize] += 1;
        by_suit[c.suit.index()].push(c.value());
    }
    for values in by_suit.iter_mut() {
        values.sort_unstable();
        values.dedup();
    }

    let mut counts: Vec<u8> = value_counts.iter().copied().filter(|&n| n > 0).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let first = counts.first().copied().unwrap_or(0);
    let second = counts.get(1).copied().unwrap_or(0);

    let flush_suits = || by_suit.iter().filter(|v| v.len() >= 5);

    if flush_suits().any(|v| contains_all(v, &[10, 11, 12, 13, 14])) {
        return HandCategory::RoyalFlush;
    }
    if flush_suits().any(|v| best_straight_high(v).is_some()) {
        return HandCategory::StraightFlush;
    }
    if first == 4 {
        return HandCategory::FourOfAKind;
    }
    if first == 3 && second == 2 {
        return HandCategory::FullHouse;
    }
    if flush_suits().next().is_some() {
        return HandCategory::Flush;
    }
    let distinct: Vec<u8> = (2..=14).filter(|&v| value_counts[v as usize] > 0).collect();
    if best_straight_high(&distinct).is_some() {
        return HandCategory::Straight;
    }
    if first == 3 {
        return HandCategory::ThreeOfAKind;
    }
    if first == 2 && second == 2 {
        return HandCategory::TwoPair;
    }
    if first == 2 {
        return HandCategory::OnePair;
    }
    HandCategory::HighCard
}

fn contains_all(values: &[u8], wanted: &[u8]) -> bool {
    wanted.iter().all(|w| values.contains(w))
}

/// Highest card of the best five-long run in `values` (any order, duplicates
/// allowed). The wheel A-2-3-4-5 reports 5.
pub fn best_straight_high(values: &[u8]) -> Option<u8> {
    let mut v = values.to_vec();
    v.sort_unstable();
    v.dedup();
    let mut best = None;
    for window in v.windows(5) {
        if window[4] - window[0] == 4 {
            best = Some(window[4]);
        }
    }
    if best.is_none() && contains_all(&v, &[14, 2, 3, 4, 5]) {
        best = Some(5);
    }
    best
}
