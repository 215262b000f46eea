//! Power-up hand synthesis: build one concrete hand of a requested category
//! from a pool of available cards.
//!
//! The pool is shuffled before every search so repeated requests against the
//! same pool do not keep producing the same hand. A pool that cannot supply the
//! category yields [`SynthesisError::Unavailable`]; that is a normal outcome.

use rand::Rng;

use crate::cards::Card;
use crate::deck::fisher_yates;
use crate::errors::SynthesisError;
use crate::hand::{best_straight_high, evaluate_hand, HandCategory};

// Low card of the ten-to-ace run.
const ROYAL_LOW: u8 = 10;

pub fn synthesize<R: Rng + ?Sized>(
    category: HandCategory,
    pool: &[Card],
    rng: &mut R,
) -> Result<Vec<Card>, SynthesisError> {
    let mut shuffled: Vec<Card> = Vec::with_capacity(pool.len());
    for card in pool {
        if !shuffled.contains(card) {
            shuffled.push(*card);
        }
    }
    fisher_yates(&mut shuffled, rng);

    let hand = match category {
        HandCategory::HighCard => high_card(&shuffled),
        HandCategory::OnePair => of_a_kind(&shuffled, 2),
        HandCategory::TwoPair => two_pair(&shuffled),
        HandCategory::ThreeOfAKind => of_a_kind(&shuffled, 3),
        HandCategory::Straight => straight(&shuffled, rng),
        HandCategory::Flush => flush(&shuffled),
        HandCategory::FullHouse => full_house(&shuffled),
        HandCategory::FourOfAKind => of_a_kind(&shuffled, 4),
        HandCategory::StraightFlush => straight_flush(&shuffled, rng),
        HandCategory::RoyalFlush => royal_flush(&shuffled),
    };

    match hand {
        Some(cards) => {
            tracing::trace!(category = %category, hand = ?cards, "synthesized hand");
            Ok(cards)
        }
        None => Err(SynthesisError::Unavailable { category }),
    }
}

/// Same as [`synthesize`] but takes a category name such as `"Full House"`.
pub fn synthesize_named<R: Rng + ?Sized>(
    name: &str,
    pool: &[Card],
    rng: &mut R,
) -> Result<Vec<Card>, SynthesisError> {
    let category: HandCategory = name.parse()?;
    synthesize(category, pool, rng)
}

// Groups in first-seen order so the caller's shuffle carries through.
fn group_by_value(cards: &[Card]) -> Vec<Vec<Card>> {
    let mut groups: Vec<Vec<Card>> = Vec::new();
    for &card in cards {
        match groups.iter_mut().find(|g| g[0].value() == card.value()) {
            Some(group) => group.push(card),
            None => groups.push(vec![card]),
        }
    }
    groups
}

fn group_by_suit(cards: &[Card]) -> Vec<Vec<Card>> {
    let mut groups: Vec<Vec<Card>> = Vec::new();
    for &card in cards {
        match groups.iter_mut().find(|g| g[0].suit == card.suit) {
            Some(group) => group.push(card),
            None => groups.push(vec![card]),
        }
    }
    groups
}

/// Picks `n` cards outside `hand`, preferring fresh values that do not repeat
/// among themselves so they cannot upgrade the hand.
fn kickers(pool: &[Card], hand: &[Card], n: usize) -> Option<Vec<Card>> {
    let mut picked: Vec<Card> = Vec::with_capacity(n);
    for &card in pool {
        if picked.len() == n {
            break;
        }
        let value_taken = hand.iter().chain(picked.iter()).any(|c| c.value() == card.value());
        if !value_taken {
            picked.push(card);
        }
    }
    for &card in pool {
        if picked.len() == n {
            break;
        }
        if !hand.contains(&card) && !picked.contains(&card) {
            picked.push(card);
        }
    }
    (picked.len() == n).then_some(picked)
}

fn of_a_kind(pool: &[Card], size: usize) -> Option<Vec<Card>> {
    let groups = group_by_value(pool);
    let group = groups.iter().find(|g| g.len() >= size)?;
    let mut hand: Vec<Card> = group[..size].to_vec();
    let extra = kickers(pool, &hand, 5 - size)?;
    hand.extend(extra);
    Some(hand)
}

fn two_pair(pool: &[Card]) -> Option<Vec<Card>> {
    let groups = group_by_value(pool);
    let mut pairs = groups.iter().filter(|g| g.len() >= 2);
    let first = pairs.next()?;
    let second = pairs.next()?;
    let mut hand: Vec<Card> = first[..2].iter().chain(second[..2].iter()).copied().collect();
    hand.extend(kickers(pool, &hand, 1)?);
    Some(hand)
}

fn full_house(pool: &[Card]) -> Option<Vec<Card>> {
    let groups = group_by_value(pool);
    for (i, trips) in groups.iter().enumerate() {
        if trips.len() < 3 {
            continue;
        }
        let pair = groups
            .iter()
            .enumerate()
            .find(|(j, g)| *j != i && g.len() >= 2)
            .map(|(_, g)| g)?;
        let mut hand = trips[..3].to_vec();
        hand.extend_from_slice(&pair[..2]);
        return Some(hand);
    }
    None
}

/// Every five-long run available in `values`, identified by its low card
/// (1 stands for the wheel's low ace).
fn run_lows(values: &[u8]) -> Vec<u8> {
    let has = |v: u8| values.contains(&if v == 1 { 14 } else { v });
    (1..=10u8).filter(|&low| (low..low + 5).all(has)).collect()
}

fn run_values(low: u8) -> [u8; 5] {
    let mut out = [0u8; 5];
    for (i, slot) in out.iter_mut().enumerate() {
        let v = low + i as u8;
        *slot = if v == 1 { 14 } else { v };
    }
    out
}

fn straight<R: Rng + ?Sized>(pool: &[Card], rng: &mut R) -> Option<Vec<Card>> {
    let groups = group_by_value(pool);
    let values: Vec<u8> = groups.iter().map(|g| g[0].value()).collect();
    let lows = run_lows(&values);
    if lows.is_empty() {
        return None;
    }
    let low = lows[rng.random_range(0..lows.len())];
    let run = run_values(low);
    let members: Vec<&Vec<Card>> = run
        .iter()
        .filter_map(|v| groups.iter().find(|g| g[0].value() == *v))
        .collect();
    let mut hand: Vec<Card> = members.iter().map(|g| g[0]).collect();

    // One off-suit card keeps this a plain straight.
    let suit = hand[0].suit;
    if hand.iter().all(|c| c.suit == suit) {
        let swap = members.iter().enumerate().find_map(|(i, g)| {
            g.iter().find(|c| c.suit != suit).map(|c| (i, *c))
        });
        if let Some((i, card)) = swap {
            hand[i] = card;
        }
    }
    Some(hand)
}

fn flush(pool: &[Card]) -> Option<Vec<Card>> {
    let suited: Vec<Vec<Card>> = group_by_suit(pool)
        .into_iter()
        .filter(|g| g.len() >= 5)
        .collect();
    for group in &suited {
        let exact = first_combination(group, 5, |cards| {
            let values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
            best_straight_high(&values).is_none()
        });
        if exact.is_some() {
            return exact;
        }
    }
    // Only runs left in every suit: hand back a stronger suited hand.
    suited.first().map(|g| g[..5].to_vec())
}

fn straight_flush<R: Rng + ?Sized>(pool: &[Card], rng: &mut R) -> Option<Vec<Card>> {
    let mut royal_fallback = None;
    for group in group_by_suit(pool) {
        if group.len() < 5 {
            continue;
        }
        let values: Vec<u8> = group.iter().map(|c| c.value()).collect();
        let lows = run_lows(&values);
        let plain: Vec<u8> = lows.iter().copied().filter(|&low| low != ROYAL_LOW).collect();
        if plain.is_empty() {
            if !lows.is_empty() && royal_fallback.is_none() {
                royal_fallback = pick_suited_run(&group, ROYAL_LOW);
            }
            continue;
        }
        let low = plain[rng.random_range(0..plain.len())];
        return pick_suited_run(&group, low);
    }
    royal_fallback
}

fn royal_flush(pool: &[Card]) -> Option<Vec<Card>> {
    group_by_suit(pool)
        .into_iter()
        .find_map(|group| pick_suited_run(&group, ROYAL_LOW))
}

fn pick_suited_run(group: &[Card], low: u8) -> Option<Vec<Card>> {
    run_values(low)
        .iter()
        .map(|v| group.iter().find(|c| c.value() == *v).copied())
        .collect()
}

fn high_card(pool: &[Card]) -> Option<Vec<Card>> {
    let groups = group_by_value(pool);
    if groups.len() < 5 {
        return None;
    }
    let mut found = None;
    for_each_combination(groups.len(), 5, |idx| {
        let chosen: Vec<&Vec<Card>> = idx.iter().map(|&i| &groups[i]).collect();
        let values: Vec<u8> = chosen.iter().map(|g| g[0].value()).collect();
        if best_straight_high(&values).is_some() {
            return false;
        }
        let mut hand: Vec<Card> = chosen.iter().map(|g| g[0]).collect();
        let suit = hand[0].suit;
        if hand.iter().all(|c| c.suit == suit) {
            let swap = chosen.iter().enumerate().find_map(|(i, g)| {
                g.iter().find(|c| c.suit != suit).map(|c| (i, *c))
            });
            match swap {
                Some((i, card)) => hand[i] = card,
                None => return false,
            }
        }
        found = Some(hand);
        true
    });
    found
}

fn first_combination<T: Clone>(
    items: &[T],
    k: usize,
    mut accept: impl FnMut(&[T]) -> bool,
) -> Option<Vec<T>> {
    let mut found = None;
    for_each_combination(items.len(), k, |idx| {
        let picked: Vec<T> = idx.iter().map(|&i| items[i].clone()).collect();
        if accept(&picked) {
            found = Some(picked);
            true
        } else {
            false
        }
    });
    found
}

/// Visits k-index combinations of `0..n` in lexicographic order until `visit`
/// returns true.
fn for_each_combination(n: usize, k: usize, mut visit: impl FnMut(&[usize]) -> bool) {
    if k > n {
        return;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        if visit(&idx) {
            return;
        }
        let Some(pos) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return;
        };
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// True when `cards` is a legal synthesized hand for `category`: five distinct
/// cards that evaluate to `category` or better.
pub fn satisfies(category: HandCategory, cards: &[Card]) -> bool {
    let mut unique = cards.to_vec();
    unique.sort();
    unique.dedup();
    unique.len() == 5 && evaluate_hand(cards).category >= category
}
