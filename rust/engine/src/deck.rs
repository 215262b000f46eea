use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::SynthesisError;
use crate::hand::HandCategory;
use crate::synth;

/// Unbiased in-place permutation: for `i` from the last index down to 1,
/// swap element `i` with a uniformly chosen element in `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Ordered undealt cards together with the seeded RNG that shuffles them.
///
/// # Examples
///
/// ```
/// use quickdraw_engine::deck::Deck;
///
/// let mut a = Deck::new_with_seed(7);
/// let mut b = Deck::new_with_seed(7);
/// a.shuffle();
/// b.shuffle();
/// assert_eq!(a.cards(), b.cards());
/// assert_eq!(a.len(), 52);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Full universe seeded from OS randomness, already shuffled.
    pub fn new_shuffled() -> Self {
        let mut deck = Self::new_with_seed(rand::random());
        deck.shuffle();
        deck
    }

    pub fn shuffle(&mut self) {
        fisher_yates(&mut self.cards, &mut self.rng);
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Removes `card`, keeping the order of the remaining cards.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Puts cards back into circulation and reshuffles.
    pub fn return_cards(&mut self, cards: &[Card]) {
        for card in cards {
            if !self.cards.contains(card) {
                self.cards.push(*card);
            }
        }
        self.shuffle();
    }

    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }

    /// Builds a hand of `category` from the undealt cards without removing them.
    pub fn synthesize(&mut self, category: HandCategory) -> Result<Vec<Card>, SynthesisError> {
        synth::synthesize(category, &self.cards, &mut self.rng)
    }
}
