use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested} cards, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
}

/// Anything that can hand out unique cards for a single hand.
///
/// The orchestrator only depends on this trait, so tests and replays can stack
/// the deck.
pub trait CardSource {
    /// Shuffle what is left and draw `n` cards without replacement.
    fn shuffle_and_draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError>;

    /// Restore a full 52-card set for the next hand.
    fn reset(&mut self);
}

/// A standard 52-card deck that owns its shuffling RNG.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// A full deck seeded from the thread RNG.
    ///
    /// ```
    /// use holdem_rs::deck::Deck;
    ///
    /// let deck = Deck::fresh();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn fresh() -> Self {
        Self::seeded(rand::rng().random())
    }

    /// A full deck whose shuffles are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        Self { cards: full_set(), rng }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards not yet dealt, in current deck order.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    /// Uniform permutation of the remaining cards. The RNG advances between
    /// calls, so repeated shuffles never replay the same order.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Remove and return `count` cards from the top of the deck.
    /// Fails without touching the deck when fewer than `count` remain.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::DeckExhausted { requested: count, remaining: self.cards.len() });
        }
        let at = self.cards.len() - count;
        let mut drawn = self.cards.split_off(at);
        drawn.reverse();
        Ok(drawn)
    }

    /// Refill to a fresh 52-card set and shuffle it.
    pub fn reset(&mut self) {
        self.cards = full_set();
        self.shuffle();
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::fresh()
    }
}

impl CardSource for Deck {
    fn shuffle_and_draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        self.shuffle();
        self.draw(n)
    }

    fn reset(&mut self) {
        Deck::reset(self);
    }
}

/// A card source that deals a predetermined order, front first.
///
/// `reset` rewinds to the start of the script, so a stacked deck replays the
/// same deal every hand.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    script: Vec<Card>,
    next: usize,
}

impl StackedDeck {
    pub fn new(script: Vec<Card>) -> Self {
        Self { script, next: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.script.len() - self.next
    }
}

impl CardSource for StackedDeck {
    fn shuffle_and_draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.remaining() {
            return Err(DeckError::DeckExhausted { requested: n, remaining: self.remaining() });
        }
        let out = self.script[self.next..self.next + n].to_vec();
        self.next += n;
        Ok(out)
    }

    fn reset(&mut self) {
        self.next = 0;
    }
}

fn full_set() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for s in Suit::ALL {
        for r in Rank::ALL {
            cards.push(Card::new(r, s));
        }
    }
    cards
}
