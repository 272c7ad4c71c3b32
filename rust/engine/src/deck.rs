use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// An ordered sequence of unique cards. Cards are dealt from the tail and the
/// deck is never replenished during a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

/// A fresh 52-card deck in canonical order.
pub fn create_deck() -> Deck {
    Deck { cards: full_deck() }
}

/// Returns a uniformly random permutation of `deck` (Fisher–Yates) without
/// touching the input.
pub fn shuffle<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Deck {
    let mut cards = deck.cards.clone();
    for i in (1..cards.len()).rev() {
        let j = rng.random_range(0..=i);
        cards.swap(i, j);
    }
    Deck { cards }
}

impl Deck {
    /// Builds a deck from an explicit order. The last card is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// A canonical deck shuffled with a ChaCha20 stream seeded from `seed`.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        shuffle(&create_deck(), &mut rng)
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        (0..n).map(|_| self.deal_card()).collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
