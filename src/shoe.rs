//! The multi-deck shoe.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::card::{Card, Rank, Suit};
use crate::options::{DECKS, RESHUFFLE_THRESHOLD, SHOE_SIZE};

/// The undealt cards of a four-deck shoe.
///
/// Cards are drawn from the end of the sequence. A draw that finds fewer than
/// [`RESHUFFLE_THRESHOLD`] cards left first recomposes and reshuffles the full
/// shoe, so a caller only sees an empty draw if the shoe holds no cards at all.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a freshly composed and shuffled shoe.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::Shoe;
    ///
    /// let shoe = Shoe::new(7);
    /// assert_eq!(shoe.remaining(), 208);
    /// ```
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(SHOE_SIZE),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.reset();
        shoe
    }

    /// Creates a shoe holding exactly `cards`, in the given order.
    ///
    /// The last card of `cards` is the next one drawn. No shuffle is applied
    /// until the shoe falls below the reshuffle threshold.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            cards,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn compose() -> Vec<Card> {
        let mut cards = Vec::with_capacity(SHOE_SIZE);

        for _ in 0..DECKS {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards
    }

    /// Recomposes all decks and shuffles them.
    pub fn reset(&mut self) {
        self.cards = Self::compose();
        self.cards.shuffle(&mut self.rng);
        debug!(remaining = self.cards.len(), "shoe reshuffled");
    }

    /// Draws the next card.
    ///
    /// Reshuffles a full shoe first when fewer than [`RESHUFFLE_THRESHOLD`]
    /// cards remain. Returns `None` only if the shoe is empty.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }

        if self.cards.len() < RESHUFFLE_THRESHOLD {
            self.reset();
        }

        self.cards.pop()
    }

    /// Returns the number of undealt cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the undealt cards, next card last.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
