//! A single deck with uniform-random draws.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};

/// The cards not yet dealt in the current round.
///
/// A fresh deck holds each of the 52 cards exactly once. Cards only ever
/// leave the deck; it is never replenished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a full deck of 52 distinct cards.
    #[must_use]
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Creates a deck holding only the given cards.
    ///
    /// Useful for replaying a known situation. Duplicates are dropped so the
    /// deck keeps its no-duplicates invariant.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut deck = Self { cards: Vec::new() };
        for card in cards {
            if !deck.contains(&card) {
                deck.cards.push(card);
            }
        }
        deck
    }

    /// Removes and returns a card chosen uniformly at random from the
    /// remaining cards, or `None` if the deck is empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.cards.len());
        Some(self.cards.swap_remove(index))
    }

    /// Returns the remaining cards. Their order carries no meaning.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns whether the card is still in the deck.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Returns the number of remaining cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
