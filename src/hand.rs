//! Hand scoring and the player and dealer hands.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Best score for a hand that does not bust.
pub const BLACKJACK: u8 = 21;

/// Scores a sequence of cards.
///
/// Every Ace counts 1 at first; one of them is raised to 11 if that keeps
/// the total at or below 21. No hand can count two Aces as 11 without
/// busting, so this equals counting all Aces as 11 and demoting them one at
/// a time while over 21. The result is not capped, so a busted hand scores
/// above 21.
///
/// ```
/// use twentyone::{Card, Rank, Suit, evaluate};
///
/// let ace = Card::new(Rank::Ace, Suit::Spades);
/// let king = Card::new(Rank::King, Suit::Hearts);
/// let nine = Card::new(Rank::Nine, Suit::Clubs);
/// assert_eq!(evaluate(&[ace, king]), 21);
/// assert_eq!(evaluate(&[ace, ace]), 12);
/// assert_eq!(evaluate(&[ace, ace, ace, nine]), 12);
/// ```
#[must_use]
pub fn evaluate(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Extra points an Ace is worth when counted as 11 instead of 1.
const SOFT_ACE_BONUS: u8 = 10;

/// Returns the score and whether an Ace is counted as 11.
fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut has_ace = false;

    for card in cards {
        let points = card.rank.fixed_value().unwrap_or_else(|| {
            has_ace = true;
            1
        });
        value = value.saturating_add(points);
    }

    if has_ace && value.saturating_add(SOFT_ACE_BONUS) <= BLACKJACK {
        (value + SOFT_ACE_BONUS, true)
    } else {
        (value, false)
    }
}

/// The player's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the order they were dealt.
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a hand holding the given cards.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate(&self.cards)
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Returns whether the hand is a natural: two cards worth 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The dealer's hand.
///
/// Only the first card is visible until the hole card is revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerHand {
    hand: Hand,
    /// Whether the hole card is revealed.
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hand: Hand::new(),
            hole_revealed: false,
        }
    }

    /// Creates a dealer hand holding the given cards, hole card hidden.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            hand: Hand::from_cards(cards),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.hand.cards().first()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Value of the full hand once revealed, `None` while the hole card is
    /// hidden.
    #[must_use]
    pub fn visible_value(&self) -> Option<u8> {
        self.hole_revealed.then(|| self.value())
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.hand.value()
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.hand.is_soft()
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.hand.is_bust()
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hand.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }
}
